//! Transport-only client primitives for an ADK-style agent API server.
//!
//! This crate owns frame decoding, classification, and payload normalization
//! for the server's blank-line-delimited SSE run stream, plus the request
//! shapes and streaming client that drive one run. It contains no trace
//! storage and no rendering; those belong to the consuming crate.
//!
//! The decoder is correct under arbitrary transport fragmentation: a chunk
//! boundary may fall mid-line, mid-field, or mid-payload without changing
//! the dispatched frames.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod normalize;
pub mod payload;
pub mod sse;
pub mod url;
pub mod utf8;

pub use classify::{classify, Classified};
pub use client::{AdkApiClient, CancellationSignal};
pub use config::{AdkApiConfig, ControlLabels};
pub use error::AdkApiError;
pub use events::{ControlSignal, StreamItem, TraceEvent, TraceEventKind};
pub use normalize::TraceNormalizer;
pub use payload::RunRequest;
pub use sse::{SseFrame, SseFrameDecoder};
pub use url::{run_sse_url, sessions_url, DEFAULT_ADK_BASE_URL};
pub use utf8::Utf8StreamDecoder;
