//! Live execution-trace log for streamed agent runs.
//!
//! `adk_api` turns the raw SSE byte stream into typed trace events; this
//! crate stores them append-only, maps them to display records, and drives
//! the run status machine. Rendering is a full rebuild from the log snapshot
//! on every mutation, so re-rendering without new arrivals is idempotent by
//! construction.

pub mod present;
pub mod session;
pub mod store;

pub use adk_api;
pub use present::{present, present_all, DisplayRecord, StatusTag};
pub use session::{attach_stream, RunSession, RunStatus, TraceSink};
pub use store::TraceLog;
