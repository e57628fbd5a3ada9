use std::future::Future;
use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::classify::{classify, Classified};
use crate::config::AdkApiConfig;
use crate::error::{parse_error_message, AdkApiError};
use crate::events::{ControlSignal, StreamItem};
use crate::normalize::TraceNormalizer;
use crate::payload::{RunRequest, SessionRequest, SessionResponse};
use crate::sse::{SseFrame, SseFrameDecoder};
use crate::url::{run_sse_url, sessions_url};
use crate::utf8::Utf8StreamDecoder;

/// Optional cancellation signal shared across request and stream loops.
pub type CancellationSignal = Arc<AtomicBool>;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug)]
pub struct AdkApiClient {
    http: Client,
    config: AdkApiConfig,
}

impl AdkApiClient {
    pub fn new(config: AdkApiConfig) -> Result<Self, AdkApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(AdkApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AdkApiConfig {
        &self.config
    }

    fn build_headers(&self) -> Result<HeaderMap, AdkApiError> {
        let mut headers = HeaderMap::new();
        for (key, value) in &self.config.extra_headers {
            headers.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| AdkApiError::InvalidHeader(format!("invalid header key: {key}")))?,
                HeaderValue::from_str(value).map_err(|_| {
                    AdkApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(headers)
    }

    /// Create a run session seeded with `state`, returning its server id.
    pub async fn create_session(
        &self,
        user_id: &str,
        state: Value,
    ) -> Result<String, AdkApiError> {
        let url = sessions_url(&self.config.base_url, &self.config.app_name, user_id);
        let response = self
            .http
            .post(url)
            .headers(self.build_headers()?)
            .json(&SessionRequest { state })
            .send()
            .await
            .map_err(AdkApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdkApiError::Status(status, parse_error_message(status, &body)));
        }

        let session: SessionResponse = response.json().await.map_err(AdkApiError::from)?;
        session
            .id
            .filter(|id| !id.is_empty())
            .ok_or(AdkApiError::MissingSessionId)
    }

    /// Open one streaming run and drain it as the single cooperative
    /// consumer.
    ///
    /// Each decoded frame is classified and delivered to `on_item` in
    /// arrival order. A `completed`/`errored` control signal terminates the
    /// loop; frames arriving after it are not processed. When the transport
    /// closes, the decoder is flushed so an unterminated trailing frame is
    /// still dispatched. Returns the terminal control signal, if one was
    /// observed.
    pub async fn stream_run<F>(
        &self,
        request: &RunRequest,
        cancellation: Option<&CancellationSignal>,
        mut on_item: F,
    ) -> Result<Option<ControlSignal>, AdkApiError>
    where
        F: FnMut(StreamItem),
    {
        let url = run_sse_url(&self.config.base_url);
        let response = await_or_cancel(
            self.http
                .post(url)
                .headers(self.build_headers()?)
                .json(request)
                .send(),
            cancellation,
        )
        .await?
        .map_err(AdkApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = await_or_cancel(response.text(), cancellation)
                .await?
                .unwrap_or_default();
            return Err(AdkApiError::Status(status, parse_error_message(status, &body)));
        }

        debug!(app_name = %self.config.app_name, "run stream opened");

        self.drain_stream(response.bytes_stream(), cancellation, &mut on_item)
            .await
    }

    /// Drain a chunked byte stream through the decode/classify/normalize
    /// pipeline.
    ///
    /// Transport failure and cancellation both stop the read loop, but the
    /// flush-on-close dispatch still runs first so a pending frame is never
    /// discarded silently; the failure is returned only afterward.
    async fn drain_stream<S, B, E, F>(
        &self,
        mut stream: S,
        cancellation: Option<&CancellationSignal>,
        on_item: &mut F,
    ) -> Result<Option<ControlSignal>, AdkApiError>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: Into<AdkApiError>,
        F: FnMut(StreamItem),
    {
        let mut utf8 = Utf8StreamDecoder::default();
        let mut decoder = SseFrameDecoder::default();
        let mut normalizer = TraceNormalizer::default();
        let mut terminal = None;
        let mut stream_error = None;
        let mut cancelled = false;

        'read: loop {
            let next = match await_or_cancel(stream.next(), cancellation).await {
                Ok(next) => next,
                Err(_) => {
                    cancelled = true;
                    break;
                }
            };
            let Some(chunk) = next else {
                break;
            };
            if is_cancelled(cancellation) {
                cancelled = true;
                break;
            }
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(error) => {
                    stream_error = Some(error.into());
                    break;
                }
            };

            for frame in decoder.feed(&utf8.decode(chunk.as_ref()), false) {
                let stop = self.process_frame(frame, &mut normalizer, &mut terminal, on_item);
                if stop {
                    break 'read;
                }
            }
        }

        // Flush-on-close: a frame left pending when the transport closes,
        // fails, or is aborted must still be dispatched.
        if terminal.is_none() {
            for frame in decoder.feed(&utf8.finish(), true) {
                if self.process_frame(frame, &mut normalizer, &mut terminal, on_item) {
                    break;
                }
            }
        }

        if let Some(error) = stream_error {
            return Err(error);
        }
        if cancelled {
            return Err(AdkApiError::Cancelled);
        }

        debug!(terminal = ?terminal, "run stream closed");
        Ok(terminal)
    }

    fn process_frame<F>(
        &self,
        frame: SseFrame,
        normalizer: &mut TraceNormalizer,
        terminal: &mut Option<ControlSignal>,
        on_item: &mut F,
    ) -> bool
    where
        F: FnMut(StreamItem),
    {
        match classify(&frame, &self.config.control_labels) {
            Ok(Classified::Control(signal)) => {
                on_item(StreamItem::Control(signal));
                if signal.is_terminal() {
                    *terminal = Some(signal);
                    return true;
                }
            }
            Ok(Classified::Payload(value)) => {
                let events = normalizer.normalize(&value);
                if !events.is_empty() {
                    on_item(StreamItem::Events(events));
                }
            }
            Err(error) => {
                warn!(%error, event = ?frame.event, "dropping undecodable frame");
            }
        }

        false
    }
}

fn is_cancelled(cancel: Option<&CancellationSignal>) -> bool {
    cancel.is_some_and(|token| token.load(Ordering::Acquire))
}

async fn await_or_cancel<F>(
    future: F,
    cancellation: Option<&CancellationSignal>,
) -> Result<F::Output, AdkApiError>
where
    F: Future,
{
    if cancellation.is_none() {
        return Ok(future.await);
    }

    let mut future = Box::pin(future);

    loop {
        if is_cancelled(cancellation) {
            return Err(AdkApiError::Cancelled);
        }

        if let Ok(output) = tokio::time::timeout(CANCEL_POLL_INTERVAL, &mut future).await {
            if is_cancelled(cancellation) {
                return Err(AdkApiError::Cancelled);
            }
            return Ok(output);
        }
    }
}
