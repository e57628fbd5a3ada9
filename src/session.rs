use adk_api::{
    AdkApiClient, AdkApiError, CancellationSignal, ControlSignal, RunRequest, StreamItem,
};
use tracing::debug;

use crate::present::{present_all, DisplayRecord};
use crate::store::TraceLog;

/// Current status of one run, as shown to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Waiting,
    Connecting,
    Running,
    Done,
    Error,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Connecting => "connecting",
            Self::Running => "running",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

/// Receives the rebuilt record list plus current status on every mutation.
///
/// The whole visible log is replaced each time rather than patched; event
/// volume per run is small and the full rebuild keeps rendering idempotent.
pub trait TraceSink {
    fn publish(&mut self, records: &[DisplayRecord], status: RunStatus);
}

/// State for one run: the append-only trace log plus the status machine
/// driven by control signals.
#[derive(Debug)]
pub struct RunSession {
    status: RunStatus,
    log: TraceLog,
}

impl Default for RunSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSession {
    pub fn new() -> Self {
        Self {
            status: RunStatus::Waiting,
            log: TraceLog::new(),
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn log(&self) -> &TraceLog {
        &self.log
    }

    /// Apply one stream item: control signals move the status machine,
    /// events append to the log.
    pub fn apply(&mut self, item: StreamItem) {
        match item {
            StreamItem::Control(signal) => {
                let status = match signal {
                    ControlSignal::SessionStarted => RunStatus::Running,
                    ControlSignal::Completed => RunStatus::Done,
                    ControlSignal::Errored => RunStatus::Error,
                };
                self.set_status(status);
            }
            StreamItem::Events(events) => self.log.append(events),
        }
    }

    /// Full-rebuild of the visible log, in snapshot order.
    pub fn records(&self) -> Vec<DisplayRecord> {
        present_all(&self.log.snapshot())
    }

    /// Discard all state from a prior run. Must be called before a new
    /// stream is attached; partial state must never leak across runs.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn set_status(&mut self, status: RunStatus) {
        if self.status != status {
            debug!(from = self.status.as_str(), to = status.as_str(), "run status changed");
            self.status = status;
        }
    }
}

/// Drive one run end to end: reset the session, open the stream, and
/// publish the rebuilt log to `sink` after every mutation.
///
/// Transport failures and streams that close without a terminal control
/// signal surface as a terminal `error` status; the decoder's flush-on-close
/// has already run by then, so no partial frame is discarded silently.
pub async fn attach_stream(
    client: &AdkApiClient,
    request: &RunRequest,
    session: &mut RunSession,
    sink: &mut dyn TraceSink,
    cancellation: Option<&CancellationSignal>,
) -> Result<(), AdkApiError> {
    session.reset();
    session.set_status(RunStatus::Connecting);
    sink.publish(&session.records(), session.status());

    let result = client
        .stream_run(request, cancellation, |item| {
            session.apply(item);
            sink.publish(&session.records(), session.status());
        })
        .await;

    match result {
        Ok(Some(_)) => Ok(()),
        Ok(None) => {
            session.set_status(RunStatus::Error);
            sink.publish(&session.records(), session.status());
            Ok(())
        }
        Err(AdkApiError::Cancelled) => Err(AdkApiError::Cancelled),
        Err(error) => {
            session.set_status(RunStatus::Error);
            sink.publish(&session.records(), session.status());
            Err(error)
        }
    }
}
