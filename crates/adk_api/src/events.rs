use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle transition carried by a control frame. Control signals never
/// enter the trace log; they only drive run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlSignal {
    SessionStarted,
    Completed,
    Errored,
}

impl ControlSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionStarted => "session_started",
            Self::Completed => "completed",
            Self::Errored => "errored",
        }
    }

    /// True when the read loop must stop after this signal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Errored)
    }
}

/// Normalized record of one observable agent action.
///
/// `id` is assigned by the normalizer when the event is extracted;
/// `sequence` is assigned by the trace log on append and is strictly
/// increasing in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub id: u64,
    #[serde(default)]
    pub sequence: u64,
    pub agent: String,
    #[serde(flatten)]
    pub kind: TraceEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEventKind {
    Text {
        content: String,
    },
    FunctionCall {
        name: String,
        arguments: Option<Value>,
    },
    FunctionResponse {
        name: String,
        response: Option<Value>,
    },
}

/// Unit delivered to the stream consumer by the client read loop.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamItem {
    Control(ControlSignal),
    Events(Vec<TraceEvent>),
}

#[cfg(test)]
mod tests {
    use super::ControlSignal;

    #[test]
    fn terminal_detection_matches_lifecycle() {
        assert!(!ControlSignal::SessionStarted.is_terminal());
        assert!(ControlSignal::Completed.is_terminal());
        assert!(ControlSignal::Errored.is_terminal());
    }
}
