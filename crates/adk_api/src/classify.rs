use serde_json::Value;

use crate::config::ControlLabels;
use crate::error::AdkApiError;
use crate::events::ControlSignal;
use crate::sse::SseFrame;

/// Classification outcome for one decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// The frame's label names a lifecycle transition; its payload, if any,
    /// is not inspected.
    Control(ControlSignal),
    /// Parsed structured payload, ready for normalization.
    Payload(Value),
}

/// Route a decoded frame to the control path or the payload path.
///
/// Unknown `event:` labels fall through to the payload path. A parse
/// failure is recoverable: the caller drops the frame and keeps reading.
pub fn classify(frame: &SseFrame, labels: &ControlLabels) -> Result<Classified, AdkApiError> {
    if let Some(signal) = frame.event.as_deref().and_then(|label| labels.signal_for(label)) {
        return Ok(Classified::Control(signal));
    }

    serde_json::from_str::<Value>(&frame.data)
        .map(Classified::Payload)
        .map_err(AdkApiError::FramePayload)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{classify, Classified};
    use crate::config::ControlLabels;
    use crate::events::ControlSignal;
    use crate::sse::SseFrame;

    fn frame(event: Option<&str>, data: &str) -> SseFrame {
        SseFrame {
            event: event.map(ToString::to_string),
            data: data.to_string(),
        }
    }

    #[test]
    fn control_labels_bypass_payload_parsing() {
        let labels = ControlLabels::default();
        let classified = classify(&frame(Some("session_created"), ""), &labels)
            .expect("control frame should classify");

        assert_eq!(
            classified,
            Classified::Control(ControlSignal::SessionStarted)
        );
    }

    #[test]
    fn control_frame_with_unparseable_payload_still_classifies() {
        let labels = ControlLabels::default();
        let classified = classify(&frame(Some("run_completed"), "not json\n"), &labels)
            .expect("control frame should classify");

        assert_eq!(classified, Classified::Control(ControlSignal::Completed));
    }

    #[test]
    fn unknown_label_takes_the_payload_path() {
        let labels = ControlLabels::default();
        let classified = classify(&frame(Some("message"), "{\"author\":\"coder\"}\n"), &labels)
            .expect("payload frame should classify");

        assert_eq!(classified, Classified::Payload(json!({"author": "coder"})));
    }

    #[test]
    fn unlabeled_payload_frame_parses() {
        let labels = ControlLabels::default();
        let classified = classify(&frame(None, "{\"a\":1}\n"), &labels)
            .expect("payload frame should classify");

        assert_eq!(classified, Classified::Payload(json!({"a": 1})));
    }

    #[test]
    fn malformed_payload_is_a_recoverable_error() {
        let labels = ControlLabels::default();
        let error = classify(&frame(None, "{\"a\":\n"), &labels)
            .expect_err("malformed payload should surface a decode error");

        assert!(error.to_string().contains("frame payload parse failure"));
    }
}
