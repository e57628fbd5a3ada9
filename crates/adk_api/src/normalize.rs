use serde_json::Value;

use crate::events::{TraceEvent, TraceEventKind};

/// Extracts typed trace events from parsed payload frames.
///
/// Holds the id allocator so every extracted event gets a unique,
/// monotonically increasing id for the lifetime of one stream. Extraction is
/// defensive throughout: payload shapes vary across agents, and a missing or
/// mistyped field yields fewer events rather than an error.
#[derive(Debug, Default)]
pub struct TraceNormalizer {
    next_id: u64,
}

impl TraceNormalizer {
    /// Extract zero or more trace events from one frame payload.
    ///
    /// A single frame may legally carry a function call, a function
    /// response, and text segments at once; they are emitted in that order,
    /// each as an independent event with a distinct id.
    pub fn normalize(&mut self, value: &Value) -> Vec<TraceEvent> {
        let agent = value
            .get("author")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let parts = value
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array);

        let Some(parts) = parts else {
            return Vec::new();
        };

        let mut events = Vec::new();

        if let Some(call) = parts.iter().find_map(function_call_shape) {
            events.push(self.event(&agent, call));
        }
        if let Some(response) = parts.iter().find_map(function_response_shape) {
            events.push(self.event(&agent, response));
        }

        let segments: Vec<&str> = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();
        if !segments.is_empty() {
            events.push(self.event(
                &agent,
                TraceEventKind::Text {
                    content: segments.join(" "),
                },
            ));
        }

        events
    }

    fn event(&mut self, agent: &str, kind: TraceEventKind) -> TraceEvent {
        let id = self.next_id;
        self.next_id += 1;

        TraceEvent {
            id,
            sequence: 0,
            agent: agent.to_string(),
            kind,
        }
    }
}

fn function_call_shape(part: &Value) -> Option<TraceEventKind> {
    let call = part.get("functionCall").or_else(|| part.get("function_call"))?;

    Some(TraceEventKind::FunctionCall {
        name: shape_name(call),
        arguments: call
            .get("args")
            .or_else(|| call.get("arguments"))
            .cloned(),
    })
}

fn function_response_shape(part: &Value) -> Option<TraceEventKind> {
    let response = part
        .get("functionResponse")
        .or_else(|| part.get("function_response"))?;

    Some(TraceEventKind::FunctionResponse {
        name: shape_name(response),
        response: response.get("response").cloned(),
    })
}

fn shape_name(shape: &Value) -> String {
    shape
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::TraceNormalizer;
    use crate::events::TraceEventKind;

    #[test]
    fn empty_object_yields_no_events() {
        let mut normalizer = TraceNormalizer::default();
        assert!(normalizer.normalize(&json!({})).is_empty());
    }

    #[test]
    fn non_collection_parts_yield_no_events() {
        let mut normalizer = TraceNormalizer::default();
        let payload = json!({"author": "coder", "content": {"parts": "oops"}});

        assert!(normalizer.normalize(&payload).is_empty());
    }

    #[test]
    fn text_segments_join_into_one_event_with_attribution() {
        let mut normalizer = TraceNormalizer::default();
        let payload = json!({
            "author": "coder",
            "content": {"parts": [{"text": "hi"}, {"text": "there"}]}
        });

        let events = normalizer.normalize(&payload);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].agent, "coder");
        assert_eq!(
            events[0].kind,
            TraceEventKind::Text {
                content: "hi there".to_string(),
            }
        );
    }

    #[test]
    fn missing_author_leaves_attribution_empty() {
        let mut normalizer = TraceNormalizer::default();
        let payload = json!({"content": {"parts": [{"text": "hi"}]}});

        let events = normalizer.normalize(&payload);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].agent, "");
    }

    #[test]
    fn call_and_text_in_one_frame_yield_two_events_call_first() {
        let mut normalizer = TraceNormalizer::default();
        let payload = json!({
            "author": "coder",
            "content": {"parts": [
                {"text": "running the tool"},
                {"functionCall": {"name": "get_commit_diff", "args": {"commit": "abc1234"}}}
            ]}
        });

        let events = normalizer.normalize(&payload);

        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0].kind,
            TraceEventKind::FunctionCall { name, .. } if name == "get_commit_diff"
        ));
        assert!(matches!(&events[1].kind, TraceEventKind::Text { .. }));
        assert!(events[0].id < events[1].id);
    }

    #[test]
    fn call_response_text_emit_in_fixed_relative_order() {
        let mut normalizer = TraceNormalizer::default();
        let payload = json!({
            "content": {"parts": [
                {"text": "done"},
                {"functionResponse": {"name": "write_file", "response": {"status": "success"}}},
                {"functionCall": {"name": "write_file", "args": {}}}
            ]}
        });

        let events = normalizer.normalize(&payload);

        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0].kind, TraceEventKind::FunctionCall { .. }));
        assert!(matches!(
            &events[1].kind,
            TraceEventKind::FunctionResponse { .. }
        ));
        assert!(matches!(&events[2].kind, TraceEventKind::Text { .. }));
    }

    #[test]
    fn only_first_function_call_part_is_extracted() {
        let mut normalizer = TraceNormalizer::default();
        let payload = json!({
            "content": {"parts": [
                {"functionCall": {"name": "first"}},
                {"functionCall": {"name": "second"}}
            ]}
        });

        let events = normalizer.normalize(&payload);

        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0].kind,
            TraceEventKind::FunctionCall { name, arguments: None } if name == "first"
        ));
    }

    #[test]
    fn snake_case_shapes_are_accepted() {
        let mut normalizer = TraceNormalizer::default();
        let payload = json!({
            "content": {"parts": [
                {"function_response": {"name": "build", "response": "ok"}}
            ]}
        });

        let events = normalizer.normalize(&payload);

        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0].kind,
            TraceEventKind::FunctionResponse { name, response: Some(value) }
                if name == "build" && value == &serde_json::json!("ok")
        ));
    }

    #[test]
    fn ids_increase_across_frames() {
        let mut normalizer = TraceNormalizer::default();
        let payload = json!({"content": {"parts": [{"text": "a"}]}});

        let first = normalizer.normalize(&payload);
        let second = normalizer.normalize(&payload);

        assert!(first[0].id < second[0].id);
    }
}
