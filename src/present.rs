use adk_api::{TraceEvent, TraceEventKind};
use serde::Serialize;
use serde_json::Value;

/// Status badge attached to function-result records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusTag {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "no data")]
    NoData,
}

impl StatusTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Pending => "pending",
            Self::NoData => "no data",
        }
    }
}

/// One rendered row of the visible trace log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_tag: Option<StatusTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_text: Option<String>,
}

/// Map one stored event to its display record. Pure: presenting the same
/// event twice yields identical records, which is what makes full-rebuild
/// rendering idempotent.
pub fn present(event: &TraceEvent) -> DisplayRecord {
    match &event.kind {
        TraceEventKind::FunctionCall { name, arguments } => DisplayRecord {
            title: format!("Function Call: {name}"),
            status_tag: None,
            detail_text: Some(match arguments {
                Some(arguments) => pretty(arguments),
                None => "No arguments".to_string(),
            }),
        },
        TraceEventKind::FunctionResponse { name, response } => DisplayRecord {
            title: format!("Function Result: {name}"),
            status_tag: Some(response_status_tag(response.as_ref())),
            detail_text: response.as_ref().map(pretty),
        },
        TraceEventKind::Text { content } => DisplayRecord {
            title: if event.agent.is_empty() {
                "Agent: Response".to_string()
            } else {
                format!("Agent: {}", event.agent)
            },
            status_tag: None,
            detail_text: Some(content.clone()),
        },
    }
}

/// Rebuild display records for the whole snapshot, in snapshot order.
pub fn present_all(snapshot: &[TraceEvent]) -> Vec<DisplayRecord> {
    snapshot.iter().map(present).collect()
}

fn response_status_tag(response: Option<&Value>) -> StatusTag {
    let Some(response) = response else {
        return StatusTag::NoData;
    };

    // A response without an explicit status field (including raw strings)
    // counts as successful.
    match response.get("status").and_then(Value::as_str) {
        None => StatusTag::Success,
        Some("success") => StatusTag::Success,
        Some("error") => StatusTag::Error,
        Some(_) => StatusTag::Pending,
    }
}

fn pretty(value: &Value) -> String {
    if let Value::String(raw) = value {
        return raw.clone();
    }

    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
