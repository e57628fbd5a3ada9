use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the streaming run endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
    /// Default: true. The trace pipeline only consumes streamed runs.
    #[serde(default = "default_true")]
    pub streaming: bool,
    pub new_message: NewMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub role: String,
    pub parts: Vec<MessagePart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePart {
    pub text: String,
}

fn default_true() -> bool {
    true
}

impl RunRequest {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
            streaming: true,
            new_message: NewMessage {
                role: "user".to_string(),
                parts: vec![MessagePart { text: text.into() }],
            },
        }
    }
}

/// Body for session creation; `state` seeds the session's initial state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRequest {
    pub state: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionResponse {
    pub id: Option<String>,
}
