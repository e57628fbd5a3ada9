use std::fmt;

use reqwest::StatusCode;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum AdkApiError {
    InvalidHeader(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    /// Payload text of a non-control frame was not valid JSON. Recoverable:
    /// the caller logs it and drops the frame without stopping the stream.
    FramePayload(JsonError),
    MissingSessionId,
    Cancelled,
    Unknown(String),
}

impl fmt::Display for AdkApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeader(message) => write!(f, "invalid header: {message}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::FramePayload(error) => write!(f, "frame payload parse failure: {error}"),
            Self::MissingSessionId => write!(f, "no session id returned by the server"),
            Self::Cancelled => write!(f, "request was cancelled"),
            Self::Unknown(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for AdkApiError {}

impl From<reqwest::Error> for AdkApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

/// Extract a human-readable message from an error response body.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let message = value
            .get("detail")
            .or_else(|| value.get("error"))
            .and_then(|field| field.as_str())
            .filter(|message| !message.is_empty());
        if let Some(message) = message {
            return message.to_string();
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
