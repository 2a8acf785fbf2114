use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Successful reply. Only `response` is required; the backend may add more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("responder returned status {0}")]
    Status(StatusCode),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ResponderError {
    fn from(err: serde_json::Error) -> Self {
        ResponderError::Decode(format!("failed to parse JSON: {err}"))
    }
}

/// The external service that turns a user message into assistant text.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, message: &str) -> Result<ChatReply, ResponderError>;
}
