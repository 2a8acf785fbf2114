use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::responder::{ChatReply, ChatRequest, Responder, ResponderError};
use crate::session::config::normalize_base_url;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub services: BTreeMap<String, ServiceHealth>,
}

/// Talks to the assistant backend over plain JSON HTTP.
#[derive(Debug, Clone)]
pub struct HttpResponder {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResponder {
    pub fn new(base_url: &str) -> Self {
        HttpResponder {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    pub async fn health(&self) -> Result<HealthReport, ResponderError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResponderError::Status(response.status()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Responder for HttpResponder {
    async fn reply(&self, message: &str) -> Result<ChatReply, ResponderError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = ChatRequest {
            message: message.to_string(),
        };

        debug!(%url, "sending chat request");
        let response = self
            .client
            .post(&url)
            .headers(Self::headers())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResponderError::Status(response.status()));
        }

        let body = response.text().await?;
        let reply: ChatReply = serde_json::from_str(&body)?;
        debug!(
            conversation_id = reply.conversation_id.as_deref().unwrap_or("-"),
            sources = reply.sources.as_ref().map_or(0, Vec::len),
            "chat reply received"
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_tolerates_extra_fields() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"response":"hola","conversation_id":"c-1","sources":["a.pdf"],"latency_ms":12}"#,
        )
        .unwrap();
        assert_eq!(reply.response, "hola");
        assert_eq!(reply.conversation_id.as_deref(), Some("c-1"));
        assert_eq!(reply.sources, Some(vec!["a.pdf".to_string()]));
    }

    #[test]
    fn reply_without_response_field_is_rejected() {
        let err = serde_json::from_str::<ChatReply>(r#"{"answer":"hola"}"#)
            .map_err(ResponderError::from)
            .unwrap_err();
        assert!(matches!(err, ResponderError::Decode(_)));
    }

    #[test]
    fn request_body_has_only_message() {
        let body = serde_json::to_value(ChatRequest {
            message: "¿Qué es el KPI?".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "message": "¿Qué es el KPI?" }));
    }

    #[test]
    fn base_url_is_normalized() {
        let responder = HttpResponder::new("http://localhost:8000/");
        assert_eq!(responder.base_url(), "http://localhost:8000");
    }

    #[test]
    fn health_report_without_services() {
        let report: HealthReport = serde_json::from_str(r#"{"status":"error","error":"boom"}"#).unwrap();
        assert_eq!(report.status, "error");
        assert!(report.services.is_empty());
    }
}
