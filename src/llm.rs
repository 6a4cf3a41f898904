use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, Result};

pub const MODEL: &str = "llama3-8b-8192";

// Shared so repeated submissions reuse connections. No overall request
// timeout: a hung provider call is bounded only by the transport.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .build()
        .unwrap_or_default()
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Request body for the chat-completion endpoint. Everything except the
/// messages is fixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
    pub response_format: ResponseFormat,
    pub stop: Option<Vec<String>>,
}

impl ChatCompletionRequest {
    pub fn new(messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        Self {
            messages: messages.into_iter().collect(),
            model: MODEL.into(),
            temperature: 1.0,
            max_tokens: 1024,
            top_p: 1.0,
            stream: false,
            response_format: ResponseFormat { kind: "json_object".into() },
            stop: None,
        }
    }
}

/// A provider that answers one chat-completion request.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Returns the first choice's message content, `None` when the provider
    /// sent a choice without content.
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Option<String>>;
}

pub struct GroqClient {
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.groq_api_key.clone(), config.groq_base_url.clone())
    }
}

#[async_trait]
impl ChatClient for GroqClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Option<String>> {
        let res = CLIENT
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(provider_failure(status, res.text().await));
        }

        let json: serde_json::Value = res.json().await?;
        let choice = json["choices"]
            .get(0)
            .ok_or_else(|| AppError::LlmError("Invalid response format from LLM: no choices".to_string()))?;

        Ok(choice["message"]["content"].as_str().map(str::to_string))
    }
}

fn provider_failure<E: std::fmt::Display>(
    status: reqwest::StatusCode,
    body: std::result::Result<String, E>,
) -> AppError {
    match body {
        Ok(text) => AppError::LlmError(format!("Provider returned {}: {}", status, text)),
        Err(e) => AppError::LlmError(format!("Provider returned {} (body unreadable: {})", status, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn request() -> ChatCompletionRequest {
        ChatCompletionRequest::new([ChatMessage::system("sys"), ChatMessage::user("hi")])
    }

    #[test]
    fn request_carries_fixed_parameters() {
        let body = serde_json::to_value(request()).unwrap();
        assert_eq!(
            body,
            json!({
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ],
                "model": "llama3-8b-8192",
                "temperature": 1.0,
                "max_tokens": 1024,
                "top_p": 1.0,
                "stream": false,
                "response_format": {"type": "json_object"},
                "stop": null
            })
        );
    }

    #[tokio::test]
    async fn posts_to_chat_completions_with_bearer_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::PartialJson(json!({
                "model": "llama3-8b-8192",
                "stream": false,
                "response_format": {"type": "json_object"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"{\"One liner\":\"Hi\"}"}}]}"#)
            .create_async()
            .await;

        let client = GroqClient::new("secret", server.url());
        let content = client.complete(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(content.as_deref(), Some(r#"{"One liner":"Hi"}"#));
    }

    #[tokio::test]
    async fn missing_content_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
            .create_async()
            .await;

        let client = GroqClient::new("secret", server.url());
        assert_eq!(client.complete(&request()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = GroqClient::new("secret", server.url());
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::LlmError(_)));
    }

    #[test]
    fn unreadable_error_body_is_reported() {
        let err = provider_failure(reqwest::StatusCode::BAD_GATEWAY, Err("connection reset"));
        assert_eq!(
            err,
            AppError::LlmError("Provider returned 502 Bad Gateway (body unreadable: connection reset)".into())
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Invalid API Key"}}"#)
            .create_async()
            .await;

        let client = GroqClient::new("", server.url());
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::LlmError(msg) if msg.contains("401")));
    }
}
