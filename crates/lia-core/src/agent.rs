use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub const ERR_API_KEY_INVALID: &str = "Invalid API key. Please check your OpenAI API key.";
pub const ERR_RATE_LIMITED: &str = "Rate limit exceeded. Please try again later.";
pub const ERR_SERVICE_UNAVAILABLE: &str = "OpenAI service error. Please try again later.";
pub const ERR_GENERIC: &str = "An error occurred while processing your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }
}

/// Per-request overrides sent by the browser. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatOptions {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
}

/// Body of a chat-completions call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("provider returned {status}: {body}")]
    Http { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("could not decode provider response: {0}")]
    Decode(String),
    #[error("provider returned no choices")]
    EmptyResponse,
}

impl ChatError {
    /// Status to answer the browser with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http { status, .. } => *status,
            _ => 500,
        }
    }

    /// Message safe to show the user.
    pub fn user_message(&self) -> &'static str {
        match self.status_code() {
            401 => ERR_API_KEY_INVALID,
            429 => ERR_RATE_LIMITED,
            500 if matches!(self, Self::Http { .. }) => ERR_SERVICE_UNAVAILABLE,
            _ => ERR_GENERIC,
        }
    }
}

/// Build a request from config defaults and browser overrides.
/// Zero or missing temperature / max_tokens fall back to the configured values.
pub fn build_chat_request(
    config: &Config,
    messages: Vec<ChatMessage>,
    options: &ChatOptions,
) -> ChatRequest {
    ChatRequest {
        model: options
            .model
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| config.openai_model.clone()),
        messages,
        temperature: options
            .temperature
            .filter(|t| *t != 0.0)
            .unwrap_or(config.openai_temperature),
        max_tokens: options
            .max_tokens
            .filter(|n| *n != 0)
            .unwrap_or(config.openai_max_tokens),
        top_p: options.top_p,
        frequency_penalty: options.frequency_penalty,
        presence_penalty: options.presence_penalty,
    }
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ChatError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_override_config_defaults() {
        let config = Config::default();
        let opts: ChatOptions = serde_json::from_str(
            r#"{"model":"gpt-4o","max_tokens":100,"top_p":0.5,"systemMessage":"ignored"}"#,
        )
        .unwrap();
        let req = build_chat_request(&config, vec![ChatMessage::user("hi")], &opts);
        assert_eq!(req.model, "gpt-4o");
        assert_eq!(req.max_tokens, 100);
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.top_p, Some(0.5));

        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("systemMessage").is_none());
        assert!(json.get("presence_penalty").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn zero_values_use_defaults() {
        let config = Config::default();
        let opts = ChatOptions {
            temperature: Some(0.0),
            max_tokens: Some(0),
            ..Default::default()
        };
        let req = build_chat_request(&config, Vec::new(), &opts);
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_tokens, 500);
    }

    #[test]
    fn error_messages_follow_status() {
        let http = |status| ChatError::Http { status, body: String::new() };
        assert_eq!(http(401).user_message(), ERR_API_KEY_INVALID);
        assert_eq!(http(429).user_message(), ERR_RATE_LIMITED);
        assert_eq!(http(500).user_message(), ERR_SERVICE_UNAVAILABLE);
        assert_eq!(http(404).user_message(), ERR_GENERIC);
        assert_eq!(ChatError::Transport("x".into()).user_message(), ERR_GENERIC);
        assert_eq!(ChatError::EmptyResponse.status_code(), 500);
    }
}
