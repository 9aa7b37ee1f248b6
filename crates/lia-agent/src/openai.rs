use async_trait::async_trait;
use lia_core::agent::{ChatBackend, ChatCompletion, ChatError, ChatMessage, ChatRequest, Usage};
use serde::Deserialize;
use tracing::{info, warn};

/// Calls an OpenAI-compatible `chat/completions` endpoint.
pub struct OpenAiBackend {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl OpenAiBackend {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout_secs: 60,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Tiny request used to check that the key and endpoint work.
pub fn connection_test_request(model: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user("Hello, this is a test.")],
        temperature: 0.7,
        max_tokens: 50,
        top_p: None,
        frequency_penalty: None,
        presence_penalty: None,
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ChatError> {
        info!(
            model = %request.model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "calling chat completions API"
        );

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let response = match client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!(timeout_secs = self.timeout_secs, "chat completion timed out");
                return Err(ChatError::Transport(format!(
                    "timed out after {}s",
                    self.timeout_secs
                )));
            },
            Err(e) => {
                warn!("chat completion request failed: {e}");
                return Err(ChatError::Transport(e.to_string()));
            },
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "chat completions returned non-200: {}", body);
            return Err(ChatError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Decode(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(ChatError::EmptyResponse)?
            .message
            .content
            .unwrap_or_default();

        info!(output_len = content.len(), "chat completion received");

        Ok(ChatCompletion {
            content,
            usage: parsed.usage,
        })
    }
}
