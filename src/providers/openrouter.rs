//! OpenRouter chat-completions client
//!
//! OpenRouter speaks the OpenAI chat completions format, so this also works
//! against any OpenAI-compatible endpoint by overriding the URL. One request
//! per completion, no streaming, no retries; every failure mode (transport,
//! timeout, non-2xx, shape mismatch) collapses into [`ProviderError`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;

use super::{CompletionClient, ProviderError};

/// Fixed system instruction sent alongside every composed prompt.
const SYSTEM_INSTRUCTION: &str = "You are a helpful visa support assistant.";

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 300;

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    // f64 so the fixed 0.7 serializes exactly, not as a widened f32
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenRouter provider configuration
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// Full URL of the chat-completions endpoint
    pub url: String,
    /// Bearer credential
    pub api_key: String,
    /// Model identifier (e.g. openai/gpt-3.5-turbo)
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Optional HTTP-Referer attribution header
    pub referer: Option<String>,
    /// Optional X-Title attribution header
    pub title: Option<String>,
}

impl From<&Config> for OpenRouterConfig {
    fn from(config: &Config) -> Self {
        Self {
            url: config.openrouter_api_url.clone(),
            api_key: config.openrouter_api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.upstream_timeout_secs,
            referer: config.http_referer.clone(),
            title: config.app_title.clone(),
        }
    }
}

pub struct OpenRouterProvider {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterProvider {
    pub fn new(config: OpenRouterConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl CompletionClient for OpenRouterProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let mut req_builder = self
            .client
            .post(&self.config.url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        if let Some(ref referer) = self.config.referer {
            req_builder = req_builder.header("HTTP-Referer", referer);
        }
        if let Some(ref title) = self.config.title {
            req_builder = req_builder.header("X-Title", title);
        }

        let response = req_builder.json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        extract_reply(&body)
    }
}

/// Pull `choices[0].message.content` out of a completion body and trim it.
fn extract_reply(body: &str) -> Result<String, ProviderError> {
    let completion: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".to_string()))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| ProviderError::InvalidResponse("Choice has no content".to_string()))?;

    Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_fixed_parameters() {
        let request = ChatCompletionRequest {
            model: "openai/gpt-3.5-turbo".to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: "Customer: hello\nAgent:".to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "openai/gpt-3.5-turbo");
        assert_eq!(value["temperature"], 0.7);
        // the wire payload must carry 0.7 exactly, no float widening artifact
        let wire = serde_json::to_string(&request).unwrap();
        assert!(wire.contains("\"temperature\":0.7"));
        assert_eq!(value["max_tokens"], 300);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
    }

    #[test]
    fn extract_reply_trims_whitespace() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "  Hi there!\n"}}]}"#;
        assert_eq!(extract_reply(body).unwrap(), "Hi there!");
    }

    #[test]
    fn empty_choices_is_invalid() {
        let err = extract_reply(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn missing_content_is_invalid() {
        let body = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        assert!(extract_reply(body).is_err());
    }

    #[test]
    fn garbage_body_is_invalid() {
        assert!(extract_reply("<html>bad gateway</html>").is_err());
    }
}
