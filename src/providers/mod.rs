//! Upstream completion provider

pub mod openrouter;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Seam between the request handler and the external chat-completions API.
/// The handler only ever sees a prompt in and a reply (or error) out, which
/// keeps it testable against a mock upstream.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
