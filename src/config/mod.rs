//! Application configuration

use std::env;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// OpenRouter API key, required at startup.
    pub openrouter_api_key: String,
    /// Chat-completions endpoint URL.
    pub openrouter_api_url: String,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Upper bound on the outbound provider call, in seconds.
    pub upstream_timeout_secs: u64,
    /// Path to the conversations corpus, read once at startup.
    pub corpus_path: String,
    /// Optional HTTP-Referer header for OpenRouter attribution.
    pub http_referer: Option<String>,
    /// Optional X-Title header for OpenRouter attribution.
    pub app_title: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let openrouter_api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENROUTER_API_KEY must be set"))?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            openrouter_api_key,
            openrouter_api_url: env::var("OPENROUTER_API_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1/chat/completions".into()),
            model: env::var("VISABOT_MODEL").unwrap_or_else(|_| "openai/gpt-3.5-turbo".into()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
            corpus_path: env::var("CORPUS_PATH")
                .unwrap_or_else(|_| "./data/conversations.json".into()),
            http_referer: env::var("HTTP_REFERER").ok(),
            app_title: env::var("APP_TITLE").ok(),
        })
    }
}
