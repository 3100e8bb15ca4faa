//! VisaBot - visa support chatbot API
//!
//! A single-endpoint service that triages inbound chat messages, builds a
//! few-shot prompt from historical support conversations, and delegates reply
//! generation to OpenRouter. Out-of-domain messages get a canned fallback
//! without touching the upstream provider.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod corpus;
mod prompt;
mod providers;
mod routes;
mod triage;

use config::Config;
use corpus::Corpus;
use providers::openrouter::{OpenRouterConfig, OpenRouterProvider};
use providers::CompletionClient;
use triage::FallbackReplies;

/// Application state shared across handlers. The corpus is loaded once at
/// startup and never mutated, so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<Corpus>,
    pub completions: Arc<dyn CompletionClient>,
    pub fallbacks: FallbackReplies,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visabot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // Startup-time hard failure: the service cannot run without its corpus.
    let corpus = Arc::new(Corpus::load(&config.corpus_path).map_err(|e| {
        anyhow::anyhow!("failed to load corpus from {}: {}", config.corpus_path, e)
    })?);

    tracing::info!(
        "Loaded {} conversation(s) from {}",
        corpus.len(),
        config.corpus_path
    );
    if corpus.is_empty() {
        tracing::warn!("corpus is empty; prompts will carry no examples");
    }

    let completions: Arc<dyn CompletionClient> =
        Arc::new(OpenRouterProvider::new(OpenRouterConfig::from(&config)));

    let state = AppState {
        corpus,
        completions,
        fallbacks: FallbackReplies,
    };

    let app = Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("VisaBot API running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
