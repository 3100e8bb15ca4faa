//! API routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::providers::ProviderError;
use crate::{prompt, triage, AppState};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RespondResponse {
    pub reply: String,
    pub high_interest: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Per-request failure kinds. Validation errors get an actionable message;
/// upstream failures are logged at the boundary and surfaced as an opaque
/// body, never leaking the cause to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("messages must not be empty")]
    EmptyMessages,

    #[error(transparent)]
    Upstream(#[from] ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::EmptyMessages => (StatusCode::BAD_REQUEST, "messages must not be empty"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "Something went wrong."),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn respond(
    State(state): State<AppState>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<RespondResponse>, ApiError> {
    let latest = request.messages.last().ok_or(ApiError::EmptyMessages)?;

    if !triage::is_relevant(latest) {
        return Ok(Json(RespondResponse {
            reply: state.fallbacks.pick().to_string(),
            high_interest: false,
        }));
    }

    let prompt = prompt::build_prompt(&state.corpus, latest);

    let reply = state.completions.complete(&prompt).await.map_err(|e| {
        tracing::error!("upstream completion failed: {}", e);
        e
    })?;

    let high_interest = triage::detect_interest(&request.messages);

    Ok(Json(RespondResponse {
        reply,
        high_interest,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/respond", post(respond))
}
