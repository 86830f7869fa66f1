pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::careers::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", post(handlers::handle_career_advice))
        .route("/analyze-resume", post(handlers::handle_analyze_resume))
        .route(
            "/generate-cover-letter",
            post(handlers::handle_generate_cover_letter),
        )
        .route("/analyze-skills", post(handlers::handle_analyze_skills))
        .with_state(state)
}

/// Cross-origin access for exactly one origin (the web front end).
pub fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("ALLOWED_ORIGIN '{origin}' is not a valid header value"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
