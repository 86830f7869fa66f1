//! Axum route handlers for the career endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use crate::careers::pipeline::run;
use crate::careers::use_cases::{
    UseCase, CAREER_ADVICE, COVER_LETTER, RESUME_ANALYSIS, SKILLS_ANALYSIS,
};
use crate::errors::AppError;
use crate::state::AppState;

type Body = Result<Json<Value>, JsonRejection>;

async fn serve(use_case: &UseCase, state: &AppState, body: Body) -> Result<Json<Value>, AppError> {
    // Unreadable bodies fall through to the generic 500, not a 4xx.
    let Json(body) = body.map_err(|e| anyhow::anyhow!("Unreadable request body: {e}"))?;
    let reply = run(use_case, &body, state.llm.as_ref(), state.config.llm_timeout).await?;
    Ok(Json(reply))
}

/// POST /
///
/// Career advice, tips and mock interview questions for `role`.
pub async fn handle_career_advice(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<Value>, AppError> {
    serve(&CAREER_ADVICE, &state, body).await
}

/// POST /analyze-resume
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<Value>, AppError> {
    serve(&RESUME_ANALYSIS, &state, body).await
}

/// POST /generate-cover-letter
///
/// Requires `resume`, `company` and `role`. Parse failures do not echo the raw reply.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<Value>, AppError> {
    serve(&COVER_LETTER, &state, body).await
}

/// POST /analyze-skills
///
/// Both `skills` and `interestedJobRoles` must be non-empty lists.
pub async fn handle_analyze_skills(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<Value>, AppError> {
    serve(&SKILLS_ANALYSIS, &state, body).await
}
