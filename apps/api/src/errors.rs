use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::llm_client::LlmError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Carries the client-facing message for the endpoint.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Model call failed: {0}")]
    ModelCallFailed(#[from] LlmError),

    #[error("Malformed JSON from model: {message}")]
    MalformedJson {
        message: &'static str,
        raw: Option<String>,
    },

    #[error("Unhandled error: {0}")]
    Unhandled(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, raw) = match self {
            AppError::MissingField(message) => (StatusCode::BAD_REQUEST, message, None),
            AppError::ModelCallFailed(e) => {
                tracing::error!("Model call failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE, None)
            }
            // Logged with the offending text where the failure is detected.
            AppError::MalformedJson { message, raw } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, raw)
            }
            AppError::Unhandled(e) => {
                tracing::error!("Unhandled error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE, None)
            }
        };

        let mut body = Map::new();
        body.insert("error".to_string(), json!(message));
        if let Some(raw) = raw {
            body.insert("raw".to_string(), Value::String(raw));
        }

        (status, Json(Value::Object(body))).into_response()
    }
}
