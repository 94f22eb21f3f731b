//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a `{"error", "message"}` JSON body with an appropriate status code.
//!
//! **Security note:** Internal errors (database and transport failures) are
//! logged with full detail but only a generic message is returned to the
//! caller so that SQL or other implementation details never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use codegen_gemini::{ApiErrorKind, GeminiError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// All errors that can occur in the codegen-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The upstream generation call failed or returned an error payload.
    #[error("upstream error: {0}")]
    Upstream(#[source] GeminiError),

    /// The upstream call succeeded but produced no usable text.
    #[error("upstream returned no code")]
    GenerationEmpty,

    /// The request body exceeded the given number of bytes.
    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    /// Propagated from the SQLite (or other) store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<GeminiError> for ServerError {
    fn from(e: GeminiError) -> Self {
        match e {
            GeminiError::EmptyResponse => ServerError::GenerationEmpty,
            other => ServerError::Upstream(other),
        }
    }
}

impl ServerError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            // Client-facing errors: expose the message directly.
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, "Invalid input", m.clone()),
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, "Not found", m.clone()),
            ServerError::PayloadTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Payload too large",
                format!("Request body must not exceed {limit} bytes."),
            ),

            ServerError::Upstream(e) => {
                error!(error = %e, status = ?e.status(), kind = ?e.kind(), "upstream generation failed");
                upstream_parts(e)
            }
            ServerError::GenerationEmpty => {
                error!("upstream returned an empty generation");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Empty generation",
                    "The AI service returned no code. Try rephrasing the prompt.".to_owned(),
                )
            }

            // Internal errors: log the full detail, return a generic message.
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                internal()
            }
        }
    }
}

fn upstream_parts(e: &GeminiError) -> (StatusCode, &'static str, String) {
    match e {
        GeminiError::MissingApiKey => (
            StatusCode::UNAUTHORIZED,
            "Invalid API key",
            "The AI service API key is not configured.".to_owned(),
        ),
        GeminiError::Http(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Upstream error",
            "Failed to reach the AI service.".to_owned(),
        ),
        GeminiError::Api { status, kind, message } => match kind {
            ApiErrorKind::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid API key",
                "The AI service rejected the configured API key.".to_owned(),
            ),
            ApiErrorKind::QuotaExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "Quota exceeded",
                "The AI service quota has been exceeded. Please try again later.".to_owned(),
            ),
            ApiErrorKind::Other => (
                status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                "Upstream error",
                message.clone(),
            ),
        },
        // Mapped to GenerationEmpty before it gets here.
        GeminiError::EmptyResponse => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Empty generation",
            "The AI service returned no code.".to_owned(),
        ),
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
        "internal server error".to_owned(),
    )
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, label, message) = self.parts();
        (status, Json(json!({ "error": label, "message": message }))).into_response()
    }
}
