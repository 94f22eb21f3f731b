use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::handlers::codegen;
use crate::schemas::generation::{GenerateRequest, GenerationResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(generate_code),
    components(schemas(GenerateRequest, GenerationResponse))
)]
pub struct GenerateApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(generate_code))
}

/// Generate code for a prompt and store the result.
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generation stored", body = GenerationResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Upstream rejected the API key"),
        (status = 404, description = "Unknown userId"),
        (status = 429, description = "Upstream quota exceeded"),
        (status = 500, description = "Upstream or internal failure"),
    )
)]
pub async fn generate_code(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, ServerError> {
    let Json(req) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let input = req.into_input()?;
    let record = codegen::generate(state.store.as_ref(), &state.gemini, input).await?;
    Ok(Json(record.to_response(None)))
}
