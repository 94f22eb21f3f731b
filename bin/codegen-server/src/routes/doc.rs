use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use utoipa::openapi::server::Server;
use utoipa::OpenApi;

use crate::routes::{api, health};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(info(
    title = "codegen-server",
    description = "Prompt-to-code generation API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs(public_api_url: Option<&str>) -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(api::api_docs());
    if let Some(url) = public_api_url {
        root.servers = Some(vec![Server::new(url)]);
    }
    root
}

/// `GET /api-docs/openapi.json`
pub async fn openapi_json(State(state): State<Arc<AppState>>) -> Json<utoipa::openapi::OpenApi> {
    Json(get_docs(state.config.public_api_url.as_deref()))
}
