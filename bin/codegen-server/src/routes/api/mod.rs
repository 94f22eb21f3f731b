pub mod generate;
pub mod history;

use crate::state::AppState;
use utoipa::OpenApi;

use axum::Router;
use std::sync::Arc;

/// Routes nested under `/api`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(generate::router())
        .merge(history::router())
}

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut spec = generate::GenerateApi::openapi();
    spec.merge(history::HistoryApi::openapi());
    spec
}
