use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::handlers::codegen;
use crate::schemas::generation::UserResponse;
use crate::schemas::history::{HistoryQuery, HistoryResponse, Pagination};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_history),
    components(schemas(HistoryResponse, Pagination, UserResponse))
)]
pub struct HistoryApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/history", get(list_history))
}

/// Past generations, newest first.
#[utoipa::path(
    get,
    path = "/api/history",
    tag = "history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "History page", body = HistoryResponse),
        (status = 400, description = "Invalid page or limit"),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ServerError> {
    let Query(q) = query.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let request = q.into_page_request()?;
    Ok(Json(codegen::history(state.store.as_ref(), request).await?))
}
