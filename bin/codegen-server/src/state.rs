//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use codegen_gemini::GeminiClient;

use crate::config::Config;
use crate::entities::SqliteStore;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Users and generations.
    pub store: Arc<SqliteStore>,
    /// Upstream code generator.
    pub gemini: Arc<GeminiClient>,
}
