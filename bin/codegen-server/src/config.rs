//! Server configuration, loaded from environment variables at startup.

use codegen_gemini::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Runtime configuration for codegen-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind, assembled from `CODEGEN_HOST` and `CODEGEN_PORT`.
    pub bind_address: String,

    /// sqlx SQLite URL (default: `"sqlite://codegen.db"`).
    pub database_url: String,

    /// Upper bound on pooled database connections.
    pub database_max_connections: u32,

    /// Upstream generation API settings. The key is only checked for presence.
    pub gemini: GeminiConfig,

    /// Client-facing base URL of this API, advertised in the OpenAPI document.
    pub public_api_url: Option<String>,

    /// Comma-separated CORS origins; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve `/api-docs/openapi.json`.
    pub enable_api_docs: bool,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let host = env_or("CODEGEN_HOST", "0.0.0.0");
        let port: u16 = parse_env("CODEGEN_PORT", parse_env("PORT", 3001));
        Self {
            bind_address: format!("{host}:{port}"),
            database_url: env_first(&["CODEGEN_DATABASE_URL", "DATABASE_URL"])
                .unwrap_or_else(|| "sqlite://codegen.db".to_owned()),
            database_max_connections: parse_env("CODEGEN_DATABASE_MAX_CONNECTIONS", 5),
            gemini: GeminiConfig {
                api_key: env_first(&["CODEGEN_GEMINI_API_KEY", "GEMINI_API_KEY"]),
                model: env_or("CODEGEN_GEMINI_MODEL", DEFAULT_MODEL),
                base_url: env_or("CODEGEN_GEMINI_BASE_URL", DEFAULT_BASE_URL),
            },
            public_api_url: env_first(&["CODEGEN_PUBLIC_API_URL"]),
            cors_allowed_origins: env_first(&["CODEGEN_CORS_ORIGINS"]),
            enable_api_docs: parse_bool("CODEGEN_ENABLE_API_DOCS", true),
            log_level: env_or("CODEGEN_LOG", "info"),
            log_json: parse_bool("CODEGEN_LOG_JSON", false),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// First non-empty value among `keys`.
fn env_first(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| std::env::var(k).ok())
        .find(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
