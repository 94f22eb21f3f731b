//! HTTP service that turns a prompt into source code via Gemini and keeps a
//! browsable history of every generation in SQLite.
//!
//! All settings come from `CODEGEN_*` environment variables (see
//! [`config::Config::from_env`]). Migrations run on every start, so a fresh
//! database file is usable immediately.

mod config;
mod entities;
mod error;
mod handlers;
mod middleware;
mod routes;
mod schemas;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use codegen_gemini::GeminiClient;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::entities::SqliteStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env();

    init_tracing(&cfg);
    info!(version = env!("CARGO_PKG_VERSION"), "codegen-server starting");

    let store = SqliteStore::connect(&cfg.database_url, cfg.database_max_connections).await?;
    info!(database_url = %cfg.database_url, "database ready");

    let gemini = GeminiClient::new(cfg.gemini.clone());
    if !gemini.has_api_key() {
        warn!("no Gemini API key configured (CODEGEN_GEMINI_API_KEY); generation requests will fail with 401");
    }
    info!(model = gemini.model(), "generation client ready");

    let state = Arc::new(AppState {
        config: Arc::new(cfg.clone()),
        store: Arc::new(store),
        gemini: Arc::new(gemini),
    });

    let app = routes::build(Arc::clone(&state));
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, public_api_url = ?cfg.public_api_url, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // In-flight requests have drained; flush SQLite before exiting.
    state.store.close().await;

    info!("codegen-server stopped");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `CODEGEN_LOG`, and an unparsable `CODEGEN_LOG` falls back to `info`.
fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        cfg.log_level.parse::<EnvFilter>().unwrap_or_else(|e| {
            eprintln!("WARN: CODEGEN_LOG='{}' is not a valid filter ({e}); using 'info'", cfg.log_level);
            EnvFilter::new("info")
        })
    });

    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    if cfg.log_json {
        fmt.json().init();
    } else {
        fmt.init();
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => { s.recv().await; }
            Err(e)    => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c   => {}
        _ = terminate => {}
    }

    info!("shutdown requested; draining connections");
}
