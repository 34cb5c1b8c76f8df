//! Strategy Gate Binary
//!
//! Serves the strategy form controller over HTTP.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin strategy-gate
//! ```
//!
//! # Environment Variables
//!
//! - `STRATEGY_GATE_CONFIG`: Path to the YAML config (default: `config.yaml`,
//!   built-in defaults when absent)
//! - `RUST_LOG`: Log filter (overrides `observability.logging.level`)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use strategy_gate::config::{Config, resolve_config};
use strategy_gate::infrastructure::backtest_api::BacktestApiClient;
use strategy_gate::infrastructure::http::{AppState, create_router};
use strategy_gate::observability::{MetricsConfig, init_metrics};
use strategy_gate::telemetry::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv();

    let config = resolve_config().context("failed to load configuration")?;
    init_tracing(&config.observability.logging).context("failed to initialize tracing")?;

    tracing::info!("Starting strategy gate");
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) => tracing::debug!(error = %e, "No .env loaded"),
    }
    log_config(&config);

    if config.observability.metrics.enabled {
        let addr = SocketAddr::new(
            config
                .server
                .bind_address
                .parse()
                .context("invalid server.bind_address")?,
            config.observability.metrics.port,
        );
        init_metrics(&MetricsConfig::with_addr(addr)).context("failed to start metrics exporter")?;
    }

    let backtest = BacktestApiClient::new(&config.backend.to_api_config())
        .context("failed to create backtest client")?;
    tracing::info!(url = backtest.url(), "Backtest client initialized");

    let app = create_router(AppState {
        backtest: Arc::new(backtest),
        locale: config.display.locale,
        version: env!("CARGO_PKG_VERSION").to_string(),
    });

    let http_addr = config.server.http_addr();
    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST /api/v1/strategy/detect");
    tracing::info!("  POST /api/v1/strategy/preset");
    tracing::info!("  POST /api/v1/schemes/default-name");
    tracing::info!("  POST /api/v1/schemes/params");
    tracing::info!("  POST /api/v1/schemes/fill");
    tracing::info!("  POST /api/v1/backtest");

    let listener = TcpListener::bind(http_addr.as_str())
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Strategy gate stopped");
    Ok(())
}

/// Load `.env` from the working directory or its nearest ancestor.
///
/// Runs before tracing is up, so the outcome is returned for logging.
fn load_dotenv() -> Result<PathBuf, dotenvy::Error> {
    let first = match dotenvy::dotenv() {
        Ok(path) => return Ok(path),
        Err(e) => e,
    };

    let Ok(cwd) = std::env::current_dir() else {
        return Err(first);
    };
    cwd.ancestors()
        .skip(1)
        .map(|dir| dir.join(".env"))
        .find(|path| path.exists())
        .map_or(Err(first), |path| dotenvy::from_path(&path).map(|()| path))
}

/// Log the loaded configuration.
fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        backend = %config.backend.base_url,
        locale = ?config.display.locale,
        metrics_enabled = config.observability.metrics.enabled,
        "Configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotenv_found_in_parent_directory() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("apps").join("strategy-gate");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join(".env"),
            "STRATEGY_GATE_DOTENV_TEST=from-parent\n",
        )
        .unwrap();

        std::env::set_current_dir(&nested).unwrap();
        let loaded = load_dotenv().unwrap();

        assert_eq!(
            loaded.canonicalize().unwrap(),
            root.path().join(".env").canonicalize().unwrap()
        );
        assert_eq!(
            std::env::var("STRATEGY_GATE_DOTENV_TEST").as_deref(),
            Ok("from-parent")
        );
    }
}
