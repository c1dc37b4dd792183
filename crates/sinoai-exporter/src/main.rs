//! SinoAI metrics exporter.
//!
//! - `/metrics`: request counters/latency, system and business gauges
//! - `/healthz`: liveness
//! - `/ui`: static dashboard when a static directory is present
//!
//! Config comes from `SINOAI_CONFIG` (or `sinoai.yaml`, or defaults); store
//! credentials come from the env vars named in the config.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use sinoai_core::error::{AnalyticsError, Result};
use sinoai_exporter::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), error = %e, "sinoai-exporter failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg_path = std::env::var("SINOAI_CONFIG").ok();
    let cfg = config::load(cfg_path.as_deref())?;
    let listen: SocketAddr = cfg.server.listen.parse().map_err(|e| {
        AnalyticsError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
    })?;

    let creds = config::StoreCredentials::from_env(&cfg.store);
    let state = app_state::AppState::from_credentials(cfg, creds)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "sinoai-exporter starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| AnalyticsError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AnalyticsError::Internal(format!("server failed: {e}")))?;

    tracing::info!("sinoai-exporter stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
