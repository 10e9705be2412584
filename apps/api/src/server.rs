use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use tokio::signal;
use tracing::info;

use crate::config::Config;
use crate::logging::DiagnosticLog;

/// Serves `app`, then closes the diagnostic log whether or not serving failed.
/// A serve error takes precedence over a close error.
pub async fn run(config: &Config, app: Router, log: DiagnosticLog) -> Result<()> {
    let served = serve(config, app).await;
    if let Err(e) = &served {
        tracing::error!("{} failed: {e:#}", config.service.name());
    }
    let closed = log.close();
    served.and(closed)
}

/// Binds the configured port and serves until Ctrl-C or SIGTERM.
pub async fn serve(config: &Config, app: Router) -> Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("{} listening on {addr}", config.service.name());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("{} stopped", config.service.name());
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
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
    info!("Shutdown signal received");
}
