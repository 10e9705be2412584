use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use resume_api::config::{Config, ProviderConfig, Service};
use resume_api::llm_client::LmStudioClient;
use resume_api::logging::DiagnosticLog;
use resume_api::routes::build_router;
use resume_api::server::run;
use resume_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing SERVER_API_HOST)
    let config = Config::from_env(Service::CoverLetter)?;

    let log = DiagnosticLog::open(&config.log_file)?;
    log.install(&config)?;

    info!("Starting cover letter service v{}", env!("CARGO_PKG_VERSION"));
    if let Some(url) = &config.frontend_url {
        info!("Frontend URL: {url}");
    }

    let gateway = match &config.provider {
        ProviderConfig::LmStudio { host, model } => LmStudioClient::new(host, model.as_str())?,
        other => anyhow::bail!(
            "Cover letter service requires an LM Studio provider, got {}",
            other.name()
        ),
    };
    gateway.probe().await;
    info!(
        "LM Studio client initialized (host: {}, model: {})",
        gateway.base_url(),
        gateway.model()
    );

    let app = build_router(AppState::new(Arc::new(gateway), config.clone()));
    run(&config, app, log).await
}
