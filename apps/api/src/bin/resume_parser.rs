use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use resume_api::config::{Config, ProviderConfig, Service};
use resume_api::llm_client::GeminiClient;
use resume_api::logging::DiagnosticLog;
use resume_api::routes::build_router;
use resume_api::server::run;
use resume_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing GEMINI_API_KEY)
    let config = Config::from_env(Service::ResumeParser)?;

    let log = DiagnosticLog::open(&config.log_file)?;
    log.install(&config)?;

    info!("Starting resume parser v{}", env!("CARGO_PKG_VERSION"));
    if let Some(url) = &config.frontend_url {
        info!("Frontend URL: {url}");
    }

    let gateway = match &config.provider {
        ProviderConfig::Gemini { api_key, model } => GeminiClient::new(api_key, model.as_str())?,
        other => anyhow::bail!(
            "Resume parser requires a Gemini provider, got {}",
            other.name()
        ),
    };
    info!("Gemini client initialized (model: {})", gateway.model());

    let app = build_router(AppState::new(Arc::new(gateway), config.clone()));
    run(&config, app, log).await
}
