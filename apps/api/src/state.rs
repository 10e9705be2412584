use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelGateway;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Provider behind this service: Gemini for the parser, LM Studio for cover letters.
    pub gateway: Arc<dyn ModelGateway>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ModelGateway>, config: Config) -> Self {
        Self {
            gateway,
            config: Arc::new(config),
        }
    }
}
