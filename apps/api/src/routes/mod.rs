pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::{CorsOrigins, Service};
use crate::cover_letter::handlers::handle_cover_letter;
use crate::extraction::handlers::handle_parse_resume;
use crate::state::AppState;

/// Builds the router for whichever service `state.config` describes, with
/// tracing and CORS layers applied.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new().route("/", get(health::health_handler));
    let router = match config.service {
        Service::ResumeParser => router
            .route("/parse-resume", post(handle_parse_resume))
            .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        Service::CoverLetter => router.route("/cover-letter", post(handle_cover_letter)),
    };

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin {origin:?}");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}
