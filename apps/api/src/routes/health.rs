use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::config::Service;
use crate::state::AppState;

/// GET /
/// Liveness check: `{status, message}`.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let message = match state.config.service {
        Service::ResumeParser => "Resume backend running",
        Service::CoverLetter => "Cover letter backend running",
    };
    Json(json!({
        "status": "ok",
        "message": message
    }))
}
