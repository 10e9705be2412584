//! Axum route handlers for the Cover Letter API.

use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::cover_letter::generate_cover_letter;
use crate::errors::AppError;
use crate::models::CoverLetterRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
    pub success: bool,
}

/// POST /cover-letter
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let cover_letter = generate_cover_letter(state.gateway.as_ref(), request).await?;

    Ok(Json(CoverLetterResponse {
        cover_letter,
        success: true,
    }))
}
