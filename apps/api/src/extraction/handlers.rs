//! Axum route handlers for the Résumé Extraction API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract_resume;
use crate::models::ResumeData;
use crate::state::AppState;

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub success: bool,
    /// Provider that produced the extraction, e.g. `"gemini"`.
    pub method: &'static str,
    pub response_text: ResumeData,
}

/// POST /parse-resume
///
/// Multipart upload with the PDF in the `file` field.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let pdf_bytes = read_file_field(multipart).await?;
    info!("Received resume upload ({} bytes)", pdf_bytes.len());

    let resume = extract_resume(state.gateway.as_ref(), pdf_bytes).await?;

    Ok(Json(ParseResumeResponse {
        success: true,
        method: state.gateway.provider(),
        response_text: resume,
    }))
}

async fn read_file_field(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            return Ok(field.bytes().await?);
        }
    }
    Err(AppError::Input(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}
