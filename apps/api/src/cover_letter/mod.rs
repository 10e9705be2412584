//! Cover letter generation: sanitize JD → render résumé → model call → text.
//! All model calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod render;
pub mod sanitizer;

use tracing::{debug, info};

use crate::cover_letter::prompts::{build_user_message, COVER_LETTER_SYSTEM};
use crate::cover_letter::render::render_resume;
use crate::cover_letter::sanitizer::sanitize_job_description;
use crate::errors::AppError;
use crate::llm_client::{ModelGateway, ModelRequest};
use crate::models::CoverLetterRequest;

/// Generates a cover letter for the résumé and job description. Tolerates an
/// empty JD and any missing résumé field; only provider failures are errors.
pub async fn generate_cover_letter(
    gateway: &dyn ModelGateway,
    request: CoverLetterRequest,
) -> Result<String, AppError> {
    let job_description = sanitize_job_description(request.job_description.as_deref());
    let resume = request
        .resume_data
        .as_ref()
        .map(render_resume)
        .unwrap_or_default();

    info!(
        "Generating cover letter via {} (jd: {} chars, resume: {} chars)",
        gateway.provider(),
        job_description.len(),
        resume.len()
    );

    let model_request = ModelRequest::new(build_user_message(&resume, &job_description))
        .with_system(COVER_LETTER_SYSTEM);
    let response = gateway.invoke(model_request).await?;

    info!("Response type: {}", response.kind());
    let cover_letter = response.into_text();
    debug!("Response: {cover_letter}");

    Ok(cover_letter)
}
