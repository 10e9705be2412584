//! Résumé extraction: PDF bytes → model call → fence-stripped JSON → `ResumeData`.
//! All model calls go through llm_client.

pub mod handlers;
pub mod normalizer;
pub mod prompts;

use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::normalizer::{normalize_resume, MalformedResponse};
use crate::extraction::prompts::RESUME_EXTRACTION_PROMPT;
use crate::llm_client::{Attachment, ModelGateway, ModelRequest, ModelResponse};
use crate::models::ResumeData;

/// Sends the PDF to the model and returns the résumé it extracted, with every
/// schema field present. An empty upload is rejected before any model call.
pub async fn extract_resume(
    gateway: &dyn ModelGateway,
    pdf_bytes: Bytes,
) -> Result<ResumeData, AppError> {
    if pdf_bytes.is_empty() {
        return Err(AppError::Input("Empty pdf_bytes provided".to_string()));
    }

    info!(
        "Extracting resume from {} byte PDF via {}",
        pdf_bytes.len(),
        gateway.provider()
    );

    let request =
        ModelRequest::new(RESUME_EXTRACTION_PROMPT).with_attachment(Attachment::pdf(pdf_bytes));
    let response = gateway.invoke(request).await?;

    // A reply with no text (blocked prompt, empty candidates) must not be read
    // as an empty résumé.
    let text_output = match response {
        ModelResponse::Unknown(body) => {
            return Err(MalformedResponse::no_text(body.to_string()).into());
        }
        other => other.into_text(),
    };
    debug!("Raw model output: {text_output}");

    let resume = normalize_resume(&text_output)?;
    debug!(
        "Parsed resume JSON: {}",
        serde_json::to_string_pretty(&resume).unwrap_or_default()
    );

    Ok(resume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::normalizer::MalformedCause;
    use crate::llm_client::stub::StubGateway;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_pdf_is_rejected_before_model_call() {
        let gateway = StubGateway::text("{}");
        let err = extract_resume(&gateway, Bytes::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_pdf_is_sent_as_attachment_with_fixed_prompt() {
        let gateway = StubGateway::text("{}");
        extract_resume(&gateway, Bytes::from_static(b"%PDF-1.7"))
            .await
            .unwrap();

        let request = gateway.last_request().unwrap();
        assert_eq!(request.prompt, RESUME_EXTRACTION_PROMPT);
        assert!(request.system.is_none());
        let attachment = request.attachment.unwrap();
        assert_eq!(attachment.mime_type, "application/pdf");
        assert_eq!(&attachment.data[..], b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_fenced_text_field_response_is_normalized() {
        let gateway = StubGateway::replying(ModelResponse::WithTextField {
            text: "```json\n{\"personalInfo\": {\"name\": \"Grace Hopper\"}}\n```".to_string(),
        });
        let resume = extract_resume(&gateway, Bytes::from_static(b"%PDF"))
            .await
            .unwrap();
        assert_eq!(
            resume.personal_info.unwrap().name.as_deref(),
            Some("Grace Hopper")
        );
        assert_eq!(resume.certificates, Some(vec![]));
    }

    #[tokio::test]
    async fn test_non_json_output_is_malformed() {
        let gateway = StubGateway::text("Sorry, I cannot read this file.");
        let err = extract_resume(&gateway, Bytes::from_static(b"%PDF"))
            .await
            .unwrap_err();
        match err {
            AppError::MalformedResponse(e) => assert_eq!(e.raw, "Sorry, I cannot read this file."),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blocked_reply_without_text_is_malformed() {
        let gateway = StubGateway::replying(ModelResponse::Unknown(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })));
        let err = extract_resume(&gateway, Bytes::from_static(b"%PDF"))
            .await
            .unwrap_err();
        match err {
            AppError::MalformedResponse(e) => {
                assert!(matches!(e.cause, MalformedCause::NoText));
                assert!(e.raw.contains("blockReason"));
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_candidates_reply_is_malformed() {
        let gateway = StubGateway::replying(ModelResponse::Unknown(json!({"candidates": []})));
        let err = extract_resume(&gateway, Bytes::from_static(b"%PDF"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let gateway = StubGateway::failing(500);
        let err = extract_resume(&gateway, Bytes::from_static(b"%PDF"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Provider(_)));
        assert_eq!(gateway.calls(), 1);
    }
}
