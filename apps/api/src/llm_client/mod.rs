/// LLM Client — the single point of entry for all model provider calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// Services hold an `Arc<dyn ModelGateway>` and never see which provider sits behind it.
///
/// No retries, no timeouts: a provider failure surfaces to the caller as-is.
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;

pub mod gemini;
pub mod lmstudio;

pub use gemini::GeminiClient;
pub use lmstudio::LmStudioClient;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid provider credentials: {0}")]
    Credentials(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("{provider} does not accept attachments")]
    AttachmentUnsupported { provider: &'static str },
}

/// Binary payload sent alongside the prompt to a multimodal provider.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub mime_type: String,
    pub data: Bytes,
}

impl Attachment {
    pub fn pdf(data: Bytes) -> Self {
        Self {
            mime_type: "application/pdf".to_string(),
            data,
        }
    }
}

/// One model invocation: a user prompt with an optional system instruction and attachment.
#[derive(Debug, Clone, Default)]
pub struct ModelRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub attachment: Option<Attachment>,
}

impl ModelRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// The shape a provider answered with. Each client picks the variant from its
/// declared response type, so callers never look fields up at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelResponse {
    PlainText(String),
    WithContentField { content: String },
    WithTextField { text: String },
    Unknown(Value),
}

impl ModelResponse {
    pub fn kind(&self) -> &'static str {
        match self {
            ModelResponse::PlainText(_) => "plain_text",
            ModelResponse::WithContentField { .. } => "content_field",
            ModelResponse::WithTextField { .. } => "text_field",
            ModelResponse::Unknown(_) => "unknown",
        }
    }

    /// Collapses the response to text. Never fails: unknown shapes fall back to
    /// their string form.
    pub fn into_text(self) -> String {
        match self {
            ModelResponse::PlainText(text) => text,
            ModelResponse::WithContentField { content } => content,
            ModelResponse::WithTextField { text } => text,
            ModelResponse::Unknown(Value::String(s)) => s,
            ModelResponse::Unknown(other) => other.to_string(),
        }
    }
}

#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Short provider label, reported back to clients (e.g. `"gemini"`).
    fn provider(&self) -> &'static str;

    async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, GatewayError>;
}

/// Pulls a human-readable message out of a provider error body, falling back to the raw body.
pub(crate) fn error_message(body: String) -> String {
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(String::from)
        })
        .unwrap_or(body)
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text_is_verbatim() {
        let response = ModelResponse::PlainText("hi".to_string());
        assert_eq!(response.into_text(), "hi");
    }

    #[test]
    fn test_content_field_is_used() {
        let response = ModelResponse::WithContentField {
            content: "hi".to_string(),
        };
        assert_eq!(response.into_text(), "hi");
    }

    #[test]
    fn test_text_field_is_used() {
        let response = ModelResponse::WithTextField {
            text: "hello".to_string(),
        };
        assert_eq!(response.into_text(), "hello");
    }

    #[test]
    fn test_unknown_integer_falls_back_to_string_form() {
        assert_eq!(ModelResponse::Unknown(json!(42)).into_text(), "42");
    }

    #[test]
    fn test_unknown_string_is_unquoted() {
        assert_eq!(ModelResponse::Unknown(json!("raw")).into_text(), "raw");
    }

    #[test]
    fn test_unknown_object_stringifies() {
        let text = ModelResponse::Unknown(json!({"finishReason": "SAFETY"})).into_text();
        assert_eq!(text, r#"{"finishReason":"SAFETY"}"#);
    }

    #[test]
    fn test_error_message_prefers_nested_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid"}}"#.to_string();
        assert_eq!(error_message(body), "API key not valid");
        assert_eq!(error_message("Bad Gateway".to_string()), "Bad Gateway");
    }

    #[test]
    fn test_request_builder() {
        let request = ModelRequest::new("prompt")
            .with_system("system")
            .with_attachment(Attachment::pdf(Bytes::from_static(b"%PDF")));
        assert_eq!(request.prompt, "prompt");
        assert_eq!(request.system.as_deref(), Some("system"));
        let attachment = request.attachment.unwrap();
        assert_eq!(attachment.mime_type, "application/pdf");
        assert_eq!(attachment.data.len(), 4);
    }
}
