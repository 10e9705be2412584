//! Gemini `generateContent` client. Used by the résumé parser: the prompt and the
//! PDF travel together in a single user turn, the PDF as an inline base64 part.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{error_message, GatewayError, ModelGateway, ModelRequest, ModelResponse};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    model: String,
}

impl GeminiClient {
    /// Fails fast when the key is blank or cannot be sent as a header.
    pub fn new(api_key: &str, model: impl Into<String>) -> Result<Self, GatewayError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GatewayError::Credentials(
                "GEMINI_API_KEY is empty".to_string(),
            ));
        }

        let mut key_header = HeaderValue::from_str(api_key).map_err(|_| {
            GatewayError::Credentials("GEMINI_API_KEY contains invalid characters".to_string())
        })?;
        key_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key_header);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            client: Client::builder().default_headers(headers).build()?,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    fn provider(&self) -> &'static str {
        "gemini"
    }

    async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, GatewayError> {
        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);
        let body = build_request(request);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: error_message(body),
            });
        }

        let body: Value = response.json().await?;
        debug!("Gemini call succeeded (model: {})", self.model);
        Ok(resolve_response(body))
    }
}

fn build_request(request: ModelRequest) -> GenerateContentRequest {
    let mut parts = vec![Part::Text {
        text: request.prompt,
    }];
    if let Some(attachment) = request.attachment {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: attachment.mime_type,
                data: STANDARD.encode(&attachment.data),
            },
        });
    }

    GenerateContentRequest {
        system_instruction: request.system.map(|text| Content {
            role: None,
            parts: vec![Part::Text { text }],
        }),
        contents: vec![Content {
            role: Some("user"),
            parts,
        }],
    }
}

/// Gemini declares its output as text parts on the first candidate. When none
/// are present (safety block, empty candidate list) the whole body is kept.
fn resolve_response(body: Value) -> ModelResponse {
    let text = serde_json::from_value::<GenerateContentResponse>(body.clone())
        .ok()
        .and_then(|r| r.candidates.into_iter().next())
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .filter(|text| !text.is_empty());

    match text {
        Some(text) => ModelResponse::WithTextField { text },
        None => ModelResponse::Unknown(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::Attachment;
    use bytes::Bytes;
    use serde_json::json;

    #[test]
    fn test_blank_key_fails_construction() {
        let err = GeminiClient::new("   ", "gemini-2.5-flash-lite").err().unwrap();
        assert!(matches!(err, GatewayError::Credentials(_)));
    }

    #[test]
    fn test_key_with_newline_fails_construction() {
        let err = GeminiClient::new("abc\ndef", "gemini-2.5-flash-lite")
            .err()
            .unwrap();
        assert!(matches!(err, GatewayError::Credentials(_)));
    }

    #[test]
    fn test_valid_key_builds_client() {
        let client = GeminiClient::new("test-key", "gemini-2.5-flash-lite").unwrap();
        assert_eq!(client.provider(), "gemini");
        assert_eq!(client.model(), "gemini-2.5-flash-lite");
    }

    #[test]
    fn test_request_inlines_attachment_as_base64() {
        let request = ModelRequest::new("extract")
            .with_attachment(Attachment::pdf(Bytes::from_static(b"%PDF-1.4")));
        let body = serde_json::to_value(build_request(request)).unwrap();

        assert!(body.get("systemInstruction").is_none());
        let parts = &body["contents"][0]["parts"];
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(parts[0]["text"], "extract");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(parts[1]["inlineData"]["data"], "JVBERi0xLjQ=");
    }

    #[test]
    fn test_request_carries_system_instruction() {
        let request = ModelRequest::new("user text").with_system("be terse");
        let body = serde_json::to_value(build_request(request)).unwrap();
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be terse");
        assert!(body["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_resolve_joins_text_parts() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(
            resolve_response(body),
            ModelResponse::WithTextField {
                text: "{\"a\":1}".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_without_candidates_keeps_body() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert_eq!(resolve_response(body.clone()), ModelResponse::Unknown(body));
    }
}
