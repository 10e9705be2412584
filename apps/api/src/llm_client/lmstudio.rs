//! LM Studio client over its OpenAI-compatible chat completions endpoint.
//! Used by the cover letter service with a local model server.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use super::{error_message, GatewayError, ModelGateway, ModelRequest, ModelResponse};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct LmStudioClient {
    client: Client,
    base_url: Url,
    model: String,
}

impl LmStudioClient {
    /// Accepts `host:port` or a full URL. Fails fast on an unparseable host.
    pub fn new(host: &str, model: impl Into<String>) -> Result<Self, GatewayError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: parse_host(host)?,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Checks that a model server answers on the configured host. Logs the
    /// outcome; never fails.
    pub async fn probe(&self) -> bool {
        let url = self.endpoint("v1/models");
        match self.client.get(url).send().await {
            Ok(r) if r.status().is_success() => {
                info!("An LM Studio API server instance is available at {}", self.base_url);
                true
            }
            Ok(r) => {
                error!(
                    "LM Studio host {} answered the probe with {}",
                    self.base_url,
                    r.status()
                );
                false
            }
            Err(e) => {
                error!("No LM Studio API server instance found at {}: {e}", self.base_url);
                false
            }
        }
    }

    fn endpoint(&self, path: &str) -> Url {
        // base_url always ends in '/', so join appends rather than replaces.
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }
}

#[async_trait]
impl ModelGateway for LmStudioClient {
    fn provider(&self) -> &'static str {
        "lmstudio"
    }

    async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, GatewayError> {
        if request.attachment.is_some() {
            return Err(GatewayError::AttachmentUnsupported {
                provider: self.provider(),
            });
        }

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: build_messages(request),
        };

        let response = self
            .client
            .post(self.endpoint("v1/chat/completions"))
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: error_message(body),
            });
        }

        let body: Value = response.json().await?;
        debug!("LM Studio call succeeded (model: {})", self.model);
        Ok(resolve_response(body))
    }
}

fn parse_host(host: &str) -> Result<Url, GatewayError> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(GatewayError::Credentials(
            "SERVER_API_HOST is empty".to_string(),
        ));
    }

    let with_scheme = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    };

    let url = Url::parse(&format!("{with_scheme}/")).map_err(|e| {
        GatewayError::Credentials(format!("SERVER_API_HOST '{host}' is not a valid host: {e}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(GatewayError::Credentials(format!(
            "SERVER_API_HOST '{host}' must be an http(s) host"
        )));
    }
    Ok(url)
}

fn build_messages(request: ModelRequest) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: request.prompt,
    });
    messages
}

/// Chat completions declare the answer as `choices[0].message.content`.
fn resolve_response(body: Value) -> ModelResponse {
    let content = serde_json::from_value::<ChatCompletionResponse>(body.clone())
        .ok()
        .and_then(|r| r.choices.into_iter().next())
        .and_then(|c| c.message.content);

    match content {
        Some(content) => ModelResponse::WithContentField { content },
        None => ModelResponse::Unknown(body),
    }
}
