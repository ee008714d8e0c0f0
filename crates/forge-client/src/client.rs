//! HTTP client for the Gemini `generateContent` API.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::ProviderError;
use crate::protocol::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::provider::TextProvider;

/// Client for the Gemini text-generation API.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client. An empty `api_key` is accepted; the service will
    /// reject each call and the rejection is reported as a normal error.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl TextProvider for GeminiClient {
    #[instrument(skip(self, instruction), fields(chars = instruction.len()))]
    async fn complete(&self, model: &str, instruction: &str) -> Result<String, ProviderError> {
        let url = self.endpoint(model);
        let req = GenerateContentRequest::from_text(instruction);
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Model service returned an error");
            return Err(error_from_body(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        match parsed.text() {
            Some(text) => {
                debug!("Received {} chars", text.len());
                Ok(text)
            }
            None => Err(ProviderError::EmptyResponse {
                finish_reason: parsed.stop_reason(),
            }),
        }
    }
}

/// Turn a non-success body into an error, keeping the service's message when it sent one.
fn error_from_body(status: u16, body: &str) -> ProviderError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.trim().is_empty() => ProviderError::Api {
            status,
            message: envelope.error.message,
        },
        _ => ProviderError::Unrecognized { status },
    }
}
