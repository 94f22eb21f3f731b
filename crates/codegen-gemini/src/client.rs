use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{classify, GeminiError};
use crate::types::{ErrorPayload, GenerateContentRequest, GenerateContentResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Connection settings for [`GeminiClient`].
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Thin client for the Gemini `generateContent` endpoint.
///
/// Each call is a single attempt; there is no retry and no timeout beyond
/// the transport default.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .user_agent(concat!("codegen-gemini/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send `instruction` as a single user turn and return the first
    /// candidate's text, trimmed.
    pub async fn generate_text(&self, instruction: &str) -> Result<String, GeminiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GeminiError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        debug!(model = %self.config.model, instruction_len = instruction.len(), "calling generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest::user_text(instruction))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let payload = ErrorPayload::from_body(&body);
            let message = payload
                .as_ref()
                .map(|p| p.message.clone())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("upstream request failed")
                        .to_owned()
                });
            let kind = classify(
                Some(status.as_u16()),
                payload.as_ref().and_then(|p| p.status.as_deref()),
                &message,
            );
            warn!(status = status.as_u16(), ?kind, %message, "generateContent failed");
            return Err(GeminiError::Api {
                status: Some(status.as_u16()),
                kind,
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        if let Some(error) = parsed.error.as_ref() {
            let payload = ErrorPayload::from_value(error);
            let kind = classify(payload.code, payload.status.as_deref(), &payload.message);
            warn!(code = ?payload.code, ?kind, message = %payload.message, "generateContent returned an error payload");
            return Err(GeminiError::Api {
                status: payload.code,
                kind,
                message: payload.message,
            });
        }

        parsed.first_text().ok_or_else(|| {
            let finish_reason = parsed.candidates.first().and_then(|c| c.finish_reason.as_deref());
            warn!(candidates = parsed.candidates.len(), ?finish_reason, "generateContent returned no text");
            GeminiError::EmptyResponse
        })
    }
}
