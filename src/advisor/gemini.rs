//! Google Generative AI text generator.
//!
//! Sends one user turn to `POST /v1beta/models/{model}:generateContent?key={key}`
//! and joins the text parts of the first candidate.

use super::{ProviderError, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

pub struct GeminiGenerator {
    /// Base URL (e.g., "https://generativelanguage.googleapis.com")
    base_url: String,
    model: String,
    /// Resolved at construction; `None` fails every call with a configuration error
    api_key: Option<String>,
    client: Client,
    timeout: Duration,
}

impl GeminiGenerator {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self::with_client(base_url, model, api_key, timeout, Client::new())
    }

    pub fn with_client(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        client: Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
            client,
            timeout,
        }
    }

    /// Build from config, reading the key from the configured env var.
    pub fn from_config(config: &crate::config::AdvisorConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            tracing::debug!(
                env = %config.api_key_env,
                "Advisor API key not set, advisor replies will use failure text"
            );
        }
        Self::new(
            config.base_url.clone(),
            config.model.clone(),
            api_key,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }

    fn extract_text(response: GeminiResponse) -> Result<String, ProviderError> {
        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            ProviderError::InvalidResponse("response contained no candidates".to_string())
        })?;
        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<String>>()
            .join(""))
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::Configuration("no API key configured for the advisor".to_string())
        })?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending advisor prompt");

        let timeout_ms = self.timeout.as_millis() as u64;
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(timeout_ms)
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to read response body: {}", e))
        })?;
        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse generateContent response: {}", e))
        })?;

        Self::extract_text(parsed)
    }
}
