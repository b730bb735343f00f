// Google Gemini API provider implementation
//
// Plan generation needs a single non-streaming `generateContent` call: one user
// turn in, the first candidate's text out.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::retry::with_retry;
use super::types::GenerationRequest;
use super::TextGenerator;
use crate::config::constants::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::config::GeminiConfig;
use crate::errors::ProviderError;

/// Google Gemini API provider
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    default_model: String,
    base_url: String,
    max_attempts: u32,
}

impl GeminiProvider {
    /// Create a new Gemini provider with default settings
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    fn with_timeout(api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            default_model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            max_attempts: 1,
        })
    }

    /// Build from the `[gemini]` config section
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        Ok(
            Self::with_timeout(config.api_key.clone(), Duration::from_secs(config.timeout_secs))?
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_max_attempts(config.max_attempts),
        )
    }

    /// Create with custom default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point at a different endpoint root (e.g. a local test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Convert a GenerationRequest to Gemini API format
    fn to_gemini_request(&self, request: &GenerationRequest) -> GeminiRequest {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };

        let generation_config =
            if request.temperature.is_some() || request.max_output_tokens.is_some() {
                Some(GeminiGenerationConfig {
                    temperature: request.temperature,
                    max_output_tokens: request.max_output_tokens,
                })
            } else {
                None
            };

        GeminiRequest {
            model,
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config,
        }
    }

    /// Pull the first candidate's first text part out of a response
    fn from_gemini_response(response: GeminiResponse) -> Option<String> {
        let candidate = response.candidates.into_iter().next()?;
        if let Some(reason) = candidate.finish_reason.as_deref() {
            tracing::debug!("Gemini finish reason: {}", reason);
        }
        candidate
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.trim().is_empty())
    }

    /// Send a single request (no retry)
    async fn send_once(
        &self,
        request: &GenerationRequest,
    ) -> Result<Option<String>, ProviderError> {
        let gemini_request = self.to_gemini_request(request);
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, gemini_request.model
        );

        tracing::debug!(
            "Sending request to Gemini API: model={} prompt_chars={}",
            gemini_request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        match serde_json::from_str::<GeminiResponse>(&body) {
            Ok(parsed) => {
                tracing::debug!("Received Gemini response: {} bytes", body.len());
                Ok(Self::from_gemini_response(parsed))
            }
            Err(e) => {
                tracing::warn!("Unexpected Gemini response shape: {}", e);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate_text(
        &self,
        request: &GenerationRequest,
    ) -> Result<Option<String>, ProviderError> {
        with_retry(self.max_attempts, || self.send_once(request)).await
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

// Gemini API types

#[derive(Debug, Clone, Serialize)]
struct GeminiRequest {
    #[serde(skip)]
    model: String, // Used in URL, not in body
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String, // "user" or "model"
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}
