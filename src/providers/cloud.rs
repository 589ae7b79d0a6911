//! Gemini cloud provider
//!
//! API-key authenticated `generateContent` calls against the Generative
//! Language REST API. A missing key is reported as `Misconfigured` without
//! touching the network.

use super::TextProvider;
use crate::config::CloudConfig;
use crate::errors::{CopilotError, ProviderError, ProviderResult, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct CloudProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl CloudProvider {
    pub fn new(
        api_key: Option<String>,
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CopilotError::HttpError)?;

        Ok(Self {
            client,
            api_key,
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &CloudConfig) -> Result<Self> {
        Self::new(
            config.api_key.clone(),
            &config.model,
            &config.base_url,
            Duration::from_millis(config.timeout_ms),
        )
    }

    /// Whether an API key is available
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn map_error(&self, err: reqwest::Error, what: &str) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ProviderError::Failure(format!("{}: {}", what, err))
        }
    }
}

#[async_trait]
impl TextProvider for CloudProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::Misconfigured("Gemini API key not configured".to_string())
        })?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.model, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_error(e, "Failed to send request"))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(ProviderError::Failure(format!("HTTP {}: {}", status, message)));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| self.map_error(e, "Invalid response body"))?;

        body.into_text()
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> ProviderResult<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ProviderError::Failure(format!("Prompt blocked: {}", reason)));
        }

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::Failure(
                "Response contained no text".to_string(),
            ));
        }
        Ok(text)
    }
}
