//! Local Ollama provider
//!
//! Non-streaming client for a local Ollama instance:
//! - Endpoint: POST <configured url> (normally /api/generate)
//! - Body: {"model", "prompt", "stream": false}
//! - Reply: JSON with a `response` string
//!
//! Requests are bounded by a short timeout so an absent or stalled local
//! model hands over to the cloud tier quickly.

use super::TextProvider;
use crate::config::LocalConfig;
use crate::errors::{CopilotError, ProviderError, ProviderResult, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Health probes never wait longer than this
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Ollama client for one-shot generation
#[derive(Debug, Clone)]
pub struct LocalProvider {
    client: Client,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl LocalProvider {
    /// Create a client for the given generate endpoint
    pub fn new(endpoint: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CopilotError::HttpError)?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            timeout,
        })
    }

    /// Build from configuration; `None` when no local endpoint is configured
    pub fn from_config(config: &LocalConfig) -> Result<Option<Self>> {
        match &config.url {
            Some(url) => Ok(Some(Self::new(
                url,
                &config.model,
                Duration::from_millis(config.timeout_ms),
            )?)),
            None => Ok(None),
        }
    }

    /// Check if the Ollama server answers on /api/version
    pub async fn health_check(&self) -> bool {
        let Some(url) = self.version_url() else {
            return false;
        };

        match self
            .client
            .get(url)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// `<origin>/api/version` for the configured endpoint
    fn version_url(&self) -> Option<String> {
        let url = Url::parse(&self.endpoint).ok()?;
        Some(format!("{}/api/version", url.origin().ascii_serialization()))
    }

    fn map_error(&self, err: reqwest::Error, what: &str) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ProviderError::Unavailable(format!("{}: {}", what, err))
        }
    }

    /// Get current model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get generate endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextProvider for LocalProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        let request = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "Sending local generate request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_error(e, "Failed to send request"))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Unavailable(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| self.map_error(e, "Invalid response body"))?;

        Ok(body.response)
    }
}

/// Ollama generate request
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Ollama generate response; other fields are ignored
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}
