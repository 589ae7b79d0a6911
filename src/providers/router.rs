//! Provider router
//!
//! Per-request two-tier routing:
//!
//! ```text
//! START ──use_cloud──▶ CLOUD_ONLY ──▶ DONE
//!   │
//!   └──────────────▶ LOCAL_ATTEMPT ──ok──▶ DONE
//!                         │
//!                         └─err──▶ cloud ──▶ DONE
//! ```
//!
//! `use_cloud` is re-evaluated on every request and nothing about previous
//! failures is remembered, so a flapping local endpoint only ever costs the
//! current request one bounded attempt.

use super::{CloudProvider, Generation, LocalProvider, ProviderSource, TextProvider};
use crate::config::{CopilotConfig, DeploymentMode, DEFAULT_LOCAL_TIMEOUT_MS};
use crate::errors::{ProviderError, ProviderResult, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Routes prompts to the local tier first, then the cloud tier
#[derive(Clone)]
pub struct ProviderRouter {
    local: Option<Arc<dyn TextProvider>>,
    cloud: Arc<dyn TextProvider>,
    mode: DeploymentMode,
    local_timeout: Duration,
}

impl ProviderRouter {
    pub fn new(
        local: Option<Arc<dyn TextProvider>>,
        cloud: Arc<dyn TextProvider>,
        mode: DeploymentMode,
    ) -> Self {
        Self {
            local,
            cloud,
            mode,
            local_timeout: Duration::from_millis(DEFAULT_LOCAL_TIMEOUT_MS),
        }
    }

    /// Override the bound on a local attempt
    pub fn with_local_timeout(mut self, timeout: Duration) -> Self {
        self.local_timeout = timeout;
        self
    }

    /// Build both tiers from configuration
    pub fn from_config(config: &CopilotConfig) -> Result<Self> {
        let local = LocalProvider::from_config(&config.local)?
            .map(|p| Arc::new(p) as Arc<dyn TextProvider>);
        let cloud = Arc::new(CloudProvider::from_config(&config.cloud)?);

        Ok(Self::new(local, cloud, config.mode).with_local_timeout(config.local_timeout()))
    }

    /// Production mode or no local endpoint means the local tier is skipped
    pub fn use_cloud(&self) -> bool {
        self.mode == DeploymentMode::Production || self.local.is_none()
    }

    /// Generate text for `prompt`, falling back from local to cloud once
    pub async fn route(&self, prompt: &str) -> ProviderResult<Generation> {
        if let Some(local) = self.local.as_ref().filter(|_| !self.use_cloud()) {
            match self.try_local(local.as_ref(), prompt).await {
                Ok(text) => {
                    return Ok(Generation {
                        text,
                        source: ProviderSource::Local,
                    })
                }
                Err(e) => {
                    warn!(provider = local.name(), error = %e, "Local provider unavailable, switching to cloud fallback");
                }
            }
        }

        self.try_cloud(prompt).await.map(|text| Generation {
            text,
            source: ProviderSource::Cloud,
        })
    }

    async fn try_local(&self, local: &dyn TextProvider, prompt: &str) -> ProviderResult<String> {
        info!(provider = local.name(), "Attempting local provider");
        match tokio::time::timeout(self.local_timeout, local.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout {
                duration_ms: self.local_timeout.as_millis() as u64,
            }),
        }
    }

    async fn try_cloud(&self, prompt: &str) -> ProviderResult<String> {
        info!(provider = self.cloud.name(), "Using cloud provider");
        self.cloud.generate(prompt).await
    }
}
