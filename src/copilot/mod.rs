//! Copilot service
//!
//! Ties the pipeline together for the two entry points:
//! - chat: validate, normalize, compose, route; failures are returned as
//!   typed errors for the HTTP layer to render.
//! - alert explanation: compose, route; never fails, every error degrades to
//!   a fixed sentence.

pub mod request;

use crate::config::CopilotConfig;
use crate::errors::{ProviderError, Result};
use crate::prompt::{compose_alert_prompt, compose_chat_prompt, AlertExplanationRequest, InstructionPolicy};
use crate::providers::ProviderRouter;
use tracing::{error, info};

pub use request::{ChatReply, ChatRequest, MESSAGE_REQUIRED};

/// Returned by alert explanation when the cloud tier has no API key
pub const EXPLANATION_KEY_MISSING: &str = "AI explanation unavailable (API Key missing).";

/// Returned by alert explanation on any other failure
pub const EXPLANATION_FALLBACK: &str =
    "Could not generate AI explanation. Please check your vitals manually.";

/// Stateless copilot; cheap to share behind an `Arc`
#[derive(Clone)]
pub struct Copilot {
    router: ProviderRouter,
    policy: InstructionPolicy,
}

impl Copilot {
    pub fn new(router: ProviderRouter, policy: InstructionPolicy) -> Self {
        Self { router, policy }
    }

    pub fn from_config(config: &CopilotConfig) -> Result<Self> {
        Ok(Self::new(
            ProviderRouter::from_config(config)?,
            InstructionPolicy::default(),
        ))
    }

    pub fn router(&self) -> &ProviderRouter {
        &self.router
    }

    /// Answer a patient question grounded in their context
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        request.validate()?;

        let prompt = compose_chat_prompt(&self.policy, &request.context, &request.message);
        let generation = self.router.route(&prompt).await?;

        info!(source = %generation.source, chars = generation.text.len(), "Chat response generated");
        Ok(ChatReply {
            response: generation.text,
        })
    }

    /// Best-effort plain-language explanation of a health alert
    pub async fn explain_alert(&self, alert: &AlertExplanationRequest) -> String {
        let prompt = compose_alert_prompt(alert);

        match self.router.route(&prompt).await {
            Ok(generation) => generation.text,
            Err(ProviderError::Misconfigured(reason)) => {
                error!(%reason, "AI explanation unavailable");
                EXPLANATION_KEY_MISSING.to_string()
            }
            Err(e) => {
                error!(error = %e, "AI explanation error");
                EXPLANATION_FALLBACK.to_string()
            }
        }
    }
}
