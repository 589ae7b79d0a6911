//! Text-generation providers
//!
//! Two tiers sit behind the [`TextProvider`] trait: a local Ollama endpoint
//! and the Gemini cloud API. [`ProviderRouter`] decides which to call.

pub mod cloud;
pub mod local;
pub mod router;

use crate::errors::ProviderResult;
use async_trait::async_trait;
use std::fmt;

// Re-export commonly used types
pub use cloud::CloudProvider;
pub use local::LocalProvider;
pub use router::ProviderRouter;

/// A backend that turns a prompt into generated text
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Generate a complete (non-streamed) response for `prompt`
    async fn generate(&self, prompt: &str) -> ProviderResult<String>;
}

/// Which tier produced a generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSource {
    Local,
    Cloud,
}

impl fmt::Display for ProviderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderSource::Local => f.write_str("local"),
            ProviderSource::Cloud => f.write_str("cloud"),
        }
    }
}

/// Generated text tagged with its source tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub source: ProviderSource,
}
