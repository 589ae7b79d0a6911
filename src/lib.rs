//! CareBridge Copilot - AI health assistant backend
//!
//! Answers patient questions grounded in their dashboard data and explains
//! health alerts in plain language.
//!
//! # Architecture
//!
//! - **context**: normalizes the free-form patient snapshot
//! - **prompt**: renders instructions, patient data and the question
//! - **providers**: local Ollama and Gemini tiers behind one router
//! - **copilot**: chat and alert-explanation operations
//! - **server**: axum HTTP surface

pub mod errors;

// Re-export commonly used types
pub use errors::{CopilotError, ProviderError, Result};

// Core pipeline
pub mod context;
pub mod copilot;
pub mod prompt;
pub mod providers;

pub use context::PatientContext;
pub use copilot::{ChatReply, ChatRequest, Copilot};
pub use prompt::AlertExplanationRequest;
pub use providers::{ProviderRouter, TextProvider};

// Interface layer
pub mod cli;
pub mod config;
pub mod doctor;
pub mod server;
pub mod telemetry;

pub use config::CopilotConfig;
