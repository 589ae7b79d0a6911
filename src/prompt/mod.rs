//! Prompt composition module
//!
//! Renders normalized patient context and the instruction policy into the
//! text prompts submitted to providers.

pub mod composer;
pub mod instructions;

// Re-export commonly used types
pub use composer::{
    compose_alert_prompt, compose_chat_prompt, render_patient_context, AlertExplanationRequest,
};
pub use instructions::InstructionPolicy;
