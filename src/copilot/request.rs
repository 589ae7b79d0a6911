//! Chat request parsing and validation

use crate::context::PatientContext;
use crate::errors::{CopilotError, Result};
use serde::Serialize;
use serde_json::Value;

/// Message returned when the chat message is missing
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// A user question plus the patient snapshot it refers to
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub context: PatientContext,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, context: PatientContext) -> Self {
        Self {
            message: message.into(),
            context,
        }
    }

    /// Parse a `{message, context}` body.
    ///
    /// The message must be a non-blank string; the context is normalized
    /// and can never cause a failure.
    pub fn from_json(body: &Value) -> Result<Self> {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .ok_or_else(|| CopilotError::Validation(MESSAGE_REQUIRED.to_string()))?;

        let request = Self::new(
            message,
            PatientContext::from_value(body.get("context").unwrap_or(&Value::Null)),
        );
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(CopilotError::Validation(MESSAGE_REQUIRED.to_string()));
        }
        Ok(())
    }
}

/// Successful chat answer, serialized as `{"response": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub response: String,
}
