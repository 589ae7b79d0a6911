//! System instruction policy
//!
//! The narrative that tells the model how to answer. The guideline list is
//! data so deployments can rename the assistant or extend the rules without
//! touching the composer.

/// Assistant persona and answer guidelines
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionPolicy {
    /// Name the assistant introduces itself with
    pub assistant_name: String,
    /// One-line role description following the name
    pub role: String,
    /// Numbered guidelines, rendered in order
    pub guidelines: Vec<String>,
    /// Closing line after the guidelines
    pub closing: String,
}

impl Default for InstructionPolicy {
    fn default() -> Self {
        Self {
            assistant_name: "CareBridge AI Health Copilot".to_string(),
            role: "a professional medical AI assistant specialized in personalized health guidance"
                .to_string(),
            guidelines: vec![
                "Provide personalized health advice based on the patient's ACTUAL DATA provided below".to_string(),
                "Reference their specific vital signs, health score, and alerts in your response".to_string(),
                "If their heart status is \"warning\" or \"critical\", or they have elevated readings, acknowledge this".to_string(),
                "Be empathetic, professional, and concise (2-3 sentences max)".to_string(),
                "For critical issues or persistent symptoms, always recommend consulting a healthcare provider".to_string(),
                "Use simple, non-technical language that patients can understand".to_string(),
                "If asked about improvement, reference their health score trend".to_string(),
            ],
            closing: "Respond directly to the patient in a caring, supportive tone.".to_string(),
        }
    }
}

impl InstructionPolicy {
    /// Render the system instruction block
    pub fn render(&self) -> String {
        let mut out = format!("You are {}, {}.\n\nINSTRUCTIONS:\n", self.assistant_name, self.role);
        for (i, guideline) in self.guidelines.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, guideline));
        }
        out.push('\n');
        out.push_str(&self.closing);
        out
    }
}
