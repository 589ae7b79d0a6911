//! Prompt composer
//!
//! Pure string formatting: the patient-context block, the chat prompt and
//! the alert-explanation prompt. Nothing here can fail.

use super::instructions::InstructionPolicy;
use crate::context::normalizer::format_number;
use crate::context::{PatientContext, ScoreTrend, TRACKED_ORGANS};

/// Line rendered when the alert list is empty
pub const NO_RECENT_ALERTS: &str = "- No recent alerts";

/// Separator between the context block and the user's question
pub const USER_QUESTION_LABEL: &str = "USER QUESTION: ";

/// Alert data handed over by the alerts collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertExplanationRequest {
    pub title: String,
    pub description: String,
    pub severity: String,
}

/// Render the fixed-order patient-context block
pub fn render_patient_context(ctx: &PatientContext) -> String {
    let profile = &ctx.user_profile;
    let vitals = &ctx.vitals;

    let mut sections = vec![
        format!(
            "PATIENT PROFILE:\n- Name: {}\n- Age: {}\n- Gender: {}",
            profile.name, profile.age, profile.gender
        ),
        format!(
            "CURRENT VITAL SIGNS:\n\
             - Heart Rate: {} bpm\n\
             - Blood Pressure: {} mmHg\n\
             - Blood Oxygen (SpO2): {}%\n\
             - Body Temperature: {}°F\n\
             - Daily Activity: {} steps today",
            vitals.heart_rate, vitals.blood_pressure, vitals.oxygen, vitals.temperature, vitals.steps
        ),
    ];

    let mut status = format!("HEALTH STATUS:\n- Overall Health Score: {}/100", ctx.health_score);
    if let Some(phrase) = trend_phrase(ctx.score_trend()) {
        status.push(' ');
        status.push_str(&phrase);
    }
    for organ in TRACKED_ORGANS {
        status.push_str(&format!("\n- {} Status: {}", capitalize(organ), ctx.organ(organ)));
    }
    sections.push(status);

    let alerts = if ctx.recent_alerts.is_empty() {
        NO_RECENT_ALERTS.to_string()
    } else {
        ctx.recent_alerts
            .iter()
            .map(|alert| format!("- [{}] {}: {}", alert.kind, alert.title, alert.desc))
            .collect::<Vec<_>>()
            .join("\n")
    };
    sections.push(format!("RECENT HEALTH ALERTS:\n{}", alerts));

    sections.join("\n\n")
}

/// Weekly trend phrase appended to the health score line
fn trend_phrase(trend: ScoreTrend) -> Option<String> {
    match trend {
        ScoreTrend::Improvement(change) => Some(format!(
            "(+{}% improvement from last week)",
            format_number(change)
        )),
        ScoreTrend::Decline(change) => Some(format!(
            "({}% decline from last week)",
            format_number(change)
        )),
        ScoreTrend::Steady => None,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Full chat prompt: instructions, patient data, then the question
pub fn compose_chat_prompt(policy: &InstructionPolicy, ctx: &PatientContext, message: &str) -> String {
    format!(
        "{}\n\n{}\n\n{}{}",
        policy.render(),
        render_patient_context(ctx),
        USER_QUESTION_LABEL,
        message
    )
}

/// Short prompt asking for a plain-language alert explanation
pub fn compose_alert_prompt(alert: &AlertExplanationRequest) -> String {
    format!(
        "Explain the following health alert in simple terms and suggest preventive care:\n\
         Alert: {}\n\
         Description: {}\n\
         Severity: {}",
        alert.title, alert.description, alert.severity
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(value: serde_json::Value) -> String {
        render_patient_context(&PatientContext::from_value(&value))
    }

    #[test]
    fn test_empty_context_renders_defaults() {
        let out = block(json!({}));
        assert!(out.contains("- Name: Patient"));
        assert!(out.contains("- Age: Not specified"));
        assert!(out.contains("- Gender: Not specified"));
        assert!(out.contains("- Heart Rate: N/A bpm"));
        assert!(out.contains("- Blood Pressure: N/A mmHg"));
        assert!(out.contains("- Blood Oxygen (SpO2): N/A%"));
        assert!(out.contains("- Body Temperature: N/A°F"));
        assert!(out.contains("- Daily Activity: N/A steps today"));
        assert!(out.contains("- Overall Health Score: 0/100\n"));
        assert!(out.contains("- Heart Status: normal"));
        assert!(out.contains("- Liver Status: normal"));
        assert!(out.ends_with(NO_RECENT_ALERTS));
        assert!(!out.contains("null"));
    }

    #[test]
    fn test_section_order() {
        let out = block(json!({}));
        let profile = out.find("PATIENT PROFILE:").unwrap();
        let vitals = out.find("CURRENT VITAL SIGNS:").unwrap();
        let status = out.find("HEALTH STATUS:").unwrap();
        let alerts = out.find("RECENT HEALTH ALERTS:").unwrap();
        assert!(profile < vitals && vitals < status && status < alerts);

        let heart = out.find("Heart Status").unwrap();
        let brain = out.find("Brain Status").unwrap();
        let lungs = out.find("Lungs Status").unwrap();
        let liver = out.find("Liver Status").unwrap();
        assert!(heart < brain && brain < lungs && lungs < liver);
    }

    #[test]
    fn test_improvement_phrase() {
        let out = block(json!({ "healthScore": 80, "scoreChange": 5 }));
        assert!(out.contains("- Overall Health Score: 80/100 (+5% improvement from last week)"));
        assert!(!out.contains("decline"));
    }

    #[test]
    fn test_decline_phrase() {
        let out = block(json!({ "scoreChange": -3 }));
        assert!(out.contains("(-3% decline from last week)"));
        assert!(!out.contains("improvement"));
    }

    #[test]
    fn test_no_trend_phrase_when_unchanged() {
        let out = block(json!({ "scoreChange": 0 }));
        assert!(!out.contains("improvement"));
        assert!(!out.contains("decline"));
    }

    #[test]
    fn test_alert_lines_keep_order() {
        let out = block(json!({
            "recentAlerts": [
                { "type": "critical", "title": "Low SpO2", "desc": "Oxygen at 89%" },
                { "type": "info", "title": "Sleep", "desc": "Slept 8h" },
                { "type": "warning", "title": "High Heart Rate", "desc": "110 bpm" }
            ]
        }));

        let lines: Vec<&str> = out
            .lines()
            .skip_while(|l| *l != "RECENT HEALTH ALERTS:")
            .skip(1)
            .collect();
        assert_eq!(
            lines,
            vec![
                "- [CRITICAL] Low SpO2: Oxygen at 89%",
                "- [INFO] Sleep: Slept 8h",
                "- [WARNING] High Heart Rate: 110 bpm",
            ]
        );
        assert!(!out.contains(NO_RECENT_ALERTS));
    }

    #[test]
    fn test_chat_prompt_shape() {
        let policy = InstructionPolicy::default();
        let ctx = PatientContext::default();
        let prompt = compose_chat_prompt(&policy, &ctx, "How is my heart?");

        let expected = format!(
            "{}\n\n{}\n\nUSER QUESTION: How is my heart?",
            policy.render(),
            render_patient_context(&ctx)
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_alert_prompt() {
        let prompt = compose_alert_prompt(&AlertExplanationRequest {
            title: "High Heart Rate".to_string(),
            description: "Resting heart rate above 100 bpm".to_string(),
            severity: "warning".to_string(),
        });
        assert!(prompt.contains("Alert: High Heart Rate"));
        assert!(prompt.contains("Description: Resting heart rate above 100 bpm"));
        assert!(prompt.contains("Severity: warning"));
        assert!(prompt.contains("preventive care"));
    }
}
