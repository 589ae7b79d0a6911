//! End-to-end tests for the copilot pipeline
//!
//! Both tiers are real HTTP clients talking to wiremock servers, so these
//! cover normalization, composition, routing and the wire formats together.

use carebridge_copilot::{
    config::{CopilotConfig, DeploymentMode},
    copilot::{EXPLANATION_FALLBACK, EXPLANATION_KEY_MISSING},
    AlertExplanationRequest, ChatRequest, Copilot, CopilotError, PatientContext, ProviderError,
};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEMINI_PATH: &str = "/models/gemini-pro:generateContent";

struct Harness {
    ollama: MockServer,
    gemini: MockServer,
}

impl Harness {
    async fn start() -> Self {
        Self {
            ollama: MockServer::start().await,
            gemini: MockServer::start().await,
        }
    }

    fn config(&self, mode: DeploymentMode, api_key: Option<&str>) -> CopilotConfig {
        let mut config = CopilotConfig::default();
        config.mode = mode;
        config.local.url = Some(format!("{}/api/generate", self.ollama.uri()));
        config.local.timeout_ms = 300;
        config.cloud.api_key = api_key.map(str::to_string);
        config.cloud.base_url = self.gemini.uri();
        config
    }

    async fn ollama_replies(&self, text: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "phi",
                "response": text,
                "done": true
            })))
            .expect(expected_calls)
            .mount(&self.ollama)
            .await;
    }

    async fn gemini_replies(&self, text: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(GEMINI_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": text }] } }]
            })))
            .expect(expected_calls)
            .mount(&self.gemini)
            .await;
    }
}

fn sample_context() -> PatientContext {
    PatientContext::from_value(&json!({
        "vitals": { "heartRate": 96, "bloodPressure": "135/88", "oxygen": 97 },
        "healthScore": 72,
        "scoreChange": -3,
        "organStatus": { "heart": "warning" },
        "recentAlerts": [{ "type": "warning", "title": "Elevated BP", "desc": "135/88 mmHg" }],
        "userProfile": { "name": "Sam" }
    }))
}

async fn last_prompt(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests.last().unwrap().body).unwrap();
    match body.get("prompt") {
        Some(prompt) => prompt.as_str().unwrap().to_string(),
        None => body["contents"][0]["parts"][0]["text"].as_str().unwrap().to_string(),
    }
}

#[tokio::test]
async fn test_local_success_never_calls_cloud() {
    let h = Harness::start().await;
    h.ollama_replies("Your heart rate is a little high.", 1).await;
    h.gemini_replies("unused", 0).await;

    let copilot = Copilot::from_config(&h.config(DeploymentMode::Development, Some("key"))).unwrap();
    let reply = copilot
        .chat(&ChatRequest::new("How is my heart?", sample_context()))
        .await
        .unwrap();

    assert_eq!(reply.response, "Your heart rate is a little high.");

    let prompt = last_prompt(&h.ollama).await;
    assert!(prompt.contains("- Name: Sam"));
    assert!(prompt.contains("- Heart Rate: 96 bpm"));
    assert!(prompt.contains("- Body Temperature: N/A°F"));
    assert!(prompt.contains("(-3% decline from last week)"));
    assert!(prompt.contains("- Heart Status: warning"));
    assert!(prompt.contains("- [WARNING] Elevated BP: 135/88 mmHg"));
    assert!(prompt.ends_with("USER QUESTION: How is my heart?"));
}

#[tokio::test]
async fn test_local_error_falls_back_with_same_prompt() {
    let h = Harness::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .expect(1)
        .mount(&h.ollama)
        .await;
    h.gemini_replies("Gemini says rest.", 1).await;

    let copilot = Copilot::from_config(&h.config(DeploymentMode::Development, Some("key"))).unwrap();
    let reply = copilot
        .chat(&ChatRequest::new("Should I rest?", sample_context()))
        .await
        .unwrap();

    assert_eq!(reply.response, "Gemini says rest.");
    assert_eq!(last_prompt(&h.ollama).await, last_prompt(&h.gemini).await);
}

#[tokio::test]
async fn test_local_timeout_falls_back() {
    let h = Harness::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "too slow" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&h.ollama)
        .await;
    h.gemini_replies("Cloud answer.", 1).await;

    let copilot = Copilot::from_config(&h.config(DeploymentMode::Development, Some("key"))).unwrap();
    let reply = copilot
        .chat(&ChatRequest::new("hi", PatientContext::default()))
        .await
        .unwrap();

    assert_eq!(reply.response, "Cloud answer.");
}

#[tokio::test]
async fn test_production_mode_skips_local() {
    let h = Harness::start().await;
    h.ollama_replies("unused", 0).await;
    h.gemini_replies("Cloud answer.", 1).await;

    let copilot = Copilot::from_config(&h.config(DeploymentMode::Production, Some("key"))).unwrap();
    let reply = copilot
        .chat(&ChatRequest::new("hi", PatientContext::default()))
        .await
        .unwrap();

    assert_eq!(reply.response, "Cloud answer.");
}

#[tokio::test]
async fn test_unset_local_endpoint_skips_local() {
    let h = Harness::start().await;
    h.ollama_replies("unused", 0).await;
    h.gemini_replies("Cloud answer.", 1).await;

    let mut config = h.config(DeploymentMode::Development, Some("key"));
    config.local.url = None;

    let copilot = Copilot::from_config(&config).unwrap();
    assert!(copilot.router().use_cloud());
    let reply = copilot
        .chat(&ChatRequest::new("hi", PatientContext::default()))
        .await
        .unwrap();
    assert_eq!(reply.response, "Cloud answer.");
}

#[tokio::test]
async fn test_empty_message_contacts_no_provider() {
    let h = Harness::start().await;
    h.ollama_replies("unused", 0).await;
    h.gemini_replies("unused", 0).await;

    let copilot = Copilot::from_config(&h.config(DeploymentMode::Development, Some("key"))).unwrap();
    let err = copilot
        .chat(&ChatRequest::new("", sample_context()))
        .await
        .unwrap_err();

    assert!(matches!(err, CopilotError::Validation(_)));
}

#[tokio::test]
async fn test_missing_key_is_misconfigured_for_chat() {
    let h = Harness::start().await;
    h.gemini_replies("unused", 0).await;

    let copilot = Copilot::from_config(&h.config(DeploymentMode::Production, None)).unwrap();
    let err = copilot
        .chat(&ChatRequest::new("hi", PatientContext::default()))
        .await
        .unwrap_err();

    assert!(matches!(err, CopilotError::Provider(ProviderError::Misconfigured(_))));
}

fn alert() -> AlertExplanationRequest {
    AlertExplanationRequest {
        title: "Low Blood Oxygen".to_string(),
        description: "SpO2 dropped to 89% overnight".to_string(),
        severity: "critical".to_string(),
    }
}

#[tokio::test]
async fn test_explain_alert_uses_local_tier() {
    let h = Harness::start().await;
    h.ollama_replies("Your oxygen dipped while sleeping.", 1).await;

    let copilot = Copilot::from_config(&h.config(DeploymentMode::Development, None)).unwrap();
    assert_eq!(
        copilot.explain_alert(&alert()).await,
        "Your oxygen dipped while sleeping."
    );

    let prompt = last_prompt(&h.ollama).await;
    assert!(prompt.contains("Alert: Low Blood Oxygen"));
    assert!(prompt.contains("Severity: critical"));
}

#[tokio::test]
async fn test_explain_alert_without_key_returns_placeholder() {
    let h = Harness::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&h.ollama)
        .await;

    let copilot = Copilot::from_config(&h.config(DeploymentMode::Development, None)).unwrap();
    assert_eq!(copilot.explain_alert(&alert()).await, EXPLANATION_KEY_MISSING);
}

#[tokio::test]
async fn test_explain_alert_cloud_failure_returns_fallback() {
    let h = Harness::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "internal" }
        })))
        .mount(&h.gemini)
        .await;

    let copilot = Copilot::from_config(&h.config(DeploymentMode::Production, Some("key"))).unwrap();
    assert_eq!(copilot.explain_alert(&alert()).await, EXPLANATION_FALLBACK);
}
