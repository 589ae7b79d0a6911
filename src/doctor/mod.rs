//! Doctor command for provider diagnostics
//!
//! Reports which tiers the router will use and whether each of them can
//! actually serve a request.

use crate::config::{CopilotConfig, DeploymentMode};
use crate::providers::LocalProvider;
use colored::Colorize;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: CopilotConfig,
}

impl Doctor {
    /// Create a new doctor instance
    pub fn new(config: CopilotConfig) -> Self {
        Self { config }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_config(),
            self.check_routing(),
            self.check_local_endpoint().await,
            self.check_cloud_key(),
        ]
    }

    /// Check 1: Configuration values are valid
    fn check_config(&self) -> HealthCheck {
        match self.config.validate() {
            Ok(()) => HealthCheck::new("Configuration", HealthStatus::Pass),
            Err(e) => HealthCheck::new("Configuration", HealthStatus::Fail(e.to_string())),
        }
    }

    /// Check 2: Which tiers will be used
    fn check_routing(&self) -> HealthCheck {
        let status = match (self.config.mode, &self.config.local.url) {
            (DeploymentMode::Production, Some(_)) => HealthStatus::Warn(
                "Production mode: local endpoint configured but ignored".to_string(),
            ),
            (DeploymentMode::Production, None) | (DeploymentMode::Development, None) => {
                HealthStatus::Warn("Cloud only: no local endpoint configured".to_string())
            }
            (DeploymentMode::Development, Some(_)) => HealthStatus::Pass,
        };
        HealthCheck::new("Routing", status)
    }

    /// Check 3: Local Ollama endpoint reachable (only when it will be used)
    async fn check_local_endpoint(&self) -> HealthCheck {
        const NAME: &str = "Local Provider";

        if self.config.use_cloud() {
            return HealthCheck::new(NAME, HealthStatus::Warn("Skipped (not in use)".to_string()));
        }

        let provider = match LocalProvider::from_config(&self.config.local) {
            Ok(Some(provider)) => provider,
            Ok(None) => {
                return HealthCheck::new(NAME, HealthStatus::Warn("Not configured".to_string()))
            }
            Err(e) => return HealthCheck::new(NAME, HealthStatus::Fail(e.to_string())),
        };

        if provider.health_check().await {
            HealthCheck::new(NAME, HealthStatus::Pass)
        } else {
            HealthCheck::new(
                NAME,
                HealthStatus::Warn(format!(
                    "{} not reachable; requests will fall back to cloud",
                    provider.endpoint()
                )),
            )
        }
    }

    /// Check 4: Cloud API key present
    fn check_cloud_key(&self) -> HealthCheck {
        const NAME: &str = "Cloud API Key";

        if self.config.cloud.api_key.is_some() {
            HealthCheck::new(NAME, HealthStatus::Pass)
        } else if self.config.use_cloud() {
            HealthCheck::new(
                NAME,
                HealthStatus::Fail("GEMINI_API_KEY not set and cloud is the only tier".to_string()),
            )
        } else {
            HealthCheck::new(
                NAME,
                HealthStatus::Warn("GEMINI_API_KEY not set; no fallback if local fails".to_string()),
            )
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "CareBridge Copilot Diagnostics".bold());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in checks {
            let message = match &check.status {
                HealthStatus::Pass => "PASS".green(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red(),
            };
            println!("{:<20} {}", check.name, message);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
