//! Patient context value objects
//!
//! Every field is fully populated after normalization; rendering code never
//! has to decide on a default.

use std::collections::BTreeMap;
use std::fmt;

/// Sentinel rendered for a missing vital sign
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing patient name
pub const DEFAULT_PATIENT_NAME: &str = "Patient";

/// Placeholder for missing age and gender
pub const NOT_SPECIFIED: &str = "Not specified";

/// Alert type used when none is supplied
pub const DEFAULT_ALERT_TYPE: &str = "INFO";

/// Organs rendered in the health status section, in order
pub const TRACKED_ORGANS: [&str; 4] = ["heart", "brain", "lungs", "liver"];

/// Coarse per-organ health indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrganLevel {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl OrganLevel {
    /// Parse a status label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(OrganLevel::Normal),
            "warning" => Some(OrganLevel::Warning),
            "critical" => Some(OrganLevel::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrganLevel::Normal => "normal",
            OrganLevel::Warning => "warning",
            OrganLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for OrganLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current vital signs, already rendered to display text
#[derive(Debug, Clone, PartialEq)]
pub struct Vitals {
    pub heart_rate: String,
    pub blood_pressure: String,
    pub oxygen: String,
    pub temperature: String,
    pub steps: String,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            heart_rate: NOT_AVAILABLE.to_string(),
            blood_pressure: NOT_AVAILABLE.to_string(),
            oxygen: NOT_AVAILABLE.to_string(),
            temperature: NOT_AVAILABLE.to_string(),
            steps: NOT_AVAILABLE.to_string(),
        }
    }
}

/// One recent health alert
#[derive(Debug, Clone, PartialEq)]
pub struct HealthAlert {
    /// Upper-cased alert type, e.g. `WARNING`
    pub kind: String,
    pub title: String,
    pub desc: String,
}

/// Basic demographic profile
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub age: String,
    pub gender: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PATIENT_NAME.to_string(),
            age: NOT_SPECIFIED.to_string(),
            gender: NOT_SPECIFIED.to_string(),
        }
    }
}

/// Direction of the weekly health score change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreTrend {
    Improvement(f64),
    Decline(f64),
    Steady,
}

/// Normalized snapshot of a patient's health data for one request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatientContext {
    pub vitals: Vitals,
    /// 0-100
    pub health_score: u8,
    pub score_change: f64,
    /// Keyed by lower-cased organ name
    pub organ_status: BTreeMap<String, OrganLevel>,
    /// In the order supplied by the caller
    pub recent_alerts: Vec<HealthAlert>,
    pub user_profile: UserProfile,
}

impl PatientContext {
    /// Status of an organ, `Normal` when not reported
    pub fn organ(&self, name: &str) -> OrganLevel {
        self.organ_status
            .get(&name.to_ascii_lowercase())
            .copied()
            .unwrap_or_default()
    }

    pub fn score_trend(&self) -> ScoreTrend {
        if self.score_change > 0.0 {
            ScoreTrend::Improvement(self.score_change)
        } else if self.score_change < 0.0 {
            ScoreTrend::Decline(self.score_change)
        } else {
            ScoreTrend::Steady
        }
    }
}
