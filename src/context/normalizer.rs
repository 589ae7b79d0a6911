//! Patient context normalizer
//!
//! Turns the free-form `context` object sent by the dashboard into a fully
//! populated [`PatientContext`]. Never fails: missing, null, falsy or
//! wrongly-typed fields are replaced by their defaults.

use super::types::{
    HealthAlert, OrganLevel, PatientContext, UserProfile, Vitals, DEFAULT_ALERT_TYPE,
    DEFAULT_PATIENT_NAME, NOT_AVAILABLE, NOT_SPECIFIED,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Title used for an alert that arrives without one
pub const UNTITLED_ALERT: &str = "Health alert";

/// Description used for an alert that arrives without one
pub const NO_ALERT_DETAILS: &str = "No details provided";

impl PatientContext {
    /// Normalize an arbitrary JSON value into a patient context
    pub fn from_value(value: &Value) -> Self {
        let Some(root) = value.as_object() else {
            return PatientContext::default();
        };

        PatientContext {
            vitals: vitals(root.get("vitals")),
            health_score: health_score(root.get("healthScore")),
            score_change: number(root.get("scoreChange")).unwrap_or(0.0),
            organ_status: organ_status(root.get("organStatus")),
            recent_alerts: recent_alerts(root.get("recentAlerts")),
            user_profile: user_profile(root.get("userProfile")),
        }
    }
}

/// JavaScript-style truthiness: null, false, 0, NaN and "" count as absent
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar field as display text, `None` when absent or not a scalar
fn text(value: Option<&Value>) -> Option<String> {
    let value = value.filter(|v| truthy(v))?;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => format_number(n.as_f64()?),
        }),
        Value::Bool(_) => Some("true".to_string()),
        _ => None,
    }
}

/// Numeric field, accepting numeric strings
fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Render a number without a trailing `.0` when it is integral
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

fn vitals(value: Option<&Value>) -> Vitals {
    let Some(v) = object(value) else {
        return Vitals::default();
    };
    let or_na = |key: &str| text(v.get(key)).unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Vitals {
        heart_rate: or_na("heartRate"),
        blood_pressure: or_na("bloodPressure"),
        oxygen: or_na("oxygen"),
        temperature: or_na("temperature"),
        steps: or_na("steps"),
    }
}

fn health_score(value: Option<&Value>) -> u8 {
    number(value)
        .map(|score| score.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

fn organ_status(value: Option<&Value>) -> BTreeMap<String, OrganLevel> {
    let Some(organs) = object(value) else {
        return BTreeMap::new();
    };

    organs
        .iter()
        .filter_map(|(organ, status)| {
            let level = status.as_str().and_then(OrganLevel::parse)?;
            Some((organ.to_ascii_lowercase(), level))
        })
        .collect()
}

fn recent_alerts(value: Option<&Value>) -> Vec<HealthAlert> {
    let Some(alerts) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    alerts
        .iter()
        .map(|alert| {
            let get = |key: &str| alert.as_object().and_then(|a| text(a.get(key)));
            HealthAlert {
                kind: get("type")
                    .map(|t| t.to_uppercase())
                    .unwrap_or_else(|| DEFAULT_ALERT_TYPE.to_string()),
                title: get("title").unwrap_or_else(|| UNTITLED_ALERT.to_string()),
                desc: get("desc")
                    .or_else(|| get("description"))
                    .unwrap_or_else(|| NO_ALERT_DETAILS.to_string()),
            }
        })
        .collect()
}

fn user_profile(value: Option<&Value>) -> UserProfile {
    let Some(profile) = object(value) else {
        return UserProfile::default();
    };
    let or_default = |key: &str, default: &str| text(profile.get(key)).unwrap_or_else(|| default.to_string());

    UserProfile {
        name: or_default("name", DEFAULT_PATIENT_NAME),
        age: or_default("age", NOT_SPECIFIED),
        gender: or_default("gender", NOT_SPECIFIED),
    }
}
