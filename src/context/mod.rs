//! Patient context module
//!
//! Normalizes the dashboard's free-form patient snapshot into a fixed,
//! fully-defaulted value object.

pub mod normalizer;
pub mod types;

// Re-export commonly used types
pub use types::{
    HealthAlert, OrganLevel, PatientContext, ScoreTrend, UserProfile, Vitals, NOT_AVAILABLE,
    TRACKED_ORGANS,
};
