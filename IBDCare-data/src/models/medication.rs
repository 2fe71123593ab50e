use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Data model for a single medication intake record.
/// Intake records are append-only log entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationIntakeRecord {
    /// Unique identifier for the record
    pub id: String,

    /// Identifier of the user who took the dose
    pub user_id: String,

    /// Name of the medication
    pub medication_name: String,

    /// When the dose was taken
    pub taken_at: DateTime<Utc>,

    /// Optional dosage description (e.g. "50mg")
    pub dosage: Option<String>,
}

/// Request payload for recording a medication intake at the data layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIntakeRequest {
    pub user_id: String,
    pub medication_name: String,
    pub taken_at: DateTime<Utc>,
    pub dosage: Option<String>,
}

/// Data model for a prescribed medication schedule.
/// The frequency is stored as a tag plus an optional interval so the
/// data layer stays agnostic of the domain enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationSchedule {
    /// Identifier of the user the schedule belongs to
    pub user_id: String,

    /// Name of the medication
    pub medication_name: String,

    /// Dosing cadence tag ("daily", "weekly", "bi_weekly", "monthly",
    /// "as_needed" or "custom")
    pub frequency: String,

    /// Interval in days for the "custom" cadence
    pub interval_days: Option<u32>,
}
