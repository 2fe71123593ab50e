use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use utoipa::ToSchema;

use ibd_care_domain::entities::MedicationFrequency;

/// Public payload for recording a medication intake
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateIntakeRequest {
    /// Identifier of the user taking the dose
    pub user_id: String,

    /// Name of the medication
    pub medication_name: String,

    /// When the dose was taken. Defaults to the current time if omitted.
    pub taken_at: Option<DateTime<Utc>>,

    /// Optional dosage description (e.g. "50mg")
    pub dosage: Option<String>,
}

/// Public payload for storing a medication schedule
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertScheduleRequest {
    /// Identifier of the user the schedule belongs to
    pub user_id: String,

    /// Name of the medication
    pub medication_name: String,

    /// Prescribed dosing cadence
    pub frequency: MedicationFrequency,
}
