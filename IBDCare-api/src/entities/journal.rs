use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;
use utoipa::ToSchema;

/// Public representation of a journal entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JournalEntry {
    /// Unique identifier for the entry
    pub id: Uuid,

    /// Identifier of the user who logged the entry
    pub user_id: String,

    /// Calendar day the entry describes
    pub entry_date: NaiveDate,

    /// Whether blood was present in stool
    pub blood_present: bool,

    /// Whether mucus was present in stool
    pub mucus_present: bool,

    /// Abdominal pain severity (0-10)
    pub pain_severity: u8,

    /// Urgency level (0-10)
    pub urgency_level: u8,

    /// Number of bowel movements in the day
    pub bowel_frequency: u8,

    /// Optional Bristol stool scale value (1-7)
    pub bristol_scale: Option<u8>,

    /// Stress level (0-10)
    pub stress_level: u8,

    /// Fatigue level (0-10)
    pub fatigue_level: u8,

    /// Sleep quality (0-10, higher is better)
    pub sleep_quality: u8,

    /// Optional water intake in millilitres
    pub water_intake_ml: Option<u32>,

    /// Optional number of meals logged for the day
    pub meals_logged: Option<u8>,

    /// Optional flag for whether scheduled medication was taken
    pub medication_taken: Option<bool>,

    /// Optional free-text notes
    pub notes: Option<String>,

    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
}

/// Public payload for creating a new journal entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateJournalEntryRequest {
    /// Identifier of the user logging the entry
    pub user_id: String,

    /// Calendar day the entry describes. Defaults to today if not provided.
    pub entry_date: Option<NaiveDate>,

    /// Whether blood was present in stool
    pub blood_present: bool,

    /// Whether mucus was present in stool
    pub mucus_present: bool,

    /// Abdominal pain severity (0-10)
    pub pain_severity: u8,

    /// Urgency level (0-10)
    pub urgency_level: u8,

    /// Number of bowel movements in the day
    pub bowel_frequency: u8,

    /// Optional Bristol stool scale value (1-7)
    pub bristol_scale: Option<u8>,

    /// Stress level (0-10)
    pub stress_level: u8,

    /// Fatigue level (0-10)
    pub fatigue_level: u8,

    /// Sleep quality (0-10, higher is better)
    pub sleep_quality: u8,

    /// Optional water intake in millilitres
    pub water_intake_ml: Option<u32>,

    /// Optional number of meals logged for the day
    pub meals_logged: Option<u8>,

    /// Optional flag for whether scheduled medication was taken
    pub medication_taken: Option<bool>,

    /// Optional free-text notes
    pub notes: Option<String>,
}
