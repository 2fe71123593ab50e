use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};

/// Data model for a daily journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier for the entry
    pub id: String,

    /// Identifier of the user who logged the entry
    pub user_id: String,

    /// Calendar day the entry describes (one logical entry per day)
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

    /// Sleep quality (0-10)
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

/// Request payload for creating a journal entry at the data layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJournalEntryRequest {
    pub user_id: String,
    pub entry_date: NaiveDate,
    pub blood_present: bool,
    pub mucus_present: bool,
    pub pain_severity: u8,
    pub urgency_level: u8,
    pub bowel_frequency: u8,
    pub bristol_scale: Option<u8>,
    pub stress_level: u8,
    pub fatigue_level: u8,
    pub sleep_quality: u8,
    pub water_intake_ml: Option<u32>,
    pub meals_logged: Option<u8>,
    pub medication_taken: Option<bool>,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Data model for a stored IBD diagnosis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDiagnosis {
    /// Identifier of the diagnosed user
    pub user_id: String,

    /// Disease type (e.g. "Crohn's disease", "Ulcerative colitis")
    pub disease_type: String,

    /// Severity label assigned at diagnosis (e.g. "Moderate")
    pub severity: String,

    /// Optional disease location (e.g. "Ileocolonic")
    pub location: Option<String>,

    /// Optional disease behavior (e.g. "Inflammatory")
    pub behavior: Option<String>,

    /// Date of diagnosis
    pub diagnosis_date: Option<NaiveDate>,
}
