use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Domain model for a daily symptom/lifestyle journal entry.
///
/// Logically one entry exists per user per day; duplicates can occur in
/// storage and the scoring core de-duplicates them rather than
/// double-counting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct JournalEntry {
    /// Unique identifier for the entry
    pub id: String,

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

    /// Optional Bristol stool scale value (1-7); raw input only, not scored
    pub bristol_scale: Option<u8>,

    /// Stress level (0-10)
    pub stress_level: u8,

    /// Fatigue level (0-10)
    pub fatigue_level: u8,

    /// Sleep quality (0-10, higher is better)
    pub sleep_quality: u8,

    /// Optional water intake in millilitres; not used by scoring
    pub water_intake_ml: Option<u32>,

    /// Optional number of meals logged; not used by scoring
    pub meals_logged: Option<u8>,

    /// Optional flag for whether scheduled medication was taken; not used by scoring
    pub medication_taken: Option<bool>,

    /// Optional free-text notes
    pub notes: Option<String>,

    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
}

/// Request payload for creating a new journal entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CreateJournalEntryRequest {
    /// Identifier of the user logging the entry
    #[validate(length(min = 1, message = "User ID must not be empty"))]
    pub user_id: String,

    /// Calendar day the entry describes
    pub entry_date: NaiveDate,

    /// Whether blood was present in stool
    pub blood_present: bool,

    /// Whether mucus was present in stool
    pub mucus_present: bool,

    /// Abdominal pain severity (0-10)
    #[validate(range(min = 0, max = 10, message = "Pain severity must be between 0 and 10"))]
    pub pain_severity: u8,

    /// Urgency level (0-10)
    #[validate(range(min = 0, max = 10, message = "Urgency level must be between 0 and 10"))]
    pub urgency_level: u8,

    /// Number of bowel movements in the day
    #[validate(range(min = 0, max = 30, message = "Bowel frequency must be between 0 and 30"))]
    pub bowel_frequency: u8,

    /// Optional Bristol stool scale value (1-7)
    #[validate(range(min = 1, max = 7, message = "Bristol scale must be between 1 and 7"))]
    pub bristol_scale: Option<u8>,

    /// Stress level (0-10)
    #[validate(range(min = 0, max = 10, message = "Stress level must be between 0 and 10"))]
    pub stress_level: u8,

    /// Fatigue level (0-10)
    #[validate(range(min = 0, max = 10, message = "Fatigue level must be between 0 and 10"))]
    pub fatigue_level: u8,

    /// Sleep quality (0-10, higher is better)
    #[validate(range(min = 0, max = 10, message = "Sleep quality must be between 0 and 10"))]
    pub sleep_quality: u8,

    /// Optional water intake in millilitres
    pub water_intake_ml: Option<u32>,

    /// Optional number of meals logged
    #[validate(range(min = 0, max = 12, message = "Meals logged must be between 0 and 12"))]
    pub meals_logged: Option<u8>,

    /// Optional flag for whether scheduled medication was taken
    pub medication_taken: Option<bool>,

    /// Optional free-text notes
    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,
}

/// Domain model for a clinician-assigned IBD diagnosis.
/// Used by the classifier only as a fallback source when no journal
/// entries are available.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
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
