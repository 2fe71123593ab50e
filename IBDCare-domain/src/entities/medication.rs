use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Prescribed dosing cadence for a medication.
///
/// Modeled as a closed enum so the expected-dose arithmetic stays
/// exhaustive and compiler-checked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(tag = "type", content = "interval_days", rename_all = "snake_case")]
pub enum MedicationFrequency {
    /// One dose per calendar day
    Daily,

    /// One dose per 7-day period
    Weekly,

    /// One dose per 14-day period
    BiWeekly,

    /// One dose per 30-day period
    Monthly,

    /// Taken only when symptoms require it; no expected cadence
    AsNeeded,

    /// One dose per custom interval of days
    Custom(u32),
}

impl MedicationFrequency {
    /// Expected days between doses, or `None` for as-needed medication.
    /// A zero-day custom interval is normalized to one day.
    pub fn interval_days(&self) -> Option<u32> {
        match self {
            MedicationFrequency::Daily => Some(1),
            MedicationFrequency::Weekly => Some(7),
            MedicationFrequency::BiWeekly => Some(14),
            MedicationFrequency::Monthly => Some(30),
            MedicationFrequency::AsNeeded => None,
            MedicationFrequency::Custom(days) => Some((*days).max(1)),
        }
    }

    /// Parse a stored cadence tag back into the enum
    pub fn from_tag(tag: &str, interval_days: Option<u32>) -> Option<Self> {
        match tag {
            "daily" => Some(MedicationFrequency::Daily),
            "weekly" => Some(MedicationFrequency::Weekly),
            "bi_weekly" => Some(MedicationFrequency::BiWeekly),
            "monthly" => Some(MedicationFrequency::Monthly),
            "as_needed" => Some(MedicationFrequency::AsNeeded),
            "custom" => interval_days.map(MedicationFrequency::Custom),
            _ => None,
        }
    }

    /// Stable tag for storage
    pub fn as_tag(&self) -> &'static str {
        match self {
            MedicationFrequency::Daily => "daily",
            MedicationFrequency::Weekly => "weekly",
            MedicationFrequency::BiWeekly => "bi_weekly",
            MedicationFrequency::Monthly => "monthly",
            MedicationFrequency::AsNeeded => "as_needed",
            MedicationFrequency::Custom(_) => "custom",
        }
    }
}

/// Domain model for a single medication intake record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
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

/// Request payload for recording a medication intake
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CreateIntakeRequest {
    /// Identifier of the user taking the dose
    #[validate(length(min = 1, message = "User ID must not be empty"))]
    pub user_id: String,

    /// Name of the medication
    #[validate(length(min = 1, max = 200, message = "Medication name must be between 1 and 200 characters"))]
    pub medication_name: String,

    /// When the dose was taken. Defaults to the current time if omitted.
    pub taken_at: Option<DateTime<Utc>>,

    /// Optional dosage description (e.g. "50mg")
    #[validate(length(max = 100, message = "Dosage cannot exceed 100 characters"))]
    pub dosage: Option<String>,
}

/// Domain model for a prescribed medication schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MedicationSchedule {
    /// Identifier of the user the schedule belongs to
    pub user_id: String,

    /// Name of the medication
    pub medication_name: String,

    /// Prescribed dosing cadence
    pub frequency: MedicationFrequency,
}

/// Adherence figures for a single calendar month of a report range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MonthlyAdherence {
    /// Calendar year of the month
    pub year: i32,

    /// Calendar month (1-12)
    pub month: u32,

    /// Doses taken within the month's portion of the range
    pub actual_doses: u32,

    /// Doses expected within the month's portion of the range
    pub expected_doses: u32,

    /// 100 * actual / expected, 0.0 when nothing was expected
    pub adherence_percentage: f64,
}

/// Analysis of dosing gaps longer than the schedule allows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct GapAnalysis {
    /// Number of inter-dose intervals exceeding the expected interval
    pub total_gaps: u32,

    /// Mean excess length of those intervals, in days
    pub average_gap_days: f64,
}

/// Quality metrics for a dosing history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct QualityMetrics {
    /// 0-100 score rewarding a stable time of day across doses
    pub timing_consistency: f64,

    /// Gap analysis for the dosing history
    pub gap_analysis: GapAnalysis,
}

/// Full adherence report for one medication over a date range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct AdherenceResult {
    /// 100 * actual / expected, clamped to [0, 100]; exactly 0.0 when
    /// nothing was expected
    pub adherence_percentage: f64,

    /// Doses actually taken within the range
    pub actual_doses: u32,

    /// Doses clinically expected within the range
    pub expected_doses: u32,

    /// Per-calendar-month breakdown of the range
    pub monthly_averages: Vec<MonthlyAdherence>,

    /// Timing and gap quality metrics
    pub quality_metrics: QualityMetrics,
}

/// Aggregated adherence report across all of a user's medications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct UserAdherenceReport {
    /// Identifier of the user the report covers
    pub user_id: String,

    /// First day of the reporting range (inclusive)
    pub start_date: NaiveDate,

    /// Last day of the reporting range (inclusive)
    pub end_date: NaiveDate,

    /// Per-medication adherence results, keyed by medication name
    pub adherence_results: HashMap<String, AdherenceResult>,

    /// Mean of the per-medication adherence percentages, 0.0 with no medications
    pub overall_adherence: f64,

    /// Timestamp of the report
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_days_per_frequency() {
        assert_eq!(MedicationFrequency::Daily.interval_days(), Some(1));
        assert_eq!(MedicationFrequency::Weekly.interval_days(), Some(7));
        assert_eq!(MedicationFrequency::BiWeekly.interval_days(), Some(14));
        assert_eq!(MedicationFrequency::Monthly.interval_days(), Some(30));
        assert_eq!(MedicationFrequency::AsNeeded.interval_days(), None);
        assert_eq!(MedicationFrequency::Custom(3).interval_days(), Some(3));
    }

    #[test]
    fn test_zero_day_custom_interval_is_normalized() {
        assert_eq!(MedicationFrequency::Custom(0).interval_days(), Some(1));
    }

    #[test]
    fn test_frequency_tag_round_trip() {
        let frequencies = [
            MedicationFrequency::Daily,
            MedicationFrequency::Weekly,
            MedicationFrequency::BiWeekly,
            MedicationFrequency::Monthly,
            MedicationFrequency::AsNeeded,
            MedicationFrequency::Custom(5),
        ];

        for frequency in frequencies {
            let interval = match frequency {
                MedicationFrequency::Custom(days) => Some(days),
                _ => None,
            };
            assert_eq!(
                MedicationFrequency::from_tag(frequency.as_tag(), interval),
                Some(frequency)
            );
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert_eq!(MedicationFrequency::from_tag("hourly", None), None);
        assert_eq!(MedicationFrequency::from_tag("custom", None), None);
    }
}
