use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::activity::DiseaseActivity;
use super::journal::UserDiagnosis;

/// Patient profile passed to the target engine.
///
/// Age and gender are accepted for forward extensibility only; the
/// reference behavior must ignore them so that identical disease-activity
/// levels always produce identical targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PatientProfile {
    /// Identifier of the patient
    pub user_id: String,

    /// Age in years, if known
    pub age: Option<u8>,

    /// Self-reported gender, if provided
    pub gender: Option<String>,

    /// Diagnosis on file, if any
    pub diagnosis: Option<UserDiagnosis>,
}

/// Medication-adherence target thresholds, as percentages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MedicationAdherenceTarget {
    /// Adherence percentage to aim for
    pub target: f64,

    /// Below this, adherence deserves a warning
    pub warning_threshold: f64,

    /// Below this, adherence is critically low
    pub critical_threshold: f64,
}

/// Per-symptom daily ceilings the patient should stay at or below
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SymptomTargets {
    /// Pain severity ceiling (0-10 scale)
    pub pain: u8,

    /// Stress level ceiling (0-10 scale)
    pub stress: u8,

    /// Fatigue level ceiling (0-10 scale)
    pub fatigue: u8,

    /// Bowel movements per day ceiling
    pub bowel_frequency: u8,

    /// Urgency level ceiling (0-10 scale)
    pub urgency: u8,
}

/// Broader health-metric targets, a superset of the adherence and symptom
/// targets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct HealthMetricTargets {
    /// Medication-adherence thresholds
    pub adherence: MedicationAdherenceTarget,

    /// Symptom ceilings
    pub symptoms: SymptomTargets,

    /// Target weight change in kilograms over the review period
    pub weight_change_target: f64,
}

/// All targets for a patient at a given disease-activity level
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct TargetBundle {
    /// Medication-adherence thresholds
    pub adherence: MedicationAdherenceTarget,

    /// Symptom ceilings
    pub symptoms: SymptomTargets,

    /// Broader health-metric targets
    pub health_metrics: HealthMetricTargets,
}

/// Disease-activity assessment with the targets it implies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ActivityAssessment {
    /// Assessed disease-activity level
    pub activity: DiseaseActivity,

    /// Number of journal entries the assessment was computed from
    pub entry_count: usize,

    /// Length of the assessment window in days
    pub period_days: u32,

    /// Targets appropriate for the assessed level
    pub targets: TargetBundle,

    /// Timestamp of the assessment
    pub generated_at: DateTime<Utc>,
}
