// Domain entities and value objects
pub mod activity;
pub mod journal;
pub mod medication;
pub mod targets;
pub mod conversions;

// Re-export common types for easier imports
pub use activity::DiseaseActivity;
pub use journal::{CreateJournalEntryRequest, JournalEntry, UserDiagnosis};
pub use medication::{
    AdherenceResult, CreateIntakeRequest, GapAnalysis, MedicationFrequency, MedicationIntakeRecord,
    MedicationSchedule, MonthlyAdherence, QualityMetrics, UserAdherenceReport,
};
pub use targets::{
    ActivityAssessment, HealthMetricTargets, MedicationAdherenceTarget, PatientProfile,
    SymptomTargets, TargetBundle,
};
