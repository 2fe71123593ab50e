// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export useful test mocks from the data layer
pub use ibd_care_data::repository::journal_tests::MockJournalRepository;
pub use ibd_care_data::repository::medication_tests::MockMedicationRepository;

use std::collections::HashMap;
use std::sync::RwLock;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use async_trait::async_trait;

use crate::entities::activity::DiseaseActivity;
use crate::entities::journal::{CreateJournalEntryRequest, JournalEntry, UserDiagnosis};
use crate::entities::medication::{
    CreateIntakeRequest, MedicationIntakeRecord, MedicationSchedule, UserAdherenceReport,
};
use crate::entities::targets::{ActivityAssessment, PatientProfile};
use crate::services::activity::assess_disease_activity;
use crate::services::adherence::calculate_adherence;
use crate::services::journal::{JournalServiceError, JournalServiceTrait};
use crate::services::orchestration::{AdherenceServiceError, AdherenceServiceTrait};
use crate::services::targets::all_targets;

/// Mock implementation of the JournalServiceTrait for testing
pub struct MockJournalService {
    entries: RwLock<Vec<JournalEntry>>,
    diagnosis: Option<UserDiagnosis>,
    should_fail_validation: bool,
    should_fail_fetch: bool,
}

impl Default for MockJournalService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockJournalService {
    /// Create a new mock journal service
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            diagnosis: None,
            should_fail_validation: false,
            should_fail_fetch: false,
        }
    }

    /// Configure the mock to fail validation
    pub fn with_validation_failure(mut self) -> Self {
        self.should_fail_validation = true;
        self
    }

    /// Configure the mock to fail fetch operations
    pub fn with_fetch_failure(mut self) -> Self {
        self.should_fail_fetch = true;
        self
    }

    /// Add pre-defined entries to the mock
    pub fn with_entries(self, new_entries: Vec<JournalEntry>) -> Self {
        {
            let mut entries = self.entries.write().unwrap();
            entries.extend(new_entries);
        }
        self
    }

    /// Attach a pre-defined diagnosis
    pub fn with_diagnosis(mut self, diagnosis: UserDiagnosis) -> Self {
        self.diagnosis = Some(diagnosis);
        self
    }
}

#[async_trait]
impl JournalServiceTrait for MockJournalService {
    fn validate_create_request(
        &self,
        _request: &CreateJournalEntryRequest,
    ) -> Result<(), JournalServiceError> {
        if self.should_fail_validation {
            Err(JournalServiceError::ValidationError(
                "Validation failed - mock is configured to fail validation".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    async fn create_entry(
        &self,
        request: CreateJournalEntryRequest,
    ) -> Result<JournalEntry, JournalServiceError> {
        self.validate_create_request(&request)?;

        let entry = JournalEntry {
            id: Uuid::new_v4().to_string(),
            user_id: request.user_id,
            entry_date: request.entry_date,
            blood_present: request.blood_present,
            mucus_present: request.mucus_present,
            pain_severity: request.pain_severity,
            urgency_level: request.urgency_level,
            bowel_frequency: request.bowel_frequency,
            bristol_scale: request.bristol_scale,
            stress_level: request.stress_level,
            fatigue_level: request.fatigue_level,
            sleep_quality: request.sleep_quality,
            water_intake_ml: request.water_intake_ml,
            meals_logged: request.meals_logged,
            medication_taken: request.medication_taken,
            notes: request.notes,
            recorded_at: Utc::now(),
        };

        let mut entries = self.entries.write().unwrap();
        entries.push(entry.clone());

        Ok(entry)
    }

    async fn get_entries(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, JournalServiceError> {
        if self.should_fail_fetch {
            return Err(JournalServiceError::RepositoryError(
                "mock fetch failure".to_string(),
            ));
        }

        let entries = self.entries.read().unwrap();
        Ok(entries
            .iter()
            .filter(|entry| {
                entry.user_id == user_id
                    && entry.entry_date >= start_date
                    && entry.entry_date <= end_date
            })
            .cloned()
            .collect())
    }

    async fn get_diagnosis(&self, user_id: &str) -> Result<Option<UserDiagnosis>, JournalServiceError> {
        Ok(self
            .diagnosis
            .as_ref()
            .filter(|diagnosis| diagnosis.user_id == user_id)
            .cloned())
    }

    async fn set_diagnosis(&self, diagnosis: UserDiagnosis) -> Result<UserDiagnosis, JournalServiceError> {
        Ok(diagnosis)
    }

    async fn generate_assessment(
        &self,
        user_id: &str,
        timeframe_days: u32,
    ) -> Result<ActivityAssessment, JournalServiceError> {
        let end_date = Utc::now().date_naive();
        let start_date = end_date - chrono::Duration::days(timeframe_days.saturating_sub(1) as i64);

        let entries = self.get_entries(user_id, start_date, end_date).await?;
        let diagnosis = self.get_diagnosis(user_id).await?;

        let activity: DiseaseActivity =
            assess_disease_activity(&entries, diagnosis.as_ref(), true);

        let profile = PatientProfile {
            user_id: user_id.to_string(),
            age: None,
            gender: None,
            diagnosis,
        };

        Ok(ActivityAssessment {
            activity,
            entry_count: entries.len(),
            period_days: timeframe_days,
            targets: all_targets(&profile, activity, &[], &entries, &entries),
            generated_at: Utc::now(),
        })
    }
}

/// Mock implementation of the AdherenceServiceTrait for testing
pub struct MockAdherenceService {
    records: RwLock<Vec<MedicationIntakeRecord>>,
    schedules: RwLock<HashMap<String, MedicationSchedule>>,
    should_fail_fetch: bool,
}

impl Default for MockAdherenceService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAdherenceService {
    /// Create a new mock adherence service
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            schedules: RwLock::new(HashMap::new()),
            should_fail_fetch: false,
        }
    }

    /// Configure the mock to fail fetch operations
    pub fn with_fetch_failure(mut self) -> Self {
        self.should_fail_fetch = true;
        self
    }

    /// Add pre-defined intake records to the mock
    pub fn with_records(self, new_records: Vec<MedicationIntakeRecord>) -> Self {
        {
            let mut records = self.records.write().unwrap();
            records.extend(new_records);
        }
        self
    }

    /// Add a pre-defined schedule to the mock
    pub fn with_schedule(self, schedule: MedicationSchedule) -> Self {
        {
            let mut schedules = self.schedules.write().unwrap();
            schedules.insert(schedule.medication_name.clone(), schedule);
        }
        self
    }
}

#[async_trait]
impl AdherenceServiceTrait for MockAdherenceService {
    fn validate_intake_request(
        &self,
        _request: &CreateIntakeRequest,
    ) -> Result<(), AdherenceServiceError> {
        Ok(())
    }

    async fn record_intake(
        &self,
        request: CreateIntakeRequest,
    ) -> Result<MedicationIntakeRecord, AdherenceServiceError> {
        let record = MedicationIntakeRecord {
            id: Uuid::new_v4().to_string(),
            user_id: request.user_id,
            medication_name: request.medication_name,
            taken_at: request.taken_at.unwrap_or_else(Utc::now),
            dosage: request.dosage,
        };

        let mut records = self.records.write().unwrap();
        records.push(record.clone());

        Ok(record)
    }

    async fn get_intake_history(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<MedicationIntakeRecord>, AdherenceServiceError> {
        if self.should_fail_fetch {
            return Err(AdherenceServiceError::RepositoryError(
                "mock fetch failure".to_string(),
            ));
        }

        let records = self.records.read().unwrap();
        Ok(records
            .iter()
            .filter(|record| {
                let day = record.taken_at.date_naive();
                record.user_id == user_id && day >= start_date && day <= end_date
            })
            .cloned()
            .collect())
    }

    async fn upsert_schedule(
        &self,
        schedule: MedicationSchedule,
    ) -> Result<MedicationSchedule, AdherenceServiceError> {
        let mut schedules = self.schedules.write().unwrap();
        schedules.insert(schedule.medication_name.clone(), schedule.clone());
        Ok(schedule)
    }

    async fn calculate_user_adherence(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<UserAdherenceReport, AdherenceServiceError> {
        let records = self.get_intake_history(user_id, start_date, end_date).await?;
        let schedules = self.schedules.read().unwrap().clone();

        let mut adherence_results = HashMap::new();
        for (name, schedule) in &schedules {
            let medication_records: Vec<MedicationIntakeRecord> = records
                .iter()
                .filter(|record| &record.medication_name == name)
                .cloned()
                .collect();

            adherence_results.insert(
                name.clone(),
                calculate_adherence(&medication_records, schedule.frequency, start_date, end_date),
            );
        }

        let overall_adherence = if adherence_results.is_empty() {
            0.0
        } else {
            adherence_results
                .values()
                .map(|result| result.adherence_percentage)
                .sum::<f64>()
                / adherence_results.len() as f64
        };

        Ok(UserAdherenceReport {
            user_id: user_id.to_string(),
            start_date,
            end_date,
            adherence_results,
            overall_adherence,
            generated_at: Utc::now(),
        })
    }
}
