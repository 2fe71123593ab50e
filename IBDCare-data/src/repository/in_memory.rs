use std::sync::{Arc, Mutex};
use std::collections::HashMap;
use chrono::{DateTime, NaiveDate, Utc};

use crate::models::journal::{JournalEntry, UserDiagnosis};
use crate::models::medication::{MedicationIntakeRecord, MedicationSchedule};
use super::errors::RepositoryError;

/// In-memory storage for journal entries and diagnoses
#[derive(Debug, Clone)]
pub struct InMemoryJournalStore {
    /// Storage for journal entries, keyed by entry ID
    entries: Arc<Mutex<HashMap<String, JournalEntry>>>,
    /// Storage for diagnoses, keyed by user ID
    diagnoses: Arc<Mutex<HashMap<String, UserDiagnosis>>>,
}

impl Default for InMemoryJournalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryJournalStore {
    /// Create a new in-memory journal store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            diagnoses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a journal entry in memory
    pub async fn store_entry(&self, entry: &JournalEntry) -> Result<JournalEntry, RepositoryError> {
        let mut store = self.entries.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        store.insert(entry.id.clone(), entry.clone());
        Ok(entry.clone())
    }

    /// Get all entries for a user within an inclusive date range, oldest first
    pub async fn get_entries_for_user(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, RepositoryError> {
        let store = self.entries.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;

        let mut entries: Vec<JournalEntry> = store
            .values()
            .filter(|entry| {
                entry.user_id == user_id
                    && entry.entry_date >= start_date
                    && entry.entry_date <= end_date
            })
            .cloned()
            .collect();

        entries.sort_by(|a, b| {
            a.entry_date
                .cmp(&b.entry_date)
                .then(a.recorded_at.cmp(&b.recorded_at))
        });

        Ok(entries)
    }

    /// Get the stored diagnosis for a user, if any
    pub async fn get_diagnosis(&self, user_id: &str) -> Result<Option<UserDiagnosis>, RepositoryError> {
        let store = self.diagnoses.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        Ok(store.get(user_id).cloned())
    }

    /// Store or replace the diagnosis for a user
    pub async fn set_diagnosis(&self, diagnosis: &UserDiagnosis) -> Result<UserDiagnosis, RepositoryError> {
        let mut store = self.diagnoses.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        store.insert(diagnosis.user_id.clone(), diagnosis.clone());
        Ok(diagnosis.clone())
    }
}

/// In-memory storage for medication intake records and schedules
#[derive(Debug, Clone)]
pub struct InMemoryMedicationStore {
    /// Storage for intake records, keyed by record ID
    records: Arc<Mutex<HashMap<String, MedicationIntakeRecord>>>,
    /// Storage for schedules, keyed by (user ID, medication name)
    schedules: Arc<Mutex<HashMap<(String, String), MedicationSchedule>>>,
}

impl Default for InMemoryMedicationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMedicationStore {
    /// Create a new in-memory medication store
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            schedules: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store an intake record in memory
    pub async fn store_record(
        &self,
        record: &MedicationIntakeRecord,
    ) -> Result<MedicationIntakeRecord, RepositoryError> {
        let mut store = self.records.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        store.insert(record.id.clone(), record.clone());
        Ok(record.clone())
    }

    /// Get all intake records for a user within an inclusive time range, oldest first
    pub async fn get_records_for_user(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MedicationIntakeRecord>, RepositoryError> {
        let store = self.records.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;

        let mut records: Vec<MedicationIntakeRecord> = store
            .values()
            .filter(|record| {
                record.user_id == user_id && record.taken_at >= start && record.taken_at <= end
            })
            .cloned()
            .collect();

        records.sort_by(|a, b| a.taken_at.cmp(&b.taken_at));

        Ok(records)
    }

    /// Get all medication schedules for a user
    pub async fn get_schedules(&self, user_id: &str) -> Result<Vec<MedicationSchedule>, RepositoryError> {
        let store = self.schedules.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;

        let mut schedules: Vec<MedicationSchedule> = store
            .values()
            .filter(|schedule| schedule.user_id == user_id)
            .cloned()
            .collect();

        schedules.sort_by(|a, b| a.medication_name.cmp(&b.medication_name));

        Ok(schedules)
    }

    /// Store or replace a medication schedule
    pub async fn upsert_schedule(
        &self,
        schedule: &MedicationSchedule,
    ) -> Result<MedicationSchedule, RepositoryError> {
        let mut store = self.schedules.lock().map_err(|e| RepositoryError::Lock(e.to_string()))?;
        store.insert(
            (schedule.user_id.clone(), schedule.medication_name.clone()),
            schedule.clone(),
        );
        Ok(schedule.clone())
    }
}
