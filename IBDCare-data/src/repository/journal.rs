use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;
use async_trait::async_trait;

use crate::models::journal::{CreateJournalEntryRequest, JournalEntry, UserDiagnosis};
use super::errors::RepositoryError;
use super::in_memory::InMemoryJournalStore;

/// Repository trait for journal entries and diagnoses
#[async_trait]
pub trait JournalRepositoryTrait {
    /// Create a new journal entry from a request
    async fn create_entry(&self, request: CreateJournalEntryRequest) -> Result<JournalEntry, RepositoryError>;

    /// Get journal entries for a user within an inclusive date range, oldest first
    async fn get_entries_for_user(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, RepositoryError>;

    /// Get the stored diagnosis for a user, if any
    async fn get_diagnosis(&self, user_id: &str) -> Result<Option<UserDiagnosis>, RepositoryError>;

    /// Store or replace the diagnosis for a user
    async fn set_diagnosis(&self, diagnosis: UserDiagnosis) -> Result<UserDiagnosis, RepositoryError>;
}

/// Repository for journal entries and diagnoses, backed by in-memory storage.
/// Persistent backends live behind the same trait and are supplied by the
/// deployment, not by this crate.
#[derive(Debug, Clone, Default)]
pub struct JournalRepository {
    storage: InMemoryJournalStore,
}

impl JournalRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryJournalStore::new(),
        }
    }
}

#[async_trait]
impl JournalRepositoryTrait for JournalRepository {
    async fn create_entry(&self, request: CreateJournalEntryRequest) -> Result<JournalEntry, RepositoryError> {
        let id = Uuid::new_v4();

        let entry = JournalEntry {
            id: id.to_string(),
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
            recorded_at: request.recorded_at,
        };

        debug!("Storing journal entry {} for user {}", entry.id, entry.user_id);
        self.storage.store_entry(&entry).await
    }

    async fn get_entries_for_user(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, RepositoryError> {
        debug!("Getting journal entries for user {} between {} and {}", user_id, start_date, end_date);
        self.storage.get_entries_for_user(user_id, start_date, end_date).await
    }

    async fn get_diagnosis(&self, user_id: &str) -> Result<Option<UserDiagnosis>, RepositoryError> {
        self.storage.get_diagnosis(user_id).await
    }

    async fn set_diagnosis(&self, diagnosis: UserDiagnosis) -> Result<UserDiagnosis, RepositoryError> {
        debug!("Storing diagnosis for user {}", diagnosis.user_id);
        self.storage.set_diagnosis(&diagnosis).await
    }
}

/// Mock journal repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;

    /// Mock implementation of JournalRepository for testing
    pub struct MockJournalRepository {
        entries: Vec<JournalEntry>,
        diagnosis: Option<UserDiagnosis>,
        fail_fetch: bool,
    }

    impl Default for MockJournalRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockJournalRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self {
                entries: Vec::new(),
                diagnosis: None,
                fail_fetch: false,
            }
        }

        /// Create a mock repository with predefined entries
        pub fn with_entries(entries: Vec<JournalEntry>) -> Self {
            Self {
                entries,
                diagnosis: None,
                fail_fetch: false,
            }
        }

        /// Attach a predefined diagnosis
        pub fn with_diagnosis(mut self, diagnosis: UserDiagnosis) -> Self {
            self.diagnosis = Some(diagnosis);
            self
        }

        /// Configure the mock to fail fetch operations
        pub fn with_fetch_failure(mut self) -> Self {
            self.fail_fetch = true;
            self
        }
    }

    #[async_trait]
    impl JournalRepositoryTrait for MockJournalRepository {
        async fn create_entry(&self, request: CreateJournalEntryRequest) -> Result<JournalEntry, RepositoryError> {
            Ok(JournalEntry {
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
                recorded_at: request.recorded_at,
            })
        }

        async fn get_entries_for_user(
            &self,
            user_id: &str,
            start_date: NaiveDate,
            end_date: NaiveDate,
        ) -> Result<Vec<JournalEntry>, RepositoryError> {
            if self.fail_fetch {
                return Err(RepositoryError::Storage("mock fetch failure".to_string()));
            }

            let mut entries: Vec<JournalEntry> = self
                .entries
                .iter()
                .filter(|entry| {
                    entry.user_id == user_id
                        && entry.entry_date >= start_date
                        && entry.entry_date <= end_date
                })
                .cloned()
                .collect();

            entries.sort_by(|a, b| a.entry_date.cmp(&b.entry_date));

            Ok(entries)
        }

        async fn get_diagnosis(&self, user_id: &str) -> Result<Option<UserDiagnosis>, RepositoryError> {
            if self.fail_fetch {
                return Err(RepositoryError::Storage("mock fetch failure".to_string()));
            }

            Ok(self
                .diagnosis
                .as_ref()
                .filter(|diagnosis| diagnosis.user_id == user_id)
                .cloned())
        }

        async fn set_diagnosis(&self, diagnosis: UserDiagnosis) -> Result<UserDiagnosis, RepositoryError> {
            Ok(diagnosis)
        }
    }
}
