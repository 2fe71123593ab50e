use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;
use async_trait::async_trait;

use crate::models::medication::{CreateIntakeRequest, MedicationIntakeRecord, MedicationSchedule};
use super::errors::RepositoryError;
use super::in_memory::InMemoryMedicationStore;

/// Repository trait for medication intake records and schedules
#[async_trait]
pub trait MedicationRepositoryTrait {
    /// Record a new medication intake
    async fn create_intake(&self, request: CreateIntakeRequest) -> Result<MedicationIntakeRecord, RepositoryError>;

    /// Get intake records for a user within an inclusive time range, oldest first
    async fn get_intake_for_user(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MedicationIntakeRecord>, RepositoryError>;

    /// Get all medication schedules for a user
    async fn get_schedules(&self, user_id: &str) -> Result<Vec<MedicationSchedule>, RepositoryError>;

    /// Store or replace a medication schedule
    async fn upsert_schedule(&self, schedule: MedicationSchedule) -> Result<MedicationSchedule, RepositoryError>;
}

/// Repository for medication intake records, backed by in-memory storage
#[derive(Debug, Clone, Default)]
pub struct MedicationRepository {
    storage: InMemoryMedicationStore,
}

impl MedicationRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryMedicationStore::new(),
        }
    }
}

#[async_trait]
impl MedicationRepositoryTrait for MedicationRepository {
    async fn create_intake(&self, request: CreateIntakeRequest) -> Result<MedicationIntakeRecord, RepositoryError> {
        let id = Uuid::new_v4();

        let record = MedicationIntakeRecord {
            id: id.to_string(),
            user_id: request.user_id,
            medication_name: request.medication_name,
            taken_at: request.taken_at,
            dosage: request.dosage,
        };

        debug!("Storing intake record {} for user {}", record.id, record.user_id);
        self.storage.store_record(&record).await
    }

    async fn get_intake_for_user(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MedicationIntakeRecord>, RepositoryError> {
        debug!("Getting intake records for user {} between {} and {}", user_id, start, end);
        self.storage.get_records_for_user(user_id, start, end).await
    }

    async fn get_schedules(&self, user_id: &str) -> Result<Vec<MedicationSchedule>, RepositoryError> {
        self.storage.get_schedules(user_id).await
    }

    async fn upsert_schedule(&self, schedule: MedicationSchedule) -> Result<MedicationSchedule, RepositoryError> {
        debug!(
            "Storing schedule for user {} medication {}",
            schedule.user_id, schedule.medication_name
        );
        self.storage.upsert_schedule(&schedule).await
    }
}

/// Mock medication repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;

    /// Mock implementation of MedicationRepository for testing
    pub struct MockMedicationRepository {
        records: Vec<MedicationIntakeRecord>,
        schedules: Vec<MedicationSchedule>,
        fail_fetch: bool,
    }

    impl Default for MockMedicationRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockMedicationRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self {
                records: Vec::new(),
                schedules: Vec::new(),
                fail_fetch: false,
            }
        }

        /// Create a mock repository with predefined records and schedules
        pub fn with_data(records: Vec<MedicationIntakeRecord>, schedules: Vec<MedicationSchedule>) -> Self {
            Self {
                records,
                schedules,
                fail_fetch: false,
            }
        }

        /// Configure the mock to fail fetch operations
        pub fn with_fetch_failure(mut self) -> Self {
            self.fail_fetch = true;
            self
        }
    }

    #[async_trait]
    impl MedicationRepositoryTrait for MockMedicationRepository {
        async fn create_intake(&self, request: CreateIntakeRequest) -> Result<MedicationIntakeRecord, RepositoryError> {
            Ok(MedicationIntakeRecord {
                id: Uuid::new_v4().to_string(),
                user_id: request.user_id,
                medication_name: request.medication_name,
                taken_at: request.taken_at,
                dosage: request.dosage,
            })
        }

        async fn get_intake_for_user(
            &self,
            user_id: &str,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<MedicationIntakeRecord>, RepositoryError> {
            if self.fail_fetch {
                return Err(RepositoryError::Storage("mock fetch failure".to_string()));
            }

            let mut records: Vec<MedicationIntakeRecord> = self
                .records
                .iter()
                .filter(|record| {
                    record.user_id == user_id && record.taken_at >= start && record.taken_at <= end
                })
                .cloned()
                .collect();

            records.sort_by(|a, b| a.taken_at.cmp(&b.taken_at));

            Ok(records)
        }

        async fn get_schedules(&self, user_id: &str) -> Result<Vec<MedicationSchedule>, RepositoryError> {
            if self.fail_fetch {
                return Err(RepositoryError::Storage("mock fetch failure".to_string()));
            }

            Ok(self
                .schedules
                .iter()
                .filter(|schedule| schedule.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn upsert_schedule(&self, schedule: MedicationSchedule) -> Result<MedicationSchedule, RepositoryError> {
            Ok(schedule)
        }
    }
}
