use thiserror::Error;
use chrono::{Duration, NaiveDate, Utc};
use validator::Validate;
use async_trait::async_trait;

use crate::entities::activity::DiseaseActivity;
use crate::entities::conversions;
use crate::entities::journal::{CreateJournalEntryRequest, JournalEntry, UserDiagnosis};
use crate::entities::targets::{ActivityAssessment, PatientProfile};
use crate::services::activity::assess_disease_activity;
use crate::services::targets::all_targets;
use ibd_care_data::repository::{JournalRepository, JournalRepositoryTrait, RepositoryError};

/// Journal service errors
#[derive(Debug, Error)]
pub enum JournalServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Repository error; fetches are retryable since every calculation
    /// call is self-contained
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Trait for journal service operations
#[async_trait]
pub trait JournalServiceTrait {
    /// Validate a create journal entry request
    fn validate_create_request(
        &self,
        request: &CreateJournalEntryRequest,
    ) -> Result<(), JournalServiceError>;

    /// Create a new journal entry
    async fn create_entry(
        &self,
        request: CreateJournalEntryRequest,
    ) -> Result<JournalEntry, JournalServiceError>;

    /// Get journal entries for a user within an inclusive date range
    async fn get_entries(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, JournalServiceError>;

    /// Get the stored diagnosis for a user, if any
    async fn get_diagnosis(&self, user_id: &str) -> Result<Option<UserDiagnosis>, JournalServiceError>;

    /// Store or replace the diagnosis for a user
    async fn set_diagnosis(&self, diagnosis: UserDiagnosis) -> Result<UserDiagnosis, JournalServiceError>;

    /// Assess disease activity over the most recent `timeframe_days` and
    /// derive the targets it implies
    async fn generate_assessment(
        &self,
        user_id: &str,
        timeframe_days: u32,
    ) -> Result<ActivityAssessment, JournalServiceError>;
}

/// Journal service for domain logic
pub struct JournalService<R: JournalRepositoryTrait> {
    repository: R,
}

impl<R: JournalRepositoryTrait> JournalService<R> {
    /// Create a new journal service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> JournalServiceError {
        match err {
            RepositoryError::NotFound(msg) => JournalServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => JournalServiceError::ValidationError(msg),
            _ => JournalServiceError::RepositoryError(err.to_string()),
        }
    }
}

#[async_trait]
impl<R: JournalRepositoryTrait + Send + Sync> JournalServiceTrait for JournalService<R> {
    fn validate_create_request(
        &self,
        request: &CreateJournalEntryRequest,
    ) -> Result<(), JournalServiceError> {
        if let Err(validation_errors) = request.validate() {
            let error_message = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors
                        .iter()
                        .map(|err| {
                            if let Some(msg) = &err.message {
                                msg.to_string()
                            } else {
                                format!("Invalid {}", field)
                            }
                        })
                        .collect();
                    format!("{}: {}", field, error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            return Err(JournalServiceError::ValidationError(error_message));
        }

        // Additional validation: the entry day must not be in the future
        if request.entry_date > Utc::now().date_naive() {
            return Err(JournalServiceError::ValidationError(
                "Entry date must not be in the future".to_string(),
            ));
        }

        Ok(())
    }

    async fn create_entry(
        &self,
        request: CreateJournalEntryRequest,
    ) -> Result<JournalEntry, JournalServiceError> {
        self.validate_create_request(&request)?;

        let data_request = conversions::convert_to_data_entry_request(&request, Utc::now());

        let data_entry = self
            .repository
            .create_entry(data_request)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_entry(data_entry))
    }

    async fn get_entries(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, JournalServiceError> {
        let data_entries = self
            .repository
            .get_entries_for_user(user_id, start_date, end_date)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(data_entries
            .into_iter()
            .map(conversions::convert_to_domain_entry)
            .collect())
    }

    async fn get_diagnosis(&self, user_id: &str) -> Result<Option<UserDiagnosis>, JournalServiceError> {
        let data_diagnosis = self
            .repository
            .get_diagnosis(user_id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(data_diagnosis.map(conversions::convert_to_domain_diagnosis))
    }

    async fn set_diagnosis(&self, diagnosis: UserDiagnosis) -> Result<UserDiagnosis, JournalServiceError> {
        let data_diagnosis = self
            .repository
            .set_diagnosis(conversions::convert_to_data_diagnosis(&diagnosis))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_diagnosis(data_diagnosis))
    }

    async fn generate_assessment(
        &self,
        user_id: &str,
        timeframe_days: u32,
    ) -> Result<ActivityAssessment, JournalServiceError> {
        let end_date = Utc::now().date_naive();
        let start_date = end_date - Duration::days(timeframe_days.saturating_sub(1) as i64);

        // Fetch first, then run the pure scoring core over the fetched
        // window; the computation itself never touches storage.
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

        let targets = all_targets(&profile, activity, &[], &entries, &entries);

        Ok(ActivityAssessment {
            activity,
            entry_count: entries.len(),
            period_days: timeframe_days,
            targets,
            generated_at: Utc::now(),
        })
    }
}

/// Create a default journal service using the repository from the data layer
pub fn create_default_journal_service() -> impl JournalServiceTrait + Send + Sync {
    JournalService::new(JournalRepository::new())
}
