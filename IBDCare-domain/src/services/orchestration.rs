use std::collections::HashMap;
use thiserror::Error;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::debug;
use validator::Validate;
use async_trait::async_trait;

use crate::entities::conversions;
use crate::entities::medication::{
    AdherenceResult, CreateIntakeRequest, MedicationIntakeRecord, MedicationSchedule,
    UserAdherenceReport,
};
use crate::services::adherence::calculate_adherence;
use ibd_care_data::repository::{MedicationRepository, MedicationRepositoryTrait, RepositoryError};

/// Adherence service errors. This boundary is the only place storage
/// failures surface; the underlying calculation is pure and stateless, so
/// a failed call never leaves partial results behind and is safe to retry.
#[derive(Debug, Error)]
pub enum AdherenceServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Repository error; retryable
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Trait for adherence service operations
#[async_trait]
pub trait AdherenceServiceTrait {
    /// Validate a create intake request
    fn validate_intake_request(&self, request: &CreateIntakeRequest)
        -> Result<(), AdherenceServiceError>;

    /// Record a medication intake
    async fn record_intake(
        &self,
        request: CreateIntakeRequest,
    ) -> Result<MedicationIntakeRecord, AdherenceServiceError>;

    /// Get intake records for a user within an inclusive date range
    async fn get_intake_history(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<MedicationIntakeRecord>, AdherenceServiceError>;

    /// Store or replace a medication schedule
    async fn upsert_schedule(
        &self,
        schedule: MedicationSchedule,
    ) -> Result<MedicationSchedule, AdherenceServiceError>;

    /// Calculate per-medication adherence for a user over an inclusive
    /// date range and aggregate into an overall report
    async fn calculate_user_adherence(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<UserAdherenceReport, AdherenceServiceError>;
}

/// Adherence service driving the pure calculator from stored records
pub struct AdherenceService<R: MedicationRepositoryTrait> {
    repository: R,
}

impl<R: MedicationRepositoryTrait> AdherenceService<R> {
    /// Create a new adherence service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> AdherenceServiceError {
        match err {
            RepositoryError::NotFound(msg) => AdherenceServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => AdherenceServiceError::ValidationError(msg),
            _ => AdherenceServiceError::RepositoryError(err.to_string()),
        }
    }
}

/// Inclusive UTC time bounds for a date range
fn day_bounds(start_date: NaiveDate, end_date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&start_date.and_hms_opt(0, 0, 0).unwrap());
    let end = Utc.from_utc_datetime(&end_date.and_hms_opt(23, 59, 59).unwrap());
    (start, end)
}

#[async_trait]
impl<R: MedicationRepositoryTrait + Send + Sync> AdherenceServiceTrait for AdherenceService<R> {
    fn validate_intake_request(
        &self,
        request: &CreateIntakeRequest,
    ) -> Result<(), AdherenceServiceError> {
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

            return Err(AdherenceServiceError::ValidationError(error_message));
        }

        // Additional validation: doses cannot be logged for the future
        if let Some(taken_at) = request.taken_at {
            if taken_at > Utc::now() {
                return Err(AdherenceServiceError::ValidationError(
                    "Intake time must not be in the future".to_string(),
                ));
            }
        }

        Ok(())
    }

    async fn record_intake(
        &self,
        request: CreateIntakeRequest,
    ) -> Result<MedicationIntakeRecord, AdherenceServiceError> {
        self.validate_intake_request(&request)?;

        let taken_at = request.taken_at.unwrap_or_else(Utc::now);
        let data_request = conversions::convert_to_data_intake_request(&request, taken_at);

        let data_record = self
            .repository
            .create_intake(data_request)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_intake(data_record))
    }

    async fn get_intake_history(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<MedicationIntakeRecord>, AdherenceServiceError> {
        let (start, end) = day_bounds(start_date, end_date);

        let data_records = self
            .repository
            .get_intake_for_user(user_id, start, end)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(data_records
            .into_iter()
            .map(conversions::convert_to_domain_intake)
            .collect())
    }

    async fn upsert_schedule(
        &self,
        schedule: MedicationSchedule,
    ) -> Result<MedicationSchedule, AdherenceServiceError> {
        let data_schedule = self
            .repository
            .upsert_schedule(conversions::convert_to_data_schedule(&schedule))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        conversions::convert_to_domain_schedule(data_schedule).ok_or_else(|| {
            AdherenceServiceError::ValidationError("Unrecognized frequency tag in storage".to_string())
        })
    }

    async fn calculate_user_adherence(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<UserAdherenceReport, AdherenceServiceError> {
        // Fetch everything up front; the per-medication calculations below
        // are pure and cannot fail partway through.
        let schedules: Vec<MedicationSchedule> = self
            .repository
            .get_schedules(user_id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .into_iter()
            .filter_map(conversions::convert_to_domain_schedule)
            .collect();

        let records = self.get_intake_history(user_id, start_date, end_date).await?;

        debug!(
            "Calculating adherence for user {} across {} medications",
            user_id,
            schedules.len()
        );

        let mut adherence_results: HashMap<String, AdherenceResult> = HashMap::new();

        for schedule in &schedules {
            let medication_records: Vec<MedicationIntakeRecord> = records
                .iter()
                .filter(|record| record.medication_name == schedule.medication_name)
                .cloned()
                .collect();

            let result = calculate_adherence(
                &medication_records,
                schedule.frequency,
                start_date,
                end_date,
            );

            adherence_results.insert(schedule.medication_name.clone(), result);
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

/// Create a default adherence service using the repository from the data layer
pub fn create_default_adherence_service() -> impl AdherenceServiceTrait + Send + Sync {
    AdherenceService::new(MedicationRepository::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use ibd_care_data::repository::medication_tests::MockMedicationRepository;

    fn data_record(
        medication: &str,
        date: NaiveDate,
        hour: u32,
    ) -> ibd_care_data::models::medication::MedicationIntakeRecord {
        ibd_care_data::models::medication::MedicationIntakeRecord {
            id: format!("dose-{}-{}", medication, date),
            user_id: "user-1".to_string(),
            medication_name: medication.to_string(),
            taken_at: Utc.from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap()),
            dosage: None,
        }
    }

    fn data_schedule(
        medication: &str,
        frequency: &str,
        interval_days: Option<u32>,
    ) -> ibd_care_data::models::medication::MedicationSchedule {
        ibd_care_data::models::medication::MedicationSchedule {
            user_id: "user-1".to_string(),
            medication_name: medication.to_string(),
            frequency: frequency.to_string(),
            interval_days,
        }
    }

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + Duration::days(offset)
    }

    #[tokio::test]
    async fn test_calculate_user_adherence_across_medications() {
        let mut records = Vec::new();
        // Mesalamine taken every day, infliximab only in the first of two
        // bi-weekly periods.
        for offset in 0..28 {
            records.push(data_record("Mesalamine", day(offset), 8));
        }
        records.push(data_record("Infliximab", day(0), 10));

        let schedules = vec![
            data_schedule("Mesalamine", "daily", None),
            data_schedule("Infliximab", "bi_weekly", None),
        ];

        let service =
            AdherenceService::new(MockMedicationRepository::with_data(records, schedules));

        let report = service
            .calculate_user_adherence("user-1", day(0), day(27))
            .await
            .unwrap();

        assert_eq!(report.adherence_results.len(), 2);

        let mesalamine = &report.adherence_results["Mesalamine"];
        assert_eq!(mesalamine.adherence_percentage, 100.0);
        assert_eq!(mesalamine.actual_doses, 28);

        let infliximab = &report.adherence_results["Infliximab"];
        assert_eq!(infliximab.expected_doses, 2);
        assert_eq!(infliximab.actual_doses, 1);

        assert!((report.overall_adherence - 75.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_user_with_no_medications_reports_zero_overall() {
        let service = AdherenceService::new(MockMedicationRepository::new());

        let report = service
            .calculate_user_adherence("user-1", day(0), day(29))
            .await
            .unwrap();

        assert!(report.adherence_results.is_empty());
        assert_eq!(report.overall_adherence, 0.0);
    }

    #[tokio::test]
    async fn test_repository_failures_surface_as_service_errors() {
        let service =
            AdherenceService::new(MockMedicationRepository::new().with_fetch_failure());

        let result = service
            .calculate_user_adherence("user-1", day(0), day(29))
            .await;

        assert!(matches!(
            result,
            Err(AdherenceServiceError::RepositoryError(_))
        ));
    }

    #[tokio::test]
    async fn test_unrecognized_schedule_tags_are_skipped() {
        let schedules = vec![
            data_schedule("Mesalamine", "daily", None),
            data_schedule("Mystery", "hourly", None),
        ];

        let service =
            AdherenceService::new(MockMedicationRepository::with_data(Vec::new(), schedules));

        let report = service
            .calculate_user_adherence("user-1", day(0), day(29))
            .await
            .unwrap();

        assert_eq!(report.adherence_results.len(), 1);
        assert!(report.adherence_results.contains_key("Mesalamine"));
    }

    #[test]
    fn test_validate_intake_request_rejects_future_dose() {
        let service = AdherenceService::new(MockMedicationRepository::new());

        let request = CreateIntakeRequest {
            user_id: "user-1".to_string(),
            medication_name: "Mesalamine".to_string(),
            taken_at: Some(Utc::now() + Duration::days(1)),
            dosage: None,
        };

        let result = service.validate_intake_request(&request);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("future"));
    }

    #[tokio::test]
    async fn test_record_intake_defaults_to_now() {
        let service = AdherenceService::new(MockMedicationRepository::new());

        let request = CreateIntakeRequest {
            user_id: "user-1".to_string(),
            medication_name: "Mesalamine".to_string(),
            taken_at: None,
            dosage: Some("50mg".to_string()),
        };

        let record = service.record_intake(request).await.unwrap();
        assert_eq!(record.medication_name, "Mesalamine");
        assert!(record.taken_at <= Utc::now());
    }
}
