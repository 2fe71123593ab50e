use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};
use chrono::{NaiveDate, Utc};
use utoipa::{IntoParams, ToSchema};

use ibd_care_domain::entities::medication::{
    CreateIntakeRequest as DomainCreateIntakeRequest, MedicationIntakeRecord, MedicationSchedule,
    UserAdherenceReport,
};

use crate::api::handlers::{AppState, ErrorResponse};
use crate::entities::medication::{CreateIntakeRequest, UpsertScheduleRequest};

/// Query parameters for calculating an adherence report
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AdherenceQueryParams {
    /// User the report is calculated for
    pub user_id: String,

    /// ISO date (YYYY-MM-DD) start of the range (default: 30 days ago)
    pub start_date: Option<String>,

    /// ISO date (YYYY-MM-DD) end of the range (default: today)
    pub end_date: Option<String>,
}

/// Record a medication intake
#[utoipa::path(
    post,
    path = "/api/v1/medications/intake",
    request_body = CreateIntakeRequest,
    responses(
        (status = 201, description = "Intake recorded", body = MedicationIntakeRecord),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "medications"
)]
#[instrument(skip(state, request))]
pub async fn record_intake(
    State(state): State<AppState>,
    Json(request): Json<CreateIntakeRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Recording medication intake");

    let domain_request = DomainCreateIntakeRequest {
        user_id: request.user_id,
        medication_name: request.medication_name,
        taken_at: request.taken_at,
        dosage: request.dosage,
    };

    match state.adherence.record_intake(domain_request).await {
        Ok(record) => {
            info!("Intake recorded with ID: {}", record.id);
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(e) => {
            let error_message = e.to_string();
            if error_message.contains("Validation") {
                warn!("Invalid intake data: {}", error_message);
                Err(ErrorResponse::validation_error(&error_message, None).into_response())
            } else {
                error!("Error recording intake: {}", error_message);
                Err(ErrorResponse::internal_error().into_response())
            }
        }
    }
}

/// Store or replace a medication schedule
#[utoipa::path(
    put,
    path = "/api/v1/medications/schedule",
    request_body = UpsertScheduleRequest,
    responses(
        (status = 200, description = "Schedule stored", body = MedicationSchedule),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "medications"
)]
#[instrument(skip(state, request))]
pub async fn upsert_schedule(
    State(state): State<AppState>,
    Json(request): Json<UpsertScheduleRequest>,
) -> Result<impl IntoResponse, Response> {
    if request.user_id.is_empty() || request.medication_name.is_empty() {
        return Err(ErrorResponse::validation_error(
            "User ID and medication name must not be empty",
            None,
        )
        .into_response());
    }

    let schedule = MedicationSchedule {
        user_id: request.user_id,
        medication_name: request.medication_name,
        frequency: request.frequency,
    };

    match state.adherence.upsert_schedule(schedule).await {
        Ok(stored) => {
            info!(
                "Schedule stored for user {} / {}",
                stored.user_id, stored.medication_name
            );
            Ok((StatusCode::OK, Json(stored)))
        }
        Err(e) => {
            let error_message = e.to_string();
            if error_message.contains("Validation") {
                Err(ErrorResponse::validation_error(&error_message, None).into_response())
            } else {
                error!("Error storing schedule: {}", error_message);
                Err(ErrorResponse::internal_error().into_response())
            }
        }
    }
}

/// Calculate a per-medication adherence report for a user
#[utoipa::path(
    get,
    path = "/api/v1/medications/adherence",
    params(
        AdherenceQueryParams
    ),
    responses(
        (status = 200, description = "Adherence report calculated", body = UserAdherenceReport),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "medications"
)]
#[instrument(skip(state))]
pub async fn get_adherence_report(
    State(state): State<AppState>,
    Query(params): Query<AdherenceQueryParams>,
) -> Result<impl IntoResponse, Response> {
    let today = Utc::now().date_naive();
    let thirty_days_ago = today - chrono::Duration::days(30);

    let start_date = match parse_query_date(params.start_date.as_deref(), thirty_days_ago) {
        Ok(date) => date,
        Err(_) => {
            return Err(ErrorResponse::bad_request(
                "Invalid start_date format. Use ISO 8601 date (e.g. 2024-03-15)",
            )
            .into_response());
        }
    };

    let end_date = match parse_query_date(params.end_date.as_deref(), today) {
        Ok(date) => date,
        Err(_) => {
            return Err(ErrorResponse::bad_request(
                "Invalid end_date format. Use ISO 8601 date (e.g. 2024-03-15)",
            )
            .into_response());
        }
    };

    if start_date > end_date {
        return Err(
            ErrorResponse::bad_request("start_date must not be after end_date").into_response(),
        );
    }

    match state
        .adherence
        .calculate_user_adherence(&params.user_id, start_date, end_date)
        .await
    {
        Ok(report) => Ok((StatusCode::OK, Json(report))),
        Err(e) => {
            error!("Failed to calculate adherence report: {}", e);
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}

/// Parse an optional YYYY-MM-DD query value, falling back to a default
fn parse_query_date(value: Option<&str>, default: NaiveDate) -> Result<NaiveDate, ()> {
    match value {
        Some(text) => text.parse::<NaiveDate>().map_err(|_| ()),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_date() {
        let default = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        assert_eq!(parse_query_date(None, default), Ok(default));
        assert_eq!(
            parse_query_date(Some("2024-04-02"), default),
            Ok(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
        );
        assert!(parse_query_date(Some("yesterday"), default).is_err());
    }
}
