use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use chrono::{NaiveDate, Utc};
use utoipa::{IntoParams, ToSchema};

use ibd_care_domain::entities::journal::{
    CreateJournalEntryRequest as DomainCreateJournalEntryRequest,
    JournalEntry as DomainJournalEntry, UserDiagnosis,
};

use crate::api::handlers::{AppState, ErrorResponse};
use crate::entities::journal::{CreateJournalEntryRequest, JournalEntry};

/// Query parameters for retrieving journal history
#[derive(Debug, Deserialize, Clone, IntoParams, ToSchema)]
pub struct HistoryQueryParams {
    /// User whose journal is being queried
    pub user_id: String,

    /// ISO date (YYYY-MM-DD) start of the range (default: 30 days ago)
    pub start_date: Option<String>,

    /// ISO date (YYYY-MM-DD) end of the range (default: today)
    pub end_date: Option<String>,

    /// Maximum number of results (default: 100, max: 1000)
    pub limit: Option<usize>,

    /// Pagination offset (default: 0)
    pub offset: Option<usize>,

    /// Sort direction (asc/desc, default: desc)
    pub sort: Option<String>,
}

/// Query parameters for looking up a stored diagnosis
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DiagnosisQueryParams {
    /// User whose diagnosis is being queried
    pub user_id: String,
}

/// Paginated response for journal data
#[derive(Serialize, ToSchema)]
#[aliases(JournalPaginatedResponse = PaginatedResponse<JournalEntry>)]
pub struct PaginatedResponse<T> {
    /// Total count of items available
    pub total_count: usize,

    /// Current offset
    pub offset: usize,

    /// Current limit
    pub limit: usize,

    /// URL for the next page (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// URL for the previous page (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,

    /// Actual data items
    pub data: Vec<T>,
}

/// Create a new journal entry
#[utoipa::path(
    post,
    path = "/api/v1/journal",
    request_body = CreateJournalEntryRequest,
    responses(
        (status = 201, description = "Journal entry created", body = JournalEntry),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "journal"
)]
#[instrument(skip(state, request))]
pub async fn create_journal_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateJournalEntryRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Creating new journal entry");

    let domain_request = convert_to_domain_request(request);

    match state.journal.create_entry(domain_request).await {
        Ok(entry) => {
            info!("Journal entry created with ID: {}", entry.id);
            let public_entry = convert_to_public_entry(entry);
            Ok((StatusCode::CREATED, Json(public_entry)))
        }
        Err(e) => {
            let error_message = e.to_string();
            if error_message.contains("Validation") {
                warn!("Invalid journal entry data: {}", error_message);
                Err(ErrorResponse::validation_error(&error_message, None).into_response())
            } else {
                error!("Error creating journal entry: {}", error_message);
                Err(ErrorResponse::internal_error().into_response())
            }
        }
    }
}

/// Get paginated journal history for a user
#[utoipa::path(
    get,
    path = "/api/v1/journal",
    params(
        HistoryQueryParams
    ),
    responses(
        (status = 200, description = "Journal history retrieved", body = JournalPaginatedResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "journal"
)]
#[instrument(skip(state))]
pub async fn get_journal_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQueryParams>,
) -> Result<impl IntoResponse, Response> {
    let limit = params.limit.unwrap_or(100).min(1000); // Cap at 1000
    let offset = params.offset.unwrap_or(0);

    // Default to sorting by most recent if not specified
    let sort_desc = !matches!(params.sort.as_deref(), Some("asc"));

    let today = Utc::now().date_naive();
    let thirty_days_ago = today - chrono::Duration::days(30);

    let start_date = match parse_query_date(params.start_date.as_deref(), thirty_days_ago) {
        Ok(date) => date,
        Err(field) => {
            let error = ErrorResponse::bad_request(&format!(
                "Invalid {} format. Use ISO 8601 date (e.g. 2024-03-15)",
                field
            ));
            return Err(error.into_response());
        }
    };

    let end_date = match parse_query_date(params.end_date.as_deref(), today) {
        Ok(date) => date,
        Err(field) => {
            let error = ErrorResponse::bad_request(&format!(
                "Invalid {} format. Use ISO 8601 date (e.g. 2024-03-15)",
                field
            ));
            return Err(error.into_response());
        }
    };

    match state
        .journal
        .get_entries(&params.user_id, start_date, end_date)
        .await
    {
        Ok(mut entries) => {
            entries.sort_by(|a, b| {
                if sort_desc {
                    b.entry_date.cmp(&a.entry_date)
                } else {
                    a.entry_date.cmp(&b.entry_date)
                }
            });

            let total_count = entries.len();

            let page: Vec<JournalEntry> = entries
                .into_iter()
                .skip(offset)
                .take(limit)
                .map(convert_to_public_entry)
                .collect();

            let base_url = "/api/v1/journal";
            let (next, previous) =
                generate_pagination_links(total_count, limit, offset, base_url, &params);

            let response = PaginatedResponse {
                total_count,
                offset,
                limit,
                next,
                previous,
                data: page,
            };

            Ok((StatusCode::OK, Json(response)))
        }
        Err(e) => {
            error!("Failed to get journal history: {}", e);
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}

/// Get the stored diagnosis for a user
#[utoipa::path(
    get,
    path = "/api/v1/journal/diagnosis",
    params(
        DiagnosisQueryParams
    ),
    responses(
        (status = 200, description = "Diagnosis found", body = UserDiagnosis),
        (status = 404, description = "No diagnosis on record", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "journal"
)]
#[instrument(skip(state))]
pub async fn get_diagnosis(
    State(state): State<AppState>,
    Query(params): Query<DiagnosisQueryParams>,
) -> Result<impl IntoResponse, Response> {
    match state.journal.get_diagnosis(&params.user_id).await {
        Ok(Some(diagnosis)) => Ok((StatusCode::OK, Json(diagnosis))),
        Ok(None) => {
            info!("No diagnosis on record for user {}", params.user_id);
            Err(ErrorResponse::not_found("diagnosis").into_response())
        }
        Err(e) => {
            error!("Error retrieving diagnosis: {}", e);
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}

/// Store or replace the diagnosis for a user
#[utoipa::path(
    put,
    path = "/api/v1/journal/diagnosis",
    request_body = UserDiagnosis,
    responses(
        (status = 200, description = "Diagnosis stored", body = UserDiagnosis),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "journal"
)]
#[instrument(skip(state, diagnosis))]
pub async fn set_diagnosis(
    State(state): State<AppState>,
    Json(diagnosis): Json<UserDiagnosis>,
) -> Result<impl IntoResponse, Response> {
    if diagnosis.user_id.is_empty() {
        return Err(
            ErrorResponse::validation_error("User ID must not be empty", None).into_response(),
        );
    }

    match state.journal.set_diagnosis(diagnosis).await {
        Ok(stored) => {
            info!("Diagnosis stored for user {}", stored.user_id);
            Ok((StatusCode::OK, Json(stored)))
        }
        Err(e) => {
            error!("Error storing diagnosis: {}", e);
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}

/// Parse an optional YYYY-MM-DD query value, falling back to a default
fn parse_query_date(value: Option<&str>, default: NaiveDate) -> Result<NaiveDate, &'static str> {
    match value {
        Some(text) => text.parse::<NaiveDate>().map_err(|_| "date"),
        None => Ok(default),
    }
}

/// Generate pagination links from the current request
fn generate_pagination_links(
    total_count: usize,
    limit: usize,
    offset: usize,
    base_url: &str,
    query_params: &HistoryQueryParams,
) -> (Option<String>, Option<String>) {
    let has_next = offset + limit < total_count;
    let has_prev = offset > 0;

    let next = if has_next {
        Some(build_page_url(base_url, query_params, limit, offset + limit))
    } else {
        None
    };

    let previous = if has_prev {
        Some(build_page_url(
            base_url,
            query_params,
            limit,
            offset.saturating_sub(limit),
        ))
    } else {
        None
    };

    (next, previous)
}

/// Build a page URL preserving the filter parameters
fn build_page_url(
    base_url: &str,
    query_params: &HistoryQueryParams,
    limit: usize,
    offset: usize,
) -> String {
    let mut query_parts = vec![format!("user_id={}", query_params.user_id)];

    if let Some(start) = &query_params.start_date {
        query_parts.push(format!("start_date={}", start));
    }

    if let Some(end) = &query_params.end_date {
        query_parts.push(format!("end_date={}", end));
    }

    query_parts.push(format!("limit={}", limit));
    query_parts.push(format!("offset={}", offset));

    if let Some(sort) = &query_params.sort {
        query_parts.push(format!("sort={}", sort));
    }

    format!("{}?{}", base_url, query_parts.join("&"))
}

/// Convert a public create request to the domain request
fn convert_to_domain_request(request: CreateJournalEntryRequest) -> DomainCreateJournalEntryRequest {
    DomainCreateJournalEntryRequest {
        user_id: request.user_id,
        entry_date: request.entry_date.unwrap_or_else(|| Utc::now().date_naive()),
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
    }
}

// Convert domain entry to public entry
fn convert_to_public_entry(entry: DomainJournalEntry) -> JournalEntry {
    JournalEntry {
        id: uuid::Uuid::parse_str(&entry.id).unwrap_or_else(|_| uuid::Uuid::new_v4()),
        user_id: entry.user_id,
        entry_date: entry.entry_date,
        blood_present: entry.blood_present,
        mucus_present: entry.mucus_present,
        pain_severity: entry.pain_severity,
        urgency_level: entry.urgency_level,
        bowel_frequency: entry.bowel_frequency,
        bristol_scale: entry.bristol_scale,
        stress_level: entry.stress_level,
        fatigue_level: entry.fatigue_level,
        sleep_quality: entry.sleep_quality,
        water_intake_ml: entry.water_intake_ml,
        meals_logged: entry.meals_logged,
        medication_taken: entry.medication_taken,
        notes: entry.notes,
        recorded_at: entry.recorded_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use ibd_care_domain::testing::{MockAdherenceService, MockJournalService};

    fn mock_state(journal: MockJournalService) -> AppState {
        AppState {
            journal: Arc::new(journal),
            adherence: Arc::new(MockAdherenceService::new()),
        }
    }

    fn base_create_request() -> CreateJournalEntryRequest {
        CreateJournalEntryRequest {
            user_id: "user-1".to_string(),
            entry_date: None,
            blood_present: false,
            mucus_present: false,
            pain_severity: 2,
            urgency_level: 1,
            bowel_frequency: 2,
            bristol_scale: Some(4),
            stress_level: 3,
            fatigue_level: 2,
            sleep_quality: 8,
            water_intake_ml: None,
            meals_logged: None,
            medication_taken: None,
            notes: None,
        }
    }

    fn base_params() -> HistoryQueryParams {
        HistoryQueryParams {
            user_id: "user-1".to_string(),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-02-01".to_string()),
            limit: Some(10),
            offset: Some(20),
            sort: Some("desc".to_string()),
        }
    }

    #[test]
    fn test_pagination_link_generation() {
        let (next, prev) = generate_pagination_links(50, 10, 20, "/api/v1/journal", &base_params());

        let next_url = next.unwrap();
        let prev_url = prev.unwrap();

        assert!(next_url.contains("offset=30"));
        assert!(prev_url.contains("offset=10"));
        assert!(next_url.contains("user_id=user-1"));
        assert!(next_url.contains("start_date=2024-01-01"));
        assert!(next_url.contains("sort=desc"));
    }

    #[test]
    fn test_pagination_links_absent_at_boundaries() {
        let (next, prev) = generate_pagination_links(15, 10, 10, "/api/v1/journal", &base_params());
        assert!(next.is_none());
        assert!(prev.is_some());

        let (next, prev) = generate_pagination_links(50, 10, 0, "/api/v1/journal", &base_params());
        assert!(next.is_some());
        assert!(prev.is_none());
    }

    #[test]
    fn test_parse_query_date_defaults_and_rejects() {
        let default = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        assert_eq!(parse_query_date(None, default), Ok(default));
        assert_eq!(
            parse_query_date(Some("2024-03-15"), default),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
        assert!(parse_query_date(Some("15/03/2024"), default).is_err());
    }

    #[test]
    fn test_convert_to_domain_request_defaults_entry_date_to_today() {
        let domain_request = convert_to_domain_request(base_create_request());
        assert_eq!(domain_request.entry_date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_create_entry_maps_validation_failure_to_400() {
        let state = mock_state(MockJournalService::new().with_validation_failure());

        let result = create_journal_entry(State(state), Json(base_create_request())).await;
        let response = match result {
            Ok(response) => response.into_response(),
            Err(response) => response,
        };

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_history_maps_fetch_failure_to_500() {
        let state = mock_state(MockJournalService::new().with_fetch_failure());

        let result = get_journal_history(State(state), Query(base_params())).await;
        let response = match result {
            Ok(response) => response.into_response(),
            Err(response) => response,
        };

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
