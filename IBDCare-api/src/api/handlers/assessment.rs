use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::{IntoParams, ToSchema};

use ibd_care_domain::entities::targets::ActivityAssessment;
use ibd_care_domain::services::targets::research_sources;

use crate::api::handlers::{AppState, ErrorResponse};

/// Query parameters for generating an activity assessment
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AssessmentQueryParams {
    /// User the assessment is generated for
    pub user_id: String,

    /// Assessment window in days (default: 30, max: 365)
    pub timeframe: Option<u32>,
}

/// Research citations backing the target tables
#[derive(Serialize, ToSchema)]
pub struct ResearchSourcesResponse {
    /// Guideline and position-statement citations
    pub sources: Vec<String>,
}

/// Generate a disease-activity assessment with matching targets
#[utoipa::path(
    get,
    path = "/api/v1/journal/assessment",
    params(
        AssessmentQueryParams
    ),
    responses(
        (status = 200, description = "Assessment generated", body = ActivityAssessment),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "assessment"
)]
#[instrument(skip(state))]
pub async fn get_assessment(
    State(state): State<AppState>,
    Query(params): Query<AssessmentQueryParams>,
) -> Result<impl IntoResponse, Response> {
    let timeframe = params.timeframe.unwrap_or(30);

    if timeframe == 0 || timeframe > 365 {
        return Err(
            ErrorResponse::bad_request("Timeframe must be between 1 and 365 days").into_response(),
        );
    }

    info!(
        "Generating assessment for user {} over {} days",
        params.user_id, timeframe
    );

    match state
        .journal
        .generate_assessment(&params.user_id, timeframe)
        .await
    {
        Ok(assessment) => Ok((StatusCode::OK, Json(assessment))),
        Err(e) => {
            error!("Failed to generate assessment: {}", e);
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}

/// List the research sources the target tables are derived from
#[utoipa::path(
    get,
    path = "/api/v1/targets/sources",
    responses(
        (status = 200, description = "Research sources listed", body = ResearchSourcesResponse),
    ),
    tag = "targets"
)]
#[instrument]
pub async fn get_research_sources() -> impl IntoResponse {
    let response = ResearchSourcesResponse {
        sources: research_sources()
            .into_iter()
            .map(|source| source.to_string())
            .collect(),
    };

    (StatusCode::OK, Json(response))
}
