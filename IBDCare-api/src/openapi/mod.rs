use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Journal endpoints
        crate::api::handlers::journal::create_journal_entry,
        crate::api::handlers::journal::get_journal_history,
        crate::api::handlers::journal::get_diagnosis,
        crate::api::handlers::journal::set_diagnosis,

        // Assessment and target endpoints
        crate::api::handlers::assessment::get_assessment,
        crate::api::handlers::assessment::get_research_sources,

        // Medication endpoints
        crate::api::handlers::adherence::record_intake,
        crate::api::handlers::adherence::upsert_schedule,
        crate::api::handlers::adherence::get_adherence_report
    ),
    components(
        schemas(
            // Entities
            crate::entities::journal::JournalEntry,
            crate::entities::journal::CreateJournalEntryRequest,
            crate::entities::medication::CreateIntakeRequest,
            crate::entities::medication::UpsertScheduleRequest,
            crate::entities::common::PublicErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Journal handlers
            crate::api::handlers::ErrorResponse,
            crate::api::handlers::journal::JournalPaginatedResponse,
            crate::api::handlers::journal::HistoryQueryParams,
            crate::api::handlers::journal::DiagnosisQueryParams,
            crate::api::handlers::assessment::AssessmentQueryParams,
            crate::api::handlers::assessment::ResearchSourcesResponse,
            crate::api::handlers::adherence::AdherenceQueryParams,

            // Domain schemas exposed directly
            ibd_care_domain::entities::activity::DiseaseActivity,
            ibd_care_domain::entities::journal::UserDiagnosis,
            ibd_care_domain::entities::medication::MedicationFrequency,
            ibd_care_domain::entities::medication::MedicationIntakeRecord,
            ibd_care_domain::entities::medication::MedicationSchedule,
            ibd_care_domain::entities::medication::MonthlyAdherence,
            ibd_care_domain::entities::medication::GapAnalysis,
            ibd_care_domain::entities::medication::QualityMetrics,
            ibd_care_domain::entities::medication::AdherenceResult,
            ibd_care_domain::entities::medication::UserAdherenceReport,
            ibd_care_domain::entities::targets::MedicationAdherenceTarget,
            ibd_care_domain::entities::targets::SymptomTargets,
            ibd_care_domain::entities::targets::HealthMetricTargets,
            ibd_care_domain::entities::targets::TargetBundle,
            ibd_care_domain::entities::targets::ActivityAssessment
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "journal", description = "Symptom journal endpoints"),
        (name = "assessment", description = "Disease-activity assessment endpoints"),
        (name = "targets", description = "Evidence-based target endpoints"),
        (name = "medications", description = "Medication intake and adherence endpoints")
    ),
    info(
        title = "IBDCare API",
        version = "0.1.0",
        description = "API for pediatric IBD symptom tracking, disease-activity assessment and medication adherence",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
struct ApiDoc;
