use axum::Router;
use shared_types::{
    AnalyticsReport, AnalyticsScope, AppError, AppErrorKind, CaseDetail, CaseFilterParams,
    CaseListResponse, CaseRow, CategoricalField, CountOrder, CreateSessionResponse, DateRange,
    FieldCountsResponse, FilterCriteria, FilterOptions, OutcomeClass, OutcomeSummary,
    SelectRowRequest, SelectionResponse, SessionViewResponse, ValueCount, YearCount, YearSpread,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::health;
use crate::rest;
use crate::state::AppState;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        rest::filter::filter_options,
        rest::case::list_cases,
        rest::case::get_case,
        rest::analytics::get_analytics,
        rest::analytics::field_counts,
        rest::session::create_session,
        rest::session::update_filters,
        rest::session::select_row,
        rest::session::get_selection,
        rest::session::clear_selection
    ),
    components(schemas(
        AppError,
        AppErrorKind,
        health::HealthResponse,
        // Cases
        CaseRow,
        CaseDetail,
        CaseListResponse,
        OutcomeClass,
        // Filters
        CategoricalField,
        DateRange,
        FilterCriteria,
        FilterOptions,
        CaseFilterParams,
        // Analytics
        OutcomeSummary,
        YearCount,
        YearSpread,
        ValueCount,
        AnalyticsReport,
        AnalyticsScope,
        CountOrder,
        FieldCountsResponse,
        // Sessions
        CreateSessionResponse,
        SelectRowRequest,
        SelectionResponse,
        SessionViewResponse
    )),
    tags(
        (name = "cases", description = "Filtered case table and case detail"),
        (name = "filters", description = "Filter control options"),
        (name = "analytics", description = "Aggregate views over the case table"),
        (name = "sessions", description = "Per-session filters and case selection"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Casebook API",
        description = "Case-law exploration API: filtering, selection and aggregates over a read-only case table",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
