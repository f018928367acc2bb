use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use shared_types::{AppError, CaseDetail, CaseFilterParams, CaseListResponse, FilterCriteria};

use crate::cache::DatasetCache;
use crate::error_convert::ValidateRequest;
use crate::filter;

/// GET /api/cases
#[utoipa::path(
    get,
    path = "/api/cases",
    params(CaseFilterParams),
    responses(
        (status = 200, description = "Filtered case table with outcome metrics", body = CaseListResponse),
        (status = 422, description = "Invalid filter", body = AppError),
        (status = 503, description = "Case table unavailable", body = AppError)
    ),
    tag = "cases"
)]
pub async fn list_cases(
    State(datasets): State<Arc<DatasetCache>>,
    Query(params): Query<CaseFilterParams>,
) -> Result<Json<CaseListResponse>, AppError> {
    params.validate_request()?;

    let dataset = datasets.get()?;
    let criteria = FilterCriteria::from(params);
    let view = filter::apply(&dataset, &criteria);
    tracing::debug!(matched = view.len(), total = dataset.len(), "cases filtered");

    Ok(Json(view.case_list()))
}

/// GET /api/cases/{case_id}
#[utoipa::path(
    get,
    path = "/api/cases/{case_id}",
    params(
        ("case_id" = String, Path, description = "Case identifier")
    ),
    responses(
        (status = 200, description = "Full case record", body = CaseDetail),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn get_case(
    State(datasets): State<Arc<DatasetCache>>,
    Path(case_id): Path<String>,
) -> Result<Json<CaseDetail>, AppError> {
    let dataset = datasets.get()?;
    let record = dataset
        .get(&case_id)
        .ok_or_else(|| AppError::not_found(format!("Case {} not found", case_id)))?;
    Ok(Json(CaseDetail::from(record)))
}
