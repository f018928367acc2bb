use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use shared_types::{
    AnalyticsReport, AnalyticsScope, AppError, CaseFilterParams, CategoricalField, CountOrder,
    FieldCountParams, FieldCountsResponse, FilterCriteria, ScopeParams,
};

use crate::analytics;
use crate::cache::DatasetCache;
use crate::dataset::Dataset;
use crate::error_convert::ValidateRequest;
use crate::filter::{self, FilteredView};

/// Records an aggregate runs over: the whole table, or the filtered view.
fn scoped_view<'d>(
    dataset: &'d Dataset,
    scope: AnalyticsScope,
    params: CaseFilterParams,
) -> FilteredView<'d> {
    match scope {
        AnalyticsScope::Full => FilteredView::all(dataset.records()),
        AnalyticsScope::Filtered => filter::apply(dataset, &FilterCriteria::from(params)),
    }
}

/// GET /api/analytics
#[utoipa::path(
    get,
    path = "/api/analytics",
    params(CaseFilterParams, ScopeParams),
    responses(
        (status = 200, description = "Chart payload for the analytics view", body = AnalyticsReport),
        (status = 422, description = "Invalid filter", body = AppError),
        (status = 503, description = "Case table unavailable", body = AppError)
    ),
    tag = "analytics"
)]
pub async fn get_analytics(
    State(datasets): State<Arc<DatasetCache>>,
    Query(params): Query<CaseFilterParams>,
    Query(scope): Query<ScopeParams>,
) -> Result<Json<AnalyticsReport>, AppError> {
    params.validate_request()?;

    let dataset = datasets.get()?;
    let view = scoped_view(&dataset, scope.scope, params);
    Ok(Json(analytics::analytics_report(&view, scope.scope)))
}

/// GET /api/fields/{field}/counts
#[utoipa::path(
    get,
    path = "/api/fields/{field}/counts",
    params(
        ("field" = CategoricalField, Path, description = "Categorical column"),
        CaseFilterParams,
        FieldCountParams
    ),
    responses(
        (status = 200, description = "Per-value counts for one column", body = FieldCountsResponse),
        (status = 400, description = "Unknown field", body = AppError),
        (status = 422, description = "Invalid filter", body = AppError)
    ),
    tag = "analytics"
)]
pub async fn field_counts(
    State(datasets): State<Arc<DatasetCache>>,
    Path(field): Path<String>,
    Query(params): Query<CaseFilterParams>,
    Query(options): Query<FieldCountParams>,
) -> Result<Json<FieldCountsResponse>, AppError> {
    let field: CategoricalField = field.parse().map_err(AppError::bad_request)?;
    params.validate_request()?;

    let dataset = datasets.get()?;
    let view = scoped_view(&dataset, options.scope, params);
    let counts = match options.order {
        CountOrder::Ranked => analytics::categorical_counts(view.iter(), field),
        CountOrder::Share => analytics::value_distribution(view.iter(), field),
    };

    Ok(Json(FieldCountsResponse {
        field,
        scope: options.scope,
        order: options.order,
        counts,
    }))
}
