use axum::{extract::State, Json};
use std::sync::Arc;

use shared_types::{AppError, FilterOptions};

use crate::cache::DatasetCache;

/// GET /api/filters/options
#[utoipa::path(
    get,
    path = "/api/filters/options",
    responses(
        (status = 200, description = "Distinct values per filter control, in dataset order", body = FilterOptions),
        (status = 503, description = "Case table unavailable", body = AppError)
    ),
    tag = "filters"
)]
pub async fn filter_options(
    State(datasets): State<Arc<DatasetCache>>,
) -> Result<Json<FilterOptions>, AppError> {
    let dataset = datasets.get()?;
    Ok(Json(dataset.filter_options()))
}
