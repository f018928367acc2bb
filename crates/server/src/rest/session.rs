use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use shared_types::{
    AppError, CaseDetail, CaseFilterParams, CreateSessionResponse, FilterCriteria,
    SelectRowRequest, Selection, SelectionResponse, SessionViewResponse,
};

use crate::cache::DatasetCache;
use crate::dataset::Dataset;
use crate::error_convert::ValidateRequest;
use crate::filter;
use crate::session::SessionStore;

fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request("Invalid session UUID format"))
}

fn selection_response(selection: &Selection, dataset: &Dataset) -> SelectionResponse {
    SelectionResponse {
        case_id: selection.case_id().map(str::to_string),
        highlighted_row: selection.highlighted_row(),
        case: selection.resolve(dataset).map(CaseDetail::from),
    }
}

/// POST /api/sessions
#[utoipa::path(
    post,
    path = "/api/sessions",
    responses(
        (status = 201, description = "Session created", body = CreateSessionResponse)
    ),
    tag = "sessions"
)]
pub async fn create_session(
    State(sessions): State<SessionStore>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = sessions.create();
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// PUT /api/sessions/{id}/filters
#[utoipa::path(
    put,
    path = "/api/sessions/{id}/filters",
    request_body = CaseFilterParams,
    params(
        ("id" = String, Path, description = "Session UUID")
    ),
    responses(
        (status = 200, description = "New view and re-anchored highlight", body = SessionViewResponse),
        (status = 404, description = "Session not found", body = AppError),
        (status = 422, description = "Invalid filter", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn update_filters(
    State(datasets): State<Arc<DatasetCache>>,
    State(sessions): State<SessionStore>,
    Path(id): Path<String>,
    Json(body): Json<CaseFilterParams>,
) -> Result<Json<SessionViewResponse>, AppError> {
    let id = parse_session_id(&id)?;
    body.validate_request()?;

    let dataset = datasets.get()?;
    let criteria = FilterCriteria::from(body);
    let response = sessions.with_session(id, |session| {
        let view = filter::apply(&dataset, &criteria);
        session.selection.clear_if_absent(&view);
        session.criteria = criteria.clone();
        SessionViewResponse {
            criteria,
            view: view.case_list(),
            highlighted_row: session.selection.highlighted_row(),
        }
    })?;

    tracing::info!(
        session_id = %id,
        matched = response.view.total,
        highlighted_row = ?response.highlighted_row,
        "session filters updated"
    );
    Ok(Json(response))
}

/// POST /api/sessions/{id}/selection
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/selection",
    request_body = SelectRowRequest,
    params(
        ("id" = String, Path, description = "Session UUID")
    ),
    responses(
        (status = 200, description = "Row selected", body = SelectionResponse),
        (status = 400, description = "Row index out of range", body = AppError),
        (status = 404, description = "Session not found", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn select_row(
    State(datasets): State<Arc<DatasetCache>>,
    State(sessions): State<SessionStore>,
    Path(id): Path<String>,
    Json(body): Json<SelectRowRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    let id = parse_session_id(&id)?;
    let dataset = datasets.get()?;

    let response = sessions.with_session(id, |session| {
        let view = filter::apply(&dataset, &session.criteria);
        session.selection.select(&view, body.row_index)?;
        Ok::<_, AppError>(selection_response(&session.selection, &dataset))
    })??;

    tracing::info!(
        session_id = %id,
        row_index = body.row_index,
        case_id = ?response.case_id,
        "case selected"
    );
    Ok(Json(response))
}

/// GET /api/sessions/{id}/selection
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/selection",
    params(
        ("id" = String, Path, description = "Session UUID")
    ),
    responses(
        (status = 200, description = "Current selection", body = SelectionResponse),
        (status = 404, description = "Session not found", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn get_selection(
    State(datasets): State<Arc<DatasetCache>>,
    State(sessions): State<SessionStore>,
    Path(id): Path<String>,
) -> Result<Json<SelectionResponse>, AppError> {
    let id = parse_session_id(&id)?;
    let dataset = datasets.get()?;

    let response = sessions.with_session(id, |session| {
        let view = filter::apply(&dataset, &session.criteria);
        session.selection.clear_if_absent(&view);
        selection_response(&session.selection, &dataset)
    })?;
    Ok(Json(response))
}

/// DELETE /api/sessions/{id}/selection
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}/selection",
    params(
        ("id" = String, Path, description = "Session UUID")
    ),
    responses(
        (status = 204, description = "Selection cleared"),
        (status = 404, description = "Session not found", body = AppError)
    ),
    tag = "sessions"
)]
pub async fn clear_selection(
    State(sessions): State<SessionStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_session_id(&id)?;
    sessions.with_session(id, |session| session.selection.clear())?;
    Ok(StatusCode::NO_CONTENT)
}
