pub mod analytics;
pub mod case;
pub mod filter;
pub mod session;

use axum::{routing::{get, post, put}, Router};
use crate::state::AppState;

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Filters
        .route("/api/filters/options", get(filter::filter_options))
        // Cases
        .route("/api/cases", get(case::list_cases))
        .route("/api/cases/{case_id}", get(case::get_case))
        // Analytics
        .route("/api/analytics", get(analytics::get_analytics))
        .route("/api/fields/{field}/counts", get(analytics::field_counts))
        // Dashboard sessions
        .route("/api/sessions", post(session::create_session))
        .route("/api/sessions/{id}/filters", put(session::update_filters))
        .route(
            "/api/sessions/{id}/selection",
            post(session::select_row)
                .get(session::get_selection)
                .delete(session::clear_selection),
        )
}
