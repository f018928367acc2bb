use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{case_ids, get, q, test_app};

#[tokio::test]
async fn unfiltered_list_is_the_whole_dataset_in_order() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/api/cases").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 6);
    assert_eq!(
        case_ids(&body),
        vec!["C-001", "C-002", "C-003", "C-004", "C-005", "C-006"]
    );
}

#[tokio::test]
async fn rows_carry_minimal_projection_and_indicator() {
    let (app, _dir) = test_app();

    let (_, body) = get(&app, "/api/cases").await;
    let first = &body["cases"][0];
    assert_eq!(first["case_type"], "تجاري");
    assert_eq!(first["court_level"], "ابتدائي");
    assert_eq!(first["outcome"], "accepted");
    assert_eq!(first["indicator"], "🟢");
    assert!(first.get("sections_facts").is_none());
    assert!(first.get("court_name").is_none());

    assert_eq!(body["cases"][1]["indicator"], "🔴");
    assert_eq!(body["cases"][2]["indicator"], "⚪");
    // Both markers present: rejection wins.
    assert_eq!(body["cases"][5]["outcome"], "rejected");
}

#[tokio::test]
async fn filter_by_court_level() {
    let (app, _dir) = test_app();

    let uri = format!("/api/cases?court_level={}", q("استئناف"));
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(case_ids(&body), vec!["C-002", "C-003", "C-006"]);
    for row in body["cases"].as_array().unwrap() {
        assert_eq!(row["court_level"], "استئناف");
    }
}

#[tokio::test]
async fn filter_by_inclusive_date_range_skips_unparsed_dates() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/api/cases?filed_from=2020-01-01&filed_to=2020-12-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(case_ids(&body), vec!["C-001", "C-002", "C-006"]);
}

#[tokio::test]
async fn combined_filters_are_anded() {
    let (app, _dir) = test_app();

    let uri = format!(
        "/api/cases?court_level={}&filed_from=2020-01-01&filed_to=2020-12-31",
        q("استئناف")
    );
    let (_, body) = get(&app, &uri).await;
    assert_eq!(case_ids(&body), vec!["C-002", "C-006"]);
}

#[tokio::test]
async fn metrics_describe_the_filtered_view() {
    let (app, _dir) = test_app();

    let (_, all) = get(&app, "/api/cases").await;
    assert_eq!(all["metrics"]["total"], 6);
    assert_eq!(all["metrics"]["accepted"], 2);
    assert_eq!(all["metrics"]["rejected"], 3);
    assert_eq!(all["metrics"]["rejected_pct"], 50.0);

    let uri = format!("/api/cases?case_type={}", q("عمالي"));
    let (_, labour) = get(&app, &uri).await;
    assert_eq!(labour["metrics"]["total"], 1);
    assert_eq!(labour["metrics"]["accepted_pct"], 100.0);
    assert_eq!(labour["metrics"]["rejected_pct"], 0.0);
}

#[tokio::test]
async fn no_match_yields_empty_list_and_zero_metrics() {
    let (app, _dir) = test_app();

    let uri = format!("/api/cases?case_type={}", q("أحوال شخصية"));
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["metrics"]["accepted_pct"], 0.0);
    assert_eq!(body["metrics"]["rejected_pct"], 0.0);
}

#[tokio::test]
async fn inverted_range_is_empty_not_an_error() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/api/cases?filed_from=2021-01-01&filed_to=2020-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn lone_date_bound_is_rejected() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/api/cases?filed_from=2020-01-01").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "ValidationError");
}

#[tokio::test]
async fn empty_filter_value_is_rejected() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/api/cases?court_level=").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["court_level"].is_string());
}
