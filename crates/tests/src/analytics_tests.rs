use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{get, q, test_app};

fn counts(list: &Value) -> Vec<(String, u64)> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["value"].as_str().unwrap().to_string(),
                c["count"].as_u64().unwrap(),
            )
        })
        .collect()
}

fn pair(value: &str, count: u64) -> (String, u64) {
    (value.to_string(), count)
}

#[tokio::test]
async fn report_defaults_to_full_dataset() {
    let (app, _dir) = test_app();

    // Filters are ignored unless the filtered scope is requested.
    let uri = format!("/api/analytics?court_level={}", q("استئناف"));
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scope"], "full");
    assert_eq!(body["total"], 6);
    assert_eq!(body["outcomes"]["accepted"], 2);
    assert_eq!(body["outcomes"]["rejected"], 3);
    assert_eq!(body["outcomes"]["rejected_pct"], 50.0);
    let accepted_pct = body["outcomes"]["accepted_pct"].as_f64().unwrap();
    assert!((accepted_pct - 33.333).abs() < 0.01);
}

#[tokio::test]
async fn cases_per_year_skip_undated_records() {
    let (app, _dir) = test_app();

    let (_, body) = get(&app, "/api/analytics").await;
    assert_eq!(
        body["cases_per_year"],
        json!([
            { "year": 2019, "count": 1 },
            { "year": 2020, "count": 3 },
            { "year": 2021, "count": 1 }
        ])
    );

    let spread = &body["year_spread"];
    assert_eq!(spread["count"], 5);
    assert_eq!(spread["min"], 2019);
    assert_eq!(spread["median"], 2020.0);
    assert_eq!(spread["max"], 2021);
}

#[tokio::test]
async fn share_and_ranked_orderings() {
    let (app, _dir) = test_app();

    let (_, body) = get(&app, "/api/analytics").await;
    assert_eq!(
        counts(&body["case_types"]),
        vec![pair("تجاري", 3), pair("جزائي", 2), pair("عمالي", 1)]
    );
    // Equal counts keep first-seen order.
    assert_eq!(
        counts(&body["court_levels"]),
        vec![pair("ابتدائي", 3), pair("استئناف", 3)]
    );
    assert_eq!(
        counts(&body["judgment_outcomes"]),
        vec![
            pair("إحالة", 1),
            pair("قبول الطعن", 1),
            pair("قبول الطعن شكلاً ورفضه موضوعاً", 1),
            pair("نقض الحكم", 1),
            pair("رفض الدعوى", 2),
        ]
    );
}

#[tokio::test]
async fn filtered_scope_follows_the_criteria() {
    let (app, _dir) = test_app();

    let uri = format!("/api/analytics?scope=filtered&court_level={}", q("استئناف"));
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scope"], "filtered");
    assert_eq!(body["total"], 3);
    assert_eq!(body["outcomes"]["accepted"], 0);
    assert_eq!(body["outcomes"]["rejected"], 2);
    assert_eq!(
        body["cases_per_year"],
        json!([{ "year": 2020, "count": 2 }, { "year": 2021, "count": 1 }])
    );
    assert_eq!(counts(&body["court_levels"]), vec![pair("استئناف", 3)]);
}

#[tokio::test]
async fn empty_filtered_scope_has_zero_metrics_and_no_spread() {
    let (app, _dir) = test_app();

    let uri = format!("/api/analytics?scope=filtered&case_type={}", q("إداري"));
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["outcomes"]["accepted_pct"], 0.0);
    assert_eq!(body["cases_per_year"], json!([]));
    assert!(body.get("year_spread").is_none());
}

#[tokio::test]
async fn field_counts_support_both_orders() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/api/fields/case_type/counts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["field"], "case_type");
    assert_eq!(body["order"], "share");
    assert_eq!(
        counts(&body["counts"]),
        vec![pair("تجاري", 3), pair("جزائي", 2), pair("عمالي", 1)]
    );

    let (_, body) = get(&app, "/api/fields/case_type/counts?order=ranked").await;
    assert_eq!(
        counts(&body["counts"]),
        vec![pair("عمالي", 1), pair("جزائي", 2), pair("تجاري", 3)]
    );
}

#[tokio::test]
async fn field_counts_cover_non_filterable_columns() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/api/fields/court_location/counts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        counts(&body["counts"]),
        vec![pair("الرياض", 3), pair("جدة", 2), pair("الدمام", 1)]
    );
}

#[tokio::test]
async fn field_counts_respect_filtered_scope() {
    let (app, _dir) = test_app();

    let uri = format!(
        "/api/fields/judgment_outcome/counts?scope=filtered&case_type={}",
        q("جزائي")
    );
    let (_, body) = get(&app, &uri).await;
    assert_eq!(body["scope"], "filtered");
    assert_eq!(counts(&body["counts"]), vec![pair("رفض الدعوى", 2)]);
}

#[tokio::test]
async fn unknown_field_is_a_bad_request() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/api/fields/judge/counts").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
    assert!(body["message"].as_str().unwrap().contains("Unknown field: judge"));
}

#[tokio::test]
async fn analytics_validate_filters() {
    let (app, _dir) = test_app();

    let (status, _) = get(&app, "/api/analytics?scope=filtered&filed_to=2020-12-31").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
