use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{get, test_app};

#[tokio::test]
async fn detail_has_full_record_with_decoded_references() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/api/cases/C-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["case_id"], "C-001");
    assert_eq!(body["court_name"], "المحكمة التجارية بالرياض");
    assert_eq!(body["court_location"], "الرياض");
    assert_eq!(body["filing_date"], "2020-01-01");
    assert_eq!(body["filing_year"], 2020);
    assert_eq!(body["session_date"], "2020-02-10");
    assert_eq!(body["appeal_outcome"], "تأييد");
    assert_eq!(body["facts"], "وقائع الدعوى\nسطر ثان");
    assert_eq!(
        body["legal_references"],
        json!(["نظام المحاكم التجارية م 12", "م 3"])
    );
}

#[tokio::test]
async fn undecodable_references_fall_back_to_raw_text() {
    let (app, _dir) = test_app();

    let (_, body) = get(&app, "/api/cases/C-003").await;
    assert_eq!(body["legal_references"], json!(["not json"]));

    let (_, body) = get(&app, "/api/cases/C-002").await;
    assert_eq!(body["legal_references"], json!([]));

    let (_, body) = get(&app, "/api/cases/C-004").await;
    assert_eq!(body["legal_references"], json!([]));
}

#[tokio::test]
async fn unparseable_filing_date_is_shown_verbatim() {
    let (app, _dir) = test_app();

    let (_, body) = get(&app, "/api/cases/C-005").await;
    assert_eq!(body["filing_date"], "غير معروف");
    assert!(body["filing_year"].is_null());
}

#[tokio::test]
async fn non_iso_filing_date_still_yields_a_year() {
    let (app, _dir) = test_app();

    let (_, body) = get(&app, "/api/cases/C-006").await;
    assert_eq!(body["filing_date"], "2020/06/15");
    assert_eq!(body["filing_year"], 2020);
}

#[tokio::test]
async fn unknown_case_is_not_found() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/api/cases/C-999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NotFound");
}
