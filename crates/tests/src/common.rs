use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use server::cache::DatasetCache;
use server::state::AppState;

/// Six cases covering every outcome class, two court levels, an
/// unparseable filing date, multi-line facts, and each legal-reference form.
pub const FIXTURE_CSV: &str = r#"case_id,case_type,court_name,court_location,court_level,filing_date,session_date_gregorian,judgment_date,judgment_outcome,appeal_outcome,sections_facts,sections_reasons,legal_references
C-001,تجاري,المحكمة التجارية بالرياض,الرياض,ابتدائي,2020-01-01,2020-02-10,2020-03-01,قبول الطعن,تأييد,"وقائع الدعوى
سطر ثان",أسباب الحكم,"[""نظام المحاكم التجارية م 12"",""م 3""]"
C-002,جزائي,المحكمة الجزائية بجدة,جدة,استئناف,2020-12-31,,,رفض الدعوى,,,,[]
C-003,تجاري,محكمة الاستئناف بالرياض,الرياض,استئناف,2021-03-15,,,إحالة,,,,not json
C-004,عمالي,المحكمة العمالية بالدمام,الدمام,ابتدائي,2019-07-01,,,نقض الحكم,نقض,,,
C-005,جزائي,المحكمة الجزائية بجدة,جدة,ابتدائي,غير معروف,,,رفض الدعوى,,,,"[""م 5""]"
C-006,تجاري,المحكمة التجارية بالرياض,الرياض,استئناف,2020/06/15,,,قبول الطعن شكلاً ورفضه موضوعاً,,,,
"#;

/// Router over the fixture dataset. Keep the `TempDir` alive for the test.
pub fn test_app() -> (Router, tempfile::TempDir) {
    test_app_with_source("cases.csv", FIXTURE_CSV)
}

/// Router over an arbitrary source file written to a fresh temp dir.
pub fn test_app_with_source(file_name: &str, contents: &str) -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(file_name);
    std::fs::write(&path, contents).expect("Failed to write fixture dataset");

    let state = AppState::new(Arc::new(DatasetCache::new(path)));
    (server::openapi::api_router(state), dir)
}

/// Percent-encode a query value.
pub fn q(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// GET a route.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// POST JSON to a route.
pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

/// PUT JSON to a route.
pub async fn put_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

/// DELETE a route.
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// Send a request and parse the JSON response. Empty bodies become `Null`.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Create a dashboard session and return its id.
pub async fn create_session(app: &Router) -> String {
    let (status, body) = post_json(app, "/api/sessions", "{}").await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"]
        .as_str()
        .expect("session_id missing")
        .to_string()
}

/// Case ids of a case-list response, in row order.
pub fn case_ids(list: &Value) -> Vec<String> {
    list["cases"]
        .as_array()
        .expect("cases array missing")
        .iter()
        .map(|c| c["case_id"].as_str().unwrap_or_default().to_string())
        .collect()
}
