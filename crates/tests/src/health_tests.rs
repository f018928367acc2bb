use axum::http::StatusCode;
use std::sync::Arc;

use server::cache::DatasetCache;
use server::state::AppState;

use crate::common::{get, test_app, test_app_with_source};

#[tokio::test]
async fn health_reports_loaded_dataset() {
    let (app, _dir) = test_app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["dataset"], "loaded");
    assert_eq!(body["cases"], 6);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn health_stays_up_when_dataset_is_broken() {
    let (app, _dir) = test_app_with_source("cases.csv", "case_id\nC-1\n");

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cases"], 0);
    assert!(body["dataset"]
        .as_str()
        .unwrap()
        .starts_with("error: missing required columns"));
}

#[tokio::test]
async fn health_does_not_reveal_the_source_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("private-cases-absent.csv");
    let state = AppState::new(Arc::new(DatasetCache::new(path)));
    let app = server::openapi::api_router(state);

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let dataset = body["dataset"].as_str().unwrap();
    assert_eq!(dataset, "error: Case table source is not readable");
    assert!(!body.to_string().contains("private-cases-absent"));
    assert!(!body.to_string().contains(&dir.path().display().to_string()));
}

#[tokio::test]
async fn docs_are_served() {
    let (app, _dir) = test_app();

    let req = axum::http::Request::builder()
        .uri("/docs")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
