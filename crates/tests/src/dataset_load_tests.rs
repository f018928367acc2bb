use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use server::cache::DatasetCache;
use server::state::AppState;

use crate::common::{case_ids, get, test_app_with_source};

const JSON_SOURCE: &str = r#"[
  {
    "case_id": "J-1",
    "case_type": "تجاري",
    "court_name": "المحكمة التجارية بجدة",
    "court_location": "جدة",
    "court_level": "ابتدائي",
    "filing_date": "2022-05-01",
    "session_date_gregorian": null,
    "judgment_date": null,
    "judgment_outcome": "قبول الطعن",
    "appeal_outcome": null,
    "sections_facts": "وقائع",
    "sections_reasons": null,
    "legal_references": ["م 1", "م 2"]
  },
  {
    "case_id": "J-2",
    "case_type": "عمالي",
    "court_name": "المحكمة العمالية بجدة",
    "court_location": "جدة",
    "court_level": "استئناف",
    "filing_date": "2023-01",
    "session_date_gregorian": null,
    "judgment_date": null,
    "judgment_outcome": "رفض الدعوى",
    "appeal_outcome": null,
    "sections_facts": null,
    "sections_reasons": null,
    "legal_references": "[\"م 9\"]"
  }
]"#;

#[tokio::test]
async fn json_source_is_served_like_csv() {
    let (app, _dir) = test_app_with_source("cases.json", JSON_SOURCE);

    let (status, body) = get(&app, "/api/cases").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(case_ids(&body), vec!["J-1", "J-2"]);

    let (_, detail) = get(&app, "/api/cases/J-1").await;
    assert_eq!(detail["legal_references"], json!(["م 1", "م 2"]));

    let (_, detail) = get(&app, "/api/cases/J-2").await;
    assert_eq!(detail["legal_references"], json!(["م 9"]));
    assert_eq!(detail["filing_year"], 2023);
}

#[tokio::test]
async fn missing_columns_make_the_dataset_unavailable() {
    let (app, _dir) = test_app_with_source("cases.csv", "case_id,case_type\nC-1,تجاري\n");

    let (status, body) = get(&app, "/api/cases").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["kind"], "DatasetUnavailable");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("missing required columns: court_name"));

    let (status, _) = get(&app, "/api/analytics").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn malformed_source_does_not_reveal_its_path() {
    let (app, dir) = test_app_with_source("cases.json", "{not json");
    let dir_text = dir.path().display().to_string();

    let (status, body) = get(&app, "/api/cases").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("malformed case table: "));
    assert!(!message.contains(&dir_text));
    assert!(!message.contains("cases.json"));

    let (_, health) = get(&app, "/health").await;
    assert!(!health.to_string().contains(&dir_text));
}

#[tokio::test]
async fn duplicate_case_ids_are_rejected() {
    let header = "case_id,case_type,court_name,court_location,court_level,filing_date,session_date_gregorian,judgment_date,judgment_outcome,appeal_outcome,sections_facts,sections_reasons,legal_references";
    let source = format!("{header}\nC-1,,,,,,,,,,,,\nC-1,,,,,,,,,,,,\n");
    let (app, _dir) = test_app_with_source("cases.csv", &source);

    let (status, body) = get(&app, "/api/filters/options").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"].as_str().unwrap().contains("C-1"));
}

#[tokio::test]
async fn unreadable_source_hides_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let state = AppState::new(Arc::new(DatasetCache::new(path)));
    let app = server::openapi::api_router(state);

    let (status, body) = get(&app, "/api/cases").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(!body["message"].as_str().unwrap().contains("absent.csv"));
}

#[tokio::test]
async fn source_edits_are_picked_up_on_the_next_request() {
    let header = "case_id,case_type,court_name,court_location,court_level,filing_date,session_date_gregorian,judgment_date,judgment_outcome,appeal_outcome,sections_facts,sections_reasons,legal_references";
    let (app, dir) = test_app_with_source("cases.csv", &format!("{header}\nA-1,,,,,,,,,,,,\n"));

    let (_, body) = get(&app, "/api/cases").await;
    assert_eq!(case_ids(&body), vec!["A-1"]);

    // A different length changes the fingerprint even within one mtime tick.
    std::fs::write(
        dir.path().join("cases.csv"),
        format!("{header}\nA-1,,,,,,,,,,,,\nA-2,,,,,,,,,,,,\n"),
    )
    .unwrap();

    let (_, body) = get(&app, "/api/cases").await;
    assert_eq!(case_ids(&body), vec!["A-1", "A-2"]);
}
