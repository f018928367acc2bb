use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analytics::OutcomeSummary;
use crate::filter::CategoricalField;
use crate::outcome::{classify_outcome, OutcomeClass};

// ── Source columns ──────────────────────────────────────────────────

pub const COL_CASE_ID: &str = "case_id";
pub const COL_CASE_TYPE: &str = "case_type";
pub const COL_COURT_NAME: &str = "court_name";
pub const COL_COURT_LOCATION: &str = "court_location";
pub const COL_COURT_LEVEL: &str = "court_level";
pub const COL_FILING_DATE: &str = "filing_date";
pub const COL_SESSION_DATE: &str = "session_date_gregorian";
pub const COL_JUDGMENT_DATE: &str = "judgment_date";
pub const COL_JUDGMENT_OUTCOME: &str = "judgment_outcome";
pub const COL_APPEAL_OUTCOME: &str = "appeal_outcome";
pub const COL_FACTS: &str = "sections_facts";
pub const COL_REASONS: &str = "sections_reasons";
pub const COL_LEGAL_REFERENCES: &str = "legal_references";

/// Columns every case table source must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_CASE_ID,
    COL_CASE_TYPE,
    COL_COURT_NAME,
    COL_COURT_LOCATION,
    COL_COURT_LEVEL,
    COL_FILING_DATE,
    COL_SESSION_DATE,
    COL_JUDGMENT_DATE,
    COL_JUDGMENT_OUTCOME,
    COL_APPEAL_OUTCOME,
    COL_FACTS,
    COL_REASONS,
    COL_LEGAL_REFERENCES,
];

// ── Legal references ────────────────────────────────────────────────

/// Legal references as they were stored in the source.
///
/// JSON sources may carry an already-structured list; CSV sources always
/// carry text, normally a JSON-encoded array.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LegalReferences {
    Structured(Vec<String>),
    Raw(String),
    #[default]
    Missing,
}

impl LegalReferences {
    /// Decode into display order. Never fails: undecodable text comes back
    /// as a single reference holding the original text verbatim.
    pub fn decode(&self) -> Vec<String> {
        match self {
            LegalReferences::Structured(refs) => refs.clone(),
            LegalReferences::Raw(raw) => decode_references(raw),
            LegalReferences::Missing => Vec::new(),
        }
    }
}

/// Decode a serialized reference list such as `["a","b"]`.
///
/// Non-string array elements keep their JSON text. Anything that is not a
/// JSON array is returned as one opaque reference.
pub fn decode_references(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => vec![raw.to_string()],
    }
}

// ── Case record ─────────────────────────────────────────────────────

/// One row of the case table. Immutable once the dataset is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    pub case_id: String,
    pub case_type: Option<String>,
    pub court_name: Option<String>,
    pub court_level: Option<String>,
    pub court_location: Option<String>,
    /// Parsed filing date; `None` when the source value was missing or unparseable.
    pub filing_date: Option<NaiveDate>,
    /// Filing date exactly as it appeared in the source.
    pub filing_date_raw: Option<String>,
    pub session_date: Option<String>,
    pub judgment_date: Option<String>,
    pub judgment_outcome: Option<String>,
    pub appeal_outcome: Option<String>,
    pub facts: Option<String>,
    pub reasons: Option<String>,
    pub legal_references: LegalReferences,
}

impl CaseRecord {
    /// A record with only its identifier set. Handy for fixtures.
    pub fn new(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            case_type: None,
            court_name: None,
            court_level: None,
            court_location: None,
            filing_date: None,
            filing_date_raw: None,
            session_date: None,
            judgment_date: None,
            judgment_outcome: None,
            appeal_outcome: None,
            facts: None,
            reasons: None,
            legal_references: LegalReferences::Missing,
        }
    }

    /// Filing year, derived from `filing_date` on every call.
    pub fn filing_year(&self) -> Option<i32> {
        self.filing_date.map(|d| d.year())
    }

    /// Value of a categorical column, `None` when missing.
    pub fn categorical(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::CaseType => &self.case_type,
            CategoricalField::CourtName => &self.court_name,
            CategoricalField::CourtLevel => &self.court_level,
            CategoricalField::CourtLocation => &self.court_location,
            CategoricalField::JudgmentOutcome => &self.judgment_outcome,
            CategoricalField::AppealOutcome => &self.appeal_outcome,
        };
        value.as_deref()
    }

    pub fn outcome(&self) -> OutcomeClass {
        self.judgment_outcome
            .as_deref()
            .map_or(OutcomeClass::Other, classify_outcome)
    }
}

// ── API response types ──────────────────────────────────────────────

/// Minimal projection used by the case table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseRow {
    pub case_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judgment_outcome: Option<String>,
    pub outcome: OutcomeClass,
    /// Colored marker shown before the outcome text.
    pub indicator: String,
}

impl From<&CaseRecord> for CaseRow {
    fn from(c: &CaseRecord) -> Self {
        let outcome = c.outcome();
        Self {
            case_id: c.case_id.clone(),
            case_type: c.case_type.clone(),
            court_level: c.court_level.clone(),
            judgment_outcome: c.judgment_outcome.clone(),
            outcome,
            indicator: outcome.indicator().to_string(),
        }
    }
}

/// Full record for the detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseDetail {
    pub case_id: String,
    pub case_type: Option<String>,
    pub court_name: Option<String>,
    pub court_location: Option<String>,
    pub court_level: Option<String>,
    /// Source text of the filing date, shown verbatim.
    pub filing_date: Option<String>,
    pub filing_year: Option<i32>,
    pub session_date: Option<String>,
    pub judgment_date: Option<String>,
    pub judgment_outcome: Option<String>,
    pub appeal_outcome: Option<String>,
    pub outcome: OutcomeClass,
    pub facts: Option<String>,
    pub reasons: Option<String>,
    pub legal_references: Vec<String>,
}

impl From<&CaseRecord> for CaseDetail {
    fn from(c: &CaseRecord) -> Self {
        Self {
            case_id: c.case_id.clone(),
            case_type: c.case_type.clone(),
            court_name: c.court_name.clone(),
            court_location: c.court_location.clone(),
            court_level: c.court_level.clone(),
            filing_date: c.filing_date_raw.clone(),
            filing_year: c.filing_year(),
            session_date: c.session_date.clone(),
            judgment_date: c.judgment_date.clone(),
            judgment_outcome: c.judgment_outcome.clone(),
            appeal_outcome: c.appeal_outcome.clone(),
            outcome: c.outcome(),
            facts: c.facts.clone(),
            reasons: c.reasons.clone(),
            legal_references: c.legal_references.decode(),
        }
    }
}

/// Filtered case table plus the metrics shown beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseListResponse {
    pub cases: Vec<CaseRow>,
    pub total: usize,
    pub metrics: OutcomeSummary,
}
