use serde_json::{Map, Value};
use shared_types::{
    CaseLookup, CaseRecord, CategoricalField, FilterOptions, LegalReferences, COL_APPEAL_OUTCOME,
    COL_CASE_ID, COL_CASE_TYPE, COL_COURT_LEVEL, COL_COURT_LOCATION, COL_COURT_NAME, COL_FACTS,
    COL_FILING_DATE, COL_JUDGMENT_DATE, COL_JUDGMENT_OUTCOME, COL_LEGAL_REFERENCES, COL_REASONS,
    COL_SESSION_DATE, REQUIRED_COLUMNS,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::dates::parse_filing_date;

/// Fatal problem with the case table source. Never accompanied by a partial dataset.
#[derive(Debug)]
pub enum DatasetError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        path: PathBuf,
        message: String,
    },
    MissingColumns {
        columns: Vec<String>,
    },
    /// `row` is the 1-based data row, not counting the header.
    MissingCaseId {
        row: usize,
    },
    DuplicateCaseId {
        case_id: String,
        row: usize,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            DatasetError::Malformed { path, message } => {
                write!(f, "malformed case table {}: {}", path.display(), message)
            }
            DatasetError::MissingColumns { columns } => {
                write!(f, "missing required columns: {}", columns.join(", "))
            }
            DatasetError::MissingCaseId { row } => write!(f, "row {} has no case_id", row),
            DatasetError::DuplicateCaseId { case_id, row } => {
                write!(f, "duplicate case_id {} at row {}", case_id, row)
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The loaded case table. Immutable; shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<CaseRecord>,
    index: HashMap<String, usize>,
    unparsed_dates: usize,
}

impl Dataset {
    /// Build from records in source order, rejecting duplicate identifiers.
    pub fn from_records(records: Vec<CaseRecord>) -> Result<Self, DatasetError> {
        let mut index = HashMap::with_capacity(records.len());
        let mut unparsed_dates = 0;
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.case_id.clone(), i).is_some() {
                return Err(DatasetError::DuplicateCaseId {
                    case_id: record.case_id.clone(),
                    row: i + 1,
                });
            }
            if record.filing_date.is_none() && record.filing_date_raw.is_some() {
                unparsed_dates += 1;
            }
        }
        Ok(Self {
            records,
            index,
            unparsed_dates,
        })
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, case_id: &str) -> Option<&CaseRecord> {
        self.index.get(case_id).map(|&i| &self.records[i])
    }

    /// Rows whose filing date was present but could not be parsed.
    pub fn unparsed_dates(&self) -> usize {
        self.unparsed_dates
    }

    /// Distinct non-missing values of `field` in first-occurrence order.
    pub fn distinct_values(&self, field: CategoricalField) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.categorical(field))
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            case_types: self.distinct_values(CategoricalField::CaseType),
            court_names: self.distinct_values(CategoricalField::CourtName),
            court_levels: self.distinct_values(CategoricalField::CourtLevel),
            judgment_outcomes: self.distinct_values(CategoricalField::JudgmentOutcome),
            appeal_outcomes: self.distinct_values(CategoricalField::AppealOutcome),
        }
    }
}

impl CaseLookup for Dataset {
    fn find_case(&self, case_id: &str) -> Option<&CaseRecord> {
        self.get(case_id)
    }
}

/// Load the case table at `path`. `.json` sources are read as an array of
/// objects; everything else is read as CSV with a header row.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let records = if is_json {
        read_json(&bytes, path)?
    } else {
        read_csv(&bytes, path)?
    };
    let dataset = Dataset::from_records(records)?;

    if dataset.unparsed_dates() > 0 {
        tracing::warn!(
            rows = dataset.unparsed_dates(),
            "filing dates could not be parsed; those rows have no filing year"
        );
    }
    tracing::info!(cases = dataset.len(), "case table loaded");
    Ok(dataset)
}

/// Treat empty and whitespace-only cells as missing.
fn present(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn check_columns<'a>(available: impl IntoIterator<Item = &'a str>) -> Result<(), DatasetError> {
    let available: HashSet<&str> = available.into_iter().collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !available.contains(*c))
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::MissingColumns { columns: missing })
    }
}

fn build_record<F>(
    row: usize,
    cell: F,
    legal_references: LegalReferences,
) -> Result<CaseRecord, DatasetError>
where
    F: Fn(&str) -> Option<String>,
{
    let case_id = cell(COL_CASE_ID).ok_or(DatasetError::MissingCaseId { row })?;
    let filing_date_raw = cell(COL_FILING_DATE);
    Ok(CaseRecord {
        case_id,
        case_type: cell(COL_CASE_TYPE),
        court_name: cell(COL_COURT_NAME),
        court_level: cell(COL_COURT_LEVEL),
        court_location: cell(COL_COURT_LOCATION),
        filing_date: filing_date_raw.as_deref().and_then(parse_filing_date),
        filing_date_raw,
        session_date: cell(COL_SESSION_DATE),
        judgment_date: cell(COL_JUDGMENT_DATE),
        judgment_outcome: cell(COL_JUDGMENT_OUTCOME),
        appeal_outcome: cell(COL_APPEAL_OUTCOME),
        facts: cell(COL_FACTS),
        reasons: cell(COL_REASONS),
        legal_references,
    })
}

// ── CSV ─────────────────────────────────────────────────────────────

fn read_csv(bytes: &[u8], path: &Path) -> Result<Vec<CaseRecord>, DatasetError> {
    let malformed = |e: csv::Error| DatasetError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns: HashMap<String, usize> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim_start_matches('\u{feff}').to_string(), i))
        .collect();
    check_columns(columns.keys().map(String::as_str))?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result.map_err(malformed)?;
        let cell = |name: &str| {
            columns
                .get(name)
                .and_then(|&idx| row.get(idx))
                .and_then(present)
        };
        let legal_references = cell(COL_LEGAL_REFERENCES)
            .map(LegalReferences::Raw)
            .unwrap_or_default();
        records.push(build_record(i + 1, cell, legal_references)?);
    }
    Ok(records)
}

// ── JSON ────────────────────────────────────────────────────────────

fn read_json(bytes: &[u8], path: &Path) -> Result<Vec<CaseRecord>, DatasetError> {
    let rows: Vec<Map<String, Value>> =
        serde_json::from_slice(bytes).map_err(|e| DatasetError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    check_columns(rows.iter().flat_map(|r| r.keys().map(String::as_str)))?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let cell = |name: &str| row.get(name).and_then(json_text);
            let legal_references = match row.get(COL_LEGAL_REFERENCES) {
                Some(Value::Array(items)) => LegalReferences::Structured(
                    items
                        .iter()
                        .map(|item| match item {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect(),
                ),
                Some(other) => json_text(other)
                    .map(LegalReferences::Raw)
                    .unwrap_or_default(),
                None => LegalReferences::Missing,
            };
            build_record(i + 1, cell, legal_references)
        })
        .collect()
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => present(s),
        other => Some(other.to_string()),
    }
}
