use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Categorical fields ──────────────────────────────────────────────

/// Categorical columns of the case table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    CaseType,
    CourtName,
    CourtLevel,
    CourtLocation,
    JudgmentOutcome,
    AppealOutcome,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 6] = [
        CategoricalField::CaseType,
        CategoricalField::CourtName,
        CategoricalField::CourtLevel,
        CategoricalField::CourtLocation,
        CategoricalField::JudgmentOutcome,
        CategoricalField::AppealOutcome,
    ];

    /// Fields that have a filter control.
    pub const FILTERABLE: [CategoricalField; 5] = [
        CategoricalField::CaseType,
        CategoricalField::CourtName,
        CategoricalField::CourtLevel,
        CategoricalField::JudgmentOutcome,
        CategoricalField::AppealOutcome,
    ];

    /// Column name in the source table.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoricalField::CaseType => "case_type",
            CategoricalField::CourtName => "court_name",
            CategoricalField::CourtLevel => "court_level",
            CategoricalField::CourtLocation => "court_location",
            CategoricalField::JudgmentOutcome => "judgment_outcome",
            CategoricalField::AppealOutcome => "appeal_outcome",
        }
    }

    pub fn is_filterable(self) -> bool {
        self != CategoricalField::CourtLocation
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoricalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoricalField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = CategoricalField::ALL.iter().map(|f| f.as_str()).collect();
                format!("Unknown field: {}. Valid values: {}", s, valid.join(", "))
            })
    }
}

// ── Criteria ────────────────────────────────────────────────────────

/// Closed interval `[start, end]` over filing dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Inclusive on both ends. An inverted range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn intersect(&self, other: &DateRange) -> DateRange {
        DateRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }
}

/// Active filter criteria. `None` in any field means "no constraint".
///
/// Built fresh from request state for every evaluation; the `with_*`
/// builders consume and return a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judgment_outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appeal_outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case_type(self, value: impl Into<String>) -> Self {
        Self {
            case_type: Some(value.into()),
            ..self
        }
    }

    pub fn with_court_name(self, value: impl Into<String>) -> Self {
        Self {
            court_name: Some(value.into()),
            ..self
        }
    }

    pub fn with_court_level(self, value: impl Into<String>) -> Self {
        Self {
            court_level: Some(value.into()),
            ..self
        }
    }

    pub fn with_judgment_outcome(self, value: impl Into<String>) -> Self {
        Self {
            judgment_outcome: Some(value.into()),
            ..self
        }
    }

    pub fn with_appeal_outcome(self, value: impl Into<String>) -> Self {
        Self {
            appeal_outcome: Some(value.into()),
            ..self
        }
    }

    pub fn with_date_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            date_range: Some(DateRange::new(start, end)),
            ..self
        }
    }

    /// Equality constraint on `field`, if any. Non-filterable fields never constrain.
    pub fn constraint(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::CaseType => &self.case_type,
            CategoricalField::CourtName => &self.court_name,
            CategoricalField::CourtLevel => &self.court_level,
            CategoricalField::JudgmentOutcome => &self.judgment_outcome,
            CategoricalField::AppealOutcome => &self.appeal_outcome,
            CategoricalField::CourtLocation => return None,
        };
        value.as_deref()
    }

    /// Active equality constraints in a fixed field order.
    pub fn constraints(&self) -> impl Iterator<Item = (CategoricalField, &str)> + '_ {
        CategoricalField::FILTERABLE
            .into_iter()
            .filter_map(|field| self.constraint(field).map(|value| (field, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.date_range.is_none() && self.constraints().next().is_none()
    }

    /// Conjunction of two criteria.
    ///
    /// Returns `None` when both pin the same field to different values; such
    /// a conjunction matches nothing and has no single-criteria form. Date
    /// ranges intersect.
    pub fn and(&self, other: &FilterCriteria) -> Option<FilterCriteria> {
        fn merge(a: &Option<String>, b: &Option<String>) -> Result<Option<String>, ()> {
            match (a, b) {
                (Some(x), Some(y)) if x != y => Err(()),
                (Some(x), _) => Ok(Some(x.clone())),
                (None, y) => Ok(y.clone()),
            }
        }

        let date_range = match (self.date_range, other.date_range) {
            (Some(a), Some(b)) => Some(a.intersect(&b)),
            (a, b) => a.or(b),
        };

        Some(FilterCriteria {
            case_type: merge(&self.case_type, &other.case_type).ok()?,
            court_name: merge(&self.court_name, &other.court_name).ok()?,
            court_level: merge(&self.court_level, &other.court_level).ok()?,
            judgment_outcome: merge(&self.judgment_outcome, &other.judgment_outcome).ok()?,
            appeal_outcome: merge(&self.appeal_outcome, &other.appeal_outcome).ok()?,
            date_range,
        })
    }

    pub fn compatible(&self, other: &FilterCriteria) -> bool {
        self.and(other).is_some()
    }
}

// ── API types ───────────────────────────────────────────────────────

/// Distinct values for each filter control, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FilterOptions {
    pub case_types: Vec<String>,
    pub court_names: Vec<String>,
    pub court_levels: Vec<String>,
    pub judgment_outcomes: Vec<String>,
    pub appeal_outcomes: Vec<String>,
}

/// Query parameters shared by every endpoint that evaluates filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
#[cfg_attr(
    feature = "validation",
    validate(schema(function = "validate_date_pair"))
)]
pub struct CaseFilterParams {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 512, message = "case_type must be 1-512 characters"))
    )]
    pub case_type: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 512, message = "court_name must be 1-512 characters"))
    )]
    pub court_name: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 512, message = "court_level must be 1-512 characters"))
    )]
    pub court_level: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(length(
            min = 1,
            max = 512,
            message = "judgment_outcome must be 1-512 characters"
        ))
    )]
    pub judgment_outcome: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(length(
            min = 1,
            max = 512,
            message = "appeal_outcome must be 1-512 characters"
        ))
    )]
    pub appeal_outcome: Option<String>,
    /// Start of the filing-date range (inclusive, `YYYY-MM-DD`).
    pub filed_from: Option<NaiveDate>,
    /// End of the filing-date range (inclusive, `YYYY-MM-DD`).
    pub filed_to: Option<NaiveDate>,
}

#[cfg(feature = "validation")]
fn validate_date_pair(params: &CaseFilterParams) -> Result<(), validator::ValidationError> {
    match (params.filed_from, params.filed_to) {
        (Some(_), None) | (None, Some(_)) => {
            let mut err = validator::ValidationError::new("date_range");
            err.message = Some("filed_from and filed_to must be supplied together".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl From<CaseFilterParams> for FilterCriteria {
    fn from(p: CaseFilterParams) -> Self {
        let date_range = match (p.filed_from, p.filed_to) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        };
        Self {
            case_type: p.case_type,
            court_name: p.court_name,
            court_level: p.court_level,
            judgment_outcome: p.judgment_outcome,
            appeal_outcome: p.appeal_outcome,
            date_range,
        }
    }
}
