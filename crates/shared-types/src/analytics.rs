use serde::{Deserialize, Serialize};

/// Accepted/rejected counts and their share of the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OutcomeSummary {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Percent of `total`; `0.0` when `total` is zero.
    pub accepted_pct: f64,
    /// Percent of `total`; `0.0` when `total` is zero.
    pub rejected_pct: f64,
}

/// Number of cases filed in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Number of cases carrying one categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Box-plot statistics over the filing years of a record set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct YearSpread {
    /// Records with a defined filing year.
    pub count: usize,
    pub min: i32,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: i32,
}

/// Everything the analytics tab charts, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalyticsReport {
    pub scope: AnalyticsScope,
    pub total: usize,
    pub outcomes: OutcomeSummary,
    /// Cases per year, ascending by year.
    pub cases_per_year: Vec<YearCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_spread: Option<YearSpread>,
    /// Case-type shares, largest first.
    pub case_types: Vec<ValueCount>,
    /// Judgment outcomes ranked by count, smallest first.
    pub judgment_outcomes: Vec<ValueCount>,
    /// Court-level shares, largest first.
    pub court_levels: Vec<ValueCount>,
}

/// Which record set an aggregate is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsScope {
    /// The whole dataset; filters are ignored.
    #[default]
    Full,
    /// Only the records matching the supplied filters.
    Filtered,
}

/// Ordering of a per-value count list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum CountOrder {
    /// Descending by count, ties in first-seen order (pie / share charts).
    #[default]
    Share,
    /// Ascending by count, ties by value (horizontal ranked bars).
    Ranked,
}

/// `?scope=` query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct ScopeParams {
    #[serde(default)]
    pub scope: AnalyticsScope,
}

/// Query parameters for a single-field count list.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct FieldCountParams {
    #[serde(default)]
    pub scope: AnalyticsScope,
    #[serde(default)]
    pub order: CountOrder,
}

/// Response for a single-field count list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldCountsResponse {
    pub field: crate::filter::CategoricalField,
    pub scope: AnalyticsScope,
    pub order: CountOrder,
    pub counts: Vec<ValueCount>,
}
