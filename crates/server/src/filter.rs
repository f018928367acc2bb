use shared_types::{CaseListResponse, CaseRecord, CaseRow, FilterCriteria, RowView};

use crate::analytics;
use crate::dataset::Dataset;

/// Does `record` satisfy every active constraint in `criteria`?
///
/// A missing categorical value never matches an active constraint. While a
/// date range is active, records without a parsed filing date are excluded.
pub fn matches(record: &CaseRecord, criteria: &FilterCriteria) -> bool {
    let categorical = criteria
        .constraints()
        .all(|(field, value)| record.categorical(field) == Some(value));
    let dated = match criteria.date_range {
        Some(range) => record.filing_date.is_some_and(|d| range.contains(d)),
        None => true,
    };
    categorical && dated
}

/// Records of `dataset` matching `criteria`, in dataset order.
pub fn apply<'d>(dataset: &'d Dataset, criteria: &FilterCriteria) -> FilteredView<'d> {
    FilteredView::all(dataset.records()).refine(criteria)
}

/// An ordered subsequence of the dataset, borrowed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'d> {
    rows: Vec<&'d CaseRecord>,
}

impl<'d> FilteredView<'d> {
    /// The identity view over `records`.
    pub fn all(records: &'d [CaseRecord]) -> Self {
        Self {
            rows: records.iter().collect(),
        }
    }

    /// Apply further criteria to this view.
    pub fn refine(&self, criteria: &FilterCriteria) -> FilteredView<'d> {
        if criteria.is_empty() {
            return self.clone();
        }
        FilteredView {
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|r| matches(r, criteria))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'d CaseRecord> {
        self.rows.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'d CaseRecord> + '_ {
        self.rows.iter().copied()
    }

    /// Row index of `case_id` within this view.
    pub fn position(&self, case_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.case_id == case_id)
    }

    pub fn contains(&self, case_id: &str) -> bool {
        self.position(case_id).is_some()
    }

    pub fn case_ids(&self) -> Vec<&'d str> {
        self.rows.iter().map(|r| r.case_id.as_str()).collect()
    }

    /// Table rows plus the outcome metrics shown beneath them.
    pub fn case_list(&self) -> CaseListResponse {
        CaseListResponse {
            cases: self.iter().map(CaseRow::from).collect(),
            total: self.len(),
            metrics: analytics::outcome_summary(self.iter()),
        }
    }
}

impl RowView for FilteredView<'_> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn case_id_at(&self, index: usize) -> Option<&str> {
        self.get(index).map(|r| r.case_id.as_str())
    }

    fn position_of(&self, case_id: &str) -> Option<usize> {
        self.position(case_id)
    }
}
