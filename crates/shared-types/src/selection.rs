use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::case::{CaseDetail, CaseListResponse, CaseRecord};
use crate::error::AppError;
use crate::filter::FilterCriteria;

/// An ordered table of cases that rows can be selected from.
pub trait RowView {
    fn row_count(&self) -> usize;

    fn case_id_at(&self, index: usize) -> Option<&str>;

    fn position_of(&self, case_id: &str) -> Option<usize> {
        (0..self.row_count()).find(|&i| self.case_id_at(i) == Some(case_id))
    }
}

/// Lookup of full records by identifier.
pub trait CaseLookup {
    fn find_case(&self, case_id: &str) -> Option<&CaseRecord>;
}

impl RowView for [CaseRecord] {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn case_id_at(&self, index: usize) -> Option<&str> {
        self.get(index).map(|c| c.case_id.as_str())
    }
}

impl CaseLookup for [CaseRecord] {
    fn find_case(&self, case_id: &str) -> Option<&CaseRecord> {
        self.iter().find(|c| c.case_id == case_id)
    }
}

/// A selection request that could not be honored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    OutOfBounds { index: usize, len: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::OutOfBounds { index, len } => write!(
                f,
                "Row {} is out of range for a view of {} cases",
                index, len
            ),
        }
    }
}

impl std::error::Error for SelectionError {}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        AppError::bad_request(err.to_string())
    }
}

/// The case chosen for the detail panel.
///
/// Identity is the case id and survives any re-filter. The highlighted row
/// is relative to the current view and goes away when the case drops out
/// of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    case_id: Option<String>,
    highlighted_row: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select row `row_index` of `view`. On error the selection is unchanged.
    pub fn select<V: RowView + ?Sized>(
        &mut self,
        view: &V,
        row_index: usize,
    ) -> Result<&str, SelectionError> {
        let case_id = view
            .case_id_at(row_index)
            .ok_or(SelectionError::OutOfBounds {
                index: row_index,
                len: view.row_count(),
            })?;
        self.highlighted_row = Some(row_index);
        Ok(self.case_id.insert(case_id.to_string()).as_str())
    }

    /// Full record of the selected case, looked up in the full dataset.
    pub fn resolve<'d, L: CaseLookup + ?Sized>(&self, dataset: &'d L) -> Option<&'d CaseRecord> {
        self.case_id.as_deref().and_then(|id| dataset.find_case(id))
    }

    /// Re-anchor the highlight after the view changed.
    pub fn clear_if_absent<V: RowView + ?Sized>(&mut self, view: &V) {
        self.highlighted_row = self
            .case_id
            .as_deref()
            .and_then(|id| view.position_of(id));
    }

    pub fn case_id(&self) -> Option<&str> {
        self.case_id.as_deref()
    }

    pub fn highlighted_row(&self) -> Option<usize> {
        self.highlighted_row
    }

    pub fn clear(&mut self) {
        self.case_id = None;
        self.highlighted_row = None;
    }
}

// ── Session API types ───────────────────────────────────────────────

/// Response for a newly created dashboard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// Request to select one row of the session's current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SelectRowRequest {
    pub row_index: usize,
}

/// Current selection of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SelectionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    /// Row of the current view to highlight; absent when the selected case is filtered out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_row: Option<usize>,
    /// Full record of the selected case, resolved against the whole dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<CaseDetail>,
}

/// A session's view after its filters changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionViewResponse {
    pub criteria: FilterCriteria,
    pub view: CaseListResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_row: Option<usize>,
}
