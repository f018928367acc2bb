use serde::{Deserialize, Serialize};

/// Marker term for a rejected judgment ("rejection").
pub const REJECTION_MARKER: &str = "رفض";

/// Marker terms for an accepted judgment ("acceptance", "reversal").
pub const ACCEPTANCE_MARKERS: &[&str] = &["قبول", "نقض"];

/// Three-way classification of a free-text judgment outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum OutcomeClass {
    Accepted,
    Rejected,
    Other,
}

impl OutcomeClass {
    /// Marker rendered in front of the outcome text in the case table.
    pub fn indicator(self) -> &'static str {
        match self {
            OutcomeClass::Accepted => "🟢",
            OutcomeClass::Rejected => "🔴",
            OutcomeClass::Other => "⚪",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeClass::Accepted => "accepted",
            OutcomeClass::Rejected => "rejected",
            OutcomeClass::Other => "other",
        }
    }
}

/// Classify outcome text by case-insensitive substring match.
///
/// The rejection marker is tested first, so text carrying both a rejection
/// and an acceptance marker is `Rejected`.
pub fn classify_outcome(text: &str) -> OutcomeClass {
    let lowered = text.to_lowercase();
    if lowered.contains(REJECTION_MARKER) {
        OutcomeClass::Rejected
    } else if ACCEPTANCE_MARKERS.iter().any(|m| lowered.contains(m)) {
        OutcomeClass::Accepted
    } else {
        OutcomeClass::Other
    }
}
