//! The persisted tracker document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::case::CaseRecord;

/// Term label used in prompts when the stored document carries none.
pub const DEFAULT_TERM: &str = "OCT 2025";

/// Top-level contents of `cases.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    pub cases: Vec<CaseRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dataset {
    /// The id a newly tracked case should receive: one past the largest
    /// existing id, or 1 for an empty tracker. Saturates at `u64::MAX`.
    pub fn next_id(&self) -> u64 {
        self.cases
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    pub fn term_label(&self) -> &str {
        self.term.as_deref().unwrap_or(DEFAULT_TERM)
    }

    /// Compare two documents with `lastUpdated` excluded on both sides.
    pub fn same_content(&self, other: &Dataset) -> bool {
        self.term == other.term && self.cases == other.cases && self.extra == other.extra
    }

    /// Replace the timestamp, leaving all content untouched.
    pub fn touched(mut self, today: &str) -> Self {
        self.last_updated = Some(today.to_string());
        self
    }
}
