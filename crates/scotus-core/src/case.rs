//! Tracked case records and their closed vocabularies.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Procedural posture of a tracked case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Argued")]
    Argued,
    #[serde(rename = "Argument Scheduled")]
    ArgumentScheduled,
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Re-argument Scheduled")]
    ReArgumentScheduled,
    #[serde(rename = "Decided")]
    Decided,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Argued,
        Status::ArgumentScheduled,
        Status::Pending,
        Status::ReArgumentScheduled,
        Status::Decided,
    ];

    /// The value as it appears in `cases.json`.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Argued => "Argued",
            Status::ArgumentScheduled => "Argument Scheduled",
            Status::Pending => "Pending",
            Status::ReArgumentScheduled => "Re-argument Scheduled",
            Status::Decided => "Decided",
        }
    }
}

/// Subject-matter grouping used to filter the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Agency Independence")]
    AgencyIndependence,
    #[serde(rename = "Executive Authority")]
    ExecutiveAuthority,
    #[serde(rename = "Separation of Powers")]
    SeparationOfPowers,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::AgencyIndependence,
        Category::ExecutiveAuthority,
        Category::SeparationOfPowers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::AgencyIndependence => "Agency Independence",
            Category::ExecutiveAuthority => "Executive Authority",
            Category::SeparationOfPowers => "Separation of Powers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::High, Urgency::Medium, Urgency::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::High => "high",
            Urgency::Medium => "medium",
            Urgency::Low => "low",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked Supreme Court matter.
///
/// `id` is the reconciliation key and must stay stable across runs. Keys
/// outside the fixed field set are kept in `extra` so they survive a
/// load/persist cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: u64,
    pub name: String,
    pub docket: String,
    pub status: Status,
    pub status_detail: String,
    pub category: Category,
    pub urgency: Urgency,
    pub question: String,
    pub background: String,
    pub first_order: String,
    pub second_order: String,
    pub sources: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
