//! Decide what a validated candidate changes and which document to persist.
//!
//! The candidate replaces the stored dataset wholesale. Reconciliation never
//! merges fields; it only decides between "keep the old content with a fresh
//! timestamp" and "take the candidate as-is", and describes the difference.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::debug;

use crate::case::Status;
use crate::dataset::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Content identical apart from `lastUpdated`.
    Unchanged,
    Changed,
}

/// One line of the change log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseChange {
    New {
        id: u64,
        name: String,
    },
    StatusChange {
        id: u64,
        name: String,
        from: Status,
        to: Status,
    },
    Updated {
        id: u64,
        name: String,
    },
    /// Tracked before, absent from the candidate.
    Removed {
        id: u64,
        name: String,
    },
}

impl fmt::Display for CaseChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseChange::New { name, .. } => write!(f, "NEW: {name}"),
            CaseChange::StatusChange { name, from, to, .. } => {
                write!(f, "STATUS CHANGE: {name}: {from} -> {to}")
            }
            CaseChange::Updated { name, .. } => write!(f, "UPDATED: {name}"),
            CaseChange::Removed { name, .. } => write!(f, "REMOVED: {name}"),
        }
    }
}

/// Result of comparing the stored dataset with a candidate.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub outcome: Outcome,
    /// The document to persist.
    pub dataset: Dataset,
    /// Empty when `outcome` is [`Outcome::Unchanged`].
    pub changes: Vec<CaseChange>,
}

/// Reconcile `old` against `candidate`.
///
/// Unchanged content keeps the old document and stamps it with `today`.
/// Otherwise the candidate is kept verbatim; it only receives `today` when
/// it carries no `lastUpdated` of its own.
pub fn reconcile(old: Dataset, candidate: Dataset, today: &str) -> Reconciliation {
    if old.same_content(&candidate) {
        debug!("candidate matches stored content");
        return Reconciliation {
            outcome: Outcome::Unchanged,
            dataset: old.touched(today),
            changes: Vec::new(),
        };
    }

    let changes = diff_cases(&old, &candidate);
    let dataset = if candidate.last_updated.is_some() {
        candidate
    } else {
        candidate.touched(today)
    };

    Reconciliation {
        outcome: Outcome::Changed,
        dataset,
        changes,
    }
}

/// Per-case change log in candidate order, followed by removals in old order.
pub fn diff_cases(old: &Dataset, candidate: &Dataset) -> Vec<CaseChange> {
    let old_by_id: HashMap<u64, _> = old.cases.iter().map(|c| (c.id, c)).collect();
    let mut changes = Vec::new();

    for case in &candidate.cases {
        let id = case.id;
        let name = case.name.clone();
        match old_by_id.get(&id) {
            None => changes.push(CaseChange::New { id, name }),
            Some(prev) if prev.status != case.status => changes.push(CaseChange::StatusChange {
                id,
                name,
                from: prev.status,
                to: case.status,
            }),
            Some(prev) if *prev != case => changes.push(CaseChange::Updated { id, name }),
            Some(_) => {}
        }
    }

    let kept: HashSet<u64> = candidate.cases.iter().map(|c| c.id).collect();
    changes.extend(
        old.cases
            .iter()
            .filter(|c| !kept.contains(&c.id))
            .map(|c| CaseChange::Removed {
                id: c.id,
                name: c.name.clone(),
            }),
    );

    changes
}
