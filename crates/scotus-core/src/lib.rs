//! Case records, response validation, and reconciliation for the SCOTUS tracker.

pub mod case;
pub mod dataset;
pub mod reconcile;
pub mod validate;

pub use case::{CaseRecord, Category, Status, Urgency};
pub use dataset::{DEFAULT_TERM, Dataset};
pub use reconcile::{CaseChange, Outcome, Reconciliation, reconcile};
pub use validate::{ShapeError, ValidationError, parse_dataset};
