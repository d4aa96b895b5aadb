//! Shape validation for research responses.
//!
//! The research service returns free-form text that is expected to hold a
//! complete `cases.json` document. Nothing in it is trusted: the text is
//! parsed into a generic JSON value first, checked field by field, and only
//! then converted into a [`Dataset`].

use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::case::{CaseRecord, Category, Status, Urgency};
use crate::dataset::Dataset;

/// Fields every case record must carry, in canonical order.
pub const REQUIRED_FIELDS: [&str; 12] = [
    "id",
    "name",
    "docket",
    "status",
    "statusDetail",
    "category",
    "urgency",
    "question",
    "background",
    "firstOrder",
    "secondOrder",
    "sources",
];

/// Characters of raw response text kept in a parse diagnostic.
pub const RAW_PREFIX_CHARS: usize = 500;

/// Largest accepted case id; anything above leaves no id for a new case.
pub const MAX_CASE_ID: u64 = u64::MAX - 1;

const UNNAMED: &str = "?";

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("response is not valid JSON: {source}\nraw response:\n{raw_prefix}")]
    Parse {
        source: serde_json::Error,
        raw_prefix: String,
    },
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("response is not a JSON object")]
    NotAnObject,
    #[error("response missing 'cases' array")]
    MissingCases,
    #[error("'cases' is not an array")]
    CasesNotArray,
    #[error("case at index {index} is not a JSON object")]
    RecordNotObject { index: usize },
    #[error("case '{name}' missing fields: {}", .fields.join(", "))]
    MissingFields {
        name: String,
        fields: Vec<&'static str>,
    },
    #[error("case '{name}' has invalid {field} {value} (expected one of: {})", .allowed.join(", "))]
    InvalidValue {
        name: String,
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },
    #[error("case '{name}' has an id that is not a positive integer below {}", u64::MAX)]
    InvalidId { name: String },
    #[error("case '{name}' is malformed: {message}")]
    InvalidField { name: String, message: String },
    #[error("duplicate case id {id}")]
    DuplicateId { id: u64 },
    #[error("malformed dataset: {message}")]
    InvalidDocument { message: String },
}

/// Parse normalized response text into a validated dataset candidate.
pub fn parse_dataset(text: &str) -> Result<Dataset, ValidationError> {
    let value: Value = serde_json::from_str(text).map_err(|source| ValidationError::Parse {
        source,
        raw_prefix: text.chars().take(RAW_PREFIX_CHARS).collect(),
    })?;
    Ok(validate_dataset(value)?)
}

/// Check an already-parsed JSON value against the dataset shape.
pub fn validate_dataset(value: Value) -> Result<Dataset, ShapeError> {
    let Value::Object(mut root) = value else {
        return Err(ShapeError::NotAnObject);
    };
    let Value::Array(cases) = root.remove("cases").ok_or(ShapeError::MissingCases)? else {
        return Err(ShapeError::CasesNotArray);
    };

    let mut seen = HashSet::with_capacity(cases.len());
    let mut records = Vec::with_capacity(cases.len());
    for (index, case) in cases.into_iter().enumerate() {
        let Value::Object(record) = case else {
            return Err(ShapeError::RecordNotObject { index });
        };
        let parsed = validate_record(record)?;
        if !seen.insert(parsed.id) {
            return Err(ShapeError::DuplicateId { id: parsed.id });
        }
        records.push(parsed);
    }

    let dataset = Dataset {
        last_updated: take_label(&mut root, "lastUpdated")?,
        term: take_label(&mut root, "term")?,
        cases: records,
        extra: root,
    };
    debug!(cases = dataset.cases.len(), "response passed validation");
    Ok(dataset)
}

/// Remove an optional top-level string. `null` is rejected rather than
/// treated as absent, since the two serialize differently.
fn take_label(root: &mut Map<String, Value>, key: &str) -> Result<Option<String>, ShapeError> {
    match root.remove(key) {
        None => Ok(None),
        Some(Value::String(label)) => Ok(Some(label)),
        Some(other) => Err(ShapeError::InvalidDocument {
            message: format!("'{key}' must be a string, got {other}"),
        }),
    }
}

fn validate_record(record: Map<String, Value>) -> Result<CaseRecord, ShapeError> {
    let name = record
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(UNNAMED)
        .to_string();

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !record.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Err(ShapeError::MissingFields {
            name,
            fields: missing,
        });
    }

    if !record["id"]
        .as_u64()
        .is_some_and(|id| (1..=MAX_CASE_ID).contains(&id))
    {
        return Err(ShapeError::InvalidId { name });
    }

    check_choice(&record, &name, "status", Status::ALL.map(Status::as_str))?;
    check_choice(&record, &name, "category", Category::ALL.map(Category::as_str))?;
    check_choice(&record, &name, "urgency", Urgency::ALL.map(Urgency::as_str))?;

    serde_json::from_value(Value::Object(record)).map_err(|e| ShapeError::InvalidField {
        name,
        message: e.to_string(),
    })
}

fn check_choice<const N: usize>(
    record: &Map<String, Value>,
    name: &str,
    field: &'static str,
    allowed: [&'static str; N],
) -> Result<(), ShapeError> {
    let value = &record[field];
    match value.as_str() {
        Some(s) if allowed.contains(&s) => Ok(()),
        _ => Err(ShapeError::InvalidValue {
            name: name.to_string(),
            field,
            value: value.to_string(),
            allowed: allowed.to_vec(),
        }),
    }
}
