//! Storage layer: the tracker dataset as a single JSON document on disk.

mod error;
pub use error::StoreError;

mod json;
pub use json::{JsonStore, render};
