//! File-backed storage for `cases.json`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use scotus_core::Dataset;
use tempfile::NamedTempFile;
use tracing::info;

use crate::StoreError;

/// The tracker dataset stored as one pretty-printed JSON document.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so readers never observe a half-written document. There
/// is no locking: overlapping runs must be prevented by whoever schedules them.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and deserialize the stored dataset.
    pub fn load(&self) -> Result<Dataset, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }
        let text = fs::read_to_string(&self.path)?;
        let dataset: Dataset = serde_json::from_str(&text)?;
        info!(path = %self.path.display(), cases = dataset.cases.len(), "loaded dataset");
        Ok(dataset)
    }

    /// Atomically replace the stored dataset.
    pub fn save(&self, dataset: &Dataset) -> Result<(), StoreError> {
        let text = render(dataset)?;

        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        info!(path = %self.path.display(), cases = dataset.cases.len(), "saved dataset");
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

/// Serialize a dataset the way it is stored: two-space indentation,
/// non-ASCII text unescaped, trailing newline.
pub fn render(dataset: &Dataset) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(dataset)?;
    text.push('\n');
    Ok(text)
}
