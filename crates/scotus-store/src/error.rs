use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dataset file not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored dataset is not valid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to replace dataset file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
