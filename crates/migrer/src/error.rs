use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, MigrerError>;

/// Errors from snapshot writing and version management
#[derive(Debug, thiserror::Error)]
pub enum MigrerError {
    /// Output exists and neither overwrite nor version-up was requested
    #[error("Not overwriting existing file {}, set overwrite if you want to", .0.display())]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Registry error: {0}")]
    Registry(#[from] registry::RegistryError),

    #[error("Path error: {0}")]
    Path(#[from] stammer::Error),
}
