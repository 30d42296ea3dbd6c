use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors crossing the registry boundary
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry reported no record for the given arguments
    #[error("Registry fault: {0}")]
    Fault(String),

    /// Every path variant across both probing passes was exhausted
    #[error("Failed looking for path in the registry: {}", .0.display())]
    NotFound(PathBuf),

    /// The returned document did not have the expected shape
    #[error("Unexpected document shape: {0}")]
    BadDocument(String),

    /// The transport collaborator failed; never retried here
    #[error("Registry transport error: {0}")]
    Transport(String),
}

impl RegistryError {
    pub fn bad_document<S: AsRef<str>>(msg: S) -> Self {
        RegistryError::BadDocument(msg.as_ref().to_string())
    }
}
