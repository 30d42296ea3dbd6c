use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from alias loading and on-disk file discovery
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Malformed alias table line (more than one separator)
    Config(String),

    /// No file could be located for the path after all strategies
    NotFound(PathBuf),

    /// More than one candidate matched (strict mode only)
    Ambiguous(PathBuf, usize),

    /// Underlying I/O failure reading the alias source
    Io(PathBuf, String),
}

impl Error {
    pub fn config<S: AsRef<str>>(msg: S) -> Self {
        Error::Config(msg.as_ref().to_string())
    }

    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Error::NotFound(path.as_ref().to_path_buf())
    }

    pub fn ambiguous<P: AsRef<Path>>(path: P, count: usize) -> Self {
        Error::Ambiguous(path.as_ref().to_path_buf(), count)
    }

    pub fn io<P: AsRef<Path>>(path: P, err: &std::io::Error) -> Self {
        Error::Io(path.as_ref().to_path_buf(), err.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Malformed alias table: {}", msg),
            Error::NotFound(path) => {
                write!(f, "Cant find single file on local drive: {}", path.display())
            }
            Error::Ambiguous(path, count) => {
                write!(f, "{} files match {}", count, path.display())
            }
            Error::Io(path, err) => write!(f, "I/O error on {}: {}", path.display(), err),
        }
    }
}

impl std::error::Error for Error {}
