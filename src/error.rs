use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibrarianError {
    #[error("'{0}' not found")]
    NotFound(String),
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),
    #[error("Permission denied accessing {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("'{0}' is not a file")]
    NotAFile(String),
    #[error("Documentation directory {} not found", .0.display())]
    Unavailable(PathBuf),
    #[error("Command timed out after {0} seconds")]
    Timeout(u64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibrarianError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io(error),
        }
    }
}

pub type LibrarianResult<T> = Result<T, LibrarianError>;
