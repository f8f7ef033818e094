//! Error taxonomy for filesystem access.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by [`crate::fs::FileAccessService`].
#[derive(Debug, Error)]
pub enum FileAccessError {
    /// A required path argument was absent. Raised before touching the filesystem.
    #[error("file path could not be resolved, `{argument}` is missing")]
    MissingPath { argument: &'static str },

    #[error("{description} ({} -> {})", source_path.display(), destination_path.display())]
    CopyFailed { source_path: PathBuf, destination_path: PathBuf, description: String },

    #[error("could not delete {}: {source}", path.display())]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not create directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path could not be inspected for a reason other than being absent.
    #[error("could not inspect {}: {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exists but is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// The directory could not be opened for enumeration (missing or inaccessible).
    #[error("could not enumerate {}: {source}", path.display())]
    EnumerationUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileAccessError {
    pub(crate) fn copy_failed(
        source_path: impl Into<PathBuf>,
        destination_path: impl Into<PathBuf>,
        err: &io::Error,
    ) -> Self {
        Self::CopyFailed {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
            description: err.to_string(),
        }
    }
}

/// Shared result type for fs operations.
pub type Result<T> = std::result::Result<T, FileAccessError>;
