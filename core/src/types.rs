//! Transient value types handed back to callers of the file access layer.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::FileAccessError;

/// Observed state of a directory after [`crate::fs::FileAccessService::ensure_directory_exists`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectoryStatus {
    AlreadyExisted,
    Created,
    /// Nothing exists at the path and creation was not requested.
    Missing,
}

impl DirectoryStatus {
    /// Returns `true` when a directory is present at the path.
    pub fn exists(self) -> bool {
        !matches!(self, DirectoryStatus::Missing)
    }
}

/// Result of copying a single item within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CopyOutcome {
    Copied { source: PathBuf, destination: PathBuf },
    Failed { source: PathBuf, destination: PathBuf, description: String },
}

impl CopyOutcome {
    pub(crate) fn from_result(
        source: &Path,
        destination: &Path,
        result: std::result::Result<(), FileAccessError>,
    ) -> Self {
        match result {
            Ok(()) => CopyOutcome::Copied {
                source: source.to_path_buf(),
                destination: destination.to_path_buf(),
            },
            Err(FileAccessError::CopyFailed { description, .. }) => CopyOutcome::Failed {
                source: source.to_path_buf(),
                destination: destination.to_path_buf(),
                description,
            },
            Err(other) => CopyOutcome::Failed {
                source: source.to_path_buf(),
                destination: destination.to_path_buf(),
                description: other.to_string(),
            },
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied { .. })
    }

    pub fn source(&self) -> &Path {
        match self {
            CopyOutcome::Copied { source, .. } | CopyOutcome::Failed { source, .. } => source,
        }
    }

    pub fn destination(&self) -> &Path {
        match self {
            CopyOutcome::Copied { destination, .. } | CopyOutcome::Failed { destination, .. } => {
                destination
            }
        }
    }
}

/// Per-item outcomes of a batch copy, in the order the sources were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyReport {
    pub outcomes: Vec<CopyOutcome>,
}

impl CopyReport {
    /// Number of items that were copied successfully.
    pub fn copied(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_copied()).count()
    }

    /// Iterate over the failed items only.
    pub fn failures(&self) -> impl Iterator<Item = &CopyOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_copied())
    }

    /// Returns `true` when every item was copied.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(CopyOutcome::is_copied)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
