//! File system access layer: document root, directories, image listings, copy and delete.

pub mod copy;
pub mod listing;
mod util;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::FileAccessConfig;
use crate::error::FileAccessError;
use crate::types::{CopyReport, DirectoryStatus};

pub use crate::error::Result;
pub use util::{EXTRA_IMAGE_EXTENSIONS, has_image_extension, has_image_signature, is_hidden};

/// Mediates all filesystem access for the application.
///
/// The service holds only immutable configuration. Every call blocks until the underlying
/// filesystem operation finishes and no state is carried between calls.
#[derive(Debug, Clone, Default)]
pub struct FileAccessService {
    config: FileAccessConfig,
}

impl FileAccessService {
    pub fn new(config: FileAccessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FileAccessConfig {
        &self.config
    }

    /// The user-scoped document directory for the application.
    pub fn documents_root(&self) -> PathBuf {
        self.config.documents_root.clone().unwrap_or_else(util::platform_documents_dir)
    }

    /// Check for a directory at `path`, creating it and any missing parents on request.
    pub fn ensure_directory_exists(
        &self,
        path: impl AsRef<Path>,
        create_if_missing: bool,
    ) -> Result<DirectoryStatus> {
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => return Ok(DirectoryStatus::AlreadyExisted),
            Ok(_) => return Err(FileAccessError::NotADirectory { path: path.to_path_buf() }),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(FileAccessError::Inaccessible { path: path.to_path_buf(), source });
            }
        }

        if !create_if_missing {
            return Ok(DirectoryStatus::Missing);
        }

        match fs::create_dir_all(path) {
            Ok(()) => {
                debug!(target: "fs::service", path = %path.display(), "created directory");
                Ok(DirectoryStatus::Created)
            }
            Err(source) => {
                warn!(
                    target: "fs::service",
                    path = %path.display(),
                    "creating directory: {source}"
                );
                Err(FileAccessError::DirectoryCreateFailed { path: path.to_path_buf(), source })
            }
        }
    }

    /// Number of non-hidden entries directly inside `folder`, or 0 if it cannot be read.
    pub fn count_entries(&self, folder: impl AsRef<Path>) -> usize {
        self.try_count_entries(folder).unwrap_or_else(|err| {
            debug!(target: "fs::service", "{err}");
            0
        })
    }

    pub fn try_count_entries(&self, folder: impl AsRef<Path>) -> Result<usize> {
        listing::count_entries(folder.as_ref())
    }

    /// Image files directly inside `folder`, or `None` when the folder cannot be enumerated.
    pub fn list_image_files(&self, folder: impl AsRef<Path>) -> Option<Vec<PathBuf>> {
        match self.try_list_image_files(folder) {
            Ok(images) => Some(images),
            Err(err) => {
                warn!(target: "fs::service", "{err}");
                None
            }
        }
    }

    pub fn try_list_image_files(&self, folder: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        listing::image_files(folder.as_ref(), self.config.image_detection)
    }

    /// Copy a single item. Either path may be absent, in which case nothing is touched.
    pub fn copy_path(&self, source: Option<&Path>, destination: Option<&Path>) -> Result<()> {
        let source = source.ok_or(FileAccessError::MissingPath { argument: "source" })?;
        let destination =
            destination.ok_or(FileAccessError::MissingPath { argument: "destination" })?;
        copy::copy_item(source, destination)
    }

    pub fn copy_file(&self, source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<()> {
        self.copy_path(Some(source.as_ref()), Some(destination.as_ref()))
    }

    /// Copy each source into `destination_folder`, continuing past individual failures.
    pub fn copy_files<I, P>(&self, sources: I, destination_folder: impl AsRef<Path>) -> CopyReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        copy::copy_into(sources, destination_folder.as_ref())
    }

    /// Delete a file or directory tree. Failures are logged and reported as `false`.
    pub fn delete_item(&self, path: Option<&Path>) -> bool {
        match self.try_delete_item(path) {
            Ok(()) => true,
            Err(err) => {
                warn!(target: "fs::service", "{err}");
                false
            }
        }
    }

    pub fn try_delete_item(&self, path: Option<&Path>) -> Result<()> {
        let path = path.ok_or(FileAccessError::MissingPath { argument: "path" })?;
        let removal = match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
            Ok(_) => fs::remove_file(path),
            Err(err) => Err(err),
        };
        removal
            .map_err(|source| FileAccessError::DeleteFailed { path: path.to_path_buf(), source })?;
        debug!(target: "fs::service", path = %path.display(), "deleted");
        Ok(())
    }
}
