//! Directory enumeration: entry counts and image listings.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::ImageDetection;
use crate::error::FileAccessError;

use super::{Result, util};

/// Count the direct, non-hidden children of `folder`.
pub fn count_entries(folder: &Path) -> Result<usize> {
    let count = open(folder)?
        .filter_map(|entry| readable(folder, entry))
        .filter(|entry| !util::is_hidden_entry(entry))
        .count();
    Ok(count)
}

/// Enumerate the regular files directly inside `folder` whose type conforms to an image.
///
/// Results keep `read_dir` order. Entries that cannot be inspected are logged and skipped; only
/// a folder that cannot be opened at all is an error.
pub fn image_files(folder: &Path, detection: ImageDetection) -> Result<Vec<PathBuf>> {
    filter_images(folder, |path| util::conforms_to_image(path, detection))
}

fn filter_images<F>(folder: &Path, mut is_image: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path) -> io::Result<bool>,
{
    let mut images = Vec::new();
    for entry in open(folder)? {
        let Some(entry) = readable(folder, entry) else {
            continue;
        };
        if util::is_hidden_entry(&entry) {
            continue;
        }

        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                warn!(target: "fs::listing", path = %path.display(), "reading file type: {err}");
                continue;
            }
        };
        if !file_type.is_file() {
            continue;
        }

        match is_image(&path) {
            Ok(true) => images.push(path),
            Ok(false) => {}
            Err(err) => {
                warn!(target: "fs::listing", path = %path.display(), "checking image type: {err}");
            }
        }
    }

    Ok(images)
}

fn readable(folder: &Path, entry: io::Result<fs::DirEntry>) -> Option<fs::DirEntry> {
    entry
        .inspect_err(|err| {
            warn!(target: "fs::listing", folder = %folder.display(), "skipping entry: {err}");
        })
        .ok()
}

fn open(folder: &Path) -> Result<fs::ReadDir> {
    fs::read_dir(folder).map_err(|source| FileAccessError::EnumerationUnavailable {
        path: folder.to_path_buf(),
        source,
    })
}
