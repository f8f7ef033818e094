use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};
use image::ImageFormat;

use crate::config::ImageDetection;

/// Image extensions (lowercase, without the dot) the `image` crate does not know about.
pub const EXTRA_IMAGE_EXTENSIONS: &[&str] =
    &["heic", "heif", "svg", "psd", "jxl", "dng", "cr2", "cr3", "nef", "arw", "raf", "orf", "rw2"];

const SNIFF_LEN: u64 = 32;

const APP_QUALIFIER: &str = "com";
const APP_ORGANISATION: &str = "CollectionComposer";
const APP_NAME: &str = "collection-composer";

pub fn is_hidden(path: &Path) -> bool {
    path.file_name().and_then(OsStr::to_str).map(|name| name.starts_with('.')).unwrap_or(false)
}

/// Hidden by name, or by the hidden attribute on Windows.
pub(crate) fn is_hidden_entry(entry: &fs::DirEntry) -> bool {
    is_hidden(&entry.path()) || has_hidden_attribute(entry)
}

#[cfg(windows)]
fn has_hidden_attribute(entry: &fs::DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    entry
        .metadata()
        .map(|meta| meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(_entry: &fs::DirEntry) -> bool {
    false
}

pub fn has_image_extension(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(OsStr::to_str) else {
        return false;
    };
    let lower = ext.to_ascii_lowercase();
    ImageFormat::from_extension(&lower).is_some()
        || EXTRA_IMAGE_EXTENSIONS.contains(&lower.as_str())
}

/// Inspect the leading bytes of `path` for a known image signature.
pub fn has_image_signature(path: &Path) -> io::Result<bool> {
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
    Ok(image::guess_format(&head).is_ok())
}

pub(crate) fn conforms_to_image(path: &Path, detection: ImageDetection) -> io::Result<bool> {
    match detection {
        ImageDetection::Extension => Ok(has_image_extension(path)),
        ImageDetection::Content => has_image_signature(path),
    }
}

/// Platform document directory for the current user, with progressively weaker fallbacks.
pub(crate) fn platform_documents_dir() -> PathBuf {
    if let Some(dirs) = UserDirs::new() {
        if let Some(documents) = dirs.document_dir() {
            return documents.to_path_buf();
        }
        return dirs.home_dir().join("Documents");
    }

    ProjectDirs::from(APP_QUALIFIER, APP_ORGANISATION, APP_NAME)
        .map(|dirs| dirs.data_dir().join("documents"))
        .unwrap_or_else(|| std::env::temp_dir().join("collection-composer-documents"))
}
