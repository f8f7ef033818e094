//! Copy primitives that never overwrite an existing destination.

use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::FileAccessError;
use crate::types::{CopyOutcome, CopyReport};

use super::Result;

/// Copy `source` to `destination`. Directories are copied recursively.
pub fn copy_item(source: &Path, destination: &Path) -> Result<()> {
    copy_any(source, destination)
        .map_err(|err| FileAccessError::copy_failed(source, destination, &err))?;
    debug!(
        target: "fs::copy",
        source = %source.display(),
        destination = %destination.display(),
        "copied"
    );
    Ok(())
}

/// Copy every source into `folder`, keeping each source's file name.
pub fn copy_into<I, P>(sources: I, folder: &Path) -> CopyReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let outcomes = sources
        .into_iter()
        .map(|source| {
            let source = source.as_ref();
            let (destination, result) = match source.file_name() {
                Some(name) => {
                    let destination = folder.join(name);
                    let result = copy_item(source, &destination);
                    (destination, result)
                }
                None => (
                    folder.to_path_buf(),
                    Err(FileAccessError::MissingPath { argument: "source file name" }),
                ),
            };
            let outcome = CopyOutcome::from_result(source, &destination, result);
            if let CopyOutcome::Failed { description, .. } = &outcome {
                warn!(
                    target: "fs::copy",
                    source = %source.display(),
                    destination = %destination.display(),
                    "{description}"
                );
            }
            outcome
        })
        .collect();

    CopyReport { outcomes }
}

fn copy_any(source: &Path, destination: &Path) -> io::Result<()> {
    let meta = fs::metadata(source)?;
    if !meta.is_dir() {
        return copy_file(source, destination, &meta);
    }

    reject_nested(source, destination)?;
    fs::create_dir(destination)?;
    // The tree is ours from here on; a partial copy is removed again.
    copy_tree(source, destination).inspect_err(|_| {
        let _ = fs::remove_dir_all(destination);
    })
}

fn copy_tree(source: &Path, destination: &Path) -> io::Result<()> {
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();
        let target = destination.join(entry.file_name());
        let meta = fs::metadata(&path)?;
        if meta.is_dir() {
            fs::create_dir(&target)?;
            copy_tree(&path, &target)?;
        } else {
            copy_file(&path, &target, &meta)?;
        }
    }
    Ok(())
}

/// Fails when `destination` is `source` itself or lies somewhere below it.
fn reject_nested(source: &Path, destination: &Path) -> io::Result<()> {
    let source = fs::canonicalize(source)?;
    // An unresolvable parent is reported by `create_dir` instead.
    let Ok(parent) = fs::canonicalize(parent_dir(destination)) else {
        return Ok(());
    };
    let target = match destination.file_name() {
        Some(name) => parent.join(name),
        None => parent,
    };

    if target.starts_with(&source) {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("cannot copy {} into itself", source.display()),
        ));
    }
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn copy_file(source: &Path, destination: &Path, meta: &fs::Metadata) -> io::Result<()> {
    if fs::symlink_metadata(destination).is_ok() {
        return Err(io::Error::new(
            ErrorKind::AlreadyExists,
            format!("{} already exists", destination.display()),
        ));
    }

    let mut reader = File::open(source)?;
    let mut tmp = NamedTempFile::new_in(parent_dir(destination))?;
    io::copy(&mut reader, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.as_file().set_permissions(meta.permissions())?;
    tmp.persist_noclobber(destination).map_err(|err| err.error)?;
    Ok(())
}
