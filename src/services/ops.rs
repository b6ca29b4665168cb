//! Copy, move, delete and rename over the filesystem capability.
//!
//! Batches never stop at a single failing item: each item is attempted and
//! its outcome recorded. Only an unusable destination aborts a batch.

use crate::models::{BatchOutcome, FailedItem, FileItem};
use crate::services::fs::{Filesystem, path_string};
use crate::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Split a file name into stem and extension for suffix numbering.
///
/// A leading dot does not start an extension, so `.nomedia` has none.
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

/// Name used for the `n`th collision: `photo.jpg` -> `photo (n).jpg`.
#[must_use]
pub fn numbered_name(name: &str, n: u32) -> String {
    match split_name(name) {
        (stem, Some(ext)) => format!("{stem} ({n}).{ext}"),
        (stem, None) => format!("{stem} ({n})"),
    }
}

/// First free path for `name` inside `dir`, numbering on collision.
#[must_use]
pub fn unique_destination(fs: &dyn Filesystem, dir: &Path, name: &str) -> PathBuf {
    let mut candidate = dir.join(name);
    let mut counter = 1u32;
    while fs.exists(&candidate) {
        candidate = dir.join(numbered_name(name, counter));
        counter += 1;
    }
    candidate
}

fn ensure_directory(fs: &dyn Filesystem, destination: &Path) -> Result<()> {
    match fs.stat(destination) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::InvalidInput(format!(
            "Destination is not a directory: {}",
            destination.display()
        ))),
        Err(e) => Err(Error::InvalidInput(format!(
            "Destination is not accessible: {}: {e}",
            destination.display()
        ))),
    }
}

fn record_failure(outcome: &mut BatchOutcome, path: &str, error: &io::Error) {
    log::warn!("Operation failed for {path}: {error}");
    outcome.failed.push(FailedItem {
        path: path.to_string(),
        reason: error.to_string(),
    });
}

/// Delete every item; items already gone count as skipped.
#[must_use]
pub fn delete_files(fs: &dyn Filesystem, items: &[FileItem]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for item in items {
        match fs.remove_file(Path::new(&item.path)) {
            Ok(()) => {
                log::debug!("Deleted {}", item.path);
                outcome.completed += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Already gone: {}", item.path);
                outcome.skipped += 1;
            }
            Err(e) => record_failure(&mut outcome, &item.path, &e),
        }
    }

    outcome
}

/// Copy items into `destination`, numbering names that already exist there.
pub fn copy_files(
    fs: &dyn Filesystem,
    items: &[FileItem],
    destination: &Path,
) -> Result<BatchOutcome> {
    ensure_directory(fs, destination)?;
    let mut outcome = BatchOutcome::default();

    for item in items {
        let source = Path::new(&item.path);
        if !fs.exists(source) {
            outcome.skipped += 1;
            continue;
        }

        let target = unique_destination(fs, destination, &item.name);
        match fs.copy_file(source, &target) {
            Ok(bytes) => {
                log::debug!("Copied {} -> {} ({bytes} bytes)", item.path, target.display());
                outcome.completed += 1;
            }
            Err(e) => record_failure(&mut outcome, &item.path, &e),
        }
    }

    Ok(outcome)
}

/// Move items into `destination`, numbering names that already exist there.
///
/// Items already located in `destination` are skipped. A rename that fails
/// (e.g. across devices) is retried as copy + remove.
pub fn move_files(
    fs: &dyn Filesystem,
    items: &[FileItem],
    destination: &Path,
) -> Result<BatchOutcome> {
    ensure_directory(fs, destination)?;
    let mut outcome = BatchOutcome::default();

    for item in items {
        let source = Path::new(&item.path);
        if !fs.exists(source) {
            outcome.skipped += 1;
            continue;
        }
        if source.parent() == Some(destination) {
            log::debug!("{} is already in {}", item.path, destination.display());
            outcome.skipped += 1;
            continue;
        }

        let target = unique_destination(fs, destination, &item.name);
        match move_one(fs, source, &target) {
            Ok(()) => {
                log::debug!("Moved {} -> {}", item.path, target.display());
                outcome.completed += 1;
            }
            Err(e) => record_failure(&mut outcome, &item.path, &e),
        }
    }

    Ok(outcome)
}

fn move_one(fs: &dyn Filesystem, source: &Path, target: &Path) -> io::Result<()> {
    let rename_error = match fs.rename(source, target) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    log::debug!(
        "Rename {} -> {} failed ({rename_error}); copying instead",
        source.display(),
        target.display()
    );
    if fs.copy_file(source, target).is_err() {
        return Err(rename_error);
    }
    if let Err(e) = fs.remove_file(source) {
        // Leave a single copy behind rather than two.
        let _ = fs.remove_file(target);
        return Err(e);
    }
    Ok(())
}

/// Name a rename request resolves to.
///
/// Without a dot in `new_name` the original extension is kept, so renaming
/// `report.pdf` to `final` yields `final.pdf`.
pub fn resolve_rename_target(original_name: &str, new_name: &str) -> Result<String> {
    let trimmed = new_name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("New name is empty".to_string()));
    }
    if trimmed.contains('/') || trimmed.contains('\\') || trimmed == "." || trimmed == ".." {
        return Err(Error::InvalidInput(format!("Invalid file name: {trimmed}")));
    }

    if trimmed.contains('.') {
        return Ok(trimmed.to_string());
    }

    match original_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Ok(format!("{trimmed}.{ext}")),
        _ => Ok(trimmed.to_string()),
    }
}

/// Rename a file in place; fails without touching anything when the target exists.
pub fn rename_file(fs: &dyn Filesystem, item: &FileItem, new_name: &str) -> Result<PathBuf> {
    let source = Path::new(&item.path);
    let parent = source
        .parent()
        .ok_or_else(|| Error::InvalidInput(format!("No parent directory for {}", item.path)))?;

    let desired = resolve_rename_target(&item.name, new_name)?;
    let target = parent.join(&desired);

    if target != source && fs.exists(&target) {
        return Err(Error::AlreadyExists(target));
    }

    fs.rename(source, &target)?;
    log::debug!("Renamed {} -> {}", item.path, path_string(&target));
    Ok(target)
}
