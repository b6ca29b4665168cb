//! On-demand directory listing with per-child subtree metrics

use crate::models::{FolderSummary, StorageEntry};
use crate::services::fs::{EntryKind, EntryMeta, Filesystem, path_string};
use crate::services::index::MetadataIndex;
use crate::{Capabilities, Error, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Visible child count and total subtree bytes of a directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryMetrics {
    pub item_count: usize,
    pub total_size: u64,
}

/// List the visible immediate children of `dir`.
///
/// Directories carry their subtree size and visible child count, files their
/// own size. Directories sort before files, then by case-insensitive name.
pub fn list_children(dir: &Path, caps: &Capabilities) -> Result<Vec<StorageEntry>> {
    let listing = caps.fs.read_dir(dir).map_err(|e| {
        Error::InvalidInput(format!("Cannot list {}: {e}", dir.display()))
    })?;

    for (path, error) in &listing.errors {
        log::debug!("Skipping unreadable entry {}: {error}", path.display());
    }

    let visible: Vec<EntryMeta> = listing
        .entries
        .into_iter()
        .filter(|e| !e.hidden)
        .filter_map(|e| resolve_entry(caps.fs.as_ref(), e))
        .collect();

    let mut entries: Vec<StorageEntry> = visible
        .into_par_iter()
        .map(|entry| {
            let is_directory = entry.is_dir();
            let metrics = if is_directory {
                directory_metrics(&entry.path, caps)
            } else {
                DirectoryMetrics {
                    item_count: 0,
                    total_size: entry.len,
                }
            };

            let name = if entry.name.trim().is_empty() {
                path_string(&entry.path)
            } else {
                entry.name
            };

            StorageEntry {
                path: path_string(&entry.path),
                name,
                is_directory,
                size: metrics.total_size,
                item_count: metrics.item_count,
                last_modified: entry.modified_ms,
            }
        })
        .collect();

    sort_entries(&mut entries);
    log::debug!("Listed {} entries in {}", entries.len(), dir.display());
    Ok(entries)
}

/// Directories first, then case-insensitive name.
pub fn sort_entries(entries: &mut [StorageEntry]) {
    entries.sort_by(|a, b| {
        b.is_directory
            .cmp(&a.is_directory)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// Follow symlinks so a linked directory is listed as a directory.
fn resolve_entry(fs: &dyn Filesystem, entry: EntryMeta) -> Option<EntryMeta> {
    match entry.kind {
        EntryKind::File | EntryKind::Directory => Some(entry),
        EntryKind::Symlink => match fs.stat(&entry.path) {
            Ok(target) => Some(EntryMeta {
                path: entry.path,
                name: entry.name,
                hidden: entry.hidden,
                ..target
            }),
            Err(e) => {
                log::debug!("Dangling symlink {}: {e}", entry.path.display());
                None
            }
        },
        EntryKind::Other => None,
    }
}

/// Metrics for one directory, falling back to the metadata index when it
/// cannot be listed and to zero/zero when that fails too.
#[must_use]
pub fn directory_metrics(dir: &Path, caps: &Capabilities) -> DirectoryMetrics {
    match caps.fs.read_dir(dir) {
        Ok(listing) => DirectoryMetrics {
            item_count: listing.entries.iter().filter(|e| !e.hidden).count(),
            total_size: calculate_directory_size(caps.fs.as_ref(), dir),
        },
        Err(e) => {
            log::debug!("Cannot list {}: {e}; asking the metadata index", dir.display());
            index_metrics(caps.index.as_ref(), dir).unwrap_or_default()
        }
    }
}

/// Sum of visible file sizes below `dir`, walked with an explicit stack.
///
/// Symlinked directories are followed; canonical paths already visited are
/// not walked twice.
#[must_use]
pub fn calculate_directory_size(fs: &dyn Filesystem, dir: &Path) -> u64 {
    let mut total_size = 0u64;
    let mut stack: Vec<PathBuf> = vec![dir.to_path_buf()];
    let mut visited: HashSet<PathBuf> = HashSet::new();

    while let Some(current) = stack.pop() {
        let key = fs.canonicalize(&current).unwrap_or_else(|_| current.clone());
        if !visited.insert(key) {
            continue;
        }

        let listing = match fs.read_dir(&current) {
            Ok(listing) => listing,
            Err(e) => {
                log::debug!("Skipping unreadable {}: {e}", current.display());
                continue;
            }
        };

        for child in listing.entries {
            if child.hidden {
                continue;
            }

            let Some(child) = resolve_entry(fs, child) else {
                continue;
            };

            if child.is_file() {
                total_size = total_size.saturating_add(child.len);
            } else if child.is_dir() {
                stack.push(child.path);
            }
        }
    }

    total_size
}

fn index_metrics(index: &dyn MetadataIndex, dir: &Path) -> Option<DirectoryMetrics> {
    match index.under_prefix(dir) {
        Ok(records) => Some(DirectoryMetrics {
            item_count: records.len(),
            total_size: records.iter().filter_map(|r| r.size).sum(),
        }),
        Err(e) => {
            log::debug!("Metadata index fallback failed for {}: {e}", dir.display());
            None
        }
    }
}

/// Count and size of the regular files directly inside `dir`.
#[must_use]
pub fn folder_summary(fs: &dyn Filesystem, dir: &Path) -> FolderSummary {
    match fs.read_dir(dir) {
        Ok(listing) => {
            let files = listing.entries.iter().filter(|e| e.is_file());
            FolderSummary {
                file_count: files.clone().count(),
                total_size: files.map(|e| e.len).sum(),
            }
        }
        Err(e) => {
            log::debug!("Cannot summarize {}: {e}", dir.display());
            FolderSummary::default()
        }
    }
}
