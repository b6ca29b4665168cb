//! Recursive category scan of a storage root.
//!
//! The walk is depth-first and classifies every visible regular file into a
//! category, bucketing it under its source folder. Invariants:
//!
//! - An unreadable directory aborts only its own subtree; the error is
//!   recorded and the walk continues with its siblings.
//! - Hidden entries, noise directories and restricted subtrees are never
//!   descended into.
//! - A file path is recorded at most once per scan.

pub mod augment;
pub mod rules;
pub mod source;

use crate::Capabilities;
use crate::config::ScanOptions;
use crate::models::{ErrorItem, FileCategory, FileItem};
use crate::services::classify;
use crate::services::fs::{EntryKind, EntryMeta, path_string};
use source::SourceResolver;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Category -> source path -> files, before aggregation.
pub type RawScan = BTreeMap<FileCategory, BTreeMap<String, Vec<FileItem>>>;

/// Traversal state for one scan invocation
pub struct ScanContext<'a> {
    caps: &'a Capabilities,
    options: &'a ScanOptions,
    storage_root: PathBuf,
    sources: SourceResolver,
    buckets: RawScan,
    seen_paths: HashSet<String>,
    visited_dirs: HashSet<PathBuf>,
    errors: Vec<ErrorItem>,
}

impl<'a> ScanContext<'a> {
    #[must_use]
    pub fn new(storage_root: &Path, options: &'a ScanOptions, caps: &'a Capabilities) -> Self {
        let grouping_roots = options.resolve_grouping_roots(caps.fs.as_ref(), storage_root);
        log::debug!("Grouping roots: {grouping_roots:?}");

        let buckets = FileCategory::ALL
            .into_iter()
            .map(|c| (c, BTreeMap::new()))
            .collect();

        Self {
            caps,
            options,
            storage_root: storage_root.to_path_buf(),
            sources: SourceResolver::new(storage_root.to_path_buf(), grouping_roots),
            buckets,
            seen_paths: HashSet::new(),
            visited_dirs: HashSet::new(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    #[must_use]
    pub fn sources(&self) -> &SourceResolver {
        &self.sources
    }

    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        self.caps
    }

    /// Record an error encountered during traversal
    pub(crate) fn record_error(&mut self, path: &Path, error: &std::io::Error) {
        log::warn!("Skipping {}: {error}", path.display());
        self.errors.push(ErrorItem::from_io(path, error));
    }

    /// Add a classified file unless its path was already recorded.
    pub(crate) fn insert_file(&mut self, source: String, item: FileItem) -> bool {
        let Some(category) = item.category else {
            return false;
        };
        if !self.seen_paths.insert(item.path.clone()) {
            return false;
        }

        log::trace!("File entry: {} -> {category:?} / {source}", item.path);
        self.buckets
            .entry(category)
            .or_default()
            .entry(source)
            .or_default()
            .push(item);
        true
    }

    #[must_use]
    pub fn into_parts(self) -> (RawScan, Vec<ErrorItem>) {
        (self.buckets, self.errors)
    }

    /// Walk `dir` and everything below it that is not skipped.
    pub fn walk(&mut self, dir: &Path) {
        if self.options.follow_symlinks {
            let key = self
                .caps
                .fs
                .canonicalize(dir)
                .unwrap_or_else(|_| dir.to_path_buf());
            if !self.visited_dirs.insert(key) {
                log::debug!("Already visited {}, skipping", dir.display());
                return;
            }
        }

        let listing = match self.caps.fs.read_dir(dir) {
            Ok(listing) => listing,
            Err(e) => {
                self.record_error(dir, &e);
                return;
            }
        };

        for (path, error) in &listing.errors {
            self.record_error(path, error);
        }

        let parent_name = dir.file_name().map(|n| n.to_string_lossy().into_owned());
        let mut entries = listing.entries;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        for entry in entries {
            if entry.hidden {
                continue;
            }

            let Some(entry) = self.resolve_link(entry) else {
                continue;
            };

            match entry.kind {
                EntryKind::File => self.record_file(&entry),
                EntryKind::Directory => {
                    if let Some(reason) =
                        rules::skip_reason(self.options, parent_name.as_deref(), &entry)
                    {
                        log::debug!(
                            "Not descending into {} ({})",
                            entry.path.display(),
                            reason.as_str()
                        );
                        continue;
                    }
                    self.walk(&entry.path);
                }
                EntryKind::Symlink | EntryKind::Other => {}
            }
        }
    }

    /// Replace a symlink entry by its target's metadata when links are followed.
    fn resolve_link(&mut self, entry: EntryMeta) -> Option<EntryMeta> {
        if entry.kind != EntryKind::Symlink {
            return Some(entry);
        }

        if !self.options.follow_symlinks {
            log::trace!("Ignoring symlink {}", entry.path.display());
            return None;
        }

        match self.caps.fs.stat(&entry.path) {
            Ok(target) => Some(EntryMeta {
                path: entry.path,
                name: entry.name,
                hidden: entry.hidden,
                ..target
            }),
            Err(e) => {
                self.record_error(&entry.path, &e);
                None
            }
        }
    }

    fn record_file(&mut self, entry: &EntryMeta) {
        let Some(category) = classify::classify_name(&entry.name, self.caps.mime.as_ref()) else {
            log::trace!("Unclassified: {}", entry.path.display());
            return;
        };

        let source = path_string(&self.sources.source_for(&entry.path));
        let item = FileItem {
            path: path_string(&entry.path),
            name: entry.name.clone(),
            size: entry.len,
            date_modified: entry.modified_ms,
            category: Some(category),
        };
        self.insert_file(source, item);
    }
}

/// Walk `root`, then merge index-only documents, returning the raw buckets.
#[must_use]
pub fn scan_tree(
    root: &Path,
    options: &ScanOptions,
    caps: &Capabilities,
) -> (RawScan, Vec<ErrorItem>) {
    let mut context = ScanContext::new(root, options, caps);
    context.walk(root);
    augment::merge_indexed_documents(&mut context);
    context.into_parts()
}
