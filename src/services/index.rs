//! Indexed-metadata provider used to augment scans and approximate unreadable directories

use std::io;
use std::path::{Path, PathBuf};

/// One record returned by a metadata index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedFile {
    /// Absolute location when the index exposes it.
    pub path: Option<PathBuf>,
    /// Directory relative to the storage root, used when `path` is absent.
    pub relative_dir: Option<String>,
    pub display_name: String,
    pub size: Option<u64>,
    /// Epoch milliseconds.
    pub modified_ms: Option<i64>,
}

impl IndexedFile {
    /// Absolute path of the record, resolving relative locations against `storage_root`.
    #[must_use]
    pub fn resolve(&self, storage_root: &Path) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }

        let relative = self.relative_dir.as_deref()?;
        Some(storage_root.join(relative).join(&self.display_name))
    }
}

/// Platform media index queried as a secondary source, never as the source of truth.
pub trait MetadataIndex: Send + Sync {
    /// Records that carry no media type (documents and other non-media files).
    fn documents(&self) -> io::Result<Vec<IndexedFile>>;

    /// Records located anywhere below `dir`.
    fn under_prefix(&self, dir: &Path) -> io::Result<Vec<IndexedFile>>;
}

/// Host without an index.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIndex;

impl MetadataIndex for NoIndex {
    fn documents(&self) -> io::Result<Vec<IndexedFile>> {
        Ok(Vec::new())
    }

    fn under_prefix(&self, dir: &Path) -> io::Result<Vec<IndexedFile>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("no metadata index available for {}", dir.display()),
        ))
    }
}

/// Index over a fixed set of records, for hosts that mirror a platform index in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryIndex {
    records: Vec<IndexedFile>,
    storage_root: Option<PathBuf>,
}

impl MemoryIndex {
    #[must_use]
    pub fn new(records: Vec<IndexedFile>) -> Self {
        Self {
            records,
            storage_root: None,
        }
    }

    /// Resolve records that only carry a relative location against `storage_root`.
    #[must_use]
    pub fn with_storage_root<P: Into<PathBuf>>(mut self, storage_root: P) -> Self {
        self.storage_root = Some(storage_root.into());
        self
    }

    fn location(&self, record: &IndexedFile) -> Option<PathBuf> {
        match &self.storage_root {
            Some(root) => record.resolve(root),
            None => record.path.clone(),
        }
    }
}

impl MetadataIndex for MemoryIndex {
    fn documents(&self) -> io::Result<Vec<IndexedFile>> {
        Ok(self.records.clone())
    }

    fn under_prefix(&self, dir: &Path) -> io::Result<Vec<IndexedFile>> {
        Ok(self
            .records
            .iter()
            .filter(|r| {
                self.location(r)
                    .is_some_and(|p| p != dir && p.starts_with(dir))
            })
            .cloned()
            .collect())
    }
}
