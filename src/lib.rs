//! File shelf library
//!
//! Categorizes the files of a storage root into Images, Videos, Audio,
//! Documents, APKs and Archives grouped by source folder, derives quick
//! filters (recent, large, duplicates) from the result, lists directories on
//! demand with subtree metrics, and runs batch file operations.
//!
//! All platform access goes through the capability traits bundled in
//! [`Capabilities`], so the core logic can run against a fake filesystem.

pub mod cli;
pub mod config;
pub mod models;
pub mod services;
pub mod session;

pub use config::ScanOptions;
pub use models::{
    BatchOutcome, CategoryData, CategoryMap, ErrorItem, FileCategory, FileItem, QuickFilter,
    QuickFilterState, SourceFolderData, StorageEntry,
};
pub use services::browse::list_children;
pub use services::ops::{copy_files, delete_files, move_files, rename_file};
pub use services::quick_filter::build_quick_filter;

use services::classify::{BuiltinMimeTypes, MimeResolver};
use services::fs::{Filesystem, LocalFs, path_string};
use services::index::{MetadataIndex, NoIndex};
use services::volume::{LocalVolumes, VolumeQuery};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Custom error type for the library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("System error: {0}")]
    System(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Platform services the core logic runs against.
#[derive(Clone)]
pub struct Capabilities {
    pub fs: Arc<dyn Filesystem>,
    pub index: Arc<dyn MetadataIndex>,
    pub mime: Arc<dyn MimeResolver>,
    pub volumes: Arc<dyn VolumeQuery>,
}

impl Capabilities {
    /// Local filesystem and volumes, built-in MIME table, no metadata index.
    #[must_use]
    pub fn local() -> Self {
        Self {
            fs: Arc::new(LocalFs),
            index: Arc::new(NoIndex),
            mime: Arc::new(BuiltinMimeTypes),
            volumes: Arc::new(LocalVolumes),
        }
    }

    #[must_use]
    pub fn with_index(mut self, index: Arc<dyn MetadataIndex>) -> Self {
        self.index = index;
        self
    }

    #[must_use]
    pub fn with_fs(mut self, fs: Arc<dyn Filesystem>) -> Self {
        self.fs = fs;
        self
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::local()
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}

/// Summary result from a category scan
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub root: String,
    /// One entry per category, empty categories included.
    pub categories: CategoryMap,
    pub errors: Vec<ErrorItem>,
    pub started_at: SystemTime,
    pub finished_at: SystemTime,
}

impl ScanSummary {
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.categories.values().map(|c| c.item_count).sum()
    }

    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.categories.values().map(|c| c.total_size).sum()
    }
}

/// Scan a storage root and return the categorized result
///
/// Unreadable subtrees do not fail the scan; they are reported in
/// [`ScanSummary::errors`].
pub fn scan_categories<P: AsRef<Path>>(
    root: P,
    options: &ScanOptions,
    caps: &Capabilities,
) -> Result<ScanSummary> {
    let root = root.as_ref();
    let root_path = path_string(root);

    let meta = caps.fs.stat(root).map_err(|e| {
        Error::InvalidInput(format!("Path does not exist: {root_path}: {e}"))
    })?;
    if !meta.is_dir() {
        return Err(Error::InvalidInput(format!(
            "Path is not a directory: {root_path}"
        )));
    }

    let started_at = SystemTime::now();
    log::info!("Scanning {root_path}");

    let (raw, errors) = services::traverse::scan_tree(root, options, caps);
    let categories = services::aggregate::aggregate(raw, options);

    let finished_at = SystemTime::now();
    log::info!(
        "Scan of {root_path} finished: {} files, {} errors",
        categories.values().map(|c| c.item_count).sum::<usize>(),
        errors.len()
    );

    Ok(ScanSummary {
        root: root_path,
        categories,
        errors,
        started_at,
        finished_at,
    })
}
