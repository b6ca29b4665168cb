//! Data models for scan results, storage listings, quick filters and batch outcomes

mod category;
mod destination;

pub use category::FileCategory;
pub use destination::{DestPreset, Destination};
pub(crate) use category::{DOCUMENT_ADJACENT_EXTENSIONS, DOCUMENT_MIME_EXCLUSIONS};

use crate::services::classify;
use crate::services::fs::path_string;
use crate::{Capabilities, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One classified file discovered during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    pub path: String,
    pub name: String,
    pub size: u64,
    /// Modification time in epoch milliseconds.
    pub date_modified: i64,
    pub category: Option<FileCategory>,
}

impl FileItem {
    /// Describe the file at `path` for hosts that address files by path.
    ///
    /// The category is `None` when the name matches no category.
    pub fn from_path(path: &Path, caps: &Capabilities) -> Result<Self> {
        let meta = caps.fs.stat(path)?;
        if !meta.is_file() {
            return Err(Error::InvalidInput(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_string(path));

        Ok(Self {
            path: path_string(path),
            category: classify::classify_name(&name, caps.mime.as_ref()),
            name,
            size: meta.len,
            date_modified: meta.modified_ms,
        })
    }
}

/// Files of one category that share a source folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFolderData {
    pub path: String,
    pub name: String,
    pub item_count: usize,
    pub total_size: u64,
    /// Newest first.
    pub files: Vec<FileItem>,
}

/// Per-category summary produced by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryData {
    pub category: FileCategory,
    pub item_count: usize,
    pub total_size: u64,
    /// Ordered by lowercased display name, then path.
    pub sources: Vec<SourceFolderData>,
}

impl CategoryData {
    #[must_use]
    pub fn empty(category: FileCategory) -> Self {
        Self {
            category,
            item_count: 0,
            total_size: 0,
            sources: Vec::new(),
        }
    }

    /// Look up a source bucket by its path.
    #[must_use]
    pub fn source(&self, path: &str) -> Option<&SourceFolderData> {
        self.sources.iter().find(|s| s.path == path)
    }

    pub fn files(&self) -> impl Iterator<Item = &FileItem> {
        self.sources.iter().flat_map(|s| s.files.iter())
    }
}

/// Scan result keyed by category, iterated in category declaration order.
pub type CategoryMap = BTreeMap<FileCategory, CategoryData>;

/// Immediate child of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntry {
    pub path: String,
    pub name: String,
    pub is_directory: bool,
    pub size: u64,
    pub item_count: usize,
    pub last_modified: i64,
}

/// Cross-category derived views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickFilter {
    Recent,
    Large,
    Duplicates,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 3] = [
        QuickFilter::Recent,
        QuickFilter::Large,
        QuickFilter::Duplicates,
    ];

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            QuickFilter::Recent => "Recent",
            QuickFilter::Large => "Large",
            QuickFilter::Duplicates => "Duplicates",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "recent" => Some(QuickFilter::Recent),
            "large" | "largest" => Some(QuickFilter::Large),
            "duplicates" | "dupes" => Some(QuickFilter::Duplicates),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for QuickFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        QuickFilter::from_label(s).ok_or_else(|| format!("unknown quick filter '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickFilterGroup {
    pub title: Option<String>,
    pub files: Vec<FileItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickFilterState {
    pub filter: QuickFilter,
    pub groups: Vec<QuickFilterGroup>,
}

/// Per-item result of a copy, move or delete batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub completed: usize,
    pub skipped: usize,
    pub failed: Vec<FailedItem>,
}

impl BatchOutcome {
    /// Boolean view of the batch: every item either completed or was skipped.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    #[must_use]
    pub fn changed_anything(&self) -> bool {
        self.completed > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedItem {
    pub path: String,
    pub reason: String,
}

/// Represents an error encountered during scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub path: String,
    pub code: String,
    pub message: String,
}

impl ErrorItem {
    #[must_use]
    pub fn from_io(path: &std::path::Path, error: &std::io::Error) -> Self {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => "ENOENT",
            std::io::ErrorKind::PermissionDenied => "EACCES",
            _ => "IO",
        };

        Self {
            path: path.to_string_lossy().into_owned(),
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

/// Capacity of the volume holding a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSpace {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

/// Regular files directly inside one folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSummary {
    pub file_count: usize,
    pub total_size: u64,
}
