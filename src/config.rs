//! Scan configuration: grouping roots, skip rules and quick-filter limits

use crate::services::fs::Filesystem;
use crate::services::quick_filter::QUICK_FILTER_LIMIT;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Well-known media folders under a storage root, in grouping priority order.
pub const DEFAULT_GROUPING_ROOTS: &[&str] = &[
    "DCIM",
    "Pictures",
    "Download",
    "Documents",
    "Movies",
    "Music",
    "WhatsApp/Media",
    "Android/media/com.whatsapp",
];

/// Options for scanning a storage root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Grouping anchors; relative entries are resolved against the storage root.
    pub grouping_roots: Vec<PathBuf>,
    /// Directory names never descended into (case-insensitive).
    pub noise_dirs: Vec<String>,
    /// Parent directory name -> child names that are app-private and skipped.
    pub restricted: BTreeMap<String, Vec<String>>,
    /// Path segments that make a poor display name.
    pub placeholder_segments: Vec<String>,
    pub follow_symlinks: bool,
    pub quick_filter_limit: usize,
    /// Background pool size for a session; `None` lets rayon decide.
    pub worker_threads: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        let mut restricted = BTreeMap::new();
        restricted.insert(
            "android".to_string(),
            vec!["data".to_string(), "obb".to_string()],
        );

        Self {
            grouping_roots: Vec::new(),
            noise_dirs: vec!["lost.dir".to_string(), "lost+found".to_string()],
            restricted,
            placeholder_segments: vec![
                "storage".to_string(),
                "emulated".to_string(),
                "0".to_string(),
            ],
            follow_symlinks: false,
            quick_filter_limit: QUICK_FILTER_LIMIT,
            worker_threads: None,
        }
    }
}

impl ScanOptions {
    /// Parse options from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load options from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::InvalidInput(format!("Cannot read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Effective grouping roots for a storage root.
    ///
    /// Configured roots are joined to `storage_root` when relative. Without
    /// configured roots the platform defaults are used, keeping only those that
    /// exist on `fs` or whose parent does.
    #[must_use]
    pub fn resolve_grouping_roots(&self, fs: &dyn Filesystem, storage_root: &Path) -> Vec<PathBuf> {
        if !self.grouping_roots.is_empty() {
            return self
                .grouping_roots
                .iter()
                .map(|r| {
                    if r.is_absolute() {
                        r.clone()
                    } else {
                        storage_root.join(r)
                    }
                })
                .collect();
        }

        DEFAULT_GROUPING_ROOTS
            .iter()
            .map(|r| storage_root.join(r))
            .filter(|r| fs.exists(r) || r.parent().is_some_and(|p| fs.exists(p)))
            .collect()
    }

    #[must_use]
    pub fn is_noise_dir(&self, name: &str) -> bool {
        self.noise_dirs.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// True when `name` is a restricted child of a directory called `parent_name`.
    #[must_use]
    pub fn is_restricted(&self, parent_name: &str, name: &str) -> bool {
        let parent_lower = parent_name.to_lowercase();
        self.restricted
            .iter()
            .find(|(parent, _)| parent.to_lowercase() == parent_lower)
            .is_some_and(|(_, children)| children.iter().any(|c| c.eq_ignore_ascii_case(name)))
    }

    #[must_use]
    pub fn is_placeholder_segment(&self, segment: &str) -> bool {
        self.placeholder_segments.iter().any(|s| s == segment)
    }
}
