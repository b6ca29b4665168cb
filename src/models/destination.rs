//! Copy and move destinations: explicit directories or well-known presets

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Well-known folders offered as copy/move targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestPreset {
    Internal,
    Downloads,
    Documents,
    Pictures,
    Music,
    Movies,
}

impl DestPreset {
    pub const ALL: [DestPreset; 6] = [
        DestPreset::Internal,
        DestPreset::Downloads,
        DestPreset::Documents,
        DestPreset::Pictures,
        DestPreset::Music,
        DestPreset::Movies,
    ];

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            DestPreset::Internal => "Internal Storage",
            DestPreset::Downloads => "Downloads",
            DestPreset::Documents => "Documents",
            DestPreset::Pictures => "Pictures",
            DestPreset::Music => "Music",
            DestPreset::Movies => "Movies",
        }
    }

    /// Folder below the storage root; `None` for the root itself.
    #[must_use]
    pub fn relative_dir(&self) -> Option<&'static str> {
        match self {
            DestPreset::Internal => None,
            DestPreset::Downloads => Some("Download"),
            DestPreset::Documents => Some("Documents"),
            DestPreset::Pictures => Some("Pictures"),
            DestPreset::Music => Some("Music"),
            DestPreset::Movies => Some("Movies"),
        }
    }

    #[must_use]
    pub fn resolve(&self, storage_root: &Path) -> PathBuf {
        match self.relative_dir() {
            Some(dir) => storage_root.join(dir),
            None => storage_root.to_path_buf(),
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "internal" | "storage" => Some(DestPreset::Internal),
            "downloads" | "download" => Some(DestPreset::Downloads),
            "documents" | "docs" => Some(DestPreset::Documents),
            "pictures" => Some(DestPreset::Pictures),
            "music" => Some(DestPreset::Music),
            "movies" => Some(DestPreset::Movies),
            _ => None,
        }
    }
}

impl std::fmt::Display for DestPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for DestPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        DestPreset::from_label(s).ok_or_else(|| format!("unknown destination preset '{s}'"))
    }
}

/// Target folder of a copy or move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Directory(PathBuf),
    Preset(DestPreset),
}

impl Destination {
    /// Concrete directory, resolving presets against `storage_root`.
    #[must_use]
    pub fn resolve(&self, storage_root: &Path) -> PathBuf {
        match self {
            Destination::Directory(dir) => dir.clone(),
            Destination::Preset(preset) => preset.resolve(storage_root),
        }
    }
}

impl From<PathBuf> for Destination {
    fn from(dir: PathBuf) -> Self {
        Destination::Directory(dir)
    }
}

impl From<&Path> for Destination {
    fn from(dir: &Path) -> Self {
        Destination::Directory(dir.to_path_buf())
    }
}

impl From<DestPreset> for Destination {
    fn from(preset: DestPreset) -> Self {
        Destination::Preset(preset)
    }
}
