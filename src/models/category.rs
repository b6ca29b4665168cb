//! Fixed file-type buckets and their declared extension sets

use serde::{Deserialize, Serialize};

/// Closed set of categories a file can be classified into.
///
/// Declaration order is the matching order: when classifying, the first
/// category that matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Images,
    Videos,
    Audio,
    Documents,
    Apks,
    Archives,
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "heic", "heif", "svg", "ico",
];

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "3gp", "ts",
];

const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "flac", "aac", "ogg", "m4a", "wma", "opus", "amr",
];

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "docm", "dot", "dotx", "dotm", "xls", "xlsx", "xlsm", "xlsb", "ppt",
    "pptx", "pptm", "pps", "ppsx", "ppsm", "pot", "potx", "potm", "txt", "rtf", "odt", "ods",
    "odp", "csv", "tsv", "xps", "xml", "json", "html", "htm", "log", "cfg", "conf", "ini",
    "properties", "prop", "yaml", "yml", "md", "markdown", "tex", "epub", "mobi", "azw", "fb2",
    "chm", "wps", "wpt", "ps", "rtx", "odg", "numbers", "pages", "key", "sqlite", "db", "db3",
    "sql",
];

const APK_EXTENSIONS: &[&str] = &["apk"];

const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz", "bz2", "xz"];

/// Backup, config, script and source extensions that count as documents
/// without consulting the MIME table.
pub(crate) const DOCUMENT_ADJACENT_EXTENSIONS: &[&str] = &[
    "bak", "backup", "lst", "nfo", "info", "cfg", "config", "bat", "sh", "py", "java", "kt", "c",
    "cpp", "h", "hpp", "gradle",
];

/// Archive and package MIME types that never count as documents.
pub(crate) const DOCUMENT_MIME_EXCLUSIONS: &[&str] = &[
    "application/zip",
    "application/x-7z-compressed",
    "application/x-rar-compressed",
    "application/x-tar",
    "application/gzip",
    "application/x-bzip2",
    "application/x-xz",
    "application/vnd.android.package-archive",
];

impl FileCategory {
    /// Every category, in matching order.
    pub const ALL: [FileCategory; 6] = [
        FileCategory::Images,
        FileCategory::Videos,
        FileCategory::Audio,
        FileCategory::Documents,
        FileCategory::Apks,
        FileCategory::Archives,
    ];

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            FileCategory::Images => "Images",
            FileCategory::Videos => "Videos",
            FileCategory::Audio => "Audio",
            FileCategory::Documents => "Documents",
            FileCategory::Apks => "APKs",
            FileCategory::Archives => "Archives",
        }
    }

    /// Lowercase extensions owned by this category.
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileCategory::Images => IMAGE_EXTENSIONS,
            FileCategory::Videos => VIDEO_EXTENSIONS,
            FileCategory::Audio => AUDIO_EXTENSIONS,
            FileCategory::Documents => DOCUMENT_EXTENSIONS,
            FileCategory::Apks => APK_EXTENSIONS,
            FileCategory::Archives => ARCHIVE_EXTENSIONS,
        }
    }

    #[must_use]
    pub fn declares(&self, extension: &str) -> bool {
        self.extensions().contains(&extension)
    }

    /// True when any category lists `extension` in its declared set.
    #[must_use]
    pub fn is_declared_anywhere(extension: &str) -> bool {
        FileCategory::ALL.iter().any(|c| c.declares(extension))
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "images" | "image" => Some(FileCategory::Images),
            "videos" | "video" => Some(FileCategory::Videos),
            "audio" => Some(FileCategory::Audio),
            "documents" | "docs" => Some(FileCategory::Documents),
            "apks" | "apk" => Some(FileCategory::Apks),
            "archives" | "archive" => Some(FileCategory::Archives),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
