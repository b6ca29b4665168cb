//! Extension and MIME based category matching

use crate::models::{DOCUMENT_ADJACENT_EXTENSIONS, DOCUMENT_MIME_EXCLUSIONS, FileCategory};
use std::path::Path;

/// Extension to MIME type lookup.
pub trait MimeResolver: Send + Sync {
    /// Resolve a lowercase extension (without the dot).
    fn mime_for_extension(&self, extension: &str) -> Option<String>;
}

/// Static extension table covering the common platform registrations.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinMimeTypes;

const MIME_TABLE: &[(&str, &str)] = &[
    // text
    ("txt", "text/plain"),
    ("text", "text/plain"),
    ("csv", "text/csv"),
    ("tsv", "text/tab-separated-values"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("ics", "text/calendar"),
    ("vcf", "text/x-vcard"),
    ("vcs", "text/x-vcalendar"),
    ("rtx", "text/richtext"),
    ("md", "text/markdown"),
    ("xml", "text/xml"),
    ("srt", "application/x-subrip"),
    // office and reader formats
    ("pdf", "application/pdf"),
    ("rtf", "application/rtf"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("odp", "application/vnd.oasis.opendocument.presentation"),
    ("epub", "application/epub+zip"),
    ("json", "application/json"),
    ("ogx", "application/ogg"),
    ("jar", "application/java-archive"),
    ("iso", "application/x-iso9660-image"),
    ("ttf", "application/x-font-ttf"),
    ("otf", "application/x-font-otf"),
    ("torrent", "application/x-bittorrent"),
    ("swf", "application/x-shockwave-flash"),
    ("kml", "application/vnd.google-earth.kml+xml"),
    ("gpx", "application/gpx+xml"),
    // archives and packages
    ("zip", "application/zip"),
    ("7z", "application/x-7z-compressed"),
    ("rar", "application/x-rar-compressed"),
    ("tar", "application/x-tar"),
    ("gz", "application/gzip"),
    ("tgz", "application/gzip"),
    ("bz2", "application/x-bzip2"),
    ("xz", "application/x-xz"),
    ("apk", "application/vnd.android.package-archive"),
    // media
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("mp4", "video/mp4"),
    ("mkv", "video/x-matroska"),
    ("mpg", "video/mpeg"),
    ("mp3", "audio/mpeg"),
    ("mid", "audio/midi"),
    ("ogg", "audio/ogg"),
];

impl MimeResolver for BuiltinMimeTypes {
    fn mime_for_extension(&self, extension: &str) -> Option<String> {
        MIME_TABLE
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, mime)| (*mime).to_string())
    }
}

/// Lowercased extension of a file name, empty when there is none.
///
/// Mirrors the "text after the last dot" convention, so `.bashrc` has the
/// extension `bashrc` and `archive.tar.gz` has `gz`.
#[must_use]
pub fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Check whether a single category matches the given lowercase extension.
#[must_use]
pub fn matches(category: FileCategory, extension: &str, mime: &dyn MimeResolver) -> bool {
    if category.declares(extension) {
        return true;
    }

    if category != FileCategory::Documents {
        return false;
    }

    if DOCUMENT_ADJACENT_EXTENSIONS.contains(&extension) {
        return true;
    }

    // Extensions owned by another category never reach the MIME heuristic.
    if extension.is_empty() || FileCategory::is_declared_anywhere(extension) {
        return false;
    }

    let Some(mime_type) = mime.mime_for_extension(extension) else {
        return false;
    };
    let mime_type = mime_type.to_lowercase();

    mime_type.starts_with("text/")
        || (mime_type.starts_with("application/")
            && !DOCUMENT_MIME_EXCLUSIONS.contains(&mime_type.as_str()))
}

/// Classify a file name; the first category in declaration order wins.
#[must_use]
pub fn classify_name(name: &str, mime: &dyn MimeResolver) -> Option<FileCategory> {
    let extension = extension_of(name);
    FileCategory::ALL
        .into_iter()
        .find(|category| matches(*category, &extension, mime))
}

/// Classify a path by its final component.
#[must_use]
pub fn classify_path(path: &Path, mime: &dyn MimeResolver) -> Option<FileCategory> {
    let name = path.file_name()?.to_string_lossy();
    let category = classify_name(&name, mime);
    log::trace!("Classified {} as {category:?}", path.display());
    category
}
