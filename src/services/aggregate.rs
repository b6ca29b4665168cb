//! Reduction of raw scan buckets into per-category summaries

use crate::config::ScanOptions;
use crate::models::{CategoryData, CategoryMap, FileItem, SourceFolderData};
use crate::services::traverse::RawScan;
use std::path::Path;

/// Fallback name when neither a folder nor its parent has a meaningful name.
pub const OTHER_SOURCE_NAME: &str = "Other";

/// Build the category summary model from raw scan buckets.
///
/// Pure function of its input: totals are sums over the sources, sources are
/// ordered by (lowercased display name, path), files newest first.
#[must_use]
pub fn aggregate(raw: RawScan, options: &ScanOptions) -> CategoryMap {
    raw.into_iter()
        .map(|(category, source_map)| {
            let mut sources: Vec<SourceFolderData> = source_map
                .into_iter()
                .map(|(path, files)| build_source(path, files, options))
                .collect();

            sources.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.path.cmp(&b.path))
            });

            let item_count = sources.iter().map(|s| s.item_count).sum();
            let total_size = sources.iter().map(|s| s.total_size).sum();

            (
                category,
                CategoryData {
                    category,
                    item_count,
                    total_size,
                    sources,
                },
            )
        })
        .collect()
}

fn build_source(path: String, mut files: Vec<FileItem>, options: &ScanOptions) -> SourceFolderData {
    sort_newest_first(&mut files);
    SourceFolderData {
        name: folder_display_name(&path, options),
        item_count: files.len(),
        total_size: files.iter().map(|f| f.size).sum(),
        path,
        files,
    }
}

/// Stable sort by modification time, newest first.
pub fn sort_newest_first(files: &mut [FileItem]) {
    files.sort_by(|a, b| b.date_modified.cmp(&a.date_modified));
}

/// Human-readable name of a source folder.
///
/// Uses the last path segment, or the parent's when the last one is a mount
/// artifact such as `0` in `/storage/emulated/0`, else [`OTHER_SOURCE_NAME`].
#[must_use]
pub fn folder_display_name(path: &str, options: &ScanOptions) -> String {
    let path = Path::new(path);
    let meaningful = |segment: Option<&std::ffi::OsStr>| {
        segment
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.trim().is_empty() && !options.is_placeholder_segment(s))
    };

    meaningful(path.file_name())
        .or_else(|| meaningful(path.parent().and_then(Path::file_name)))
        .unwrap_or_else(|| OTHER_SOURCE_NAME.to_string())
}
