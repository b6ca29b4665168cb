//! Merge documents known only to the metadata index into a scan

use super::ScanContext;
use crate::models::{FileCategory, FileItem};
use crate::services::classify;
use crate::services::fs::path_string;

/// Add index records that classify as documents and were not found by the walk.
///
/// Returns the number of records merged.
pub fn merge_indexed_documents(context: &mut ScanContext<'_>) -> usize {
    let records = match context.capabilities().index.documents() {
        Ok(records) => records,
        Err(e) => {
            log::debug!("Metadata index unavailable, skipping document augmentation: {e}");
            return 0;
        }
    };

    let mut merged = 0usize;
    for record in records {
        if record.display_name.trim().is_empty() {
            continue;
        }

        let Some(path) = record.resolve(context.storage_root()) else {
            continue;
        };

        let category = classify::classify_path(&path, context.capabilities().mime.as_ref());
        if category != Some(FileCategory::Documents) {
            continue;
        }

        let stat = if record.size.is_none() || record.modified_ms.is_none() {
            context.capabilities().fs.stat(&path).ok()
        } else {
            None
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| record.display_name.clone());

        let item = FileItem {
            path: path_string(&path),
            name,
            size: record
                .size
                .or_else(|| stat.as_ref().map(|m| m.len))
                .unwrap_or(0),
            date_modified: record
                .modified_ms
                .or_else(|| stat.as_ref().map(|m| m.modified_ms))
                .unwrap_or(0),
            category,
        };

        let source = path_string(&context.sources().source_for(&path));
        if context.insert_file(source, item) {
            merged += 1;
        }
    }

    if merged > 0 {
        log::debug!("Merged {merged} documents from the metadata index");
    }
    merged
}
