//! Quick filters derived from a scan result

use crate::models::{CategoryMap, FileItem, QuickFilter, QuickFilterGroup, QuickFilterState};
use crate::services::aggregate::sort_newest_first;
use std::collections::{HashMap, HashSet};

/// Default cap on the Recent and Large result lists.
pub const QUICK_FILTER_LIMIT: usize = 100;

/// Every file of a scan result, in category then source order.
#[must_use]
pub fn collect_all_files(categories: &CategoryMap) -> Vec<FileItem> {
    categories
        .values()
        .flat_map(|data| data.files().cloned())
        .collect()
}

/// Build a quick filter view over all scanned files.
#[must_use]
pub fn build_quick_filter(
    filter: QuickFilter,
    categories: &CategoryMap,
    limit: usize,
) -> QuickFilterState {
    let files = collect_all_files(categories);
    let groups = match filter {
        QuickFilter::Recent => {
            let mut sorted = files;
            sort_newest_first(&mut sorted);
            sorted.truncate(limit);
            vec![QuickFilterGroup {
                title: None,
                files: sorted,
            }]
        }
        QuickFilter::Large => {
            let mut sorted = files;
            sorted.sort_by(|a, b| b.size.cmp(&a.size));
            sorted.truncate(limit);
            vec![QuickFilterGroup {
                title: None,
                files: sorted,
            }]
        }
        QuickFilter::Duplicates => duplicate_groups(files),
    };

    QuickFilterState { filter, groups }
}

/// Group files sharing a lowercased name and byte size.
///
/// Groups keep first-seen order before being ordered by member size, largest
/// first; only groups with at least two distinct paths survive.
#[must_use]
pub fn duplicate_groups(files: Vec<FileItem>) -> Vec<QuickFilterGroup> {
    let mut index: HashMap<(String, u64), usize> = HashMap::new();
    let mut buckets: Vec<Vec<FileItem>> = Vec::new();

    for file in files {
        let key = (file.name.to_lowercase(), file.size);
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(file);
    }

    let mut groups: Vec<QuickFilterGroup> = buckets
        .into_iter()
        .filter_map(|bucket| {
            let mut seen = HashSet::new();
            let mut distinct: Vec<FileItem> = bucket
                .into_iter()
                .filter(|f| seen.insert(f.path.clone()))
                .collect();
            if distinct.len() < 2 {
                return None;
            }

            let title = format!("{} ({})", distinct[0].name, distinct.len());
            sort_newest_first(&mut distinct);
            Some(QuickFilterGroup {
                title: Some(title),
                files: distinct,
            })
        })
        .collect();

    groups.sort_by(|a, b| {
        let size_of = |g: &QuickFilterGroup| g.files.first().map_or(0, |f| f.size);
        size_of(b).cmp(&size_of(a))
    });
    groups
}
