//! Source (grouping folder) computation for classified files

use std::path::{Component, Path, PathBuf};

/// Maps a file to the folder it is grouped under.
///
/// Files below a grouping root are grouped by that root, or by the root's
/// immediate subfolder when they sit deeper. Every other file is grouped by
/// its parent directory.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    storage_root: PathBuf,
    grouping_roots: Vec<PathBuf>,
}

impl SourceResolver {
    #[must_use]
    pub fn new(storage_root: PathBuf, grouping_roots: Vec<PathBuf>) -> Self {
        Self {
            storage_root,
            grouping_roots,
        }
    }

    #[must_use]
    pub fn source_for(&self, file: &Path) -> PathBuf {
        for root in &self.grouping_roots {
            if file == root || !file.starts_with(root) {
                continue;
            }

            let Some(parent) = file.parent() else {
                return root.clone();
            };
            if parent == root {
                return root.clone();
            }

            let first_segment = parent.strip_prefix(root).ok().and_then(|rel| {
                rel.components().find_map(|c| match c {
                    Component::Normal(segment) => Some(segment.to_owned()),
                    _ => None,
                })
            });

            return match first_segment {
                Some(segment) => root.join(segment),
                None => parent.to_path_buf(),
            };
        }

        file.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| self.storage_root.clone(), Path::to_path_buf)
    }
}
