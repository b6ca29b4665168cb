//! Filesystem capability used by the scanner, the storage browser and file operations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Kind of a directory entry, as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

/// Metadata snapshot of one filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    pub hidden: bool,
    pub len: u64,
    /// Epoch milliseconds, 0 when unavailable.
    pub modified_ms: i64,
}

impl EntryMeta {
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Children of one directory plus the entries whose metadata could not be read.
#[derive(Debug, Default)]
pub struct DirListing {
    pub entries: Vec<EntryMeta>,
    pub errors: Vec<(PathBuf, io::Error)>,
}

/// Filesystem access injected into the core.
pub trait Filesystem: Send + Sync {
    /// List immediate children without following symlinks.
    fn read_dir(&self, dir: &Path) -> io::Result<DirListing>;

    /// Metadata for a path, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<EntryMeta>;

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    fn exists(&self, path: &Path) -> bool;

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl LocalFs {
    fn describe(path: &Path, metadata: &fs::Metadata, kind: EntryKind) -> EntryMeta {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let hidden = name.starts_with('.') || platform_hidden(metadata);

        EntryMeta {
            path: path.to_path_buf(),
            name,
            kind,
            hidden,
            len: if kind == EntryKind::File { metadata.len() } else { 0 },
            modified_ms: modified_millis(metadata),
        }
    }
}

impl Filesystem for LocalFs {
    fn read_dir(&self, dir: &Path) -> io::Result<DirListing> {
        let mut listing = DirListing::default();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    listing.errors.push((dir.to_path_buf(), e));
                    continue;
                }
            };

            let path = entry.path();
            match fs::symlink_metadata(&path) {
                Ok(metadata) => {
                    let kind = kind_of(&metadata);
                    listing.entries.push(Self::describe(&path, &metadata, kind));
                }
                Err(e) => listing.errors.push((path, e)),
            }
        }

        Ok(listing)
    }

    fn stat(&self, path: &Path) -> io::Result<EntryMeta> {
        let metadata = fs::metadata(path)?;
        let kind = kind_of(&metadata);
        Ok(Self::describe(path, &metadata, kind))
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

fn kind_of(metadata: &fs::Metadata) -> EntryKind {
    let file_type = metadata.file_type();
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

fn modified_millis(metadata: &fs::Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or(0)
}

#[cfg(windows)]
fn platform_hidden(metadata: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    use windows_sys::Win32::Storage::FileSystem::FILE_ATTRIBUTE_HIDDEN;

    metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn platform_hidden(_metadata: &fs::Metadata) -> bool {
    false
}

/// Lossy string form used for paths stored in models.
#[must_use]
pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
