//! Test fixtures for deterministic testing

#![allow(dead_code)]

use fileshelf::models::{FileCategory, FileItem};
use fileshelf::services::fs::{DirListing, EntryMeta, Filesystem, LocalFs};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

/// Write `len` bytes to `path`, creating parent directories.
pub fn write_file(path: &Path, len: usize) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, vec![b'x'; len])
}

/// Write a file and set its modification time to `mtime_ms` epoch millis.
pub fn write_file_at(path: &Path, len: usize, mtime_ms: u64) -> io::Result<()> {
    write_file(path, len)?;
    let file = fs::OpenOptions::new().write(true).open(path)?;
    file.set_modified(UNIX_EPOCH + Duration::from_millis(mtime_ms))
}

/// Build a storage root laid out like a phone's shared storage.
///
/// ```text
/// sdcard/
///   DCIM/Camera/IMG_001.jpg           (1000 B, t=3000)
///   DCIM/Camera/IMG_002.jpg           (2000 B, t=5000)
///   DCIM/Camera/.pending.jpg          hidden file
///   Pictures/Screenshots/shot.png     (300 B,  t=4000)
///   Download/report.pdf               (4096 B, t=2000)
///   Download/app.apk                  (8192 B, t=1000)
///   Documents/Work/Q1/plan.docx       (512 B,  t=6000)
///   Music/song.mp3                    (700 B,  t=7000)
///   Movies/clip.mp4                   (9000 B, t=8000)
///   Android/media/shared.jpg          (50 B,   t=9000)
///   Android/data/com.app/cache.jpg    restricted
///   Android/obb/com.app/main.zip      restricted
///   LOST.DIR/recovered.jpg            noise
///   .thumbnails/thumb.jpg             hidden
///   misc/notes.txt                    (10 B,   t=10000)
///   misc/backup.tar.gz                (20 B,   t=11000)
///   misc/unknown.xyz                  unclassified
/// ```
pub fn create_storage_fixture(base: &Path) -> io::Result<PathBuf> {
    let root = base.join("sdcard");

    write_file_at(&root.join("DCIM/Camera/IMG_001.jpg"), 1000, 3000)?;
    write_file_at(&root.join("DCIM/Camera/IMG_002.jpg"), 2000, 5000)?;
    write_file(&root.join("DCIM/Camera/.pending.jpg"), 64)?;
    write_file_at(&root.join("Pictures/Screenshots/shot.png"), 300, 4000)?;
    write_file_at(&root.join("Download/report.pdf"), 4096, 2000)?;
    write_file_at(&root.join("Download/app.apk"), 8192, 1000)?;
    write_file_at(&root.join("Documents/Work/Q1/plan.docx"), 512, 6000)?;
    write_file_at(&root.join("Music/song.mp3"), 700, 7000)?;
    write_file_at(&root.join("Movies/clip.mp4"), 9000, 8000)?;
    write_file_at(&root.join("Android/media/shared.jpg"), 50, 9000)?;
    write_file(&root.join("Android/data/com.app/cache.jpg"), 64)?;
    write_file(&root.join("Android/obb/com.app/main.zip"), 64)?;
    write_file(&root.join("LOST.DIR/recovered.jpg"), 64)?;
    write_file(&root.join(".thumbnails/thumb.jpg"), 64)?;
    write_file_at(&root.join("misc/notes.txt"), 10, 10_000)?;
    write_file_at(&root.join("misc/backup.tar.gz"), 20, 11_000)?;
    write_file(&root.join("misc/unknown.xyz"), 5)?;

    Ok(root)
}

/// In-memory item for pure-function tests.
pub fn item(path: &str, size: u64, date_modified: i64) -> FileItem {
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    FileItem {
        path: path.to_string(),
        name,
        size,
        date_modified,
        category: Some(FileCategory::Documents),
    }
}

/// Local filesystem that refuses to list the given directories.
pub struct DenyingFs {
    denied: Vec<PathBuf>,
}

impl DenyingFs {
    pub fn new(denied: Vec<PathBuf>) -> Self {
        Self { denied }
    }

    fn is_denied(&self, dir: &Path) -> bool {
        self.denied.iter().any(|d| d == dir)
    }
}

impl Filesystem for DenyingFs {
    fn read_dir(&self, dir: &Path) -> io::Result<DirListing> {
        if self.is_denied(dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("denied: {}", dir.display()),
            ));
        }
        LocalFs.read_dir(dir)
    }

    fn stat(&self, path: &Path) -> io::Result<EntryMeta> {
        LocalFs.stat(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        LocalFs.canonicalize(path)
    }

    fn exists(&self, path: &Path) -> bool {
        LocalFs.exists(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        LocalFs.copy_file(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        LocalFs.rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        LocalFs.remove_file(path)
    }
}

/// Filesystem whose existence checks only report the given paths.
pub struct PresenceFs {
    present: Vec<PathBuf>,
}

impl PresenceFs {
    pub fn new(present: Vec<PathBuf>) -> Self {
        Self { present }
    }
}

impl Filesystem for PresenceFs {
    fn read_dir(&self, dir: &Path) -> io::Result<DirListing> {
        LocalFs.read_dir(dir)
    }

    fn stat(&self, path: &Path) -> io::Result<EntryMeta> {
        LocalFs.stat(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        LocalFs.canonicalize(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.present.iter().any(|p| p == path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        LocalFs.copy_file(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        LocalFs.rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        LocalFs.remove_file(path)
    }
}
