//! Volume capacity queries with platform-specific implementations

use crate::models::StorageSpace;
use std::io;
use std::path::Path;

/// Total and used bytes of the volume holding a path.
pub trait VolumeQuery: Send + Sync {
    fn space(&self, path: &Path) -> io::Result<StorageSpace>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalVolumes;

impl VolumeQuery for LocalVolumes {
    fn space(&self, path: &Path) -> io::Result<StorageSpace> {
        platform_space(path)
    }
}

/// Query the volume, reporting zero/zero when it cannot be read.
#[must_use]
pub fn storage_space(volumes: &dyn VolumeQuery, path: &Path) -> StorageSpace {
    volumes.space(path).unwrap_or_else(|e| {
        log::warn!("Failed to query volume space for {}: {e}", path.display());
        StorageSpace::default()
    })
}

/// Uses fragment size * block counts as reported by statvfs.
#[cfg(unix)]
fn platform_space(path: &Path) -> io::Result<StorageSpace> {
    let stat = rustix::fs::statvfs(path).map_err(io::Error::from)?;
    let block_size = stat.f_frsize;
    let total = stat.f_blocks.saturating_mul(block_size);
    let available = stat.f_bavail.saturating_mul(block_size);

    Ok(StorageSpace {
        total_bytes: total,
        used_bytes: total.saturating_sub(available),
    })
}

#[cfg(windows)]
fn platform_space(path: &Path) -> io::Result<StorageSpace> {
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut available: u64 = 0;
    let mut total: u64 = 0;
    let mut free: u64 = 0;
    let ok = unsafe { GetDiskFreeSpaceExW(wide.as_ptr(), &mut available, &mut total, &mut free) };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(StorageSpace {
        total_bytes: total,
        used_bytes: total.saturating_sub(available),
    })
}

#[cfg(not(any(unix, windows)))]
fn platform_space(path: &Path) -> io::Result<StorageSpace> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("volume query unsupported for {}", path.display()),
    ))
}
