// src/system/fs.rs

use std::io;
use std::path::Path;

/// Filesystem operations the runner needs, kept behind a trait so
/// permission handling can be exercised without touching real files.
pub trait Filesystem {
    /// Returns the permission bits of `path` (`st_mode`).
    fn mode(&self, path: &Path) -> io::Result<u32>;

    /// Replaces the permission bits of `path`.
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Whether `path` exists at the time of the call.
    fn exists(&self, path: &Path) -> bool;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    #[cfg(unix)]
    fn mode(&self, path: &Path) -> io::Result<u32> {
        use std::os::unix::fs::PermissionsExt;
        Ok(std::fs::metadata(path)?.permissions().mode())
    }

    #[cfg(not(unix))]
    fn mode(&self, _path: &Path) -> io::Result<u32> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "permission bits are only available on unix",
        ))
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
    }

    #[cfg(not(unix))]
    fn set_mode(&self, _path: &Path, _mode: u32) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "permission bits are only available on unix",
        ))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
