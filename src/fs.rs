//! Filesystem access for sysfs
//!
//! The core never touches `std::fs` directly: it goes through [`SysFs`], which
//! exposes the two primitives needed to walk `/sys/class/net`: listing a
//! directory and reading a whole file. [`RealFs`] is the `std::fs` backend
//! rooted at a sysfs mount point (normally `/sys`).

use crate::error::{NetClassError, Result};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default sysfs mount point
pub const DEFAULT_MOUNT_POINT: &str = "/sys";

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (last path component)
    pub name: String,
    /// Entry is a plain file (not a directory or symlink)
    pub is_regular_file: bool,
}

/// Read-only view of a sysfs tree
///
/// Paths passed in are relative to the mount point.
pub trait SysFs {
    /// List the children of a directory
    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Read a whole file, `Ok(None)` if it does not exist
    fn read_file(&self, path: &Path) -> io::Result<Option<Vec<u8>>>;

    /// Check whether a path is a directory (following symlinks)
    fn is_dir(&self, path: &Path) -> bool;
}

impl<T: SysFs + ?Sized> SysFs for &T {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        (**self).list_entries(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        (**self).read_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }
}

/// `std::fs` backed sysfs rooted at a mount point
#[derive(Debug, Clone)]
pub struct RealFs {
    mount_point: PathBuf,
}

impl RealFs {
    /// Open a sysfs tree at `mount_point`
    ///
    /// Fails if the mount point is not a directory.
    pub fn new(mount_point: impl AsRef<Path>) -> Result<Self> {
        let mount_point = mount_point.as_ref().to_path_buf();
        if !mount_point.is_dir() {
            return Err(NetClassError::InvalidMountPoint(mount_point));
        }
        Ok(Self { mount_point })
    }

    /// Open the sysfs tree at [`DEFAULT_MOUNT_POINT`]
    pub fn default_mount() -> Result<Self> {
        Self::new(DEFAULT_MOUNT_POINT)
    }

    /// The mount point this tree is rooted at
    pub fn mount_point(&self) -> &Path {
        &self.mount_point
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.mount_point.join(path)
    }
}

impl SysFs for RealFs {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            // Names are used to build paths again, so a lossy conversion
            // would point at a directory that does not exist.
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    debug!("skipping non UTF-8 entry {:?} in {}", raw, path.display());
                    continue;
                }
            };
            // file_type() does not follow symlinks, so /sys/class/net/* links
            // report as non-regular.
            let is_regular_file = entry.file_type()?.is_file();
            entries.push(DirEntry {
                name,
                is_regular_file,
            });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.resolve(path)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_dir()
    }
}

/// True if a read error means the kernel does not support the attribute
/// for this device, as opposed to a real I/O failure.
///
/// sysfs answers `EINVAL` for link attributes of a down interface (`speed`,
/// `duplex`), `EOPNOTSUPP` for driver hooks that are not implemented
/// (`phys_port_id`) and `EACCES` for attributes restricted to root.
pub fn is_unsupported(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }

    #[cfg(unix)]
    {
        matches!(
            err.raw_os_error(),
            Some(libc::EINVAL) | Some(libc::EOPNOTSUPP)
        )
    }

    #[cfg(not(unix))]
    {
        err.kind() == io::ErrorKind::InvalidInput
    }
}


#[cfg(test)]
mod tests {
    use super::testing::eth0_fixture;
    use super::*;

    #[test]
    fn test_new_rejects_missing_mount_point() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = RealFs::new(&missing).unwrap_err();
        assert!(matches!(err, NetClassError::InvalidMountPoint(p) if p == missing));
    }

    #[test]
    fn test_list_entries_marks_regular_files() {
        let dir = eth0_fixture();
        let fs = RealFs::new(dir.path()).unwrap();
        let mut entries = fs.list_entries(Path::new("class/net")).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "bonding_masters");
        assert!(entries[0].is_regular_file);
        assert_eq!(entries[1].name, "eth0");
        assert!(!entries[1].is_regular_file);
    }

    #[test]
    fn test_read_file_distinguishes_absent() {
        let dir = eth0_fixture();
        let fs = RealFs::new(dir.path()).unwrap();

        let mtu = fs.read_file(Path::new("class/net/eth0/mtu")).unwrap();
        assert_eq!(mtu.as_deref(), Some(&b"1500\n"[..]));

        let alias = fs.read_file(Path::new("class/net/eth0/ifalias")).unwrap();
        assert!(alias.is_none());
    }

    #[test]
    fn test_list_entries_of_missing_dir_fails() {
        let dir = eth0_fixture();
        let fs = RealFs::new(dir.path()).unwrap();
        assert!(fs.list_entries(Path::new("class/block")).is_err());
    }

    #[test]
    fn test_is_dir_rejects_regular_files() {
        let dir = eth0_fixture();
        let fs = RealFs::new(dir.path()).unwrap();
        assert!(fs.is_dir(Path::new("class/net/eth0")));
        assert!(!fs.is_dir(Path::new("class/net/bonding_masters")));
        assert!(!fs.is_dir(Path::new("class/net/eth0/mtu")));
        assert!(!fs.is_dir(Path::new("class/net/eth9")));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_entries_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = eth0_fixture();
        let raw = dir
            .path()
            .join("class/net")
            .join(OsStr::from_bytes(b"bad\xffname"));
        fs::create_dir_all(&raw).unwrap();
        fs::write(raw.join("mtu"), "1500\n").unwrap();

        let sysfs = RealFs::new(dir.path()).unwrap();
        let mut names: Vec<String> = sysfs
            .list_entries(Path::new("class/net"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["bonding_masters", "eth0"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unsupported_errnos() {
        assert!(is_unsupported(&io::Error::from_raw_os_error(libc::EINVAL)));
        assert!(is_unsupported(&io::Error::from_raw_os_error(libc::EOPNOTSUPP)));
        assert!(is_unsupported(&io::Error::from_raw_os_error(libc::EACCES)));
        assert!(!is_unsupported(&io::Error::from_raw_os_error(libc::EIO)));
    }
}
