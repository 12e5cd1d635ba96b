//! Checks that the current user may open the sound device nodes at all.
//!
//! Discovery against devices the user cannot open fails in unhelpful ways, so this is worth
//! reporting before anything else.

use std::{
    ffi::{CStr, CString},
    fs,
    io::ErrorKind,
    os::unix::{
        ffi::OsStrExt,
        fs::{FileTypeExt, MetadataExt},
    },
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::AccessError;

pub const SOUND_DEVICE_DIR: &str = "/dev/snd";

/// Summary of a sound device directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessReport {
    pub directory: PathBuf,
    /// Character and block devices found.
    pub devices: usize,
    /// Devices the current user may both read and write.
    pub accessible: usize,
    /// At least one directory entry could not be examined.
    pub stat_failed: bool,
    /// Owning group of the first device found to be inaccessible.
    pub blocking_gid: Option<u32>,
}

impl AccessReport {
    pub fn all_accessible(&self) -> bool {
        !self.stat_failed && self.devices == self.accessible
    }

    pub fn is_empty(&self) -> bool {
        self.devices == 0 && !self.stat_failed
    }

    /// Name of the group owning the first inaccessible device, if it can be resolved.
    pub fn blocking_group(&self) -> Option<String> {
        self.blocking_gid.and_then(group_name)
    }
}

/// Examine the standard sound device directory.
pub fn check_device_access() -> Result<AccessReport, AccessError> {
    check_directory(Path::new(SOUND_DEVICE_DIR))
}

pub fn check_directory(dir: &Path) -> Result<AccessReport, AccessError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AccessError::DirectoryMissing(dir.to_owned()));
        }
        Err(e) => return Err(AccessError::DirectoryUnreadable(dir.to_owned(), e)),
    };

    let mut report = AccessReport {
        directory: dir.to_owned(),
        ..Default::default()
    };
    for entry in entries {
        let Ok(entry) = entry else {
            report.stat_failed = true;
            continue;
        };
        let path = entry.path();
        let Ok(metadata) = fs::metadata(&path) else {
            debug!("unable to stat {}", path.display());
            report.stat_failed = true;
            continue;
        };
        let file_type = metadata.file_type();
        if !file_type.is_char_device() && !file_type.is_block_device() {
            continue;
        }
        report.devices += 1;
        if can_read_write(&path) {
            report.accessible += 1;
        } else {
            debug!("unable to access {}", path.display());
            report.blocking_gid.get_or_insert(metadata.gid());
        }
    }
    debug!(
        "devices found in \"{}\": {}, accessible: {}",
        dir.display(),
        report.devices,
        report.accessible
    );
    Ok(report)
}

fn can_read_write(path: &Path) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::R_OK | libc::W_OK) == 0 }
}

// Upper bound on the buffer for a single passwd or group entry.
const MAX_ENTRY_BUFFER: usize = 1 << 20;

/// Starting buffer size for a reentrant passwd or group lookup.
fn entry_buffer(size_name: libc::c_int) -> Vec<libc::c_char> {
    // SAFETY: sysconf has no preconditions.
    let hint = unsafe { libc::sysconf(size_name) };
    let len = usize::try_from(hint).ok().filter(|&n| n > 0).unwrap_or(1024);
    vec![0; len]
}

/// Name of the group with id `gid`, from the system group database.
pub fn group_name(gid: libc::gid_t) -> Option<String> {
    let mut buf = entry_buffer(libc::_SC_GETGR_R_SIZE_MAX);
    loop {
        // SAFETY: libc::group is plain old data, all zeroes is a valid value.
        let mut group: libc::group = unsafe { std::mem::zeroed() };
        let mut found: *mut libc::group = std::ptr::null_mut();
        // SAFETY: all pointers are valid for the duration of the call and buf.len() is the
        // length of buf.
        let rc = unsafe {
            libc::getgrgid_r(gid, &mut group, buf.as_mut_ptr(), buf.len(), &mut found)
        };
        match rc {
            0 if found.is_null() => return None,
            // SAFETY: on success gr_name points at a NUL-terminated string inside buf.
            0 => return Some(unsafe { CStr::from_ptr(group.gr_name) }.to_string_lossy().into()),
            libc::ERANGE if buf.len() < MAX_ENTRY_BUFFER => buf.resize(buf.len() * 2, 0),
            _ => {
                debug!("unable to look up group {gid}: error {rc}");
                return None;
            }
        }
    }
}

/// Login name of the user with id `uid`, from the system user database.
pub fn user_name(uid: libc::uid_t) -> Option<String> {
    let mut buf = entry_buffer(libc::_SC_GETPW_R_SIZE_MAX);
    loop {
        // SAFETY: libc::passwd is plain old data, all zeroes is a valid value.
        let mut passwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut found: *mut libc::passwd = std::ptr::null_mut();
        // SAFETY: all pointers are valid for the duration of the call and buf.len() is the
        // length of buf.
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut passwd, buf.as_mut_ptr(), buf.len(), &mut found)
        };
        match rc {
            0 if found.is_null() => return None,
            // SAFETY: on success pw_name points at a NUL-terminated string inside buf.
            0 => return Some(unsafe { CStr::from_ptr(passwd.pw_name) }.to_string_lossy().into()),
            libc::ERANGE if buf.len() < MAX_ENTRY_BUFFER => buf.resize(buf.len() * 2, 0),
            _ => {
                debug!("unable to look up user {uid}: error {rc}");
                return None;
            }
        }
    }
}

/// Login name of the user running this process.
pub fn current_user() -> Option<String> {
    // SAFETY: getuid has no preconditions and never fails.
    user_name(unsafe { libc::getuid() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            check_directory(&dir.path().join("snd")),
            Err(AccessError::DirectoryMissing(_))
        ));
    }

    #[test]
    fn regular_files_are_not_devices() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("controlC0"), b"").unwrap();
        fs::create_dir(dir.path().join("by-path")).unwrap();
        let report = check_directory(dir.path()).unwrap();
        assert_eq!(report.devices, 0);
        assert!(report.is_empty());
        assert!(report.all_accessible());
    }

    #[test]
    fn blocking_group_is_resolved() {
        let report = AccessReport {
            blocking_gid: Some(0),
            ..Default::default()
        };
        assert_eq!(report.blocking_group().as_deref(), Some("root"));
        assert_eq!(AccessReport::default().blocking_group(), None);
    }

    #[test]
    fn system_database_lookups() {
        assert_eq!(group_name(0).as_deref(), Some("root"));
        assert_eq!(user_name(0).as_deref(), Some("root"));
        assert_eq!(group_name(3_999_999_999), None);
        assert_eq!(user_name(3_999_999_999), None);
    }
}
