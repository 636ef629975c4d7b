//! Utility functions for path derivation and directory preconditions

use crate::error::{Error, Result};
use std::path::Path;

/// Derive a file name from a URL's path component.
///
/// Takes the last path segment after percent-decoding, mirroring what a
/// browser would save the resource as. Returns `None` when the URL does not
/// parse, the path has no final segment (bare host, trailing slash), or the
/// segment is not usable as a file name — callers then substitute a
/// synthetic name.
///
/// # Examples
///
/// ```
/// use bulk_dl::utils::file_name_from_url;
///
/// assert_eq!(
///     file_name_from_url("http://img.example/gallery/photo%201.jpg"),
///     Some("photo 1.jpg".to_string())
/// );
/// assert_eq!(file_name_from_url("http://img.example/"), None);
/// ```
pub fn file_name_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let decoded = urlencoding::decode(parsed.path()).ok()?;

    // Basename of the decoded path: an encoded slash (%2F) re-introduces a
    // separator, so splitting happens after decoding.
    let name = decoded.rsplit('/').next().unwrap_or_default();
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

/// Verify that a target directory exists, is a directory, and is writable.
///
/// This is the fatal precondition gate for both download batches and tracker
/// aggregation: any violation aborts the run before a single network call.
pub fn ensure_writable_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::precondition("directory does not exist", path));
    }
    if !path.is_dir() {
        return Err(Error::precondition("path is not a directory", path));
    }
    if !is_writable(path) {
        return Err(Error::precondition("directory is not writable", path));
    }
    Ok(())
}

#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        // Interior NUL byte — no such path can exist on disk
        return false;
    };

    // SAFETY: c_path is a valid, null-terminated C string; access() writes
    // through no pointers and its return value is checked directly.
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
    // Best portable signal without attempting a write
    std::fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
