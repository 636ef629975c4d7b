//! Collision-safe persistence of fetched payloads
//!
//! File names are derived from the source URL; when two items resolve to the
//! same name (or the name is already taken on disk), the later one is shifted
//! to `stem_1.ext`, `stem_2.ext`, and so on. An in-process claim registry
//! makes the check-and-reserve step atomic, so concurrent tasks can never
//! race each other into the same path. Exclusive create backs that up at the
//! filesystem level.

use crate::client::ByteStream;
use crate::error::Result;
use crate::types::WorkItem;
use crate::utils::file_name_from_url;
use futures::StreamExt;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Derive the target file name for a work item.
///
/// The name is the percent-decoded basename of the URL path; URLs with no
/// usable basename (trailing slash, bare host, `.` or `..`) fall back to
/// `image_<sequence_index>`.
pub fn derive_file_name(url: &str, sequence_index: usize) -> String {
    file_name_from_url(url).unwrap_or_else(|| format!("image_{sequence_index}"))
}

/// In-process registry of output paths already promised to a task.
///
/// Disk existence alone is not enough to avoid collisions: two concurrent
/// tasks can both observe `photo.png` as free and then clobber each other.
/// Reserving through this registry makes the decision atomic.
#[derive(Debug, Default)]
pub struct PathClaims {
    claimed: Mutex<HashSet<PathBuf>>,
}

impl PathClaims {
    /// Create an empty registry for one run
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the first free path for `file_name` under `dir`.
    ///
    /// A path counts as taken when it exists on disk or has been reserved by
    /// an earlier call. The returned path is claimed before the lock is
    /// released, so no two calls can ever return the same path. Claims are
    /// not released on write failure; a partial file may occupy the slot and
    /// the name must not be reused within the run.
    pub fn reserve(&self, dir: &Path, file_name: &str) -> PathBuf {
        let (stem, ext) = split_name(file_name);
        // A poisoned lock only means another thread panicked while holding
        // it; the set itself is never left half-updated.
        let mut claimed = self.claimed.lock().unwrap_or_else(|e| e.into_inner());
        let mut n = 0;
        loop {
            let candidate = if n == 0 {
                file_name.to_string()
            } else {
                format!("{stem}_{n}{ext}")
            };
            let path = dir.join(candidate);
            if !claimed.contains(&path) && !path.exists() {
                claimed.insert(path.clone());
                return path;
            }
            n += 1;
        }
    }
}

/// Split a file name into stem and extension, keeping the dot with the
/// extension. Only the final extension counts (`archive.tar.gz` splits as
/// `archive.tar` + `.gz`), and a leading-dot name is all stem.
fn split_name(name: &str) -> (&str, String) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
        _ => (name, String::new()),
    }
}

/// Writes fetched payload streams into one target directory, resolving name
/// collisions across all items of a run.
#[derive(Debug)]
pub struct Persister {
    dir: PathBuf,
    claims: PathClaims,
}

impl Persister {
    /// Create a persister for one run, writing into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            claims: PathClaims::new(),
        }
    }

    /// Stream the payload for `item` to a freshly reserved file, returning
    /// the final path and the number of bytes written.
    ///
    /// On error the reserved file is left in place with whatever bytes
    /// arrived before the failure; nothing is cleaned up or retried here.
    pub async fn persist(&self, item: &WorkItem, stream: ByteStream) -> Result<(PathBuf, u64)> {
        let file_name = derive_file_name(&item.source_url, item.sequence_index);
        let path = self.claims.reserve(&self.dir, &file_name);
        debug!(url = %item.source_url, path = %path.display(), "output path reserved");
        let bytes_written = write_stream(&path, stream).await?;
        Ok((path, bytes_written))
    }
}

/// Copy a byte stream to `path`, failing if the file already exists.
async fn write_stream(path: &Path, mut stream: ByteStream) -> Result<u64> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;

    let mut bytes_written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        bytes_written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(bytes_written)
}
