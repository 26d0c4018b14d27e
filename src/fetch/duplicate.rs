//! Duplicate detection by content hash.
//!
//! The index is rebuilt from the directory on every call and never persisted,
//! so it always mirrors the files present at scan time.

use std::fmt;
use std::path::{Path, PathBuf};

use md5::{Digest, Md5};
use tracing::{debug, instrument};

use super::error::FetchError;

/// MD5 digest of a byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Hashes `content`.
    #[must_use]
    pub fn of(content: &[u8]) -> Self {
        Self(Md5::digest(content).into())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Hashes of the regular files in one directory, in file-name order.
#[derive(Debug, Clone, Default)]
pub struct DirectoryHashIndex {
    entries: Vec<(PathBuf, ContentHash)>,
}

impl DirectoryHashIndex {
    /// Reads and hashes every regular file directly inside `dir`.
    ///
    /// A missing directory yields an empty index. Files that cannot be read
    /// are left out.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Io`] if the directory exists but cannot be listed.
    #[instrument(level = "debug", fields(dir = %dir.display()))]
    pub async fn scan(dir: &Path) -> Result<Self, FetchError> {
        let mut read_dir = match tokio::fs::read_dir(dir).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(FetchError::io(dir, e)),
        };

        let mut paths = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| FetchError::io(dir, e))?
        {
            let path = entry.path();
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => debug!(path = %path.display(), error = %e, "skipping unreadable entry"),
            }
        }
        paths.sort();

        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            match tokio::fs::read(&path).await {
                Ok(bytes) => entries.push((path, ContentHash::of(&bytes))),
                Err(e) => debug!(path = %path.display(), error = %e, "skipping unreadable file"),
            }
        }

        debug!(files = entries.len(), "directory hash index built");
        Ok(Self { entries })
    }

    /// Path of the first indexed file with the given hash.
    #[must_use]
    pub fn find(&self, hash: &ContentHash) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(_, existing)| existing == hash)
            .map(|(path, _)| path.as_path())
    }

    /// Number of indexed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns the path of an existing file in `dir` whose bytes equal `content`.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if `dir` exists but cannot be listed.
pub async fn find_duplicate(content: &[u8], dir: &Path) -> Result<Option<PathBuf>, FetchError> {
    let hash = ContentHash::of(content);
    let index = DirectoryHashIndex::scan(dir).await?;
    let existing = index.find(&hash).map(Path::to_path_buf);
    debug!(hash = %hash, duplicate = existing.is_some(), "duplicate check");
    Ok(existing)
}
