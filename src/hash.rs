// src/hash.rs

//! SHA-256 content digests for files and directories.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::view::{DirectoryView, ViewOptions};

/// Read size used by [`filehash`].
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Compute the lowercase hex SHA-256 of a file on the real filesystem.
pub fn filehash(path: &Path) -> anyhow::Result<String> {
    filehash_with(&RealFileSystem, path, DEFAULT_CHUNK_SIZE)
}

/// Compute the lowercase hex SHA-256 of a file, reading `chunk_size` bytes
/// at a time.
///
/// Errors are returned to the caller, which decides whether a failed file
/// aborts anything.
pub fn filehash_with(fs: &dyn FileSystem, path: &Path, chunk_size: usize) -> anyhow::Result<String> {
    let mut hasher = Sha256::new();
    let mut reader = fs.open_read(path)?;
    let mut buf = vec![0u8; chunk_size.max(1)];
    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("reading file for hashing: {:?}", path))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Ordered fold of per-file digests into one directory digest.
///
/// Each file digest is fed, as its 64 hex characters, into a single running
/// SHA-256. The result depends on the order of `update` calls.
#[derive(Clone, Default)]
pub struct DirDigest {
    hasher: Sha256,
    files: usize,
}

impl fmt::Debug for DirDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirDigest")
            .field("files", &self.files)
            .finish_non_exhaustive()
    }
}

impl DirDigest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, file_digest: &str) {
        self.hasher.update(file_digest.as_bytes());
        self.files += 1;
    }

    /// Number of file digests folded so far.
    pub fn len(&self) -> usize {
        self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files == 0
    }

    pub fn finalize(self) -> String {
        format!("{:x}", self.hasher.finalize())
    }
}

/// Hash every file below `path` on the real filesystem, with no exclusion
/// patterns.
pub fn hashdir(path: &Path) -> Result<String> {
    hashdir_with(Arc::new(RealFileSystem), path, DEFAULT_CHUNK_SIZE)
}

/// Hash every file below `path`, recursively and in traversal order, with
/// no exclusion patterns and no exclude file.
///
/// Unreadable files and subdirectories are skipped; an unreadable or
/// missing root is an error.
pub fn hashdir_with(fs: Arc<dyn FileSystem>, path: &Path, chunk_size: usize) -> Result<String> {
    let options = ViewOptions {
        chunk_size,
        ..ViewOptions::unfiltered()
    };
    let view = DirectoryView::with_options(fs, path, options)?;
    debug!(root = ?view.root(), "hashing directory without exclusions");
    view.hash()
}
