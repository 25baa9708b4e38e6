#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dirview::fs::mock::MockFileSystem;
use dirview::fs::FileSystem;
use tempfile::TempDir;

/// Builder for a real directory tree inside a fresh temporary directory.
///
/// Paths are relative to the tree root and may use `/` separators; missing
/// parent directories are created.
pub struct TreeBuilder {
    dir: TempDir,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn file(self, rel: &str, contents: impl AsRef<[u8]>) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, contents).expect("Failed to write file");
        self
    }

    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(rel)).expect("Failed to create dir");
        self
    }

    /// Write an exclude file with one pattern per line.
    pub fn exclude_file(self, name: &str, patterns: &[&str]) -> Self {
        let contents = patterns.join("\n");
        self.file(name, contents)
    }

    pub fn build(self) -> TempDir {
        self.dir
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for an in-memory tree rooted at an absolute path.
///
/// Entries are listed in the order they were added, so tests control the
/// traversal order exactly.
pub struct MockTreeBuilder {
    fs: MockFileSystem,
    root: PathBuf,
}

impl MockTreeBuilder {
    pub fn new(root: &str) -> Self {
        let fs = MockFileSystem::new();
        fs.add_dir(root);
        Self {
            fs,
            root: PathBuf::from(root),
        }
    }

    pub fn file(self, rel: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.fs.add_file(self.root.join(rel), contents);
        self
    }

    pub fn dir(self, rel: &str) -> Self {
        self.fs.add_dir(self.root.join(rel));
        self
    }

    /// Make `rel` unreadable.
    pub fn deny(self, rel: &str) -> Self {
        self.fs.deny(self.root.join(rel));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mock(&self) -> MockFileSystem {
        self.fs.clone()
    }

    pub fn build(self) -> (Arc<dyn FileSystem>, PathBuf) {
        (Arc::new(self.fs), self.root)
    }
}
