// src/view/mod.rs

//! Filtered view over one directory subtree.
//!
//! A `DirectoryView` binds an absolute root, the merged exclusion patterns
//! (the exclude file itself, base excludes, then the patterns read from the
//! exclude file) and a filesystem.
//! Every projection (`walk`, `files`, `subdirs`, `find_project`, `hash`)
//! re-reads the filesystem on each call; nothing is cached.

pub mod path_utils;
pub mod walk;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, debug_span, info, Span};

use crate::errors::{DirviewError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::hash::{filehash_with, DirDigest, DEFAULT_CHUNK_SIZE};
use crate::pattern::{
    default_excludes, glob, load_patterns, MatchedPattern, Pattern, PatternMatcher,
    DEFAULT_EXCLUDE_FILE,
};
use crate::types::{EntryKind, UnreadableDirPolicy};

pub use path_utils::{join_rel, relative_str, to_slash};
pub use walk::{Walk, WalkEntry};

/// Construction-time settings for a `DirectoryView`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Name of the pattern file looked up directly inside the root.
    /// `None` disables exclude-file loading.
    pub exclude_file: Option<String>,
    /// Patterns placed before the exclude-file patterns.
    pub base_excludes: Vec<String>,
    /// Read size used when hashing files.
    pub chunk_size: usize,
    pub unreadable_dirs: UnreadableDirPolicy,
    /// Sort each listing by name instead of keeping the filesystem order.
    pub sort_entries: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            exclude_file: Some(DEFAULT_EXCLUDE_FILE.to_string()),
            base_excludes: default_excludes(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            unreadable_dirs: UnreadableDirPolicy::default(),
            sort_entries: false,
        }
    }
}

impl ViewOptions {
    /// No patterns at all: every entry is walked and reported.
    pub fn unfiltered() -> Self {
        Self {
            exclude_file: None,
            base_excludes: Vec::new(),
            ..Self::default()
        }
    }
}

/// Why a path is excluded: the path that was matched (the path itself or
/// one of its ancestor directories) and the deciding pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub matched_path: String,
    pub pattern: String,
}

pub struct DirectoryView {
    root: PathBuf,
    matcher: PatternMatcher,
    fs: Arc<dyn FileSystem>,
    options: ViewOptions,
    span: Span,
}

impl fmt::Debug for DirectoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryView")
            .field("root", &self.root)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl DirectoryView {
    /// Open `directory` on the real filesystem with the given exclude file
    /// name and base excludes.
    pub fn new(
        directory: impl AsRef<Path>,
        exclude_file: &str,
        base_excludes: Vec<String>,
    ) -> Result<Self> {
        let options = ViewOptions {
            exclude_file: Some(exclude_file.to_string()),
            base_excludes,
            ..ViewOptions::default()
        };
        Self::with_options(Arc::new(RealFileSystem), directory, options)
    }

    /// Open `directory` on the real filesystem with default options
    /// (`.exclude` file, VCS metadata directories excluded).
    pub fn open(directory: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(Arc::new(RealFileSystem), directory, ViewOptions::default())
    }

    pub fn with_options(
        fs: Arc<dyn FileSystem>,
        directory: impl AsRef<Path>,
        options: ViewOptions,
    ) -> Result<Self> {
        let directory = directory.as_ref();
        if !fs.exists(directory) {
            return Err(DirviewError::RootNotFound(directory.to_path_buf()));
        }
        if !fs.is_dir(directory) {
            return Err(DirviewError::RootNotDirectory(directory.to_path_buf()));
        }
        let root = fs.canonicalize(directory)?;
        let span = debug_span!("dirview", root = %root.display());

        let mut patterns = Vec::with_capacity(options.base_excludes.len() + 1);
        if let Some(name) = &options.exclude_file {
            // The exclude file is configuration, not content. Listed first so
            // a `!<name>` line can still bring it back.
            patterns.push(format!("/{}", glob::escape(name)));
        }
        patterns.extend(options.base_excludes.iter().cloned());
        if let Some(name) = &options.exclude_file {
            let exclude_path = root.join(name);
            if fs.is_file(&exclude_path) {
                let loaded = load_patterns(fs.as_ref(), &exclude_path)?;
                span.in_scope(|| {
                    info!(path = ?exclude_path, count = loaded.len(), "loaded exclude file");
                });
                patterns.extend(loaded);
            }
        }

        let matcher = PatternMatcher::compile(&patterns)?;

        Ok(Self {
            root,
            matcher,
            fs,
            options,
            span,
        })
    }

    /// Replace the span all traversal and hashing events are recorded in.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Absolute root of the view.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Merged pattern list: the anchored exclude-file name, base excludes,
    /// then exclude-file patterns.
    pub fn patterns(&self) -> &[Pattern] {
        self.matcher.patterns()
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub(crate) fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Root-relative, `/`-separated form of `path` (`""` for the root).
    /// Relative inputs are interpreted relative to the root.
    pub fn relpath(&self, path: impl AsRef<Path>) -> Option<String> {
        relative_str(&self.root, path.as_ref())
    }

    pub(crate) fn rel_dir(&self, dir: &Path) -> String {
        dir.strip_prefix(&self.root).map(to_slash).unwrap_or_default()
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.root.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Directory-ness of `path` as a walk would see it: a symlink to a
    /// directory is not a directory. `None` if nothing is there.
    fn probe_is_dir(&self, path: &Path) -> Option<bool> {
        self.fs
            .entry_kind(&self.absolute(path))
            .map(|kind| kind == EntryKind::Dir)
    }

    /// The pattern deciding `path`, if any. `is_dir: None` lets
    /// directory-only patterns match.
    ///
    /// The root itself and paths outside the root never match.
    pub fn matched_pattern(
        &self,
        path: impl AsRef<Path>,
        is_dir: Option<bool>,
    ) -> Option<MatchedPattern<'_>> {
        let path = path.as_ref();
        let Some(rel) = self.relpath(path) else {
            debug!(?path, "path is outside the view root");
            return None;
        };
        if rel.is_empty() {
            return None;
        }
        self.matcher.matched(&rel, is_dir)
    }

    /// Whether `path` itself is excluded, using the filesystem to decide
    /// whether directory-only patterns apply.
    pub fn is_excluded(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let is_dir = self.probe_is_dir(path);
        self.decide(path, is_dir)
    }

    /// Like [`is_excluded`](Self::is_excluded) with caller-supplied
    /// directory-ness.
    pub fn is_excluded_as(&self, path: impl AsRef<Path>, is_dir: bool) -> bool {
        self.decide(path.as_ref(), Some(is_dir))
    }

    fn decide(&self, path: &Path, is_dir: Option<bool>) -> bool {
        let _enter = self.span.enter();
        match self.matched_pattern(path, is_dir) {
            Some(m) if m.excludes() => {
                debug!(?path, pattern = %m.pattern, "matched for exclusion");
                true
            }
            _ => false,
        }
    }

    /// Explain why `path` would not be reported by a walk.
    ///
    /// Ancestor directories are checked first: a path below an excluded
    /// directory is never reached, whatever later patterns say about it.
    pub fn exclusion_for(&self, path: impl AsRef<Path>) -> Option<Exclusion> {
        let path = path.as_ref();
        let rel = self.relpath(path)?;
        if rel.is_empty() {
            return None;
        }

        let segments: Vec<&str> = rel.split('/').collect();
        let mut prefix = String::new();
        for (i, segment) in segments.iter().enumerate() {
            prefix = join_rel(&prefix, segment);
            let is_dir = if i + 1 < segments.len() {
                Some(true)
            } else {
                self.probe_is_dir(path)
            };
            if let Some(m) = self.matcher.matched(&prefix, is_dir) {
                if m.excludes() {
                    return Some(Exclusion {
                        matched_path: prefix,
                        pattern: m.pattern.to_string(),
                    });
                }
            }
        }
        None
    }

    /// Pruned top-down traversal from the root. Each call starts a fresh walk.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// Root-relative paths of all included files, in traversal order.
    pub fn files(&self) -> impl Iterator<Item = Result<String>> + '_ {
        self.walk().flat_map(move |entry| match entry {
            Ok(entry) => {
                let base = self.rel_dir(&entry.dir);
                entry
                    .files
                    .iter()
                    .map(|name| Ok(join_rel(&base, name)))
                    .collect::<Vec<_>>()
            }
            Err(err) => vec![Err(err)],
        })
    }

    /// Root-relative paths of all directories that are descended into.
    pub fn subdirs(&self) -> impl Iterator<Item = Result<String>> + '_ {
        self.walk().flat_map(move |entry| match entry {
            Ok(entry) => {
                let base = self.rel_dir(&entry.dir);
                entry
                    .subdirs
                    .iter()
                    .map(|name| Ok(join_rel(&base, name)))
                    .collect::<Vec<_>>()
            }
            Err(err) => vec![Err(err)],
        })
    }

    /// Subdirectories (root-relative) containing a file named `marker`.
    pub fn find_project<'a>(
        &'a self,
        marker: &'a str,
    ) -> impl Iterator<Item = Result<String>> + 'a {
        self.subdirs().filter(move |subdir| match subdir {
            Ok(subdir) => self.fs.is_file(&self.root.join(subdir).join(marker)),
            Err(_) => true,
        })
    }

    /// Digest of every included file, folded in traversal order.
    ///
    /// Files that cannot be read are skipped. Traversal errors are
    /// returned according to the view's unreadable-directory policy.
    pub fn hash(&self) -> Result<String> {
        let mut digest = DirDigest::new();
        for rel in self.files() {
            let path = self.root.join(rel?);
            match filehash_with(self.fs.as_ref(), &path, self.options.chunk_size) {
                Ok(file_digest) => digest.update(&file_digest),
                Err(err) => {
                    let _enter = self.span.enter();
                    debug!(?path, error = %err, "skipping unreadable file");
                }
            }
        }
        let hash = digest.finalize();
        self.span.in_scope(|| debug!(%hash, "computed directory hash"));
        Ok(hash)
    }
}
