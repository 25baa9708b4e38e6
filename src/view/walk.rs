// src/view/walk.rs

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::errors::{DirviewError, Result};
use crate::types::{EntryKind, UnreadableDirPolicy};
use crate::view::path_utils::join_rel;
use crate::view::DirectoryView;

/// One visited directory: its absolute path, the subdirectories that will
/// be descended into next, and the included files directly inside it.
///
/// `subdirs` and `files` are bare names relative to `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub dir: PathBuf,
    pub subdirs: Vec<String>,
    pub files: Vec<String>,
}

/// Top-down, depth-first traversal that prunes excluded directories before
/// descending into them.
///
/// Directories are visited in pre-order, children in listing order (or by
/// name when the view sorts entries). Symlinks are reported as files and
/// never followed.
pub struct Walk<'a> {
    view: &'a DirectoryView,
    stack: Vec<PathBuf>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(view: &'a DirectoryView) -> Self {
        Self {
            view,
            stack: vec![view.root().to_path_buf()],
        }
    }

    fn visit(&self, dir: PathBuf) -> Result<WalkEntry> {
        let listing = self.view.fs().read_dir(&dir).map_err(|source| DirviewError::Traversal {
            path: dir.clone(),
            source,
        })?;

        let base = self.view.rel_dir(&dir);
        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        for entry in listing {
            let is_dir = entry.kind == EntryKind::Dir;
            let rel = join_rel(&base, &entry.name);

            if let Some(m) = self.view.matcher().matched(&rel, Some(is_dir)) {
                if m.excludes() {
                    debug!(path = %rel, pattern = %m.pattern, "excluded");
                    continue;
                }
            }

            if is_dir {
                subdirs.push(entry.name);
            } else {
                files.push(entry.name);
            }
        }

        if self.view.options().sort_entries {
            subdirs.sort();
            files.sort();
        }

        Ok(WalkEntry {
            dir,
            subdirs,
            files,
        })
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let _enter = self.view.span().enter();

        while let Some(dir) = self.stack.pop() {
            let is_root = dir == self.view.root();
            match self.visit(dir) {
                Ok(entry) => {
                    // Pushed in reverse so the first listed subdir is visited next.
                    for name in entry.subdirs.iter().rev() {
                        self.stack.push(entry.dir.join(name));
                    }
                    return Some(Ok(entry));
                }
                Err(err)
                    if !is_root
                        && self.view.options().unreadable_dirs == UnreadableDirPolicy::Skip =>
                {
                    warn!(error = %err, "skipping unreadable directory");
                }
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }

        None
    }
}
