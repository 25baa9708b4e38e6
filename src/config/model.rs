// src/config/model.rs

use serde::Deserialize;

use crate::hash::DEFAULT_CHUNK_SIZE;
use crate::pattern::{default_excludes, DEFAULT_EXCLUDE_FILE};
use crate::types::UnreadableDirPolicy;
use crate::view::ViewOptions;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [view]
/// exclude_file = ".exclude"
/// excludes = [".git/", ".hg/", ".svn/"]
/// chunk_size = 4096
/// unreadable_dirs = "skip"
/// sort_entries = false
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub view: ViewSection,
}

/// `[view]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewSection {
    /// Name of the pattern file read from the root of each view.
    #[serde(default = "default_exclude_file")]
    pub exclude_file: String,

    /// Base excludes. Setting this replaces the built-in VCS list.
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,

    /// Bytes read per chunk when hashing.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// `"skip"` (default) or `"abort"`.
    #[serde(default)]
    pub unreadable_dirs: UnreadableDirPolicy,

    /// Sort listings by name for platform-independent ordering.
    #[serde(default)]
    pub sort_entries: bool,
}

fn default_exclude_file() -> String {
    DEFAULT_EXCLUDE_FILE.to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            exclude_file: default_exclude_file(),
            excludes: default_excludes(),
            chunk_size: default_chunk_size(),
            unreadable_dirs: UnreadableDirPolicy::default(),
            sort_entries: false,
        }
    }
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    view: ViewSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(view: ViewSection) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &ViewSection {
        &self.view
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            exclude_file: Some(self.view.exclude_file.clone()),
            base_excludes: self.view.excludes.clone(),
            chunk_size: self.view.chunk_size,
            unreadable_dirs: self.view.unreadable_dirs,
            sort_entries: self.view.sort_entries,
        }
    }
}
