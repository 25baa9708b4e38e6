use std::str::FromStr;

use serde::Deserialize;

/// What a traversal does when a subdirectory cannot be listed.
///
/// - `Skip`: log a warning and continue with the rest of the tree (default).
/// - `Abort`: stop the walk and surface the error to the caller.
///
/// The root directory itself is always required to be readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadableDirPolicy {
    Skip,
    Abort,
}

impl Default for UnreadableDirPolicy {
    fn default() -> Self {
        UnreadableDirPolicy::Skip
    }
}

impl FromStr for UnreadableDirPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(UnreadableDirPolicy::Skip),
            "abort" => Ok(UnreadableDirPolicy::Abort),
            other => Err(format!(
                "invalid unreadable_dirs: {other} (expected \"skip\" or \"abort\")"
            )),
        }
    }
}

/// Kind of a directory entry as reported by a listing, without following
/// symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Never descended into, reported alongside files.
    Symlink,
    /// Sockets, fifos, devices.
    Other,
}
