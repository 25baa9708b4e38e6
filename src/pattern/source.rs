// src/pattern/source.rs

//! Loading exclude patterns from disk.

use std::path::Path;

use anyhow::Context;

use crate::errors::Result;
use crate::fs::FileSystem;

/// Name of the per-root exclude file when none is configured.
pub const DEFAULT_EXCLUDE_FILE: &str = ".exclude";

/// Base excludes applied before any exclude-file patterns.
pub const DEFAULT_EXCLUDES: &[&str] = &[".git/", ".hg/", ".svn/"];

pub fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
}

/// Read an exclude file and return its patterns in file order.
///
/// One pattern per line; blank lines are dropped. There is no comment
/// syntax, so every other line is taken verbatim (a trailing `\r` is
/// stripped so CRLF files behave like LF files).
pub fn load_patterns(fs: &dyn FileSystem, path: &Path) -> Result<Vec<String>> {
    let contents = fs
        .read_to_string(path)
        .with_context(|| format!("loading exclude patterns from {:?}", path))?;
    Ok(parse_patterns(&contents))
}

pub fn parse_patterns(contents: &str) -> Vec<String> {
    contents
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
