// src/view/path_utils.rs

//! Utility functions for turning paths into the matcher's string form.

use std::path::{Component, Path, PathBuf};

/// Render a relative path with `/` separators regardless of platform.
///
/// `.` components are dropped; root and prefix components are ignored.
pub fn to_slash(rel: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => parts.push("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}

/// Resolve `.` and `..` lexically, without touching the filesystem.
///
/// `..` at the top of an absolute path stays at the root; at the top of a
/// relative path it is kept, so the result still points outside its base.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// A normalized relative path that does not climb out of its base.
fn inside(rel: &Path) -> Option<String> {
    let rel = normalize(rel);
    match rel.components().next() {
        Some(Component::ParentDir) => None,
        _ => Some(to_slash(&rel)),
    }
}

/// Convert `path` into a string relative to `root`, with forward slashes.
///
/// - Relative paths are taken to be relative to `root` already.
/// - Absolute paths are normalized and stripped of `root`; if that fails
///   (symlinked prefixes such as `/var` vs `/private/var`), both sides are
///   canonicalized and stripping is retried.
///
/// Returns `None` for paths that resolve outside `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if path.is_relative() {
        return inside(path);
    }

    if let Ok(rel) = normalize(path).strip_prefix(root) {
        return inside(rel);
    }

    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return inside(rel);
        }
    }

    None
}

/// Join a root-relative directory and an entry name.
pub fn join_rel(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}
