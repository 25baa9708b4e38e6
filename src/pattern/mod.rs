// src/pattern/mod.rs

//! Exclusion patterns.
//!
//! This module is responsible for:
//! - Parsing the glob dialect used in exclude files (`glob.rs`).
//! - Compiling an ordered pattern list into one last-match-wins matcher
//!   (`matcher.rs`).
//! - Reading exclude files (`source.rs`).
//!
//! It knows nothing about traversal; callers hand it root-relative,
//! `/`-separated paths.

pub mod glob;
pub mod matcher;
pub mod source;

pub use matcher::{MatchedPattern, Pattern, PatternMatcher};
pub use source::{
    default_excludes, load_patterns, parse_patterns, DEFAULT_EXCLUDES, DEFAULT_EXCLUDE_FILE,
};
