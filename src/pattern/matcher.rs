// src/pattern/matcher.rs

use std::fmt;
use std::str::FromStr;

use regex::RegexSet;

use crate::errors::{DirviewError, Result};
use crate::pattern::glob;

/// One exclusion rule, parsed from its textual form.
///
/// - A leading `!` negates the rule: a path it matches is re-included.
/// - A trailing `/` restricts the rule to directories.
/// - A `/` anywhere else anchors the rule to the root-relative path; a rule
///   without one matches the basename at any depth. A single leading `/`
///   only marks the anchor and is not part of the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    negated: bool,
    dir_only: bool,
    anchored: bool,
    regex: String,
}

impl Pattern {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut body = raw;

        let negated = body.starts_with('!');
        if negated {
            body = &body[1..];
        }

        let dir_only = body.ends_with('/');
        body = body.trim_end_matches('/');

        let anchored = body.contains('/');
        if let Some(stripped) = body.strip_prefix('/') {
            body = stripped;
        }

        if body.is_empty() {
            return Err(DirviewError::invalid_pattern(raw, "pattern matches nothing"));
        }

        let fragment = glob::translate(body, raw)?;
        let regex = if anchored {
            format!("^{fragment}$")
        } else {
            format!("^(?:.*/)?{fragment}$")
        };

        Ok(Self {
            raw: raw.to_string(),
            negated,
            dir_only,
            anchored,
            regex,
        })
    }

    /// The pattern exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_negation(&self) -> bool {
        self.negated
    }

    pub fn is_directory_only(&self) -> bool {
        self.dir_only
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Whether this rule may apply to an entry of the given directory-ness.
    /// Unknown directory-ness is treated as a possible directory.
    fn applies_to(&self, is_dir: Option<bool>) -> bool {
        !self.dir_only || is_dir != Some(false)
    }
}

impl FromStr for Pattern {
    type Err = DirviewError;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The rule that decided a path, with its position in the pattern list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedPattern<'a> {
    pub index: usize,
    pub pattern: &'a Pattern,
}

impl MatchedPattern<'_> {
    /// True unless the deciding rule is a negation.
    pub fn excludes(&self) -> bool {
        !self.pattern.is_negation()
    }
}

/// An ordered list of exclusion patterns compiled into a single `RegexSet`.
///
/// Decisions are last-match-wins: among all patterns whose predicate fires
/// for a path, the latest one in the list decides whether the path is
/// excluded (plain pattern) or included (negation). A path no pattern
/// matches is included.
#[derive(Clone)]
pub struct PatternMatcher {
    patterns: Vec<Pattern>,
    set: RegexSet,
}

impl fmt::Debug for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternMatcher")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl PatternMatcher {
    /// Compile `patterns` in order. Fails on the first malformed pattern.
    pub fn compile<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| Pattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let set = RegexSet::new(patterns.iter().map(|p| p.regex.as_str())).map_err(|e| {
            DirviewError::ConfigError(format!("compiling exclude patterns: {e}"))
        })?;

        Ok(Self { patterns, set })
    }

    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: RegexSet::empty(),
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Return the last pattern matching `rel_path`, if any.
    ///
    /// `rel_path` is the root-relative, `/`-separated path. `is_dir` tells
    /// whether the candidate is a directory; `None` means unknown, in which
    /// case directory-only patterns are allowed to match.
    pub fn matched(&self, rel_path: &str, is_dir: Option<bool>) -> Option<MatchedPattern<'_>> {
        self.set
            .matches(rel_path)
            .iter()
            .filter(|&index| self.patterns[index].applies_to(is_dir))
            .last()
            .map(|index| MatchedPattern {
                index,
                pattern: &self.patterns[index],
            })
    }

    pub fn is_excluded(&self, rel_path: &str, is_dir: Option<bool>) -> bool {
        self.matched(rel_path, is_dir)
            .is_some_and(|m| m.excludes())
    }
}
