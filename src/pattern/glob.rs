// src/pattern/glob.rs

//! Translation of the exclude-pattern glob dialect into regular expressions.
//!
//! Supported syntax:
//!
//! - `*` matches any run of characters except `/`.
//! - `?` matches exactly one character except `/`.
//! - `[abc]`, `[a-z]`, `[!a-z]` / `[^a-z]` character classes. No class
//!   matches `/`, and a literal `/` inside brackets is rejected.
//! - `\x` matches `x` literally.
//! - `**` as a whole path segment spans directories: `**/name` matches
//!   `name` at any depth, `dir/**` matches everything below `dir`, and
//!   `a/**/b` matches `a/b`, `a/x/b`, `a/x/y/b`. Anywhere else `**` behaves
//!   like `*`.
//!
//! Brace expansion and POSIX named classes are not supported.

use crate::errors::{DirviewError, Result};

/// Translate a glob body (flags already stripped) into an unanchored regex
/// fragment. `raw` is the full original pattern, used in error messages.
pub fn translate(body: &str, raw: &str) -> Result<String> {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' => {
                let mut run = 1;
                while i + run < chars.len() && chars[i + run] == '*' {
                    run += 1;
                }
                let at_segment_start = i == 0 || chars[i - 1] == '/';
                let next = chars.get(i + run).copied();
                i += run;

                if run >= 2 && at_segment_start {
                    match next {
                        // `**/`: zero or more leading directories.
                        Some('/') => {
                            out.push_str("(?:[^/]*/)*");
                            i += 1;
                            continue;
                        }
                        // trailing `**`: everything below.
                        None => {
                            out.push_str(".*");
                            continue;
                        }
                        _ => {}
                    }
                }
                out.push_str("[^/]*");
            }
            '?' => {
                out.push_str("[^/]");
                i += 1;
            }
            '[' => {
                let (class, consumed) = translate_class(&chars[i..], raw)?;
                out.push_str(&class);
                i += consumed;
            }
            '\\' => {
                let Some(&escaped) = chars.get(i + 1) else {
                    return Err(DirviewError::invalid_pattern(raw, "dangling escape at end"));
                };
                push_literal(&mut out, escaped);
                i += 2;
            }
            other => {
                push_literal(&mut out, other);
                i += 1;
            }
        }
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

/// Translate a character class starting at `chars[0] == '['`.
///
/// Returns the regex class and the number of glob characters consumed.
fn translate_class(chars: &[char], raw: &str) -> Result<(String, usize)> {
    let mut i = 1;
    let mut negated = false;
    if matches!(chars.get(i), Some('!') | Some('^')) {
        negated = true;
        i += 1;
    }

    let mut items = String::new();
    let mut first = true;
    loop {
        let Some(&c) = chars.get(i) else {
            return Err(DirviewError::invalid_pattern(
                raw,
                "unclosed character class '['",
            ));
        };
        // A `]` right after the opening bracket is a literal member.
        if c == ']' && !first {
            i += 1;
            break;
        }
        first = false;

        let start = if c == '\\' {
            i += 1;
            *chars.get(i).ok_or_else(|| {
                DirviewError::invalid_pattern(raw, "dangling escape in character class")
            })?
        } else {
            c
        };
        i += 1;

        // Range `a-z`, unless the `-` is the last member before `]`.
        if chars.get(i) == Some(&'-') && chars.get(i + 1).is_some_and(|&n| n != ']') {
            let mut end = chars[i + 1];
            i += 2;
            if end == '\\' {
                end = *chars.get(i).ok_or_else(|| {
                    DirviewError::invalid_pattern(raw, "dangling escape in character class")
                })?;
                i += 1;
            }
            if start == '/' || end == '/' {
                return Err(slash_in_class(raw));
            }
            if start > end {
                return Err(DirviewError::invalid_pattern(
                    raw,
                    format!("invalid range '{start}-{end}' in character class"),
                ));
            }
            push_literal(&mut items, start);
            items.push('-');
            push_literal(&mut items, end);
        } else {
            if start == '/' {
                return Err(slash_in_class(raw));
            }
            push_literal(&mut items, start);
        }
    }

    // Ranges such as `.-0` span `/`; intersect it away.
    let class = if negated {
        format!("[^/{items}]")
    } else {
        format!("[{items}&&[^/]]")
    };
    Ok((class, i))
}

fn slash_in_class(raw: &str) -> DirviewError {
    DirviewError::invalid_pattern(raw, "'/' cannot appear in a character class")
}

/// Escape `literal` so that it matches itself and nothing else.
pub fn escape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\' | '!') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
