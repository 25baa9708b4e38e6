mod common;
use crate::common::{init_tracing, TestResult};

use dirview::errors::DirviewError;
use dirview::pattern::{parse_patterns, Pattern, PatternMatcher};

fn matcher(patterns: &[&str]) -> PatternMatcher {
    PatternMatcher::compile(patterns).expect("patterns should compile")
}

#[test]
fn parse_derives_flags_from_syntax() -> TestResult {
    init_tracing();

    let p = Pattern::parse("!build/")?;
    assert!(p.is_negation());
    assert!(p.is_directory_only());
    assert!(!p.is_anchored());
    assert_eq!(p.as_str(), "!build/");

    let p: Pattern = "src/*.rs".parse()?;
    assert!(!p.is_negation());
    assert!(!p.is_directory_only());
    assert!(p.is_anchored());

    let p = Pattern::parse("/top")?;
    assert!(p.is_anchored());
    assert_eq!(p.to_string(), "/top");

    Ok(())
}

#[test]
fn unanchored_pattern_matches_basename_at_any_depth() {
    let m = matcher(&["*.log"]);
    assert!(m.is_excluded("a.log", Some(false)));
    assert!(m.is_excluded("x/y/a.log", Some(false)));
    assert!(!m.is_excluded("a.log.txt", Some(false)));
    assert!(!m.is_excluded("a.logx", Some(false)));
}

#[test]
fn anchored_pattern_matches_from_root_only() {
    let m = matcher(&["docs/readme.md"]);
    assert!(m.is_excluded("docs/readme.md", Some(false)));
    assert!(!m.is_excluded("x/docs/readme.md", Some(false)));

    let m = matcher(&["/readme.md"]);
    assert!(m.is_excluded("readme.md", Some(false)));
    assert!(!m.is_excluded("docs/readme.md", Some(false)));

    let m = matcher(&["readme.md"]);
    assert!(m.is_excluded("readme.md", Some(false)));
    assert!(m.is_excluded("docs/readme.md", Some(false)));
}

#[test]
fn star_and_question_mark_stay_within_one_segment() {
    let m = matcher(&["src/*.rs"]);
    assert!(m.is_excluded("src/main.rs", Some(false)));
    assert!(!m.is_excluded("src/bin/main.rs", Some(false)));

    let m = matcher(&["file?.txt"]);
    assert!(m.is_excluded("file1.txt", Some(false)));
    assert!(!m.is_excluded("file10.txt", Some(false)));
    assert!(!m.is_excluded("file/.txt", Some(false)));
}

#[test]
fn character_classes_and_ranges() {
    let m = matcher(&["[ab].txt"]);
    assert!(m.is_excluded("a.txt", Some(false)));
    assert!(m.is_excluded("b.txt", Some(false)));
    assert!(!m.is_excluded("c.txt", Some(false)));

    let m = matcher(&["[!ab].txt"]);
    assert!(m.is_excluded("c.txt", Some(false)));
    assert!(!m.is_excluded("a.txt", Some(false)));

    let m = matcher(&["log[0-9]"]);
    assert!(m.is_excluded("log5", Some(false)));
    assert!(!m.is_excluded("logx", Some(false)));

    let m = matcher(&["[]]x", "[a-]y"]);
    assert!(m.is_excluded("]x", Some(false)));
    assert!(m.is_excluded("-y", Some(false)));
    assert!(m.is_excluded("ay", Some(false)));

    // `.` to `0` spans `/`, which classes never match.
    let m = matcher(&["a[.-0]b"]);
    assert!(m.is_excluded("a.b", Some(false)));
    assert!(m.is_excluded("a0b", Some(false)));
    assert!(!m.is_excluded("a/b", Some(false)));
}

#[test]
fn slash_inside_character_class_is_rejected() {
    for raw in ["a[/]b", "[!/]x", "a[/-9]b"] {
        match Pattern::parse(raw) {
            Err(DirviewError::InvalidPattern { pattern, reason }) => {
                assert_eq!(pattern, raw);
                assert!(reason.contains("character class"), "{reason}");
            }
            other => panic!("expected InvalidPattern for {raw}, got {other:?}"),
        }
    }
}

#[test]
fn double_star_spans_directories_as_a_whole_segment() {
    let m = matcher(&["**/cache"]);
    assert!(m.is_excluded("cache", Some(true)));
    assert!(m.is_excluded("a/b/cache", Some(true)));

    let m = matcher(&["docs/**"]);
    assert!(m.is_excluded("docs/a", Some(false)));
    assert!(m.is_excluded("docs/a/b", Some(false)));
    assert!(!m.is_excluded("docs", Some(true)));

    let m = matcher(&["a/**/b"]);
    assert!(m.is_excluded("a/b", Some(false)));
    assert!(m.is_excluded("a/x/y/b", Some(false)));
    assert!(!m.is_excluded("a/x/c", Some(false)));

    // Not a whole segment: behaves like `*`.
    let m = matcher(&["src/x**.rs"]);
    assert!(m.is_excluded("src/xy.rs", Some(false)));
    assert!(!m.is_excluded("src/x/y.rs", Some(false)));
}

#[test]
fn escapes_and_regex_metacharacters_are_literal() {
    let m = matcher(&["\\*.txt"]);
    assert!(m.is_excluded("*.txt", Some(false)));
    assert!(!m.is_excluded("a.txt", Some(false)));

    let m = matcher(&["\\!important"]);
    assert!(!m.patterns()[0].is_negation());
    assert!(m.is_excluded("!important", Some(false)));

    let m = matcher(&["a+b(1).txt"]);
    assert!(m.is_excluded("a+b(1).txt", Some(false)));
    assert!(!m.is_excluded("aab1.txt", Some(false)));
}

#[test]
fn negation_reinstates_a_path_excluded_earlier() {
    let m = matcher(&["*.log", "!keep.log"]);
    assert!(!m.is_excluded("keep.log", Some(false)));
    assert!(m.is_excluded("other.log", Some(false)));

    let decided = m.matched("keep.log", Some(false)).expect("negation should match");
    assert_eq!(decided.index, 1);
    assert!(!decided.excludes());
}

#[test]
fn last_matching_pattern_wins() {
    let m = matcher(&["!keep.log", "*.log"]);
    assert!(m.is_excluded("keep.log", Some(false)));

    let m = matcher(&["*.txt", "a.*"]);
    let decided = m.matched("a.txt", Some(false)).expect("should match");
    assert_eq!(decided.index, 1);
    assert_eq!(decided.pattern.as_str(), "a.*");
}

#[test]
fn unmatched_path_is_included() {
    let m = matcher(&["*.log"]);
    assert!(m.matched("main.rs", Some(false)).is_none());
    assert!(!m.is_excluded("main.rs", Some(false)));

    let empty = PatternMatcher::empty();
    assert!(empty.is_empty());
    assert!(!empty.is_excluded("anything", None));
}

#[test]
fn directory_only_pattern_ignores_files() {
    let m = matcher(&["build/"]);
    assert!(m.is_excluded("build", Some(true)));
    assert!(m.is_excluded("sub/build", Some(true)));
    assert!(!m.is_excluded("build", Some(false)));
    // Unknown directory-ness matches conservatively.
    assert!(m.is_excluded("build", None));
}

#[test]
fn directory_only_negation_is_skipped_for_files() {
    let m = matcher(&["build*", "!build/"]);
    assert!(!m.is_excluded("build", Some(true)));
    assert!(m.is_excluded("build", Some(false)));
}

#[test]
fn malformed_patterns_fail_at_compile_time() {
    let cases = [
        ("[abc", "unclosed"),
        ("foo\\", "dangling escape"),
        ("[z-a]", "invalid range"),
        ("!", "matches nothing"),
        ("/", "matches nothing"),
    ];

    for (pattern, needle) in cases {
        match Pattern::parse(pattern) {
            Err(DirviewError::InvalidPattern { pattern: p, reason }) => {
                assert_eq!(p, pattern);
                assert!(reason.contains(needle), "{pattern}: {reason}");
            }
            other => panic!("expected InvalidPattern for {pattern:?}, got {other:?}"),
        }
    }
}

#[test]
fn compile_reports_the_offending_pattern() {
    let err = PatternMatcher::compile(["*.log", "[bad"]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("[bad"), "{msg}");
}

#[test]
fn parse_patterns_drops_blank_lines_only() {
    let patterns = parse_patterns("a\n\nb\r\n  c\n\n");
    assert_eq!(patterns, vec!["a", "b", "  c"]);
}
