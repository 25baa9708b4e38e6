use proptest::prelude::*;
use dirview::pattern::PatternMatcher;

const NAMES: &[&str] = &["a", "b", "c", "*"];
const PATHS: &[&str] = &["a", "b", "c", "x/a", "y/z/b"];

// A rule is (negated, index into NAMES). Unanchored names match the basename.
fn rules_strategy() -> impl Strategy<Value = Vec<(bool, usize)>> {
    proptest::collection::vec((any::<bool>(), 0..NAMES.len()), 0..8)
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Reference model: scan every rule, remember the last one that fires.
fn expected_excluded(rules: &[(bool, usize)], path: &str) -> bool {
    let mut decision = false;
    for &(negated, idx) in rules {
        let name = NAMES[idx];
        if name == "*" || name == basename(path) {
            decision = !negated;
        }
    }
    decision
}

fn render(rules: &[(bool, usize)]) -> Vec<String> {
    rules
        .iter()
        .map(|&(negated, idx)| {
            if negated {
                format!("!{}", NAMES[idx])
            } else {
                NAMES[idx].to_string()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn decision_follows_last_matching_rule(
        rules in rules_strategy(),
        path_idx in 0..PATHS.len(),
    ) {
        let path = PATHS[path_idx];
        let matcher = PatternMatcher::compile(render(&rules)).unwrap();

        prop_assert_eq!(
            matcher.is_excluded(path, Some(false)),
            expected_excluded(&rules, path)
        );
        // Deterministic across repeated calls.
        prop_assert_eq!(
            matcher.is_excluded(path, Some(false)),
            matcher.is_excluded(path, Some(false))
        );
    }

    #[test]
    fn appending_a_matching_rule_overrides_everything_before(
        rules in rules_strategy(),
        path_idx in 0..PATHS.len(),
        negated in any::<bool>(),
    ) {
        let path = PATHS[path_idx];
        let mut patterns = render(&rules);
        let name = basename(path);
        patterns.push(if negated { format!("!{name}") } else { name.to_string() });

        let matcher = PatternMatcher::compile(&patterns).unwrap();
        let decided = matcher.matched(path, Some(false)).unwrap();

        prop_assert_eq!(decided.index, patterns.len() - 1);
        prop_assert_eq!(matcher.is_excluded(path, Some(false)), !negated);
    }
}
