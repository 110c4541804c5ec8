/// Match `candidate` against a wildcard `pattern`.
///
/// `*` matches any run of characters (including none), `?` matches exactly
/// one character and everything else matches itself. The match is anchored
/// at both ends.
///
/// Each `*` greedily skips ahead to the next occurrence of the pattern
/// character that follows it and records a backtrack point. When a later
/// literal fails, the most recent point is resumed one character further
/// along the candidate.
pub fn matches(pattern: &str, candidate: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = candidate.chars().collect();
    let mut backtrack: Vec<(usize, usize)> = Vec::new();

    let mut p = 0;
    let mut n = 0;

    loop {
        let mut matching = true;
        while p < pattern.len() && matching {
            match pattern[p] {
                '*' => {
                    // A run of stars behaves like the last one.
                    while pattern.get(p + 1) == Some(&'*') {
                        p += 1;
                    }
                    match pattern.get(p + 1) {
                        None => n = name.len(),
                        Some('?') => {}
                        Some(&next) => {
                            while n < name.len() && name[n] != next {
                                n += 1;
                            }
                        }
                    }
                    if n < name.len() {
                        backtrack.push((p, n));
                    }
                }
                '?' => {
                    if n < name.len() {
                        n += 1;
                    } else {
                        matching = false;
                    }
                }
                literal => {
                    if name.get(n) == Some(&literal) {
                        n += 1;
                    } else {
                        matching = false;
                    }
                }
            }
            p += 1;
        }

        if matching && n == name.len() {
            return true;
        }

        let Some((saved_p, saved_n)) = backtrack.pop() else {
            return false;
        };
        p = saved_p;
        n = saved_n + 1;
    }
}

/// Whether `pattern` contains a wildcard character.
pub fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_matches_everything() {
        for candidate in ["", "a", "abc", "src/dir/file.cpp", "::"] {
            assert!(matches("*", candidate), "'*' should match {candidate:?}");
        }
    }

    #[test]
    fn test_question_mark_needs_a_character() {
        assert!(matches("a?c", "abc"));
        assert!(!matches("a?c", "ac"));
        assert!(!matches("a?c", "abbc"));
        assert!(!matches("?", ""));
    }

    #[test]
    fn test_star_spans_run() {
        assert!(matches("a*c", "axxxc"));
        assert!(matches("a*c", "ac"));
        assert!(!matches("a*c", "axxxd"));
    }

    #[test]
    fn test_backtracks_to_later_occurrence() {
        assert!(matches("a*b*c", "aXbXXc"));
        assert!(matches("a*c", "acbc"));
        assert!(matches("*.cpp", "a.b.cpp"));
        assert!(!matches("a*b*c", "aXbXXd"));
    }

    #[test]
    fn test_empty_pattern() {
        assert!(matches("", ""));
        assert!(!matches("", "a"));
    }

    #[test]
    fn test_literal_is_anchored() {
        assert!(matches("file.cpp", "file.cpp"));
        assert!(!matches("file.cpp", "file.cppx"));
        assert!(!matches("file.cpp", "xfile.cpp"));
    }

    #[test]
    fn test_consecutive_stars_collapse() {
        assert!(matches("a**b", "axb"));
        assert!(matches("a**b", "ab"));
        assert!(matches("**", "anything"));
        assert!(!matches("a**b", "axc"));
    }

    #[test]
    fn test_star_followed_by_question_mark() {
        assert!(matches("*?", "ab"));
        assert!(matches("*?", "a"));
        assert!(!matches("*?", ""));
        assert!(matches("a*?c", "axyc"));
        assert!(!matches("a*?c", "ac"));
    }

    #[test]
    fn test_paths_with_extension_globs() {
        assert!(matches("*.cpp", "x/y.cpp"));
        assert!(!matches("*.cpp", "x/y.h"));
        assert!(matches("src/*/main.c", "src/app/main.c"));
        assert!(matches("lib/??.c", "lib/ab.c"));
        assert!(!matches("lib/??.c", "lib/abc.c"));
    }

    #[test]
    fn test_question_mark_consumes_one_char_not_byte() {
        assert!(matches("caf?", "café"));
        assert!(matches("?", "é"));
    }

    #[test]
    fn test_pathological_pattern_terminates() {
        let candidate = "a".repeat(32);
        assert!(!matches("*a*a*a*b", &candidate));
        assert!(matches("*a*a*a", &candidate));
    }

    #[test]
    fn test_has_wildcard() {
        assert!(has_wildcard("*.c"));
        assert!(has_wildcard("a?.c"));
        assert!(!has_wildcard("src/a.c"));
        assert!(!has_wildcard(""));
    }
}
