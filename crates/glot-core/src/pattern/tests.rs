use super::*;

#[test]
fn legal_and_illegal_patterns() {
    assert!(is_legal("a+b"));
    assert!(is_legal("(?<=x)y"));
    assert!(is_legal(""));
    assert!(!is_legal("("));
    assert!(!is_legal("a)(b"));
    assert!(!is_legal("[z-a]"));
}

#[test]
fn lookaround_detection() {
    assert!(is_regex_lookahead_behind("a(?=h)"));
    assert!(is_regex_lookahead_behind("a(?!h)"));
    assert!(is_regex_lookahead_behind("(?<=h)a"));
    assert!(is_regex_lookahead_behind("(?<!h)a"));
    assert!(!is_regex_lookahead_behind("abc"));
    assert!(!is_regex_lookahead_behind("(?:ab)c"));
}

#[test]
fn lookaround_detection_ignores_escaped_openers() {
    assert!(!is_regex_lookahead_behind(r"\(?=h)"));
    assert!(!is_regex_lookahead_behind(r"(\?=h)"));
    assert!(!is_regex_lookahead_behind(r"(?\=h)"));
    assert!(!is_regex_lookahead_behind(r"(\?!h)"));
    assert!(!is_regex_lookahead_behind(r"(?<\=h)"));
    assert!(!is_regex_lookahead_behind(r"(?\<=h)"));
    assert!(!is_regex_lookahead_behind(r"(\?<=h)"));
    // A double backslash escapes itself, so the group is live again.
    assert!(is_regex_lookahead_behind(r"\\(?=h)"));
}

#[test]
fn lookaround_detection_ignores_character_classes() {
    assert!(!is_regex_lookahead_behind("[(?=]x"));
    assert!(is_regex_lookahead_behind("[(]x(?=y)"));
}

#[test]
fn lookaround_detection_leading_bracket_is_a_class_member() {
    assert!(!is_regex_lookahead_behind("[](?=]"));
    assert!(!is_regex_lookahead_behind("[^](?!]x"));
    assert!(is_regex_lookahead_behind("[]a](?=x)"));
    assert!(is_regex_lookahead_behind("[^]](?<=x)"));
}

// ------------------------------------------------------------------
// CompiledPattern
// ------------------------------------------------------------------

#[test]
fn anchored_pattern_requires_full_match() {
    let p = CompiledPattern::anchored("a.*");
    assert!(p.is_match("abc").unwrap());
    assert!(!p.is_match("bac").unwrap());

    let alt = CompiledPattern::anchored("a|b");
    assert!(alt.is_match("b").unwrap());
    assert!(!alt.is_match("ab").unwrap());
}

#[test]
fn anchored_pattern_rejects_unbalanced_source() {
    let p = CompiledPattern::anchored("a)(b");
    assert!(!p.is_legal());
    assert!(matches!(p.is_match("ab"), Err(PatternError::Illegal { .. })));
}

#[test]
fn unanchored_replace_all_expands_groups() {
    let p = CompiledPattern::new("(a)(b)");
    assert_eq!(p.replace_all("abab", "$2$1").unwrap(), "baba");
}

#[test]
fn replacement_group_number_stops_before_trailing_text() {
    let p = CompiledPattern::new("^(.*)$");
    assert_eq!(p.replace_all("kat", "$1en").unwrap(), "katen");
    assert_eq!(p.replace_all("kat", "$10").unwrap(), "kat0");

    let many = CompiledPattern::new("(a)(b)(c)(d)(e)(f)(g)(h)(i)(j)");
    assert_eq!(many.replace_all("abcdefghij", "$10").unwrap(), "j");
    assert_eq!(many.replace_all("abcdefghij", "$11").unwrap(), "a1");
}

#[test]
fn replacement_escapes_and_named_groups() {
    let p = CompiledPattern::new("(?<stem>k)a");
    assert_eq!(p.replace_all("kat", r"\$${stem}").unwrap(), "$kt");
    assert_eq!(p.replace_all("kat", r"\\$0").unwrap(), r"\kat");
    assert_eq!(p.replace_all("kat", "$0$0").unwrap(), "kakat");
}

#[test]
fn replacement_with_unknown_group_is_an_error() {
    let p = CompiledPattern::new("(a)");
    for template in ["$2", "${missing}", "cost $", "x\\"] {
        assert!(
            matches!(p.replace_all("kat", template), Err(PatternError::Replacement { .. })),
            "{template}"
        );
    }
}

#[test]
fn set_invalidates_cached_compilation() {
    let mut p = CompiledPattern::new("(");
    assert!(!p.is_legal());
    p.set("a");
    assert!(p.is_legal());
    assert_eq!(p.replace_all("aa", "b").unwrap(), "bb");
    p.set("[");
    assert!(!p.is_legal());
}

#[test]
fn clone_and_equality_follow_source() {
    let p = CompiledPattern::new("x+");
    assert!(p.is_legal());
    let q = p.clone();
    assert_eq!(p, q);
    assert_ne!(p, CompiledPattern::new("x*"));
    assert_eq!(format!("{q}"), "x+");
}

#[test]
fn lookaround_patterns_compile_and_match() {
    let p = CompiledPattern::new("a(?=c)");
    assert!(p.has_lookaround());
    assert_eq!(p.replace_all("abacab", "X").unwrap(), "abXcab");
}

// ------------------------------------------------------------------
// advanced_replace
// ------------------------------------------------------------------

#[test]
fn advanced_replace_scopes() {
    let p = CompiledPattern::new("a");
    let cases = [
        (ReplaceScope::All, "XbXbX"),
        (ReplaceScope::FirstOnly, "Xbaba"),
        (ReplaceScope::FirstAndMiddle, "XbXba"),
        (ReplaceScope::MiddleOnly, "abXba"),
        (ReplaceScope::MiddleAndLast, "abXbX"),
        (ReplaceScope::LastOnly, "ababX"),
    ];
    for (scope, expected) in cases {
        let out = advanced_replace("ababa", &p, "X", scope).unwrap();
        assert_eq!(out, expected, "scope {scope:?}");
    }
}

#[test]
fn advanced_replace_single_match_is_first_and_last() {
    let p = CompiledPattern::new("a");
    assert_eq!(
        advanced_replace("bab", &p, "X", ReplaceScope::FirstOnly).unwrap(),
        "bXb"
    );
    assert_eq!(
        advanced_replace("bab", &p, "X", ReplaceScope::LastOnly).unwrap(),
        "bXb"
    );
    assert_eq!(
        advanced_replace("bab", &p, "X", ReplaceScope::MiddleOnly).unwrap(),
        "bab"
    );
}

#[test]
fn advanced_replace_expands_groups_in_selected_matches() {
    let p = CompiledPattern::new("(a)");
    assert_eq!(
        advanced_replace("ababa", &p, "$1s", ReplaceScope::LastOnly).unwrap(),
        "ababas"
    );
}

#[test]
fn advanced_replace_no_match_returns_input() {
    let p = CompiledPattern::new("z");
    assert_eq!(
        advanced_replace("abc", &p, "X", ReplaceScope::LastOnly).unwrap(),
        "abc"
    );
}

#[test]
fn advanced_replace_keeps_group_expansion() {
    let p = CompiledPattern::new("(a)(b)");
    assert_eq!(
        advanced_replace("ababab", &p, "$2$1", ReplaceScope::LastOnly).unwrap(),
        "ababba"
    );
}

#[test]
fn advanced_replace_rejects_lookaround_outside_all() {
    let p = CompiledPattern::new("a(?=b)");
    let err = advanced_replace("ab", &p, "X", ReplaceScope::FirstOnly).unwrap_err();
    assert!(matches!(err, PatternError::LookaroundScope(_)));
    assert_eq!(
        advanced_replace("ab", &p, "X", ReplaceScope::All).unwrap(),
        "Xb"
    );
}

#[test]
fn advanced_replace_illegal_pattern_errors() {
    let p = CompiledPattern::new("(");
    assert!(matches!(
        advanced_replace("x", &p, "y", ReplaceScope::FirstOnly),
        Err(PatternError::Illegal { .. })
    ));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    const OPENERS: [&str; 4] = ["?=", "?!", "?<=", "?<!"];

    proptest! {
        #[test]
        fn escaped_paren_never_reads_as_lookaround(
            prefix in "[a-z]{0,6}",
            suffix in "[a-z]{0,6}",
            opener in 0usize..4,
        ) {
            let pattern = format!("{prefix}\\({}{suffix})", OPENERS[opener]);
            prop_assert!(!is_regex_lookahead_behind(&pattern));
        }

        #[test]
        fn escaped_question_mark_never_reads_as_lookaround(
            prefix in "[a-z]{0,6}",
            suffix in "[a-z]{0,6}",
            opener in 0usize..4,
        ) {
            let pattern = format!("{prefix}(\\{}{suffix})", OPENERS[opener]);
            prop_assert!(!is_regex_lookahead_behind(&pattern));
        }

        #[test]
        fn unescaped_opener_is_detected(
            prefix in "[a-z]{0,6}",
            suffix in "[a-z]{1,6}",
            opener in 0usize..4,
        ) {
            let pattern = format!("{prefix}({}{suffix})", OPENERS[opener]);
            prop_assert!(is_regex_lookahead_behind(&pattern));
        }
    }
}
