//! Integration tests for variable capture (`$name`, `$name?`, `$name*`)

use synrex::annotation::TextAnnotation;
use synrex::pattern::{MatcherRegistry, PatternMatcher};

fn registry() -> MatcherRegistry {
    let registry = MatcherRegistry::new();
    registry.register(PatternMatcher::new("1", "xxx $name1? zzz"));
    registry.register(PatternMatcher::new("2", "xxx yyy"));
    registry.register(PatternMatcher::new("3", "xxx $name2* zzz"));
    registry
}

fn text(words: &str) -> TextAnnotation {
    TextAnnotation::from_words(words.split_whitespace())
}

#[test]
fn test_optional_consumer() {
    let registry = registry();
    let tokens = text("aaa xxx yyy zzz");

    assert!(registry.best_match(&tokens, 0, tokens.len()).is_none());

    let result = registry.best_match(&tokens, 1, tokens.len()).unwrap();
    assert_eq!(result.template_id, "1");
    assert_eq!(result.matched_tokens, 3);
    assert_eq!(result.variables["name1"], "yyy");
}

#[test]
fn test_repeated_consumer_beats_skips() {
    let registry = registry();
    let tokens = text("xxx aaa yyy zzz");

    let result = registry.best_match(&tokens, 0, tokens.len()).unwrap();
    assert_eq!(result.template_id, "3");
    assert_eq!(result.matched_tokens, 4);
    assert_eq!(result.variables["name2"], "aaa yyy");
}

#[test]
fn test_repeated_consumer_captures_run() {
    let registry = registry();

    let cases = [
        ("xxx aaa aaa yyy zzz", "aaa aaa yyy"),
        ("xxx aaa aaa aaa yyy zzz", "aaa aaa aaa yyy"),
        ("xxx aaa aaa aaa bbb yyy zzz", "aaa aaa aaa bbb yyy"),
    ];
    for (words, captured) in cases {
        let tokens = text(words);
        let result = registry.best_match(&tokens, 0, tokens.len()).unwrap();
        assert_eq!(result.template_id, "3");
        assert_eq!(result.matched_tokens, tokens.len());
        assert_eq!(result.variables["name2"], captured);
    }
}

#[test]
fn test_consecutive_matches() {
    let registry = registry();
    let tokens = text("xxx aaa zzz xxx yyy");

    let result = registry.best_match(&tokens, 0, tokens.len()).unwrap();
    assert_eq!(result.template_id, "1");
    assert_eq!(result.matched_tokens, 3);

    let result = registry.best_match(&tokens, 3, tokens.len()).unwrap();
    assert_eq!(result.template_id, "2");
    assert_eq!(result.matched_tokens, 2);
    assert!(result.variables.is_empty());
}

#[test]
fn test_distinct_labels_are_captured_separately() {
    let matcher = PatternMatcher::new("order", "i want $count $item* please");
    let tokens = text("i want two green apples please");

    let result = matcher.match_at(&tokens, 0, tokens.len());
    assert_eq!(result.window, 6);
    assert_eq!(result.variables["count"], "two");
    assert_eq!(result.variables["item"], "green apples");
}
