//! Integration tests for full-text scanning

use std::sync::Arc;
use std::thread;

use synrex::annotation::TextAnnotation;
use synrex::pattern::{MatcherRegistry, PatternMatcher};

fn text(words: &str) -> TextAnnotation {
    TextAnnotation::from_words(words.split_whitespace())
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_scan_collects_matches_in_order() {
    init_logger();
    let registry = MatcherRegistry::new();
    registry.register(PatternMatcher::with_styles("greet", "hello $who", "mood=happy"));
    registry.register(PatternMatcher::new("ask", "how are you"));
    registry.register(PatternMatcher::with_styles("bye", "see you $when", "mood=sad"));

    let result = registry.scan(&text("oh hello bob how are you see you tomorrow"));
    assert_eq!(result.template_ids, vec!["greet", "ask", "bye"]);
    assert_eq!(result.variables["who"], "bob");
    assert_eq!(result.variables["when"], "tomorrow");
    // later matches overwrite earlier styles
    assert_eq!(result.styles["mood"], "sad");
}

#[test]
fn test_scan_skips_matched_window() {
    let registry = MatcherRegistry::new();
    registry.register(PatternMatcher::new("pair", "xxx xxx"));

    let result = registry.scan(&text("xxx xxx xxx xxx xxx"));
    assert_eq!(result.template_ids, vec!["pair", "pair"]);
}

#[test]
fn test_scan_empty_inputs() {
    let registry = MatcherRegistry::new();
    assert!(registry.scan(&text("xxx yyy")).is_empty());

    registry.register(PatternMatcher::new("x", "xxx"));
    assert!(registry.scan(&TextAnnotation::new()).is_empty());
    assert!(registry.scan(&text("yyy zzz")).is_empty());
}

#[test]
fn test_scan_bounded_by_length() {
    let registry = MatcherRegistry::new();
    registry.register(PatternMatcher::new("single", "$word"));

    let result = registry.scan(&text("a b c d e f"));
    assert_eq!(result.template_ids.len(), 6);
    assert_eq!(result.variables["word"], "f");

    let registry = MatcherRegistry::new();
    registry.register(PatternMatcher::new("all", "$first $rest*"));

    let result = registry.scan(&text("a b c d e f"));
    assert_eq!(result.template_ids, vec!["all"]);
    assert_eq!(result.variables["first"], "a");
    assert_eq!(result.variables["rest"], "b c d e f");
}

#[test]
fn test_concurrent_scan_and_registration() {
    init_logger();
    let registry = Arc::new(MatcherRegistry::new());
    registry.register(PatternMatcher::new("base", "xxx $rest*"));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let tokens = text("xxx aaa bbb");
                for _ in 0..100 {
                    let result = registry.scan(&tokens);
                    assert_eq!(result.template_ids.first().map(String::as_str), Some("base"));
                    assert_eq!(result.variables["rest"], "aaa bbb");
                }
            })
        })
        .collect();

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for i in 0..50 {
                let id = format!("extra-{i}");
                registry.register(PatternMatcher::new(&id, "yyy"));
                registry.remove(&id);
            }
        })
    };

    for handle in readers {
        handle.join().unwrap();
    }
    writer.join().unwrap();
    assert_eq!(registry.len(), 1);
}
