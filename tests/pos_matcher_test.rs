//! Integration tests for POS-class tokens (`<TAG>`, `<CLASS*>`, `<CLASS*#label>`)

use synrex::annotation::{Annotation, AnnotationLevel, AnnotationToken, TextAnnotation};
use synrex::pattern::{MatcherRegistry, PatternMatcher};

fn tagged(words: &[&str], tags: &[&str]) -> TextAnnotation {
    let mut text = TextAnnotation::from_words(words.iter().copied());
    let mut layer = Annotation::new();
    for (index, tag) in tags.iter().enumerate() {
        layer.add_token(AnnotationToken::from_tag(AnnotationLevel::Pos, index, tag).unwrap());
    }
    text.add_annotation(AnnotationLevel::Pos, layer);
    text
}

#[test]
fn test_generic_class_with_capture() {
    let matcher = PatternMatcher::new("likes", "<PRP> like <NN*#what>");
    let tokens = tagged(&["i", "like", "dogs"], &["PRP", "VBP", "NNS"]);

    let result = matcher.match_at(&tokens, 0, tokens.len());
    assert_eq!(result.match_count, 3);
    assert_eq!(result.window, 3);
    assert_eq!(result.variables["#what"], "dogs");
}

#[test]
fn test_repeated_class() {
    let matcher = PatternMatcher::new("np", "a <JJ*>* <NN*>");

    let tokens = tagged(&["a", "big", "red", "dog"], &["DT", "JJ", "JJ", "NN"]);
    let result = matcher.match_at(&tokens, 0, tokens.len());
    assert_eq!(result.match_count, 4);
    assert_eq!(result.window, 4);

    let tokens = tagged(&["a", "dog"], &["DT", "NN"]);
    let result = matcher.match_at(&tokens, 0, tokens.len());
    assert_eq!(result.window, 2);
}

#[test]
fn test_unknown_class_never_matches() {
    let matcher = PatternMatcher::new("bad", "<XYZ>");
    assert!(matcher.is_valid());

    let tokens = tagged(&["dog"], &["NN"]);
    assert!(!matcher.match_at(&tokens, 0, tokens.len()).is_match());
}

#[test]
fn test_untagged_text_never_matches_classes() {
    let matcher = PatternMatcher::new("noun", "<NN*>");
    let tokens = TextAnnotation::from_words(["dog"]);
    assert!(!matcher.match_at(&tokens, 0, tokens.len()).is_match());
}

#[test]
fn test_ambiguous_tags() {
    let mut tokens = TextAnnotation::from_words(["run", "fast"]);
    let mut layer = Annotation::new();
    layer.add_token(AnnotationToken::from_tag(AnnotationLevel::Pos, 0, "NN").unwrap());
    layer.add_token(AnnotationToken::from_tag(AnnotationLevel::Pos, 0, "VB").unwrap());
    layer.add_token(AnnotationToken::from_tag(AnnotationLevel::Pos, 1, "RB").unwrap());
    tokens.add_annotation(AnnotationLevel::Pos, layer);

    let registry = MatcherRegistry::new();
    registry.register(PatternMatcher::new("action", "<VB*#verb> <RB*#how>"));
    let result = registry.best_match(&tokens, 0, tokens.len()).unwrap();
    assert_eq!(result.template_id, "action");
    assert_eq!(result.variables["#verb"], "run");
    assert_eq!(result.variables["#how"], "fast");
}

#[test]
fn test_punctuation_class() {
    let tokens = tagged(&["#", "tag"], &["#", "NN"]);

    let matcher = PatternMatcher::new("punct", "<#*>");
    let result = matcher.match_at(&tokens, 0, tokens.len());
    assert_eq!(result.window, 1);
    assert!(result.variables.is_empty());

    let matcher = PatternMatcher::new("punct", "<#*#mark> <NN*>");
    let result = matcher.match_at(&tokens, 0, tokens.len());
    assert_eq!(result.window, 2);
    assert_eq!(result.variables["#mark"], "#");

    let matcher = PatternMatcher::new("hash", "<##tag>");
    let result = matcher.match_at(&tokens, 0, tokens.len());
    assert_eq!(result.window, 1);
    assert_eq!(result.variables["#tag"], "#");
}
