//! The text-sequence container.
//!
//! [`TextAnnotation`] owns the ordered text tokens of one parse session, the
//! annotation layers keyed by level, and optional per-position lemma and
//! encoding overrides. It is append/overlay-only: nothing is ever removed.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::AnnotationLevel;
use super::layer::{Annotation, AnnotationToken};
use super::token::TextToken;

/// Raw lemma reported when no override exists for a position.
pub const UNKNOWN_LEMMA: &str = "?";

/// Annotated text: tokens, annotation layers, lemmas and encodings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TextAnnotation {
    tokens: Vec<TextToken>,
    annotations: BTreeMap<AnnotationLevel, Annotation>,
    lemmas: Vec<Option<TextToken>>,
    encodings: Vec<Option<TextToken>>,
}

impl TextAnnotation {
    /// Create an empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty text with room for `capacity` tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        TextAnnotation {
            tokens: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Build a text from a sequence of words, one token per word.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut text = Self::new();
        for word in words {
            text.add_token(TextToken::new(word));
        }
        text
    }

    /// Append a token, assigning it the next index. Returns that index.
    pub fn add_token(&mut self, mut token: TextToken) -> usize {
        token.index = self.tokens.len();
        self.tokens.push(token);
        self.tokens.len() - 1
    }

    /// Token at `index`, or `None` outside `[0, len)`.
    pub fn token(&self, index: usize) -> Option<&TextToken> {
        self.tokens.get(index)
    }

    /// All tokens, in order.
    pub fn tokens(&self) -> &[TextToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Annotation layer for a level.
    pub fn annotation(&self, level: AnnotationLevel) -> Option<&Annotation> {
        self.annotations.get(&level)
    }

    /// Install a layer for a level, replacing any previous one.
    ///
    /// Every token of the layer is stamped with `level`.
    pub fn add_annotation(&mut self, level: AnnotationLevel, mut annotation: Annotation) {
        for token in annotation.tokens_mut() {
            token.level = level;
        }
        self.annotations.insert(level, annotation);
    }

    /// Attach a token to the layer for `level`, if that layer exists.
    ///
    /// This never creates a layer: when none is installed for `level` the
    /// token is dropped.
    pub fn add_annotation_token(&mut self, level: AnnotationLevel, mut token: AnnotationToken) {
        if let Some(annotation) = self.annotations.get_mut(&level) {
            token.level = level;
            annotation.add_token(token);
        }
    }

    /// All installed layers, ordered by level.
    pub fn annotations(&self) -> impl Iterator<Item = (AnnotationLevel, &Annotation)> + '_ {
        self.annotations.iter().map(|(level, layer)| (*level, layer))
    }

    /// Override the lemma of a position, padding the lemma list as needed.
    pub fn set_lemma(&mut self, index: usize, lemma: TextToken) {
        if self.lemmas.len() <= index {
            self.lemmas.resize(index + 1, None);
        }
        self.lemmas[index] = Some(lemma);
    }

    /// Lemma of a position, falling back to the raw token.
    pub fn lemma(&self, index: usize) -> Option<&TextToken> {
        match self.lemmas.get(index) {
            Some(Some(lemma)) => Some(lemma),
            _ => self.token(index),
        }
    }

    /// Lemma text of a position, or [`UNKNOWN_LEMMA`] when none was set.
    pub fn raw_lemma(&self, index: usize) -> &str {
        match self.lemmas.get(index) {
            Some(Some(lemma)) => &lemma.text,
            _ => UNKNOWN_LEMMA,
        }
    }

    /// All lemma overrides; positions without one are `None`.
    pub fn lemmas(&self) -> &[Option<TextToken>] {
        &self.lemmas
    }

    /// Set the alternate encoding token of a position.
    pub fn set_encoding(&mut self, index: usize, encoding: TextToken) {
        if self.encodings.len() <= index {
            self.encodings.resize(index.max(self.tokens.len().saturating_sub(1)) + 1, None);
        }
        self.encodings[index] = Some(encoding);
    }

    /// Alternate encoding of a position.
    pub fn encoding(&self, index: usize) -> Option<&TextToken> {
        self.encodings.get(index).and_then(Option::as_ref)
    }

    /// All encodings; positions without one are `None`.
    pub fn encodings(&self) -> &[Option<TextToken>] {
        &self.encodings
    }

    /// Token texts, in order.
    pub fn plain_transcription(&self) -> Vec<&str> {
        self.tokens.iter().map(|token| token.text.as_str()).collect()
    }

    /// Token texts joined by single spaces.
    pub fn transcription(&self) -> String {
        self.plain_transcription().join(" ")
    }
}

impl fmt::Display for TextAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            let labels: Vec<String> = self
                .annotations
                .values()
                .flat_map(|layer| layer.tokens_at(token.index))
                .map(|label| label.to_string())
                .collect();
            write!(
                f,
                "{}({}) {{{}}} ",
                token,
                self.raw_lemma(token.index),
                labels.join(",")
            )?;
        }

        if !self.encodings.is_empty() {
            f.write_str(" ->")?;
            for encoding in self.encodings.iter().flatten() {
                write!(f, " {}", encoding)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_token_assigns_indices() {
        let mut text = TextAnnotation::with_capacity(2);
        assert_eq!(text.add_token(TextToken::new("a")), 0);
        assert_eq!(text.add_token(TextToken::new("b")), 1);
        assert_eq!(text.token(1).unwrap().index(), 1);
        assert!(text.token(2).is_none());
        assert_eq!(text.len(), 2);
    }

    #[test]
    fn test_annotation_token_requires_layer() {
        let mut text = TextAnnotation::from_words(["the", "dog"]);
        text.add_annotation_token(AnnotationLevel::Pos, AnnotationToken::new(0, 3));
        assert!(text.annotation(AnnotationLevel::Pos).is_none());

        text.add_annotation(AnnotationLevel::Pos, Annotation::new());
        text.add_annotation_token(AnnotationLevel::Pos, AnnotationToken::new(1, 12));
        let layer = text.annotation(AnnotationLevel::Pos).unwrap();
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.tokens()[0].level, AnnotationLevel::Pos);
    }

    #[test]
    fn test_add_token_stamps_level() {
        let mut text = TextAnnotation::from_words(["Paris"]);
        text.add_annotation(AnnotationLevel::Ner, Annotation::new());
        text.add_annotation_token(AnnotationLevel::Ner, AnnotationToken::new(0, 9));
        let token = &text.annotation(AnnotationLevel::Ner).unwrap().tokens()[0];
        assert_eq!(token.level, AnnotationLevel::Ner);
        assert_eq!(token.tag(), Some("S-LOC"));
    }

    #[test]
    fn test_lemmas() {
        let mut text = TextAnnotation::from_words(["dogs", "ran", "fast"]);
        text.set_lemma(1, TextToken::new("run"));

        assert_eq!(text.lemma(0).unwrap().text, "dogs");
        assert_eq!(text.lemma(1).unwrap().text, "run");
        assert_eq!(text.raw_lemma(0), "?");
        assert_eq!(text.raw_lemma(1), "run");
        assert_eq!(text.raw_lemma(2), "?");
        assert_eq!(text.lemmas().len(), 2);
        assert!(text.lemma(7).is_none());
    }

    #[test]
    fn test_encodings() {
        let mut text = TextAnnotation::from_words(["hello", "world"]);
        text.set_encoding(0, TextToken::new("HH"));
        assert_eq!(text.encoding(0).unwrap().text, "HH");
        assert!(text.encoding(1).is_none());
        assert!(text.encoding(9).is_none());
        assert_eq!(text.encodings().len(), 2);
    }

    #[test]
    fn test_transcription_and_display() {
        let mut text = TextAnnotation::from_words(["good", "dog"]);
        let mut layer = Annotation::new();
        layer.add_token(AnnotationToken::new(1, 12));
        text.add_annotation(AnnotationLevel::Pos, layer);

        assert_eq!(text.plain_transcription(), vec!["good", "dog"]);
        assert_eq!(text.transcription(), "good dog");
        assert_eq!(text.to_string(), "good(?) {} dog(?) {NN} ");
    }
}
