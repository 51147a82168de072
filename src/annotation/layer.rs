//! Annotation layers.
//!
//! An [`Annotation`] is the ordered chain of [`AnnotationToken`]s for one
//! level (POS, chunk, NER, ...). Tokens reference text positions by index;
//! several tokens may share one position.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::{self, AnnotationLevel};

/// One label attached to one text position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationToken {
    /// Level this token belongs to; stamped when attached to a text.
    pub level: AnnotationLevel,

    /// Index of the annotated text token
    pub text_index: usize,

    /// Label code (see [`constants::label_code`])
    pub label: i8,

    /// Position of the previous token in the owning layer
    previous: Option<usize>,

    /// Position of the next token in the owning layer
    next: Option<usize>,
}

impl AnnotationToken {
    /// Create a token labelling `text_index` with a raw code.
    pub fn new(text_index: usize, label: i8) -> Self {
        AnnotationToken {
            level: AnnotationLevel::Pos,
            text_index,
            label,
            previous: None,
            next: None,
        }
    }

    /// Create a token from a tag name, resolved against the level's table.
    ///
    /// Returns `None` when the tag is unknown at that level.
    pub fn from_tag(level: AnnotationLevel, text_index: usize, tag: &str) -> Option<Self> {
        let label = constants::label_code(level, tag)?;
        Some(AnnotationToken {
            level,
            ..AnnotationToken::new(text_index, label)
        })
    }

    /// Tag name of this token's label, if the level has a table for it.
    pub fn tag(&self) -> Option<&'static str> {
        constants::label_name(self.level, self.label)
    }

    /// Position of the previous token in the owning layer.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Position of the next token in the owning layer.
    pub fn next(&self) -> Option<usize> {
        self.next
    }
}

impl fmt::Display for AnnotationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or(""))
    }
}

/// An ordered annotation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    tokens: Vec<AnnotationToken>,
}

impl Annotation {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token, linking it after the current last token.
    pub fn add_token(&mut self, mut token: AnnotationToken) {
        let position = self.tokens.len();
        token.next = None;
        token.previous = position.checked_sub(1);
        if let Some(last) = self.tokens.last_mut() {
            last.next = Some(position);
        }
        self.tokens.push(token);
    }

    /// First token of the chain.
    pub fn first_token(&self) -> Option<&AnnotationToken> {
        self.tokens.first()
    }

    /// Token at a chain position.
    pub fn get(&self, position: usize) -> Option<&AnnotationToken> {
        self.tokens.get(position)
    }

    /// Token following `token` in this layer.
    pub fn next_of(&self, token: &AnnotationToken) -> Option<&AnnotationToken> {
        token.next.and_then(|position| self.tokens.get(position))
    }

    /// Token preceding `token` in this layer.
    pub fn previous_of(&self, token: &AnnotationToken) -> Option<&AnnotationToken> {
        token.previous.and_then(|position| self.tokens.get(position))
    }

    /// All tokens annotating the given text position.
    pub fn tokens_at(&self, text_index: usize) -> impl Iterator<Item = &AnnotationToken> + '_ {
        self.tokens
            .iter()
            .filter(move |token| token.text_index == text_index)
    }

    /// All tokens carrying the given label code.
    pub fn tokens_with_label(&self, label: i8) -> impl Iterator<Item = &AnnotationToken> + '_ {
        self.tokens.iter().filter(move |token| token.label == label)
    }

    /// All tokens, in insertion order.
    pub fn tokens(&self) -> &[AnnotationToken] {
        &self.tokens
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut [AnnotationToken] {
        &mut self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
