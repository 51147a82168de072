//! Text tokens.
//!
//! A [`TextToken`] is one unit of input text. Its index is assigned when the
//! token is appended to a [`TextAnnotation`](super::TextAnnotation) and is
//! never reassigned afterwards.
//!
//! # Examples
//!
//! ```
//! use synrex::annotation::{TextAnnotation, TextToken};
//!
//! let mut text = TextAnnotation::new();
//! let index = text.add_token(TextToken::new("hello"));
//! assert_eq!(index, 0);
//! assert_eq!(text.token(0).unwrap().text, "hello");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single token of the text being matched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextToken {
    /// The text content of the token
    pub text: String,

    /// The position of the token in its container (0-based)
    pub(crate) index: usize,
}

impl TextToken {
    /// Create a new, not yet inserted, token.
    pub fn new<S: Into<String>>(text: S) -> Self {
        TextToken {
            text: text.into(),
            index: 0,
        }
    }

    /// Position of this token in the container it was added to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for TextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for TextToken {
    fn from(text: &str) -> Self {
        TextToken::new(text)
    }
}

impl From<String> for TextToken {
    fn from(text: String) -> Self {
        TextToken::new(text)
    }
}
