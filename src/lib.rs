//! # Synrex
//!
//! Synonym-aware regular expressions over annotated token sequences.
//!
//! ## Features
//!
//! - Patterns over tokens, not characters: literals, POS classes (`<NN*>`),
//!   synonym sets (`[good|RB*]`) and capture variables (`$name`)
//! - Optional (`?`) and repeatable (`*`) tokens
//! - Pluggable synonym dictionaries with caching
//! - Thread-safe pattern registry with best-match and full-text scan
//! - Style labels attached to patterns
//!
//! ## Example
//!
//! ```
//! use synrex::annotation::TextAnnotation;
//! use synrex::pattern::{MatcherRegistry, PatternMatcher};
//!
//! let registry = MatcherRegistry::new();
//! registry.register(PatternMatcher::new("greeting", "hello $who"));
//!
//! let text = TextAnnotation::from_words(["hello", "world"]);
//! let result = registry.scan(&text);
//! assert_eq!(result.template_ids, vec!["greeting"]);
//! assert_eq!(result.variables["who"], "world");
//! ```

pub mod annotation;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod pattern;

pub mod prelude {
    pub use crate::annotation::{AnnotationLevel, TextAnnotation};
    pub use crate::config::{MatcherConfig, PatternDefinition};
    pub use crate::dictionary::{Dictionary, SynonymResolver, SynsetDictionary};
    pub use crate::error::{Result, SynrexError};
    pub use crate::pattern::{MatchResult, MatcherRegistry, PatternCompiler, PatternMatcher};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
