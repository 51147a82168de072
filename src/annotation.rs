//! Annotated text model.
//!
//! This module holds the text being matched (an ordered sequence of
//! [`TextToken`]s) together with the annotation layers attached to it by an
//! external annotator (POS tags, chunks, named entities, ...). The matching
//! engine only reads these layers.

pub mod constants;
pub mod layer;
pub mod text;
pub mod token;

pub use constants::AnnotationLevel;
pub use layer::{Annotation, AnnotationToken};
pub use text::TextAnnotation;
pub use token::TextToken;
