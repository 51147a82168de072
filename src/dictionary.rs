//! Synonym resolution.
//!
//! Synonym-set pattern tokens (`[word]`) only need one capability: resolve
//! the synset identifiers of a word in a language, optionally restricted to
//! some word classes. [`SynonymResolver`] is that capability. [`Dictionary`]
//! implements it by composing [`DictionaryExtension`] backends.

pub mod cache;
pub mod pos;
pub mod resolver;
pub mod synset;

pub use cache::{CachedResolver, IdentityDictionary};
pub use pos::WordClass;
pub use resolver::{Dictionary, DictionaryExtension, SynonymResolver, synset_id};
pub use synset::SynsetDictionary;
