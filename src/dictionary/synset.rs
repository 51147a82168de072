//! In-memory synset dictionary.
//!
//! A WordNet-style backend held entirely in memory: each synset has an
//! identifier, a word class, a language and the words it groups. Lookups
//! are case-insensitive on the word.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::dictionary::pos::WordClass;
use crate::dictionary::resolver::{DictionaryExtension, synset_id};
use crate::error::{Result, SynrexError};

/// One synset as stored in a dictionary file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynsetEntry {
    /// Identifier, unique within its word class
    pub id: String,

    /// One-letter word class code (`a`, `r`, `n`, `v`)
    pub pos: String,

    /// Language tag, e.g. `en`
    #[serde(default = "default_language")]
    pub language: String,

    /// Words (lemmas) belonging to this synset
    pub words: Vec<String>,
}

fn default_language() -> String {
    "en".to_string()
}

/// Synset dictionary backend.
#[derive(Debug, Clone, Default)]
pub struct SynsetDictionary {
    prefix: String,
    /// (language, lower-cased word) -> (class, synset id)
    index: AHashMap<(String, String), Vec<(WordClass, String)>>,
    synset_count: usize,
}

impl SynsetDictionary {
    /// Create an empty dictionary whose identifiers use `prefix`.
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        SynsetDictionary {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Load synsets from a JSON file.
    ///
    /// The file holds an array of synsets:
    /// ```json
    /// [
    ///   {"id": "00011093", "pos": "r", "language": "en", "words": ["well", "good"]},
    ///   {"id": "02084071", "pos": "n", "words": ["dog", "domestic dog"]}
    /// ]
    /// ```
    pub fn load_from_file(prefix: &str, path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(prefix, &content)
    }

    /// Parse synsets from a JSON string (see [`Self::load_from_file`]).
    pub fn from_json(prefix: &str, json: &str) -> Result<Self> {
        let entries: Vec<SynsetEntry> = serde_json::from_str(json)?;
        Self::from_entries(prefix, entries)
    }

    /// Build a dictionary from synset entries.
    pub fn from_entries(prefix: &str, entries: Vec<SynsetEntry>) -> Result<Self> {
        let mut dictionary = Self::new(prefix);
        for entry in entries {
            let class = WordClass::from_code(&entry.pos).ok_or_else(|| {
                SynrexError::dictionary(format!(
                    "Unknown word class '{}' in synset {}",
                    entry.pos, entry.id
                ))
            })?;
            let words: Vec<&str> = entry.words.iter().map(String::as_str).collect();
            dictionary.add_synset(&entry.language, class, &entry.id, &words);
        }
        Ok(dictionary)
    }

    /// Add a synset grouping `words`.
    pub fn add_synset(&mut self, language: &str, class: WordClass, id: &str, words: &[&str]) {
        for word in words {
            let key = (language.to_string(), word.to_lowercase());
            let senses = self.index.entry(key).or_default();
            if !senses.iter().any(|(c, i)| *c == class && i == id) {
                senses.push((class, id.to_string()));
            }
        }
        self.synset_count += 1;
    }

    /// Number of synsets added.
    pub fn synset_count(&self) -> usize {
        self.synset_count
    }

    /// Number of distinct (language, word) entries.
    pub fn word_count(&self) -> usize {
        self.index.len()
    }
}

impl DictionaryExtension for SynsetDictionary {
    fn synset_ids(
        &self,
        language: &str,
        word: &str,
        restrictions: &[WordClass],
    ) -> Result<AHashSet<String>> {
        let key = (language.to_string(), word.to_lowercase());
        let mut result = AHashSet::new();
        if let Some(senses) = self.index.get(&key) {
            for (class, id) in senses {
                if restrictions.contains(class) {
                    result.insert(synset_id(&self.prefix, Some(*class), id));
                }
            }
        }
        Ok(result)
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn name(&self) -> &'static str {
        "synset"
    }
}
