//! Synonym resolution capability and the composite dictionary.

use std::fmt;

use ahash::AHashSet;
use log::debug;

use crate::dictionary::cache::IdentityDictionary;
use crate::dictionary::pos::WordClass;
use crate::error::Result;

/// Resolve synset identifiers for a word.
///
/// An empty `restrictions` slice means "any word class". Implementations
/// never fail: a lookup error is reported as an empty set.
pub trait SynonymResolver: Send + Sync {
    /// Synset identifiers of `word` in `language`.
    fn synsets(&self, language: &str, word: &str, restrictions: &[WordClass]) -> AHashSet<String>;
}

/// A lexical backend plugged into a [`Dictionary`].
pub trait DictionaryExtension: Send + Sync {
    /// Synset identifiers of `word` for each of the given word classes.
    ///
    /// `restrictions` is never empty when called through a [`Dictionary`].
    fn synset_ids(
        &self,
        language: &str,
        word: &str,
        restrictions: &[WordClass],
    ) -> Result<AHashSet<String>>;

    /// Prefix namespacing the identifiers this backend produces.
    fn prefix(&self) -> &str;

    /// Get the name of this backend (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Build a namespaced synset identifier.
///
/// `prefix~<class>#<id>` when the word class is known, `prefix#<id>` otherwise.
pub fn synset_id(prefix: &str, class: Option<WordClass>, id: impl fmt::Display) -> String {
    match class {
        Some(class) => format!("{prefix}~{}#{id}", class.code()),
        None => format!("{prefix}#{id}"),
    }
}

/// Composite dictionary over several backends.
///
/// A lookup unions the identifiers of every extension. The default backend,
/// when present, is only consulted if that union is empty.
pub struct Dictionary {
    extensions: Vec<Box<dyn DictionaryExtension>>,
    default: Option<Box<dyn DictionaryExtension>>,
}

impl Dictionary {
    /// Create a dictionary with no backends at all.
    pub fn empty() -> Self {
        Dictionary {
            extensions: Vec::new(),
            default: None,
        }
    }

    /// Add a backend.
    pub fn with_extension(mut self, extension: Box<dyn DictionaryExtension>) -> Self {
        self.add_extension(extension);
        self
    }

    /// Replace the fallback backend.
    pub fn with_default(mut self, extension: Box<dyn DictionaryExtension>) -> Self {
        self.default = Some(extension);
        self
    }

    /// Add a backend.
    pub fn add_extension(&mut self, extension: Box<dyn DictionaryExtension>) {
        debug!(
            "registering dictionary extension {} ({})",
            extension.name(),
            extension.prefix()
        );
        self.extensions.push(extension);
    }

    /// Number of non-default backends.
    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    fn lookup(
        extension: &dyn DictionaryExtension,
        language: &str,
        word: &str,
        restrictions: &[WordClass],
    ) -> AHashSet<String> {
        match extension.synset_ids(language, word, restrictions) {
            Ok(ids) => ids,
            Err(e) => {
                debug!(
                    "dictionary {} failed for {:?} ({}): {}",
                    extension.name(),
                    word,
                    language,
                    e
                );
                AHashSet::new()
            }
        }
    }
}

impl Default for Dictionary {
    /// A dictionary whose only backend is the identity fallback, so
    /// synonym tokens behave like exact word matches.
    fn default() -> Self {
        Dictionary::empty().with_default(Box::new(IdentityDictionary::new("default")))
    }
}

impl SynonymResolver for Dictionary {
    fn synsets(&self, language: &str, word: &str, restrictions: &[WordClass]) -> AHashSet<String> {
        let restrictions = if restrictions.is_empty() {
            &WordClass::ALL[..]
        } else {
            restrictions
        };

        let mut result = AHashSet::new();
        for extension in &self.extensions {
            result.extend(Self::lookup(extension.as_ref(), language, word, restrictions));
        }

        if result.is_empty() {
            if let Some(default) = &self.default {
                result = Self::lookup(default.as_ref(), language, word, restrictions);
            }
        }

        result
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.extensions.iter().map(|e| e.name()).collect();
        f.debug_struct("Dictionary")
            .field("extensions", &names)
            .field("default", &self.default.as_ref().map(|d| d.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynrexError;

    struct FailingExtension;

    impl DictionaryExtension for FailingExtension {
        fn synset_ids(&self, _: &str, _: &str, _: &[WordClass]) -> Result<AHashSet<String>> {
            Err(SynrexError::dictionary("backend offline"))
        }

        fn prefix(&self) -> &str {
            "broken"
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct FixedExtension;

    impl DictionaryExtension for FixedExtension {
        fn synset_ids(
            &self,
            _: &str,
            word: &str,
            restrictions: &[WordClass],
        ) -> Result<AHashSet<String>> {
            let mut ids = AHashSet::new();
            if word == "big" {
                for class in restrictions {
                    ids.insert(synset_id("fixed", Some(*class), 1));
                }
            }
            Ok(ids)
        }

        fn prefix(&self) -> &str {
            "fixed"
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_synset_id_format() {
        assert_eq!(synset_id("wn", Some(WordClass::Noun), 42), "wn~n#42");
        assert_eq!(synset_id("default", None, 7), "default#7");
    }

    #[test]
    fn test_empty_restrictions_mean_all_classes() {
        let dictionary = Dictionary::empty().with_extension(Box::new(FixedExtension));
        let ids = dictionary.synsets("en", "big", &[]);
        assert_eq!(ids.len(), 4);

        let ids = dictionary.synsets("en", "big", &[WordClass::Adjective]);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("fixed~a#1"));
    }

    #[test]
    fn test_failures_are_swallowed() {
        let dictionary = Dictionary::empty().with_extension(Box::new(FailingExtension));
        assert!(dictionary.synsets("en", "anything", &[]).is_empty());
    }

    #[test]
    fn test_default_only_when_extensions_empty() {
        let dictionary = Dictionary::default().with_extension(Box::new(FixedExtension));

        let ids = dictionary.synsets("en", "big", &[WordClass::Adjective]);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("fixed~a#1"));

        let ids = dictionary.synsets("en", "small", &[]);
        assert_eq!(ids.len(), 1);
        assert!(ids.iter().all(|id| id.starts_with("default#")));
    }
}
