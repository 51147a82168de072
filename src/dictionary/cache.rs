//! Identity fallback backend and lookup caching.

use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet, RandomState};
use parking_lot::RwLock;

use crate::dictionary::pos::WordClass;
use crate::dictionary::resolver::{DictionaryExtension, SynonymResolver, synset_id};
use crate::error::Result;

const IDENTITY_SEEDS: [u64; 4] = [
    0x5379_6e72_6578_0001,
    0x9e37_79b9_7f4a_7c15,
    0xc2b2_ae3d_27d4_eb4f,
    0x1656_67b1_9e37_79f9,
];

/// Fallback backend giving every distinct word its own synset.
///
/// The id is a fixed-seed hash of the word, independent of language and
/// word class, so two words share a synset only when they are identical.
/// No per-word state is kept.
pub struct IdentityDictionary {
    prefix: String,
    hasher: RandomState,
}

impl IdentityDictionary {
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        let [k0, k1, k2, k3] = IDENTITY_SEEDS;
        IdentityDictionary {
            prefix: prefix.into(),
            hasher: RandomState::with_seeds(k0, k1, k2, k3),
        }
    }

    fn word_id(&self, word: &str) -> u64 {
        self.hasher.hash_one(word)
    }
}

impl Default for IdentityDictionary {
    fn default() -> Self {
        IdentityDictionary::new("default")
    }
}

impl fmt::Debug for IdentityDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityDictionary")
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl DictionaryExtension for IdentityDictionary {
    fn synset_ids(&self, _language: &str, word: &str, _: &[WordClass]) -> Result<AHashSet<String>> {
        let mut result = AHashSet::with_capacity(1);
        result.insert(synset_id(&self.prefix, None, format!("{:016x}", self.word_id(word))));
        Ok(result)
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

type CacheKey = (String, String, Vec<WordClass>);

/// Memoising wrapper around another resolver.
///
/// The cache is cleared wholesale once it holds `capacity` entries.
pub struct CachedResolver {
    inner: Arc<dyn SynonymResolver>,
    capacity: usize,
    entries: RwLock<AHashMap<CacheKey, AHashSet<String>>>,
}

impl CachedResolver {
    /// Default number of cached lookups.
    pub const DEFAULT_CAPACITY: usize = 10_000;

    pub fn new(inner: Arc<dyn SynonymResolver>) -> Self {
        Self::with_capacity(inner, Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: Arc<dyn SynonymResolver>, capacity: usize) -> Self {
        CachedResolver {
            inner,
            capacity: capacity.max(1),
            entries: RwLock::new(AHashMap::new()),
        }
    }

    /// Number of cached lookups.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached lookup.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl SynonymResolver for CachedResolver {
    fn synsets(&self, language: &str, word: &str, restrictions: &[WordClass]) -> AHashSet<String> {
        let mut classes = restrictions.to_vec();
        classes.sort();
        classes.dedup();
        let key = (language.to_string(), word.to_string(), classes);

        if let Some(ids) = self.entries.read().get(&key) {
            return ids.clone();
        }

        let ids = self.inner.synsets(language, word, restrictions);
        let mut entries = self.entries.write();
        if entries.len() >= self.capacity {
            entries.clear();
        }
        entries.insert(key, ids.clone());
        ids
    }
}
