//! Matcher registry: the set of patterns a text is matched against.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::annotation::text::TextAnnotation;
use crate::config::MatcherConfig;
use crate::dictionary::resolver::SynonymResolver;
use crate::error::{Result, SynrexError};
use crate::pattern::compiler::PatternCompiler;
use crate::pattern::matcher::{PatternMatch, PatternMatcher};
use crate::pattern::style::STYLE_WILDCARD;

/// Best pattern match at one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Identifier of the winning pattern
    pub template_id: String,
    /// Tokens covered by the match, skip hops included
    pub matched_tokens: usize,
    /// Tokens matched by non-skip nodes
    pub match_count: usize,
    pub variables: HashMap<String, String>,
    /// Registry defaults overlaid with the winning pattern's labels
    pub styles: HashMap<String, String>,
}

/// Aggregate of a left-to-right scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Identifiers of matched patterns, in text order
    pub template_ids: Vec<String>,
    pub variables: HashMap<String, String>,
    pub styles: HashMap<String, String>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.template_ids.is_empty()
    }

    fn merge(&mut self, result: MatchResult) {
        self.template_ids.push(result.template_id);
        self.variables.extend(result.variables);
        self.styles.extend(result.styles);
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    matchers: Vec<Arc<PatternMatcher>>,
    default_styles: HashMap<String, String>,
}

/// Thread-safe collection of compiled patterns.
///
/// Mutations take the write lock; matching holds the read lock for the
/// whole pass, so a match never observes a half-applied registration.
#[derive(Debug, Default)]
pub struct MatcherRegistry {
    state: RwLock<RegistryState>,
}

impl MatcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration, compiling every pattern with
    /// `resolver`. Invalid patterns are skipped.
    pub fn from_config(config: &MatcherConfig, resolver: Arc<dyn SynonymResolver>) -> Result<Self> {
        config.validate()?;
        let compiler = PatternCompiler::new(resolver).with_language(config.language.clone());
        let registry = Self::new();
        for definition in &config.patterns {
            let language = definition.language.as_deref().unwrap_or(config.language.as_str());
            let matcher = PatternMatcher::compile_with_language(
                &compiler,
                &definition.id,
                &definition.pattern,
                definition.styles.as_deref(),
                language,
            );
            registry.register(matcher);
        }
        debug!(
            "loaded {} of {} configured patterns",
            registry.len(),
            config.patterns.len()
        );
        Ok(registry)
    }

    /// Add a pattern. Returns `false`, leaving the registry untouched, if
    /// the pattern is invalid.
    pub fn register(&self, matcher: PatternMatcher) -> bool {
        self.register_shared(Arc::new(matcher))
    }

    /// Add a pattern that may also be held elsewhere.
    pub fn register_shared(&self, matcher: Arc<PatternMatcher>) -> bool {
        match self.try_register(matcher) {
            Ok(()) => true,
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    /// Add a pattern, failing with a pattern error if it is invalid.
    pub fn try_register(&self, matcher: Arc<PatternMatcher>) -> Result<()> {
        if !matcher.is_valid() {
            return Err(SynrexError::pattern(format!(
                "pattern {:?} ({}) has no tokens",
                matcher.pattern(),
                matcher.id()
            )));
        }

        let mut state = self.state.write();
        for key in matcher.style_labels().keys() {
            state
                .default_styles
                .entry(key.clone())
                .or_insert_with(|| STYLE_WILDCARD.to_string());
        }
        debug!("registered pattern {} ({:?})", matcher.id(), matcher.pattern());
        state.matchers.push(matcher);
        Ok(())
    }

    /// Remove every pattern registered under `id`; returns how many were removed.
    ///
    /// Style defaults contributed by removed patterns are kept.
    pub fn remove(&self, id: &str) -> usize {
        let mut state = self.state.write();
        let before = state.matchers.len();
        state.matchers.retain(|matcher| matcher.id() != id);
        let removed = before - state.matchers.len();
        debug!("removed {} pattern(s) with id {}", removed, id);
        removed
    }

    pub fn len(&self) -> usize {
        self.state.read().matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().matchers.is_empty()
    }

    /// Registry-wide style defaults: every key seen at registration,
    /// mapped to [`STYLE_WILDCARD`].
    pub fn default_styles(&self) -> HashMap<String, String> {
        self.state.read().default_styles.clone()
    }

    /// Best match among all patterns starting at `from`, within `from..to`.
    ///
    /// The highest non-skip match count wins; ties go to the smaller window,
    /// then to the earliest registered pattern. `None` if nothing matched.
    pub fn best_match(&self, text: &TextAnnotation, from: usize, to: usize) -> Option<MatchResult> {
        let state = self.state.read();
        Self::best_match_in(&state, text, from, to)
    }

    fn best_match_in(
        state: &RegistryState,
        text: &TextAnnotation,
        from: usize,
        to: usize,
    ) -> Option<MatchResult> {
        let mut best: Option<(&PatternMatcher, PatternMatch)> = None;
        for matcher in &state.matchers {
            let found = matcher.match_at(text, from, to);
            if found.match_count == 0 {
                continue;
            }
            let better = match &best {
                None => true,
                Some((_, current)) => {
                    found.match_count > current.match_count
                        || (found.match_count == current.match_count
                            && found.window < current.window)
                }
            };
            if better {
                best = Some((matcher.as_ref(), found));
            }
        }

        best.map(|(matcher, found)| {
            let mut styles = state.default_styles.clone();
            styles.extend(
                matcher
                    .style_labels()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
            MatchResult {
                template_id: matcher.id().to_string(),
                matched_tokens: found.window,
                match_count: found.match_count,
                variables: found.variables,
                styles,
            }
        })
    }

    /// Scan the whole text left to right.
    ///
    /// After a match the cursor jumps past the matched window; otherwise it
    /// moves one token. Variables and styles of later matches overwrite
    /// earlier ones on key collision.
    pub fn scan(&self, text: &TextAnnotation) -> ScanResult {
        let state = self.state.read();
        let length = text.len();
        let mut result = ScanResult::default();
        let mut position = 0;

        while position < length {
            match Self::best_match_in(&state, text, position, length) {
                Some(found) => {
                    trace!(
                        "scan matched {} at {} over {} tokens",
                        found.template_id, position, found.matched_tokens
                    );
                    position += found.matched_tokens.max(1);
                    result.merge(found);
                }
                None => position += 1,
            }
        }

        result
    }
}
