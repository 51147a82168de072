//! Configuration for building a matcher registry.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynrexError};
use crate::pattern::compiler::DEFAULT_LANGUAGE;

/// One pattern as declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Identifier reported when this pattern wins a match.
    pub id: String,

    /// Pattern string, e.g. `"xxx $name? [good|RB*#attribute]"`.
    pub pattern: String,

    /// Style labels as `key=value;key=value`.
    #[serde(default)]
    pub styles: Option<String>,

    /// Language override for synonym lookups.
    #[serde(default)]
    pub language: Option<String>,
}

impl PatternDefinition {
    pub fn new(id: &str, pattern: &str) -> Self {
        PatternDefinition {
            id: id.to_string(),
            pattern: pattern.to_string(),
            styles: None,
            language: None,
        }
    }

    pub fn with_styles(mut self, styles: &str) -> Self {
        self.styles = Some(styles.to_string());
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }
}

/// Matcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Default language for synonym lookups.
    #[serde(default = "default_language")]
    pub language: String,

    /// Patterns, in registration order.
    #[serde(default)]
    pub patterns: Vec<PatternDefinition>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            patterns: Vec::new(),
        }
    }
}

impl MatcherConfig {
    /// Load configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MatcherConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn add_pattern(&mut self, definition: PatternDefinition) {
        self.patterns.push(definition);
    }

    /// Check structural constraints. An empty pattern string is not an
    /// error here; the registry skips it.
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(SynrexError::config("language must not be empty"));
        }
        if let Some(definition) = self.patterns.iter().find(|d| d.id.trim().is_empty()) {
            return Err(SynrexError::config(format!(
                "pattern {:?} has an empty id",
                definition.pattern
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_from_json_defaults() {
        let config = MatcherConfig::from_json(
            r#"{"patterns": [{"id": "1", "pattern": "xxx yyy", "styles": "lang=fr"}]}"#,
        )
        .unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.patterns.len(), 1);
        assert_eq!(config.patterns[0].styles.as_deref(), Some("lang=fr"));
        assert_eq!(config.patterns[0].language, None);
    }

    #[test]
    fn test_validation() {
        assert!(MatcherConfig::from_json(r#"{"language": ""}"#).is_err());
        assert!(MatcherConfig::from_json(r#"{"patterns": [{"id": " ", "pattern": "x"}]}"#).is_err());
        assert!(MatcherConfig::from_json("not json").is_err());
        assert!(MatcherConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"language": "fr", "patterns": [{{"id": "a", "pattern": "bonjour $qui"}}]}}"#
        )
        .unwrap();

        let config = MatcherConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.language, "fr");
        assert_eq!(config.patterns[0], PatternDefinition::new("a", "bonjour $qui"));

        let error = MatcherConfig::load_from_file("/nonexistent/synrex.json").unwrap_err();
        assert!(matches!(error, SynrexError::Io(_)));
    }
}
