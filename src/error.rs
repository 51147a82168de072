//! Error types for the Synrex library.
//!
//! The matching core never fails: invalid patterns are excluded at
//! registration and dictionary failures degrade to "no synonyms". Errors only
//! surface from the I/O-bound entry points (configuration and dictionary
//! loading, dictionary backends), all represented by [`SynrexError`].
//!
//! # Examples
//!
//! ```
//! use synrex::error::{SynrexError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(SynrexError::config("missing patterns"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Synrex operations.
#[derive(Error, Debug)]
pub enum SynrexError {
    /// I/O errors (reading configuration or dictionary files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Pattern-related errors
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Dictionary backend errors (lookups, malformed resources)
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors raised by external dictionary backends
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SynrexError.
pub type Result<T> = std::result::Result<T, SynrexError>;

impl SynrexError {
    /// Create a new pattern error.
    pub fn pattern<S: Into<String>>(msg: S) -> Self {
        SynrexError::Pattern(msg.into())
    }

    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        SynrexError::Dictionary(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SynrexError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SynrexError::pattern("Test pattern error");
        assert_eq!(error.to_string(), "Pattern error: Test pattern error");

        let error = SynrexError::dictionary("Test dictionary error");
        assert_eq!(error.to_string(), "Dictionary error: Test dictionary error");

        let error = SynrexError::config("language must not be empty");
        assert_eq!(error.to_string(), "Config error: language must not be empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = SynrexError::from(io_error);

        match error {
            SynrexError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_anyhow_conversion() {
        let error = SynrexError::from(anyhow::anyhow!("backend offline"));
        assert_eq!(error.to_string(), "Anyhow error: backend offline");
    }
}
