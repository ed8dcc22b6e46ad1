//! Error types for the idiom-core crate.
//!
//! This module provides [`ConfigError`] for configuration loading and
//! validation, and [`ParseValueError`] for turning user-supplied names
//! (from the CLI or a data file) into the classification enums.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use idiom_core::ConfigError;
///
/// let error = ConfigError::invalid_option("detect.min_confidence", "must be within [0, 1]");
/// assert!(error.to_string().contains("detect.min_confidence"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The dotted name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// Errors produced when parsing a category or difficulty name.
///
/// Names are matched against the snake_case wire names, so `null_safety`,
/// `null-safety` and `Null Safety` all resolve to the same category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseValueError {
    /// The name is not one of the pattern categories.
    #[error("unknown pattern category '{0}'")]
    UnknownCategory(String),

    /// The name is not one of the difficulty levels.
    #[error("unknown difficulty '{0}' (expected beginner, intermediate or advanced)")]
    UnknownDifficulty(String),

    /// The name is not one of the semantic glyph categories.
    #[error("unknown semantic category '{0}'")]
    UnknownSemanticCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("scan.max_file_bytes", "must be positive");
        let msg = error.to_string();
        assert!(msg.contains("scan.max_file_bytes"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_io_display_contains_path() {
        let error = ConfigError::Io {
            path: Utf8PathBuf::from("/etc/idiom.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(error.to_string().contains("/etc/idiom.json"));
    }

    #[test]
    fn test_parse_value_error_display() {
        let error = ParseValueError::UnknownCategory("sql".to_owned());
        assert_eq!(error.to_string(), "unknown pattern category 'sql'");

        let error = ParseValueError::UnknownDifficulty("expert".to_owned());
        assert!(error.to_string().contains("expert"));
    }
}
