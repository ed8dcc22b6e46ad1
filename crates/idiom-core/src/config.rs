//! Configuration structures for idiom-coach.
//!
//! This module provides configuration types for each component:
//!
//! - [`DetectConfig`] - Rule compilation budgets and confidence filtering
//! - [`NarrativeConfig`] - Target language and output format
//! - [`ScanConfig`] - Directory scanning (extensions, size limits, parallelism)
//! - [`Config`] - Root configuration combining all sections
//!
//! All types implement [`Default`] and deserialize with `#[serde(default)]`,
//! so a configuration file only needs the options it changes.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the detector.
///
/// # Examples
///
/// ```
/// use idiom_core::DetectConfig;
///
/// let config = DetectConfig::default();
/// assert!(config.min_confidence.abs() < f64::EPSILON);
/// assert_eq!(config.rule_size_limit, 1 << 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Matches below this confidence are dropped. `0.0` keeps everything.
    pub min_confidence: f64,

    /// Maximum size in bytes of one compiled detection rule.
    ///
    /// Rules exceeding it are rejected at detector construction.
    pub rule_size_limit: usize,

    /// Maximum size in bytes of the lazy DFA cache per rule.
    pub rule_dfa_size_limit: usize,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            rule_size_limit: 1 << 20,
            rule_dfa_size_limit: 2 << 20,
        }
    }
}

/// Configuration for narrative generation and rendering.
///
/// # Examples
///
/// ```
/// use idiom_core::NarrativeConfig;
///
/// let config = NarrativeConfig::default();
/// assert_eq!(config.target_language, "Rust");
/// assert_eq!(config.default_format, "markdown");
/// assert!(!config.variety_mode);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// Name of the language explanations point towards.
    pub target_language: String,

    /// Format selector used when none is given (`plain`, `html`, anything
    /// else renders markdown).
    pub default_format: String,

    /// Use randomized per-category narratives instead of the fixed
    /// per-pattern ones.
    pub variety_mode: bool,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            target_language: "Rust".to_owned(),
            default_format: "markdown".to_owned(),
            variety_mode: false,
        }
    }
}

/// Configuration for scanning a directory of source files.
///
/// # Examples
///
/// ```
/// use idiom_core::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert!(config.file_extensions.contains(&"ts".to_owned()));
/// assert_eq!(config.max_file_bytes, 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to scan, without the leading dot.
    pub file_extensions: Vec<String>,

    /// Directory names skipped in addition to the built-in list.
    pub skip_dirs: Vec<String>,

    /// Files larger than this are reported and skipped.
    pub max_file_bytes: u64,

    /// Maximum number of parallel jobs.
    /// `None` means use all available CPU cores.
    pub max_parallel_jobs: Option<usize>,

    /// Whether to follow symbolic links.
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            file_extensions: ["js", "jsx", "mjs", "cjs", "ts", "tsx"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            skip_dirs: Vec::new(),
            max_file_bytes: 1024 * 1024,
            max_parallel_jobs: None,
            follow_links: false,
        }
    }
}

/// Root configuration for idiom-coach.
///
/// # Examples
///
/// ```
/// use idiom_core::Config;
///
/// let config = Config::from_json_str(r#"{"narrative": {"target_language": "Haskell"}}"#)?;
/// assert_eq!(config.narrative.target_language, "Haskell");
/// assert_eq!(config.narrative.default_format, "markdown");
/// # Ok::<(), idiom_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detector configuration.
    pub detect: DetectConfig,

    /// Narrative configuration.
    pub narrative: NarrativeConfig,

    /// Directory scanning configuration.
    pub scan: ScanConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks option values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.detect.min_confidence) {
            return Err(ConfigError::invalid_option(
                "detect.min_confidence",
                format!("must be within [0, 1], got {}", self.detect.min_confidence),
            ));
        }
        if self.detect.rule_size_limit == 0 {
            return Err(ConfigError::invalid_option(
                "detect.rule_size_limit",
                "must be positive",
            ));
        }
        if self.narrative.target_language.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "narrative.target_language",
                "must not be empty",
            ));
        }
        if self.scan.max_file_bytes == 0 {
            return Err(ConfigError::invalid_option(
                "scan.max_file_bytes",
                "must be positive",
            ));
        }
        if self.scan.max_parallel_jobs == Some(0) {
            return Err(ConfigError::invalid_option(
                "scan.max_parallel_jobs",
                "must be at least 1 when set",
            ));
        }
        if self.scan.file_extensions.is_empty() {
            return Err(ConfigError::invalid_option(
                "scan.file_extensions",
                "must list at least one extension",
            ));
        }
        Ok(())
    }
}
