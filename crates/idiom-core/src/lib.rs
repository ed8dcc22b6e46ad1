//! Core types, configuration, and errors for idiom-coach.
//!
//! This crate provides the foundational types shared by the workspace:
//!
//! - Domain types ([`Pattern`], [`Narrative`], [`Glyph`], [`SourceSpan`])
//! - Classification enums ([`PatternCategory`], [`Difficulty`], [`SemanticCategory`])
//! - Configuration structures ([`Config`] and its sections)
//! - Error types for configuration and value parsing
//! - `FxHashMap`/`FxHashSet` re-exports used for the id and symbol indexes
//!
//! Nothing here performs detection or generation; those live in
//! `idiom-catalog`, `idiom-detect` and `idiom-narrative`.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, DetectConfig, NarrativeConfig, ScanConfig};
pub use error::{ConfigError, ParseValueError};
pub use types::{
    Difficulty, Glyph, Narrative, NarrativeSection, Pattern, PatternCategory, SemanticCategory,
    SourceSpan,
};

pub use rustc_hash::{FxHashMap, FxHashSet};
