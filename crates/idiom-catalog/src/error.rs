//! Error types for the idiom-catalog crate.
//!
//! This module provides [`CatalogError`], reported when pattern data or the
//! category glyph table fails load-time validation.

use idiom_core::PatternCategory;

/// Errors that can occur while loading the glyph registry or the catalog.
///
/// All of these are construction-time failures of static or substituted
/// data. Once a registry and catalog exist, every lookup is infallible.
///
/// # Examples
///
/// ```
/// use idiom_catalog::CatalogError;
///
/// let err = CatalogError::DuplicatePatternId("array-map".to_owned());
/// assert!(err.to_string().contains("array-map"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A data document could not be parsed.
    #[error("failed to parse {document}: {source}")]
    Parse {
        /// Which document failed (`patterns`, `category glyph table`).
        document: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The pattern document declares a version this build cannot read.
    #[error("unsupported pattern data version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// The declared version.
        found: u32,
        /// The version this build reads.
        supported: u32,
    },

    /// Two patterns share an id.
    #[error("duplicate pattern id '{0}'")]
    DuplicatePatternId(String),

    /// A pattern's confidence lies outside `[0, 1]`.
    #[error("pattern '{id}' has confidence {confidence} outside [0, 1]")]
    InvalidConfidence {
        /// The offending pattern id.
        id: String,
        /// The declared confidence.
        confidence: f64,
    },

    /// Two glyphs share a symbol.
    #[error("duplicate glyph symbol '{0}'")]
    DuplicateGlyph(String),

    /// The category glyph table names something that is not a category.
    #[error("category glyph table has unknown category '{0}'")]
    UnknownCategory(String),

    /// The category glyph table has no entry for a category.
    #[error("category glyph table has no entry for '{0}'")]
    MissingCategoryGlyphs(PatternCategory),

    /// A category maps to the wrong number of glyphs.
    #[error("category '{category}' maps to {found} glyphs, expected {expected}")]
    GlyphCount {
        /// The offending category.
        category: PatternCategory,
        /// Number of symbols listed.
        found: usize,
        /// Required number of symbols.
        expected: usize,
    },

    /// A category maps to a symbol the registry does not define.
    #[error("category '{category}' references unknown glyph '{symbol}'")]
    UnknownGlyph {
        /// The offending category.
        category: PatternCategory,
        /// The undefined symbol.
        symbol: String,
    },
}

impl CatalogError {
    /// Creates a new [`CatalogError::Parse`] error.
    #[inline]
    pub fn parse(document: &'static str, source: serde_json::Error) -> Self {
        Self::Parse { document, source }
    }
}
