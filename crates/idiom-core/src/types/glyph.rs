//! Glyphs: symbolic annotations for programming concepts.

use serde::{Deserialize, Serialize};

use super::category::SemanticCategory;

/// A symbol standing for a programming concept, independent of syntax.
///
/// Glyphs are defined once in the glyph registry and never change. The
/// `symbol` is the registry key and is unique.
///
/// # Examples
///
/// ```
/// use idiom_core::{Glyph, SemanticCategory};
///
/// let glyph = Glyph::new(
///     "◇",
///     "Option",
///     "A value that may be absent, made explicit in the type",
///     SemanticCategory::Safety,
///     "Option<User>",
/// );
/// assert_eq!(glyph.symbol, "◇");
/// assert_eq!(glyph.semantic_category, SemanticCategory::Safety);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Glyph {
    /// The symbol itself (one or two characters).
    pub symbol: String,

    /// Short name of the concept.
    pub name: String,

    /// One-sentence meaning.
    pub meaning: String,

    /// The concept group this glyph belongs to.
    pub semantic_category: SemanticCategory,

    /// A target-language snippet showing the concept.
    pub usage_example: String,
}

impl Glyph {
    /// Creates a new glyph.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        meaning: impl Into<String>,
        semantic_category: SemanticCategory,
        usage_example: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            meaning: meaning.into(),
            semantic_category,
            usage_example: usage_example.into(),
        }
    }
}
