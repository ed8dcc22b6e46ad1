//! Cataloged source idioms.
//!
//! A [`Pattern`] couples a detection rule (a regular expression over source
//! text) with teaching material: before/after examples, a fixed narrative,
//! and lists of objectives, mistakes and practices.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::category::{Difficulty, PatternCategory};
use super::narrative::Narrative;

/// A named, cataloged source-code idiom.
///
/// Patterns are built once by the catalog from static data and never
/// mutated afterwards. The `glyphs` field is derived from `category`
/// through the glyph registry's category table; any value supplied in
/// source data is replaced when the catalog is built.
///
/// # Examples
///
/// ```
/// use idiom_core::{Pattern, PatternCategory, Difficulty};
///
/// let json = r#"{
///     "id": "array-map",
///     "name": "Array Map",
///     "category": "array_operations",
///     "difficulty": "beginner",
///     "detection_rule": "\\.map\\(",
///     "confidence": 0.95
/// }"#;
///
/// let pattern: Pattern = serde_json::from_str(json).unwrap();
/// assert_eq!(pattern.category, PatternCategory::ArrayOperations);
/// assert_eq!(pattern.difficulty, Difficulty::Beginner);
/// assert!(pattern.glyphs.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Unique key across the catalog (kebab-case by convention).
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Transformation topic.
    pub category: PatternCategory,

    /// Assumed prior knowledge.
    pub difficulty: Difficulty,

    /// Regular expression tested against source text.
    pub detection_rule: String,

    /// Fixed, author-assigned certainty that a rule hit is a true positive.
    pub confidence: f64,

    /// The idiom as it appears in JavaScript/TypeScript.
    #[serde(default)]
    pub before_example: String,

    /// The equivalent in the target language.
    #[serde(default)]
    pub after_example: String,

    /// The author-written explanation.
    #[serde(default)]
    pub narrative: Narrative,

    /// Exactly three glyph symbols once the pattern is in a catalog.
    #[serde(default)]
    pub glyphs: SmallVec<[String; 3]>,

    /// Free-form search tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Ids of patterns worth learning next.
    #[serde(default)]
    pub related_patterns: Vec<String>,

    /// What the reader should be able to do afterwards.
    #[serde(default)]
    pub learning_objectives: Vec<String>,

    /// Mistakes people make when translating this idiom.
    #[serde(default)]
    pub common_mistakes: Vec<String>,

    /// Recommended practices in the target language.
    #[serde(default)]
    pub best_practices: Vec<String>,
}

impl Pattern {
    /// Returns `true` if the pattern carries the given tag.
    #[inline]
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns the suggested rewrite, if the pattern has one.
    #[must_use]
    pub fn suggested_transformation(&self) -> Option<&str> {
        let after = self.after_example.trim();
        (!after.is_empty()).then_some(self.after_example.as_str())
    }

    /// Returns `true` if the confidence lies within `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn has_valid_confidence(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }
}
