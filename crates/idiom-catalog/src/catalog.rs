//! The ordered, immutable pattern catalog.
//!
//! A [`PatternCatalog`] is built once from a versioned JSON document and
//! never changes afterwards. Its insertion order is significant: the
//! detector uses it to break confidence ties.
//!
//! # Data Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "patterns": [
//!     { "id": "array-map", "name": "Array Map", "category": "array_operations",
//!       "difficulty": "beginner", "detection_rule": "\\.map\\(", "confidence": 0.95 }
//!   ]
//! }
//! ```
//!
//! Glyphs are never read from the document; each pattern receives the
//! glyph triple of its category from the [`GlyphRegistry`].

use idiom_core::{Difficulty, FxHashMap, Pattern, PatternCategory};
use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;
use crate::glyphs::GlyphRegistry;
use crate::stats::CatalogStats;

/// The pattern data version this build reads.
pub const SUPPORTED_DATA_VERSION: u32 = 1;

/// The built-in pattern document.
const BUILTIN_PATTERNS: &str = include_str!("../data/patterns.json");

/// On-disk shape of a pattern document.
#[derive(Debug, Deserialize)]
struct PatternDocument {
    version: u32,
    patterns: Vec<Pattern>,
}

/// An ordered, immutable collection of patterns.
///
/// # Examples
///
/// ```
/// use idiom_catalog::{GlyphRegistry, PatternCatalog};
/// use idiom_core::PatternCategory;
///
/// let glyphs = GlyphRegistry::builtin()?;
/// let catalog = PatternCatalog::builtin(&glyphs)?;
///
/// let map = catalog.get_by_id("array-map").expect("built-in pattern");
/// assert_eq!(map.category, PatternCategory::ArrayOperations);
/// assert_eq!(map.glyphs.len(), 3);
/// assert!(catalog.get_by_id("no-such-pattern").is_none());
/// # Ok::<(), idiom_catalog::CatalogError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    /// Patterns in insertion order.
    patterns: Vec<Pattern>,
    /// Pattern id to index into `patterns`.
    by_id: FxHashMap<String, usize>,
}

impl PatternCatalog {
    /// Builds the catalog from the built-in pattern document.
    pub fn builtin(glyphs: &GlyphRegistry) -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_PATTERNS, glyphs)
    }

    /// Builds a catalog from a JSON pattern document.
    ///
    /// Pattern order in the document becomes catalog order.
    pub fn from_json(json: &str, glyphs: &GlyphRegistry) -> Result<Self, CatalogError> {
        let document: PatternDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::parse("patterns", e))?;

        if document.version != SUPPORTED_DATA_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: document.version,
                supported: SUPPORTED_DATA_VERSION,
            });
        }

        Self::from_patterns(document.patterns, glyphs)
    }

    /// Builds a catalog from already-parsed patterns.
    ///
    /// Each pattern's glyphs are replaced by its category's glyph triple.
    /// Ids must be unique and confidences must lie within `[0, 1]`.
    pub fn from_patterns(
        patterns: Vec<Pattern>,
        glyphs: &GlyphRegistry,
    ) -> Result<Self, CatalogError> {
        let mut by_id = FxHashMap::default();
        let mut built = Vec::with_capacity(patterns.len());

        for (index, mut pattern) in patterns.into_iter().enumerate() {
            if !pattern.has_valid_confidence() {
                return Err(CatalogError::InvalidConfidence {
                    id: pattern.id,
                    confidence: pattern.confidence,
                });
            }
            if by_id.insert(pattern.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicatePatternId(pattern.id));
            }

            pattern.glyphs = glyphs
                .glyphs_for_pattern_category(pattern.category)
                .iter()
                .cloned()
                .collect();
            built.push(pattern);
        }

        debug!(patterns = built.len(), "pattern catalog built");

        Ok(Self {
            patterns: built,
            by_id,
        })
    }

    /// Returns an empty catalog.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up a pattern by id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Pattern> {
        self.by_id.get(id).map(|&index| &self.patterns[index])
    }

    /// Returns every pattern in a category, in catalog order.
    #[must_use]
    pub fn by_category(&self, category: PatternCategory) -> Vec<&Pattern> {
        self.patterns
            .iter()
            .filter(|pattern| pattern.category == category)
            .collect()
    }

    /// Returns every pattern at a difficulty, in catalog order.
    #[must_use]
    pub fn by_difficulty(&self, difficulty: Difficulty) -> Vec<&Pattern> {
        self.patterns
            .iter()
            .filter(|pattern| pattern.difficulty == difficulty)
            .collect()
    }

    /// Returns every pattern carrying a tag, in catalog order.
    #[must_use]
    pub fn by_tag(&self, tag: &str) -> Vec<&Pattern> {
        self.patterns
            .iter()
            .filter(|pattern| pattern.has_tag(tag))
            .collect()
    }

    /// Resolves a pattern's related ids, skipping ids not in this catalog.
    #[must_use]
    pub fn related(&self, pattern: &Pattern) -> Vec<&Pattern> {
        pattern
            .related_patterns
            .iter()
            .filter_map(|id| self.get_by_id(id))
            .collect()
    }

    /// Returns the number of patterns.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if the catalog has no patterns.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the patterns in catalog order.
    #[inline]
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Iterates over the patterns in catalog order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Computes counts by category and difficulty.
    #[must_use]
    pub fn statistics(&self) -> CatalogStats {
        CatalogStats::from_patterns(&self.patterns)
    }
}

impl<'a> IntoIterator for &'a PatternCatalog {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use idiom_core::FxHashSet;

    use super::*;

    fn glyphs() -> GlyphRegistry {
        GlyphRegistry::builtin().expect("Built-in registry should load")
    }

    fn builtin() -> PatternCatalog {
        PatternCatalog::builtin(&glyphs()).expect("Built-in catalog should load")
    }

    fn document(patterns: &serde_json::Value) -> String {
        serde_json::json!({ "version": 1, "patterns": patterns }).to_string()
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = builtin();
        let ids: FxHashSet<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.count());
    }

    #[test]
    fn test_builtin_covers_every_category() {
        let catalog = builtin();
        for category in PatternCategory::ALL {
            assert!(!catalog.by_category(category).is_empty(), "{category}");
        }
    }

    #[test]
    fn test_builtin_patterns_are_complete() {
        for pattern in &builtin() {
            assert!(pattern.narrative.is_well_formed(), "{}", pattern.id);
            assert!(!pattern.before_example.is_empty(), "{}", pattern.id);
            assert!(!pattern.after_example.is_empty(), "{}", pattern.id);
            assert!(!pattern.learning_objectives.is_empty(), "{}", pattern.id);
            assert!(!pattern.best_practices.is_empty(), "{}", pattern.id);
            assert!(!pattern.common_mistakes.is_empty(), "{}", pattern.id);
        }
    }

    #[test]
    fn test_builtin_related_ids_resolve() {
        let catalog = builtin();
        for pattern in &catalog {
            let related = catalog.related(pattern);
            assert_eq!(related.len(), pattern.related_patterns.len(), "{}", pattern.id);
        }
    }

    #[test]
    fn test_glyphs_derived_from_category() {
        let registry = glyphs();
        let catalog = PatternCatalog::builtin(&registry).expect("Catalog should load");
        for pattern in &catalog {
            assert_eq!(
                pattern.glyphs.as_slice(),
                registry.glyphs_for_pattern_category(pattern.category),
                "{}",
                pattern.id
            );
        }
    }

    #[test]
    fn test_supplied_glyphs_are_replaced() {
        let json = document(&serde_json::json!([{
            "id": "x", "name": "X", "category": "enums", "difficulty": "beginner",
            "detection_rule": "enum", "confidence": 0.5, "glyphs": ["bogus"]
        }]));
        let registry = glyphs();
        let catalog = PatternCatalog::from_json(&json, &registry).expect("Should load");
        let pattern = catalog.get_by_id("x").expect("Pattern should exist");
        assert_eq!(
            pattern.glyphs.as_slice(),
            registry.glyphs_for_pattern_category(PatternCategory::Enums)
        );
    }

    #[test]
    fn test_statistics_consistency() {
        let catalog = builtin();
        let stats = catalog.statistics();
        assert_eq!(stats.total, catalog.count());
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_filters_preserve_insertion_order() {
        let catalog = builtin();
        let arrays = catalog.by_category(PatternCategory::ArrayOperations);
        let ids: Vec<&str> = arrays.iter().map(|p| p.id.as_str()).collect();
        let map = ids.iter().position(|id| *id == "array-map").expect("array-map");
        let filter = ids
            .iter()
            .position(|id| *id == "array-filter")
            .expect("array-filter");
        assert!(map < filter);

        let positions: Vec<usize> = catalog
            .by_difficulty(Difficulty::Advanced)
            .iter()
            .map(|p| catalog.iter().position(|q| q.id == p.id).unwrap_or(usize::MAX))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_by_tag() {
        let catalog = builtin();
        let tagged = catalog.by_tag("null");
        assert!(tagged.iter().any(|p| p.id == "null-check-basic"));
        assert!(catalog.by_tag("no-such-tag").is_empty());
    }

    #[test]
    fn test_related_skips_unknown_ids() {
        let json = document(&serde_json::json!([
            { "id": "a", "name": "A", "category": "async", "difficulty": "beginner",
              "detection_rule": "a", "confidence": 0.5, "related_patterns": ["b", "ghost"] },
            { "id": "b", "name": "B", "category": "async", "difficulty": "beginner",
              "detection_rule": "b", "confidence": 0.5 }
        ]));
        let catalog = PatternCatalog::from_json(&json, &glyphs()).expect("Should load");
        let a = catalog.get_by_id("a").expect("a");
        let related: Vec<&str> = catalog.related(a).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(related, vec!["b"]);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let json = document(&serde_json::json!([
            { "id": "dup", "name": "A", "category": "async", "difficulty": "beginner",
              "detection_rule": "a", "confidence": 0.5 },
            { "id": "dup", "name": "B", "category": "enums", "difficulty": "beginner",
              "detection_rule": "b", "confidence": 0.5 }
        ]));
        let err = PatternCatalog::from_json(&json, &glyphs()).expect_err("Should fail");
        assert!(matches!(err, CatalogError::DuplicatePatternId(ref id) if id == "dup"));
    }

    #[test]
    fn test_invalid_confidence_is_rejected() {
        let json = document(&serde_json::json!([
            { "id": "hot", "name": "Hot", "category": "async", "difficulty": "beginner",
              "detection_rule": "a", "confidence": 1.2 }
        ]));
        let err = PatternCatalog::from_json(&json, &glyphs()).expect_err("Should fail");
        assert!(matches!(err, CatalogError::InvalidConfidence { ref id, .. } if id == "hot"));
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let json = r#"{"version": 99, "patterns": []}"#;
        let err = PatternCatalog::from_json(json, &glyphs()).expect_err("Should fail");
        assert!(matches!(
            err,
            CatalogError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn test_malformed_rule_is_not_a_load_error() {
        let json = document(&serde_json::json!([
            { "id": "broken", "name": "Broken", "category": "async", "difficulty": "beginner",
              "detection_rule": "(unclosed", "confidence": 0.5 }
        ]));
        let catalog = PatternCatalog::from_json(&json, &glyphs()).expect("Should load");
        assert_eq!(catalog.count(), 1);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = PatternCatalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.count(), 0);
        assert!(catalog.get_by_id("array-map").is_none());
        assert_eq!(catalog.statistics(), CatalogStats::default());
    }
}
