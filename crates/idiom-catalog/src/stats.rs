//! Catalog statistics.
//!
//! [`CatalogStats`] is computed on demand from a catalog in a single pass
//! and never updated in place.

use std::collections::BTreeMap;

use idiom_core::{Difficulty, Pattern, PatternCategory};
use serde::{Deserialize, Serialize};

/// Pattern counts by category and by difficulty.
///
/// Serializes as `{"total": .., "byCategory": {..}, "byDifficulty": {..}}`
/// with snake_case category and difficulty names as keys. Only categories
/// and difficulties that occur are present.
///
/// # Examples
///
/// ```
/// use idiom_catalog::CatalogStats;
///
/// let stats = CatalogStats::default();
/// assert_eq!(stats.total, 0);
/// assert!(stats.is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Number of patterns.
    pub total: usize,
    /// Number of patterns per category.
    pub by_category: BTreeMap<PatternCategory, usize>,
    /// Number of patterns per difficulty.
    pub by_difficulty: BTreeMap<Difficulty, usize>,
}

impl CatalogStats {
    /// Accumulates counts over a sequence of patterns.
    pub fn from_patterns<'a>(patterns: impl IntoIterator<Item = &'a Pattern>) -> Self {
        let mut stats = Self::default();
        for pattern in patterns {
            stats.total += 1;
            *stats.by_category.entry(pattern.category).or_default() += 1;
            *stats.by_difficulty.entry(pattern.difficulty).or_default() += 1;
        }
        stats
    }

    /// Returns the count for one category (zero if absent).
    #[must_use]
    pub fn category_count(&self, category: PatternCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    /// Returns the count for one difficulty (zero if absent).
    #[must_use]
    pub fn difficulty_count(&self, difficulty: Difficulty) -> usize {
        self.by_difficulty.get(&difficulty).copied().unwrap_or(0)
    }

    /// Returns `true` if both breakdowns sum to `total`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.by_category.values().sum::<usize>() == self.total
            && self.by_difficulty.values().sum::<usize>() == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(id: &str, category: &str, difficulty: &str) -> Pattern {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": id,
            "category": category,
            "difficulty": difficulty,
            "detection_rule": "x",
            "confidence": 0.5,
        }))
        .expect("Deserialization failed")
    }

    #[test]
    fn test_from_patterns_counts() {
        let patterns = vec![
            pattern("a", "async", "beginner"),
            pattern("b", "async", "advanced"),
            pattern("c", "enums", "advanced"),
        ];
        let stats = CatalogStats::from_patterns(&patterns);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.category_count(PatternCategory::Async), 2);
        assert_eq!(stats.category_count(PatternCategory::Enums), 1);
        assert_eq!(stats.category_count(PatternCategory::Generics), 0);
        assert_eq!(stats.difficulty_count(Difficulty::Advanced), 2);
        assert_eq!(stats.difficulty_count(Difficulty::Intermediate), 0);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_empty_stats() {
        let stats = CatalogStats::from_patterns(std::iter::empty());
        assert_eq!(stats, CatalogStats::default());
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_serialization_shape() {
        let patterns = vec![pattern("a", "null_safety", "beginner")];
        let stats = CatalogStats::from_patterns(&patterns);
        let json = serde_json::to_value(&stats).expect("Serialization failed");

        assert_eq!(json["total"], 1);
        assert_eq!(json["byCategory"]["null_safety"], 1);
        assert_eq!(json["byDifficulty"]["beginner"], 1);
    }
}
