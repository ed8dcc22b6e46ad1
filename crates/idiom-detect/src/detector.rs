//! The detector: runs every compiled rule against a snippet and ranks the
//! hits.
//!
//! # Ordering
//!
//! Results are sorted by confidence, highest first. The sort is stable, so
//! patterns with equal confidence keep their catalog order. For a fixed
//! catalog the output for a given input is therefore fully deterministic.
//!
//! # Overlap
//!
//! Every pattern whose rule matches contributes one [`Match`], even when
//! several patterns match the same text. Deduplication is left to callers.

use idiom_catalog::PatternCatalog;
use idiom_core::DetectConfig;
use rayon::prelude::*;
use tracing::debug;

use crate::matches::Match;
use crate::rules::{RejectedRule, RuleSet};

/// Detects cataloged patterns in source snippets.
///
/// A detector borrows its catalog and owns the compiled rules. It holds no
/// mutable state, so one detector can serve many threads at once.
///
/// # Examples
///
/// ```
/// use idiom_catalog::{GlyphRegistry, PatternCatalog};
/// use idiom_core::DetectConfig;
/// use idiom_detect::Detector;
///
/// let glyphs = GlyphRegistry::builtin()?;
/// let catalog = PatternCatalog::builtin(&glyphs)?;
/// let detector = Detector::new(&catalog, &DetectConfig::default());
///
/// let matches = detector.detect("const doubled = numbers.map(n => n * 2);");
/// assert!(matches.iter().any(|m| m.pattern.id == "array-map"));
///
/// assert!(detector.detect("SELECT * FROM users").is_empty());
/// # Ok::<(), idiom_catalog::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Detector<'c> {
    catalog: &'c PatternCatalog,
    rules: RuleSet,
    min_confidence: f64,
}

impl<'c> Detector<'c> {
    /// Compiles the catalog's rules and builds a detector.
    ///
    /// Rules that fail to compile are skipped; see
    /// [`rejected_rules`](Self::rejected_rules).
    #[must_use]
    pub fn new(catalog: &'c PatternCatalog, config: &DetectConfig) -> Self {
        let rules = RuleSet::compile(catalog, config);
        debug!(
            patterns = catalog.count(),
            rules = rules.len(),
            min_confidence = config.min_confidence,
            "Created detector"
        );
        Self {
            catalog,
            rules,
            min_confidence: config.min_confidence,
        }
    }

    /// Detects patterns in `source`, highest confidence first.
    ///
    /// Each matching pattern yields exactly one [`Match`], located at its
    /// leftmost occurrence. An empty result is not an error.
    #[must_use]
    pub fn detect(&self, source: &str) -> Vec<Match<'c>> {
        let patterns = self.catalog.patterns();

        let mut matches: Vec<Match<'c>> = self
            .rules
            .rules()
            .iter()
            .filter_map(|rule| {
                let pattern = &patterns[rule.pattern_index];
                if pattern.confidence < self.min_confidence {
                    return None;
                }
                rule.regex
                    .find(source)
                    .map(|found| Match::new(pattern, source, found.start(), found.end()))
            })
            .collect();

        // Stable: equal confidences keep catalog order.
        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        matches
    }

    /// Detects patterns in many sources in parallel.
    ///
    /// The result has one entry per input, in input order.
    #[must_use]
    pub fn detect_batch<S>(&self, sources: &[S]) -> Vec<Vec<Match<'c>>>
    where
        S: AsRef<str> + Sync,
    {
        sources
            .par_iter()
            .map(|source| self.detect(source.as_ref()))
            .collect()
    }

    /// Returns the rules that were skipped because they failed to compile.
    #[inline]
    #[must_use]
    pub fn rejected_rules(&self) -> &[RejectedRule] {
        self.rules.rejected()
    }

    /// Returns the number of rules in use.
    #[inline]
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the catalog this detector was built over.
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &'c PatternCatalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use idiom_catalog::GlyphRegistry;

    use super::*;

    fn builtin() -> PatternCatalog {
        let glyphs = GlyphRegistry::builtin().expect("Registry should load");
        PatternCatalog::builtin(&glyphs).expect("Catalog should load")
    }

    fn custom(patterns: &serde_json::Value) -> PatternCatalog {
        let json = serde_json::json!({ "version": 1, "patterns": patterns }).to_string();
        let glyphs = GlyphRegistry::builtin().expect("Registry should load");
        PatternCatalog::from_json(&json, &glyphs).expect("Catalog should load")
    }

    fn ids<'a>(matches: &'a [Match<'_>]) -> Vec<&'a str> {
        matches.iter().map(|m| m.pattern.id.as_str()).collect()
    }

    #[test]
    fn test_null_check_is_detected() {
        let catalog = builtin();
        let detector = Detector::new(&catalog, &DetectConfig::default());
        let matches =
            detector.detect("if (user !== null && user !== undefined) { console.log(user.name); }");

        let hit = matches
            .iter()
            .find(|m| m.pattern.id == "null-check-basic")
            .expect("null-check-basic should match");
        assert!((hit.confidence - 0.9).abs() < f64::EPSILON);
        assert_eq!(hit.matched_text, "!== null");
    }

    #[test]
    fn test_array_map_is_detected() {
        let catalog = builtin();
        let detector = Detector::new(&catalog, &DetectConfig::default());
        let matches = detector.detect("const doubled = numbers.map(n => n * 2);");

        let hit = matches
            .iter()
            .find(|m| m.pattern.id == "array-map")
            .expect("array-map should match");
        assert!((hit.confidence - 0.95).abs() < f64::EPSILON);
        assert!(hit.suggested_transformation.is_some());
    }

    #[test]
    fn test_map_and_filter_keep_catalog_order() {
        let catalog = builtin();
        let detector = Detector::new(&catalog, &DetectConfig::default());
        let matches = detector.detect("const big = xs.filter(x => x > 2).map(x => x * 2);");
        let found = ids(&matches);

        let map = found.iter().position(|id| *id == "array-map").expect("array-map");
        let filter = found
            .iter()
            .position(|id| *id == "array-filter")
            .expect("array-filter");
        assert!(map < filter);
        assert!((matches[map].confidence - 0.95).abs() < f64::EPSILON);
        assert!((matches[filter].confidence - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unrecognized_input_yields_nothing() {
        let catalog = builtin();
        let detector = Detector::new(&catalog, &DetectConfig::default());
        assert!(detector.detect("SELECT * FROM users").is_empty());
        assert!(detector.detect("").is_empty());
    }

    #[test]
    fn test_sorted_by_confidence_descending() {
        let catalog = builtin();
        let detector = Detector::new(&catalog, &DetectConfig::default());
        let source = "const s = `hi ${name}`;\nconst total = items.reduce((a, b) => a + b, 0);\n\
                      try { await load(); } catch (e) {}";
        let matches = detector.detect(source);

        assert!(matches.len() > 3);
        assert!(
            matches
                .windows(2)
                .all(|w| w[0].confidence >= w[1].confidence)
        );
    }

    #[test]
    fn test_ties_follow_insertion_order() {
        let catalog = custom(&serde_json::json!([
            { "id": "low", "name": "Low", "category": "async", "difficulty": "beginner",
              "detection_rule": "a", "confidence": 0.5 },
            { "id": "second", "name": "Second", "category": "async", "difficulty": "beginner",
              "detection_rule": "b", "confidence": 0.8 },
            { "id": "high", "name": "High", "category": "async", "difficulty": "beginner",
              "detection_rule": "c", "confidence": 0.9 },
            { "id": "first", "name": "First", "category": "async", "difficulty": "beginner",
              "detection_rule": "d", "confidence": 0.8 }
        ]));
        let detector = Detector::new(&catalog, &DetectConfig::default());

        let matches = detector.detect("dcba");
        assert_eq!(ids(&matches), vec!["high", "second", "first", "low"]);

        // Same input, same output.
        assert_eq!(ids(&detector.detect("dcba")), ids(&matches));
    }

    #[test]
    fn test_leftmost_occurrence_is_reported() {
        let catalog = custom(&serde_json::json!([
            { "id": "await", "name": "Await", "category": "async", "difficulty": "beginner",
              "detection_rule": "await \\w+", "confidence": 0.5 }
        ]));
        let detector = Detector::new(&catalog, &DetectConfig::default());

        let matches = detector.detect("x\nawait first;\nawait second;");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_text, "await first");
        assert_eq!(matches[0].span.start_line, 2);
        assert_eq!(matches[0].span.start_offset, 2);
    }

    #[test]
    fn test_malformed_rule_is_skipped() {
        let catalog = custom(&serde_json::json!([
            { "id": "broken", "name": "Broken", "category": "async", "difficulty": "beginner",
              "detection_rule": "[unclosed", "confidence": 0.9 },
            { "id": "fine", "name": "Fine", "category": "async", "difficulty": "beginner",
              "detection_rule": "await", "confidence": 0.5 }
        ]));
        let detector = Detector::new(&catalog, &DetectConfig::default());

        assert_eq!(detector.rule_count(), 1);
        assert_eq!(detector.rejected_rules()[0].pattern_id, "broken");
        assert_eq!(ids(&detector.detect("await x")), vec!["fine"]);
    }

    #[test]
    fn test_min_confidence_filters() {
        let catalog = builtin();
        let config = DetectConfig {
            min_confidence: 0.8,
            ..DetectConfig::default()
        };
        let detector = Detector::new(&catalog, &config);
        let matches = detector.detect("const doubled = numbers.map(n => n * 2);");

        assert!(matches.iter().any(|m| m.pattern.id == "array-map"));
        assert!(!matches.iter().any(|m| m.pattern.id == "const-declaration"));
        assert!(matches.iter().all(|m| m.confidence >= 0.8));
    }

    #[test]
    fn test_case_sensitive_and_dot_excludes_newline() {
        let catalog = custom(&serde_json::json!([
            { "id": "upper", "name": "Upper", "category": "async", "difficulty": "beginner",
              "detection_rule": "Promise", "confidence": 0.5 },
            { "id": "span", "name": "Span", "category": "async", "difficulty": "beginner",
              "detection_rule": "a.b", "confidence": 0.5 }
        ]));
        let detector = Detector::new(&catalog, &DetectConfig::default());

        assert!(detector.detect("promise a\nb").is_empty());
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        let catalog = PatternCatalog::empty();
        let detector = Detector::new(&catalog, &DetectConfig::default());
        assert!(detector.detect("const x = a ?? b;").is_empty());
        assert_eq!(detector.rule_count(), 0);
    }

    #[test]
    fn test_detect_batch_matches_sequential() {
        let catalog = builtin();
        let detector = Detector::new(&catalog, &DetectConfig::default());
        let sources = [
            "const doubled = numbers.map(n => n * 2);",
            "SELECT * FROM users",
            "let port = config.port ?? 8080;",
        ];

        let batch = detector.detect_batch(&sources);
        assert_eq!(batch.len(), sources.len());
        for (source, result) in sources.iter().zip(&batch) {
            assert_eq!(ids(result), ids(&detector.detect(source)));
        }
        assert!(batch[1].is_empty());
    }
}
