//! Detection results.
//!
//! A [`Match`] borrows its pattern from the catalog the detector was built
//! over. [`MatchRecord`] is the owned, serializable form written by the CLI.

use idiom_core::{Pattern, SourceSpan};
use serde::{Deserialize, Serialize};

/// One pattern found in one source snippet.
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
/// let source = "let port = config.port ?? 8080;";
/// let matches = detector.detect(source);
/// let hit = matches
///     .iter()
///     .find(|m| m.pattern.id == "nullish-coalescing")
///     .expect("pattern should be detected");
///
/// assert_eq!(hit.matched_text, "??");
/// assert_eq!(hit.span.start_line, 1);
/// # Ok::<(), idiom_catalog::CatalogError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'c> {
    /// The detected pattern.
    pub pattern: &'c Pattern,
    /// Text of the leftmost occurrence.
    pub matched_text: String,
    /// Location of the leftmost occurrence.
    pub span: SourceSpan,
    /// The pattern's confidence.
    pub confidence: f64,
    /// The pattern's after-example, when it has one.
    pub suggested_transformation: Option<&'c str>,
}

impl<'c> Match<'c> {
    /// Builds a match for the byte range `start..end` of `source`.
    #[must_use]
    pub fn new(pattern: &'c Pattern, source: &str, start: usize, end: usize) -> Self {
        let span = SourceSpan::locate(source, start, end);
        Self {
            pattern,
            matched_text: source[span.start_offset..span.end_offset].to_owned(),
            span,
            confidence: pattern.confidence,
            suggested_transformation: pattern.suggested_transformation(),
        }
    }

    /// Converts the match into its owned, serializable record.
    #[must_use]
    pub fn to_record(&self) -> MatchRecord {
        MatchRecord {
            pattern_id: self.pattern.id.clone(),
            matched_text: self.matched_text.clone(),
            start_line: self.span.start_line,
            end_line: self.span.end_line,
            confidence: self.confidence,
            suggested_transformation: self.suggested_transformation.map(str::to_owned),
        }
    }
}

/// Serializable form of a [`Match`].
///
/// Serializes as `{"patternId", "matchedText", "startLine", "endLine",
/// "confidence", "suggestedTransformation"?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Id of the detected pattern.
    pub pattern_id: String,
    /// Text of the leftmost occurrence.
    pub matched_text: String,
    /// First line of the occurrence (1-indexed).
    pub start_line: usize,
    /// Last line of the occurrence (1-indexed).
    pub end_line: usize,
    /// The pattern's confidence.
    pub confidence: f64,
    /// The suggested rewrite, omitted when the pattern has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_transformation: Option<String>,
}

impl From<&Match<'_>> for MatchRecord {
    fn from(m: &Match<'_>) -> Self {
        m.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(after: &str) -> Pattern {
        serde_json::from_value(serde_json::json!({
            "id": "nullish-coalescing",
            "name": "Nullish Coalescing",
            "category": "null_safety",
            "difficulty": "beginner",
            "detection_rule": "\\?\\?",
            "confidence": 0.9,
            "after_example": after,
        }))
        .expect("Deserialization failed")
    }

    #[test]
    fn test_match_new_locates_text() {
        let pattern = pattern("x.unwrap_or(1)");
        let source = "let a = 1;\nlet b = a ?? 2;";
        let start = source.find("??").expect("Should contain ??");
        let m = Match::new(&pattern, source, start, start + 2);

        assert_eq!(m.matched_text, "??");
        assert_eq!(m.span.start_line, 2);
        assert_eq!(m.span.end_line, 2);
        assert!((m.confidence - 0.9).abs() < f64::EPSILON);
        assert_eq!(m.suggested_transformation, Some("x.unwrap_or(1)"));
    }

    #[test]
    fn test_record_shape() {
        let pattern = pattern("x.unwrap_or(1)");
        let m = Match::new(&pattern, "a ?? b", 2, 4);
        let json = serde_json::to_value(m.to_record()).expect("Serialization failed");

        assert_eq!(json["patternId"], "nullish-coalescing");
        assert_eq!(json["matchedText"], "??");
        assert_eq!(json["startLine"], 1);
        assert_eq!(json["endLine"], 1);
        assert_eq!(json["suggestedTransformation"], "x.unwrap_or(1)");
    }

    #[test]
    fn test_record_omits_missing_transformation() {
        let pattern = pattern("   ");
        let m = Match::new(&pattern, "a ?? b", 2, 4);
        assert!(m.suggested_transformation.is_none());

        let json = serde_json::to_value(MatchRecord::from(&m)).expect("Serialization failed");
        assert!(json.get("suggestedTransformation").is_none());
    }
}
