//! Classification enums for patterns and glyphs.
//!
//! Two independent axes exist:
//!
//! - [`PatternCategory`] groups patterns by transformation topic (21 values)
//! - [`SemanticCategory`] groups glyphs by the concept they denote (6 values)
//!
//! [`Difficulty`] orders patterns for pedagogical sequencing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseValueError;

/// Normalizes a user-supplied name for comparison against wire names.
///
/// `Null Safety`, `null-safety`, `NullSafety` and `null_safety` all
/// normalize to `nullsafety`.
fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The transformation topic a pattern belongs to.
///
/// Every category resolves to exactly three glyphs and to a narrative
/// template bundle (falling back to the default bundle).
///
/// # Examples
///
/// ```
/// use idiom_core::PatternCategory;
///
/// assert_eq!(PatternCategory::NullSafety.as_str(), "null_safety");
/// assert_eq!("null-safety".parse::<PatternCategory>(), Ok(PatternCategory::NullSafety));
/// assert_eq!(PatternCategory::ALL.len(), 21);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PatternCategory {
    /// `null`/`undefined` checks, optional chaining, nullish coalescing.
    NullSafety,
    /// Promises and `async`/`await`.
    Async,
    /// `try`/`catch` and thrown errors.
    ErrorHandling,
    /// `map`, `filter`, `find` and friends on arrays.
    ArrayOperations,
    /// Object spread, property copying and merging.
    ObjectManipulation,
    /// Template literals and string methods.
    StringManipulation,
    /// `typeof` and `instanceof` checks.
    TypeChecking,
    /// Object and array destructuring.
    Destructuring,
    /// `for...of` and `forEach` loops.
    Iteration,
    /// `reduce` and function-taking functions.
    HigherOrderFunctions,
    /// Functions capturing their environment.
    Closures,
    /// `class` declarations and inheritance.
    Classes,
    /// TypeScript `interface` declarations.
    Interfaces,
    /// Type parameters.
    Generics,
    /// TypeScript union types.
    UnionTypes,
    /// TypeScript `enum` declarations.
    Enums,
    /// ES module imports and exports.
    Modules,
    /// `const` bindings and frozen objects.
    Immutability,
    /// `Map`, `Set` and their weak variants.
    Collections,
    /// `Promise.all` and other concurrent composition.
    Concurrency,
    /// `switch` statements and branching on shape.
    PatternMatching,
}

impl PatternCategory {
    /// All categories in declaration order.
    pub const ALL: [Self; 21] = [
        Self::NullSafety,
        Self::Async,
        Self::ErrorHandling,
        Self::ArrayOperations,
        Self::ObjectManipulation,
        Self::StringManipulation,
        Self::TypeChecking,
        Self::Destructuring,
        Self::Iteration,
        Self::HigherOrderFunctions,
        Self::Closures,
        Self::Classes,
        Self::Interfaces,
        Self::Generics,
        Self::UnionTypes,
        Self::Enums,
        Self::Modules,
        Self::Immutability,
        Self::Collections,
        Self::Concurrency,
        Self::PatternMatching,
    ];

    /// Returns the snake_case wire name used in data files and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NullSafety => "null_safety",
            Self::Async => "async",
            Self::ErrorHandling => "error_handling",
            Self::ArrayOperations => "array_operations",
            Self::ObjectManipulation => "object_manipulation",
            Self::StringManipulation => "string_manipulation",
            Self::TypeChecking => "type_checking",
            Self::Destructuring => "destructuring",
            Self::Iteration => "iteration",
            Self::HigherOrderFunctions => "higher_order_functions",
            Self::Closures => "closures",
            Self::Classes => "classes",
            Self::Interfaces => "interfaces",
            Self::Generics => "generics",
            Self::UnionTypes => "union_types",
            Self::Enums => "enums",
            Self::Modules => "modules",
            Self::Immutability => "immutability",
            Self::Collections => "collections",
            Self::Concurrency => "concurrency",
            Self::PatternMatching => "pattern_matching",
        }
    }

    /// Returns a human-readable label.
    ///
    /// # Examples
    ///
    /// ```
    /// use idiom_core::PatternCategory;
    ///
    /// assert_eq!(PatternCategory::HigherOrderFunctions.label(), "Higher-Order Functions");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NullSafety => "Null Safety",
            Self::Async => "Async",
            Self::ErrorHandling => "Error Handling",
            Self::ArrayOperations => "Array Operations",
            Self::ObjectManipulation => "Object Manipulation",
            Self::StringManipulation => "String Manipulation",
            Self::TypeChecking => "Type Checking",
            Self::Destructuring => "Destructuring",
            Self::Iteration => "Iteration",
            Self::HigherOrderFunctions => "Higher-Order Functions",
            Self::Closures => "Closures",
            Self::Classes => "Classes",
            Self::Interfaces => "Interfaces",
            Self::Generics => "Generics",
            Self::UnionTypes => "Union Types",
            Self::Enums => "Enums",
            Self::Modules => "Modules",
            Self::Immutability => "Immutability",
            Self::Collections => "Collections",
            Self::Concurrency => "Concurrency",
            Self::PatternMatching => "Pattern Matching",
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternCategory {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|category| normalize_name(category.as_str()) == wanted)
            .ok_or_else(|| ParseValueError::UnknownCategory(s.to_owned()))
    }
}

/// How much prior knowledge a pattern assumes.
///
/// Ordered `Beginner < Intermediate < Advanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Difficulty {
    /// Idioms most newcomers already write.
    Beginner,
    /// Idioms that need some familiarity with the target type system.
    Intermediate,
    /// Idioms touching ownership, generics or concurrency.
    Advanced,
}

impl Difficulty {
    /// All difficulty levels, easiest first.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Returns the snake_case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| ParseValueError::UnknownDifficulty(s.to_owned()))
    }
}

/// The concept a glyph denotes, independent of any syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SemanticCategory {
    /// Turning one value or shape into another.
    Transformation,
    /// Guarantees about absence, failure and checking.
    Safety,
    /// Control flow: branching, looping, suspension.
    Flow,
    /// Named shapes, contracts and modules.
    Structure,
    /// Mutability and sharing.
    State,
    /// Sequences, keyed values, text and variants.
    Data,
}

impl SemanticCategory {
    /// All semantic categories in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Transformation,
        Self::Safety,
        Self::Flow,
        Self::Structure,
        Self::State,
        Self::Data,
    ];

    /// The order in which categories appear in the glyph legend.
    pub const LEGEND_ORDER: [Self; 6] = [
        Self::Safety,
        Self::Transformation,
        Self::Flow,
        Self::Structure,
        Self::State,
        Self::Data,
    ];

    /// Returns the snake_case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transformation => "transformation",
            Self::Safety => "safety",
            Self::Flow => "flow",
            Self::Structure => "structure",
            Self::State => "state",
            Self::Data => "data",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transformation => "Transformation",
            Self::Safety => "Safety",
            Self::Flow => "Flow",
            Self::Structure => "Structure",
            Self::State => "State",
            Self::Data => "Data",
        }
    }
}

impl fmt::Display for SemanticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticCategory {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| ParseValueError::UnknownSemanticCategory(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FxHashSet;

    #[test]
    fn test_pattern_category_wire_names_are_unique() {
        let names: FxHashSet<&str> = PatternCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names.len(), PatternCategory::ALL.len());
    }

    #[test]
    fn test_pattern_category_parse_variants() {
        for input in ["null_safety", "null-safety", "Null Safety", "NullSafety", " NULL_SAFETY "] {
            assert_eq!(input.parse::<PatternCategory>(), Ok(PatternCategory::NullSafety));
        }
        assert_eq!(
            "higher-order functions".parse::<PatternCategory>(),
            Ok(PatternCategory::HigherOrderFunctions)
        );
        assert_eq!(
            "sql".parse::<PatternCategory>(),
            Err(ParseValueError::UnknownCategory("sql".to_owned()))
        );
    }

    #[test]
    fn test_pattern_category_round_trips_through_as_str() {
        for category in PatternCategory::ALL {
            assert_eq!(category.as_str().parse::<PatternCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_pattern_category_serialization_matches_as_str() {
        for category in PatternCategory::ALL {
            let json = serde_json::to_string(&category).expect("Serialization failed");
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_difficulty_ordering_and_parse() {
        assert!(Difficulty::Beginner < Difficulty::Intermediate);
        assert!(Difficulty::Intermediate < Difficulty::Advanced);
        assert_eq!("Advanced".parse::<Difficulty>(), Ok(Difficulty::Advanced));
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_semantic_category_legend_order_covers_all() {
        let ordered: FxHashSet<SemanticCategory> =
            SemanticCategory::LEGEND_ORDER.into_iter().collect();
        assert_eq!(ordered.len(), SemanticCategory::ALL.len());
        assert_eq!(SemanticCategory::LEGEND_ORDER[0], SemanticCategory::Safety);
    }
}
