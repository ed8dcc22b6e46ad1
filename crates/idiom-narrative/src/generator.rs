//! Narrative generation.
//!
//! Two strategies produce a [`Narrative`]:
//!
//! - **Fixed**: the author-written narrative embedded in the pattern,
//!   returned unchanged. Deterministic; this is the default.
//! - **Variety**: one sentence drawn uniformly from each slot of the
//!   category's template bundle, plus a generated example pointer.
//!   Reproducible only with a seeded [`RandomSource`].
//!
//! [`NarrativeGenerator::explain`] selects between them with an
//! [`ExplainMode`].

use idiom_core::{Narrative, NarrativeConfig, NarrativeSection, Pattern, PatternCategory};

use crate::random::{RandomSource, pick};
use crate::templates::{TemplateBundle, TemplateStore};

/// Congratulations shown after a pattern is recognized. `{name}` is the
/// pattern name.
const SUCCESS_MESSAGES: &[&str] = &[
    "Nice work! You've used {name}.",
    "Well spotted: {name} is a solid idiom.",
    "Great instinct reaching for {name}.",
    "{name} recognized. You're already thinking in patterns.",
    "Good call using {name} here.",
];

/// How [`NarrativeGenerator::explain`] builds a narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExplainMode {
    /// The pattern's own narrative.
    #[default]
    Fixed,
    /// A narrative drawn from the category's template bundle.
    Variety,
}

impl ExplainMode {
    /// Returns the mode selected by a `variety` flag.
    #[inline]
    #[must_use]
    pub const fn from_variety(variety: bool) -> Self {
        if variety { Self::Variety } else { Self::Fixed }
    }
}

/// Produces narratives, success messages and hints.
///
/// Templated sentences are drawn verbatim from the store's pools. Build the
/// store with [`TemplateStore::with_target_language`] to fill in the target
/// language; the generator's own target only names the language in the
/// example sentence and generic hints.
///
/// # Examples
///
/// ```
/// use idiom_core::PatternCategory;
/// use idiom_narrative::{NarrativeGenerator, RngSource, TemplateStore};
///
/// let templates = TemplateStore::builtin()?.with_target_language("Rust");
/// let generator = NarrativeGenerator::new(&templates, "Rust");
/// let mut rng = RngSource::seeded(3);
///
/// let narrative =
///     generator.generate_for_category(PatternCategory::NullSafety, "Optional Chaining", &mut rng);
/// assert_eq!(narrative.example, "See how the Optional Chaining pattern works in Rust!");
/// assert!(narrative.is_well_formed());
/// # Ok::<(), idiom_narrative::TemplateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NarrativeGenerator<'t> {
    templates: &'t TemplateStore,
    target_language: String,
}

impl<'t> NarrativeGenerator<'t> {
    /// Creates a generator explaining towards `target_language`.
    #[must_use]
    pub fn new(templates: &'t TemplateStore, target_language: impl Into<String>) -> Self {
        Self {
            templates,
            target_language: target_language.into(),
        }
    }

    /// Creates a generator from a [`NarrativeConfig`].
    #[must_use]
    pub fn from_config(templates: &'t TemplateStore, config: &NarrativeConfig) -> Self {
        Self::new(templates, config.target_language.clone())
    }

    /// Returns the target language name.
    #[inline]
    #[must_use]
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Returns the pattern's own narrative, unchanged.
    ///
    /// A method so both strategies are reached through the generator.
    #[inline]
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn narrative_of<'p>(&self, pattern: &'p Pattern) -> &'p Narrative {
        &pattern.narrative
    }

    /// Generates a templated narrative for a category.
    ///
    /// Each slot takes one sentence from the resolved bundle, unchanged; an
    /// empty pool yields an empty string. The example is always
    /// `"See how the {pattern_name} pattern works in {target}!"`.
    pub fn generate_for_category<R>(
        &self,
        category: PatternCategory,
        pattern_name: &str,
        rng: &mut R,
    ) -> Narrative
    where
        R: RandomSource + ?Sized,
    {
        self.generate_from_bundle(self.templates.resolve(category), pattern_name, rng)
    }

    /// Generates a templated narrative for a category name.
    ///
    /// Unknown names use the `default` bundle.
    pub fn generate<R>(&self, category_key: &str, pattern_name: &str, rng: &mut R) -> Narrative
    where
        R: RandomSource + ?Sized,
    {
        self.generate_from_bundle(self.templates.resolve_key(category_key), pattern_name, rng)
    }

    /// Builds a narrative for a pattern in the given mode.
    pub fn explain<R>(&self, pattern: &Pattern, mode: ExplainMode, rng: &mut R) -> Narrative
    where
        R: RandomSource + ?Sized,
    {
        match mode {
            ExplainMode::Fixed => self.narrative_of(pattern).clone(),
            ExplainMode::Variety => {
                self.generate_for_category(pattern.category, &pattern.name, rng)
            }
        }
    }

    /// Returns a congratulation naming the pattern.
    pub fn success_message<R>(&self, pattern_name: &str, rng: &mut R) -> String
    where
        R: RandomSource + ?Sized,
    {
        pick(rng, SUCCESS_MESSAGES)
            .map(|message| message.replace("{name}", pattern_name))
            .unwrap_or_default()
    }

    /// Returns a hint drawn from the pattern's teaching material.
    ///
    /// One of best practices, learning objectives or common mistakes is
    /// chosen uniformly and its first entry quoted. When the chosen list is
    /// empty a generic hint is returned instead.
    pub fn hint<R>(&self, pattern: &Pattern, rng: &mut R) -> String
    where
        R: RandomSource + ?Sized,
    {
        let sources: [(&str, &[String]); 3] = [
            ("Tip", pattern.best_practices.as_slice()),
            ("Goal", pattern.learning_objectives.as_slice()),
            ("Watch out", pattern.common_mistakes.as_slice()),
        ];

        match pick(rng, &sources) {
            Some((label, entries)) if !entries.is_empty() => {
                format!("{label}: {}", entries[0])
            }
            _ => format!(
                "Hint: look for where {} could express {} more directly.",
                self.target_language, pattern.name
            ),
        }
    }

    fn generate_from_bundle<R>(
        &self,
        bundle: &TemplateBundle,
        pattern_name: &str,
        rng: &mut R,
    ) -> Narrative
    where
        R: RandomSource + ?Sized,
    {
        let mut draw = |section: NarrativeSection| {
            pick(&mut *rng, bundle.pool(section))
                .cloned()
                .unwrap_or_default()
        };

        Narrative {
            celebrate: draw(NarrativeSection::Celebrate),
            minimize: draw(NarrativeSection::Minimize),
            better: draw(NarrativeSection::Better),
            safety: draw(NarrativeSection::Safety),
            example: format!(
                "See how the {pattern_name} pattern works in {}!",
                self.target_language
            ),
        }
    }
}
