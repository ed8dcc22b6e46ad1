//! The five-part explanation attached to a pattern.

use serde::{Deserialize, Serialize};

/// One of the five sections of a [`Narrative`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NarrativeSection {
    /// What the reader already got right.
    Celebrate,
    /// Why the gap to the target language is smaller than it looks.
    Minimize,
    /// What the target-language version improves.
    Better,
    /// The safety guarantee gained.
    Safety,
    /// A pointer to a concrete example.
    Example,
}

impl NarrativeSection {
    /// All sections in display order.
    pub const ALL: [Self; 5] = [
        Self::Celebrate,
        Self::Minimize,
        Self::Better,
        Self::Safety,
        Self::Example,
    ];

    /// Returns the display label for this section.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Celebrate => "Celebrate",
            Self::Minimize => "Minimize",
            Self::Better => "Better",
            Self::Safety => "Safety",
            Self::Example => "Example",
        }
    }

    /// Returns the lowercase key used for CSS classes and JSON fields.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Celebrate => "celebrate",
            Self::Minimize => "minimize",
            Self::Better => "better",
            Self::Safety => "safety",
            Self::Example => "example",
        }
    }
}

/// A structured, encouraging explanation of a pattern.
///
/// Author-written narratives have all five fields non-empty. A narrative
/// generated from an empty template pool may carry empty fields.
///
/// # Examples
///
/// ```
/// use idiom_core::{Narrative, NarrativeSection};
///
/// let narrative = Narrative {
///     celebrate: "You already guard against missing values.".to_owned(),
///     minimize: "Option is the same idea with a name.".to_owned(),
///     better: "The compiler remembers the check for you.".to_owned(),
///     safety: "No null dereference can reach production.".to_owned(),
///     example: "let name = user.map(|u| u.name);".to_owned(),
/// };
///
/// assert!(narrative.is_well_formed());
/// assert_eq!(narrative.section(NarrativeSection::Safety), narrative.safety);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Narrative {
    /// What the reader already got right.
    pub celebrate: String,
    /// Why the gap to the target language is smaller than it looks.
    pub minimize: String,
    /// What the target-language version improves.
    pub better: String,
    /// The safety guarantee gained.
    pub safety: String,
    /// A pointer to a concrete example.
    pub example: String,
}

impl Narrative {
    /// Returns the text of one section.
    #[must_use]
    pub fn section(&self, section: NarrativeSection) -> &str {
        match section {
            NarrativeSection::Celebrate => &self.celebrate,
            NarrativeSection::Minimize => &self.minimize,
            NarrativeSection::Better => &self.better,
            NarrativeSection::Safety => &self.safety,
            NarrativeSection::Example => &self.example,
        }
    }

    /// Returns every section paired with its text, in display order.
    #[must_use]
    pub fn sections(&self) -> [(NarrativeSection, &str); 5] {
        NarrativeSection::ALL.map(|section| (section, self.section(section)))
    }

    /// Returns `true` if every field is non-empty.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.sections().iter().all(|(_, text)| !text.trim().is_empty())
    }
}
