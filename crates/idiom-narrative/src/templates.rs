//! Narrative template bundles.
//!
//! A [`TemplateBundle`] holds one pool of interchangeable sentences per
//! narrative slot (celebrate, minimize, better, safety). The
//! [`TemplateStore`] keys bundles by pattern category and keeps one
//! `default` bundle for categories without their own.
//!
//! Lookup never fails: a missing category resolves to `default`, and a
//! store without `default` resolves to an empty bundle.
//!
//! # Data Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "bundles": {
//!     "default": { "celebrate": ["..."], "minimize": ["..."],
//!                  "better": ["..."], "safety": ["..."] },
//!     "null_safety": { "celebrate": ["..."] }
//!   }
//! }
//! ```
//!
//! Sentences may contain `{target}`. [`TemplateStore::with_target_language`]
//! replaces it once, when the store is built, so the pools a caller
//! inspects are exactly the pools narratives are drawn from.

use std::collections::BTreeMap;

use idiom_core::{FxHashMap, NarrativeSection, PatternCategory};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TemplateError;

/// The template data version this build reads.
pub const SUPPORTED_TEMPLATE_VERSION: u32 = 1;

/// Key of the fallback bundle.
pub const DEFAULT_BUNDLE: &str = "default";

/// Placeholder for the target language in template sentences.
pub const TARGET_PLACEHOLDER: &str = "{target}";

/// The built-in template document.
const BUILTIN_TEMPLATES: &str = include_str!("../data/templates.json");

/// Resolved when a store has neither the category nor a default bundle.
static EMPTY_BUNDLE: TemplateBundle = TemplateBundle {
    celebrate: Vec::new(),
    minimize: Vec::new(),
    better: Vec::new(),
    safety: Vec::new(),
};

/// Sentence pools for the four templated narrative slots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateBundle {
    /// Pool for the celebrate slot.
    pub celebrate: Vec<String>,
    /// Pool for the minimize slot.
    pub minimize: Vec<String>,
    /// Pool for the better slot.
    pub better: Vec<String>,
    /// Pool for the safety slot.
    pub safety: Vec<String>,
}

impl TemplateBundle {
    /// Returns the pool for a section. The example section has no pool.
    #[must_use]
    pub fn pool(&self, section: NarrativeSection) -> &[String] {
        match section {
            NarrativeSection::Celebrate => &self.celebrate,
            NarrativeSection::Minimize => &self.minimize,
            NarrativeSection::Better => &self.better,
            NarrativeSection::Safety => &self.safety,
            NarrativeSection::Example => &[],
        }
    }

    /// Replaces [`TARGET_PLACEHOLDER`] in every sentence.
    fn expand_target(&mut self, target_language: &str) {
        for pool in [
            &mut self.celebrate,
            &mut self.minimize,
            &mut self.better,
            &mut self.safety,
        ] {
            for sentence in pool.iter_mut() {
                if sentence.contains(TARGET_PLACEHOLDER) {
                    *sentence = sentence.replace(TARGET_PLACEHOLDER, target_language);
                }
            }
        }
    }

    /// Returns `true` if every pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.celebrate.is_empty()
            && self.minimize.is_empty()
            && self.better.is_empty()
            && self.safety.is_empty()
    }
}

/// On-disk shape of a template document.
#[derive(Debug, Deserialize)]
struct TemplateDocument {
    version: u32,
    bundles: BTreeMap<String, TemplateBundle>,
}

/// Category-keyed template bundles with a default fallback.
///
/// # Examples
///
/// ```
/// use idiom_core::PatternCategory;
/// use idiom_narrative::TemplateStore;
///
/// let store = TemplateStore::builtin()?;
///
/// // Categories without their own bundle share the default one.
/// let generics = store.resolve(PatternCategory::Generics);
/// assert!(std::ptr::eq(generics, store.default_bundle()));
///
/// let null_safety = store.resolve(PatternCategory::NullSafety);
/// assert!(!std::ptr::eq(null_safety, store.default_bundle()));
/// # Ok::<(), idiom_narrative::TemplateError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    bundles: FxHashMap<PatternCategory, TemplateBundle>,
    default: Option<TemplateBundle>,
}

impl TemplateStore {
    /// Builds the store from the built-in template document.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::from_json(BUILTIN_TEMPLATES)
    }

    /// Builds a store from a JSON template document.
    ///
    /// Every key other than `default` must name a pattern category.
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let document: TemplateDocument = serde_json::from_str(json)?;
        if document.version != SUPPORTED_TEMPLATE_VERSION {
            return Err(TemplateError::UnsupportedVersion {
                found: document.version,
                supported: SUPPORTED_TEMPLATE_VERSION,
            });
        }

        let mut store = Self::default();
        for (key, bundle) in document.bundles {
            if key == DEFAULT_BUNDLE {
                store.default = Some(bundle);
                continue;
            }
            let category: PatternCategory = key
                .parse()
                .map_err(|_| TemplateError::UnknownCategory(key.clone()))?;
            store.bundles.insert(category, bundle);
        }

        debug!(
            bundles = store.bundles.len(),
            has_default = store.default.is_some(),
            "Loaded narrative templates"
        );
        Ok(store)
    }

    /// Replaces `{target}` in every sentence of every bundle with
    /// `target_language`.
    ///
    /// # Examples
    ///
    /// ```
    /// use idiom_core::PatternCategory;
    /// use idiom_narrative::TemplateStore;
    ///
    /// let store = TemplateStore::builtin()?.with_target_language("Haskell");
    /// let bundle = store.resolve(PatternCategory::Async);
    /// assert!(bundle.minimize.iter().all(|s| !s.contains("{target}")));
    /// # Ok::<(), idiom_narrative::TemplateError>(())
    /// ```
    #[must_use]
    pub fn with_target_language(mut self, target_language: &str) -> Self {
        for bundle in self.bundles.values_mut().chain(self.default.as_mut()) {
            bundle.expand_target(target_language);
        }
        debug!(target_language, "Expanded template placeholders");
        self
    }

    /// Returns an empty store; every category resolves to an empty bundle.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolves the bundle for a category: its own, else `default`, else
    /// an empty bundle.
    #[must_use]
    pub fn resolve(&self, category: PatternCategory) -> &TemplateBundle {
        self.bundles
            .get(&category)
            .unwrap_or_else(|| self.default_bundle())
    }

    /// Resolves the bundle for a category name.
    ///
    /// Names that are not categories resolve like a category without a
    /// bundle of its own.
    #[must_use]
    pub fn resolve_key(&self, key: &str) -> &TemplateBundle {
        key.parse::<PatternCategory>()
            .map_or_else(|_| self.default_bundle(), |category| self.resolve(category))
    }

    /// Returns the `default` bundle, or an empty bundle if there is none.
    #[must_use]
    pub fn default_bundle(&self) -> &TemplateBundle {
        self.default.as_ref().unwrap_or(&EMPTY_BUNDLE)
    }

    /// Returns `true` if the category has a bundle of its own.
    #[must_use]
    pub fn has_bundle(&self, category: PatternCategory) -> bool {
        self.bundles.contains_key(&category)
    }
}
