//! Glyph registry: symbol lookup, category glyph sets, annotation and legend.
//!
//! The registry holds two glyph tables, *core* and *extended*, and a data
//! table mapping each [`PatternCategory`] to exactly three glyph symbols.
//! The mapping is loaded from JSON and validated when the registry is built:
//!
//! - every pattern category has an entry
//! - every entry lists exactly [`GLYPHS_PER_CATEGORY`] symbols
//! - every listed symbol is defined in the registry
//!
//! Adding a pattern category is therefore a data change; forgetting its
//! glyph triple is reported as a [`CatalogError`] at load time.
//!
//! # Examples
//!
//! ```
//! use idiom_catalog::GlyphRegistry;
//! use idiom_core::PatternCategory;
//!
//! let registry = GlyphRegistry::builtin()?;
//! let symbols = registry.glyphs_for_pattern_category(PatternCategory::NullSafety);
//! assert_eq!(symbols.len(), 3);
//!
//! let annotated = GlyphRegistry::annotate("user?.name", symbols);
//! assert!(annotated.ends_with("\nuser?.name"));
//! # Ok::<(), idiom_catalog::CatalogError>(())
//! ```

use std::collections::BTreeMap;
use std::fmt::Write;

use idiom_core::{FxHashMap, Glyph, PatternCategory, SemanticCategory};
use tracing::debug;

use crate::error::CatalogError;

/// Number of glyphs every pattern category maps to.
pub const GLYPHS_PER_CATEGORY: usize = 3;

/// The built-in category glyph table.
const BUILTIN_CATEGORY_GLYPHS: &str = include_str!("../data/category_glyphs.json");

/// Read-only registry of glyphs and the category glyph table.
///
/// Built once and shared by reference; it is `Send + Sync` and never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct GlyphRegistry {
    /// Core glyphs followed by extended glyphs.
    glyphs: Vec<Glyph>,
    /// Number of core glyphs at the front of `glyphs`.
    core_len: usize,
    /// Symbol to index into `glyphs`.
    by_symbol: FxHashMap<String, usize>,
    /// Validated glyph triple per category.
    category_glyphs: FxHashMap<PatternCategory, [String; GLYPHS_PER_CATEGORY]>,
}

impl GlyphRegistry {
    /// Builds the registry from the built-in glyph tables and category table.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(core_glyphs(), extended_glyphs(), BUILTIN_CATEGORY_GLYPHS)
    }

    /// Builds a registry from glyph tables and a JSON category table.
    ///
    /// The category table is a JSON object keyed by category wire name
    /// (`"null_safety"`), each value an array of glyph symbols.
    pub fn new(
        core: Vec<Glyph>,
        extended: Vec<Glyph>,
        category_table_json: &str,
    ) -> Result<Self, CatalogError> {
        let core_len = core.len();
        let mut glyphs = core;
        glyphs.extend(extended);

        let mut by_symbol = FxHashMap::default();
        for (index, glyph) in glyphs.iter().enumerate() {
            if by_symbol.insert(glyph.symbol.clone(), index).is_some() {
                return Err(CatalogError::DuplicateGlyph(glyph.symbol.clone()));
            }
        }

        let table: BTreeMap<String, Vec<String>> = serde_json::from_str(category_table_json)
            .map_err(|e| CatalogError::parse("category glyph table", e))?;
        let category_glyphs = validate_category_table(table, &by_symbol)?;

        debug!(
            glyphs = glyphs.len(),
            core = core_len,
            categories = category_glyphs.len(),
            "glyph registry built"
        );

        Ok(Self {
            glyphs,
            core_len,
            by_symbol,
            category_glyphs,
        })
    }

    /// Returns every glyph, core glyphs first.
    #[inline]
    #[must_use]
    pub fn all_glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Returns the core glyphs.
    #[inline]
    #[must_use]
    pub fn core_glyphs(&self) -> &[Glyph] {
        &self.glyphs[..self.core_len]
    }

    /// Returns the extended glyphs.
    #[inline]
    #[must_use]
    pub fn extended_glyphs(&self) -> &[Glyph] {
        &self.glyphs[self.core_len..]
    }

    /// Looks up a glyph by its symbol.
    #[must_use]
    pub fn by_symbol(&self, symbol: &str) -> Option<&Glyph> {
        self.by_symbol.get(symbol).map(|&index| &self.glyphs[index])
    }

    /// Returns every glyph in a semantic category, in registry order.
    #[must_use]
    pub fn by_category(&self, category: SemanticCategory) -> Vec<&Glyph> {
        self.glyphs
            .iter()
            .filter(|glyph| glyph.semantic_category == category)
            .collect()
    }

    /// Returns the three glyph symbols for a pattern category.
    ///
    /// Construction guarantees every category has an entry, so this
    /// always yields [`GLYPHS_PER_CATEGORY`] symbols for a built registry.
    #[must_use]
    pub fn glyphs_for_pattern_category(&self, category: PatternCategory) -> &[String] {
        self.category_glyphs
            .get(&category)
            .map_or(&[][..], |triple| triple.as_slice())
    }

    /// Prepends a line of space-joined glyph symbols to `code`.
    ///
    /// The code itself is returned unchanged below the glyph line.
    ///
    /// # Examples
    ///
    /// ```
    /// use idiom_catalog::GlyphRegistry;
    ///
    /// let out = GlyphRegistry::annotate("let x = 1;", &["≡", "✓"]);
    /// assert_eq!(out, "≡ ✓\nlet x = 1;");
    /// ```
    #[must_use]
    pub fn annotate<S: AsRef<str>>(code: &str, symbols: &[S]) -> String {
        let line = symbols
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        format!("{line}\n{code}")
    }

    /// Renders a Markdown legend of every glyph, grouped by semantic category.
    ///
    /// Categories appear in [`SemanticCategory::LEGEND_ORDER`]; categories
    /// without glyphs are omitted.
    #[must_use]
    pub fn legend(&self) -> String {
        let mut out = String::from("# Glyph Legend\n");

        for category in SemanticCategory::LEGEND_ORDER {
            let glyphs = self.by_category(category);
            if glyphs.is_empty() {
                continue;
            }

            let _ = write!(out, "\n## {}\n\n", category.label());
            for glyph in glyphs {
                let _ = writeln!(
                    out,
                    "- `{}` **{}**: {} Example: `{}`",
                    glyph.symbol, glyph.name, glyph.meaning, glyph.usage_example
                );
            }
        }

        out
    }
}

/// Checks totality, arity and symbol existence of the category table.
fn validate_category_table(
    table: BTreeMap<String, Vec<String>>,
    by_symbol: &FxHashMap<String, usize>,
) -> Result<FxHashMap<PatternCategory, [String; GLYPHS_PER_CATEGORY]>, CatalogError> {
    let mut validated = FxHashMap::default();

    for (key, symbols) in table {
        let category: PatternCategory = key
            .parse()
            .map_err(|_| CatalogError::UnknownCategory(key.clone()))?;

        if let Some(symbol) = symbols.iter().find(|s| !by_symbol.contains_key(s.as_str())) {
            return Err(CatalogError::UnknownGlyph {
                category,
                symbol: symbol.clone(),
            });
        }

        let found = symbols.len();
        let triple: [String; GLYPHS_PER_CATEGORY] =
            symbols.try_into().map_err(|_| CatalogError::GlyphCount {
                category,
                found,
                expected: GLYPHS_PER_CATEGORY,
            })?;

        validated.insert(category, triple);
    }

    if let Some(missing) = PatternCategory::ALL
        .into_iter()
        .find(|category| !validated.contains_key(category))
    {
        return Err(CatalogError::MissingCategoryGlyphs(missing));
    }

    Ok(validated)
}

/// The core glyph table.
#[must_use]
pub fn core_glyphs() -> Vec<Glyph> {
    use SemanticCategory::{Flow, Safety, State, Structure, Transformation};

    vec![
        Glyph::new(
            "→",
            "Transform",
            "Converts a value from one shape into another.",
            Transformation,
            "items.iter().map(|n| n * 2)",
        ),
        Glyph::new(
            "λ",
            "Closure",
            "An anonymous function that can capture its surroundings.",
            Transformation,
            "let add_one = |x: i32| x + 1;",
        ),
        Glyph::new(
            "⊕",
            "Combine",
            "Folds many values into one.",
            Transformation,
            "items.iter().fold(0, |acc, n| acc + n)",
        ),
        Glyph::new(
            "◇",
            "Option",
            "A value that may be absent, made explicit in the type.",
            Safety,
            "fn find(id: u32) -> Option<User>",
        ),
        Glyph::new(
            "⚠",
            "Fallible",
            "An operation that can fail and says so in its signature.",
            Safety,
            "fn load() -> Result<Config, Error>",
        ),
        Glyph::new(
            "✓",
            "Checked",
            "A guarantee the compiler enforces before the code runs.",
            Safety,
            "match shape { Shape::Circle(r) => r, Shape::Square(s) => s }",
        ),
        Glyph::new(
            "⇢",
            "Async",
            "Work that completes later without blocking the caller.",
            Flow,
            "let body = fetch(url).await?;",
        ),
        Glyph::new(
            "↻",
            "Iterate",
            "Repeats work for each element of a sequence.",
            Flow,
            "for item in &items { process(item); }",
        ),
        Glyph::new(
            "⑂",
            "Branch",
            "Chooses a path based on a value.",
            Flow,
            "match status { Status::Active => run(), _ => wait() }",
        ),
        Glyph::new(
            "▣",
            "Type",
            "A named shape for data.",
            Structure,
            "struct User { name: String, age: u32 }",
        ),
        Glyph::new(
            "⊢",
            "Contract",
            "Behavior a type promises to provide.",
            Structure,
            "impl Display for User { /* ... */ }",
        ),
        Glyph::new(
            "≡",
            "Immutable",
            "A binding that never changes after creation.",
            State,
            "let limit = 10;",
        ),
    ]
}

/// The extended glyph table.
#[must_use]
pub fn extended_glyphs() -> Vec<Glyph> {
    use SemanticCategory::{Data, Flow, Safety, State, Structure};

    vec![
        Glyph::new(
            "∅",
            "Absent",
            "The explicit empty case of an optional value.",
            Safety,
            "let nothing: Option<u32> = None;",
        ),
        Glyph::new(
            "∴",
            "Propagate",
            "Hands an error back to the caller instead of handling it here.",
            Flow,
            "let text = std::fs::read_to_string(path)?;",
        ),
        Glyph::new(
            "⟨⟩",
            "Generic",
            "Code written once for many types.",
            Structure,
            "fn first<T>(items: &[T]) -> Option<&T>",
        ),
        Glyph::new(
            "⊂",
            "Module",
            "A unit of code organization and visibility.",
            Structure,
            "mod parser; pub use parser::parse;",
        ),
        Glyph::new(
            "✎",
            "Mutable",
            "A binding explicitly marked as changeable.",
            State,
            "let mut count = 0;",
        ),
        Glyph::new(
            "⇄",
            "Shared",
            "State reachable from more than one place.",
            State,
            "let state = Arc::new(Mutex::new(State::default()));",
        ),
        Glyph::new(
            "⋯",
            "Sequence",
            "An ordered collection of values.",
            Data,
            "let names: Vec<String> = Vec::new();",
        ),
        Glyph::new(
            "⌗",
            "Keyed",
            "Values looked up by key.",
            Data,
            "let mut ages: HashMap<String, u32> = HashMap::new();",
        ),
        Glyph::new(
            "❝",
            "Text",
            "Owned or borrowed string data.",
            Data,
            "let greeting = format!(\"Hello, {name}\");",
        ),
        Glyph::new(
            "⊎",
            "Variant",
            "A value that is exactly one of several shapes.",
            Data,
            "enum Shape { Circle(f64), Square(f64) }",
        ),
    ]
}
