//! Domain types for idiom-coach.
//!
//! # Module Organization
//!
//! - [`category`] - Pattern categories, difficulty levels, semantic glyph categories
//! - [`glyph`] - Symbolic annotations for programming concepts
//! - [`location`] - Byte and line spans inside a source snippet
//! - [`narrative`] - The five-part explanation attached to a pattern
//! - [`pattern`] - Cataloged source idioms
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use idiom_core::{Pattern, PatternCategory, Narrative};
//! ```

pub mod category;
pub mod glyph;
pub mod location;
pub mod narrative;
pub mod pattern;

pub use category::{Difficulty, PatternCategory, SemanticCategory};
pub use glyph::Glyph;
pub use location::SourceSpan;
pub use narrative::{Narrative, NarrativeSection};
pub use pattern::Pattern;
