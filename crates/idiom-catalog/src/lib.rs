//! Glyph registry and pattern catalog for idiom-coach.
//!
//! This crate owns the static knowledge base:
//!
//! - [`GlyphRegistry`]: core and extended glyph tables, the category glyph
//!   table, annotation and the Markdown legend
//! - [`PatternCatalog`]: the ordered, id-indexed set of [`Pattern`]s
//! - [`CatalogStats`]: counts by category and difficulty
//!
//! Both the registry and the catalog are built from JSON embedded in the
//! binary and can be rebuilt from substituted documents. Validation happens
//! once, at construction; afterwards every lookup is infallible.
//!
//! [`Pattern`]: idiom_core::Pattern

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod glyphs;
pub mod stats;

pub use catalog::{PatternCatalog, SUPPORTED_DATA_VERSION};
pub use error::CatalogError;
pub use glyphs::{GLYPHS_PER_CATEGORY, GlyphRegistry};
pub use stats::CatalogStats;
