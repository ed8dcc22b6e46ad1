//! Narrative templates, generation and formatting for idiom-coach.
//!
//! This crate turns a detected pattern into readable, encouraging text:
//!
//! - [`TemplateStore`]: per-category sentence pools with a `default`
//!   fallback, loaded from embedded JSON
//! - [`NarrativeGenerator`]: the fixed per-pattern narrative, or a
//!   templated one drawn from the pools ("variety mode"), plus success
//!   messages and hints
//! - [`NarrativeFormat`] and [`format`]: plain, HTML and Markdown layouts
//! - [`RandomSource`]: injectable randomness, seeded in tests
//!
//! Nothing in this crate fails at generation time. Missing bundles, empty
//! pools and unknown format selectors all degrade to a defined output.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod format;
mod generator;
mod random;
mod templates;

pub use error::TemplateError;
pub use format::{NarrativeFormat, format};
pub use generator::{ExplainMode, NarrativeGenerator};
pub use random::{RandomSource, RngSource, SequenceSource, pick, pick_index};
pub use templates::{
    DEFAULT_BUNDLE, SUPPORTED_TEMPLATE_VERSION, TARGET_PLACEHOLDER, TemplateBundle, TemplateStore,
};
