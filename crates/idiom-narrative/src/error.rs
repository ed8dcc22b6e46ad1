//! Error types for the idiom-narrative crate.

/// Errors that can occur while loading a narrative template document.
///
/// Generation itself never fails: missing bundles fall back to `default`
/// and then to an empty bundle. These errors only arise when a substituted
/// template document is malformed.
///
/// # Examples
///
/// ```
/// use idiom_narrative::TemplateError;
///
/// let err = TemplateError::UnknownCategory("lambdas".to_owned());
/// assert_eq!(err.to_string(), "template bundle for unknown category 'lambdas'");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The template document could not be parsed.
    #[error("failed to parse narrative templates: {0}")]
    Parse(#[from] serde_json::Error),

    /// The template document declares a version this build cannot read.
    #[error("unsupported template data version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// The declared version.
        found: u32,
        /// The version this build reads.
        supported: u32,
    },

    /// A bundle key is neither `default` nor a pattern category name.
    #[error("template bundle for unknown category '{0}'")]
    UnknownCategory(String),
}
