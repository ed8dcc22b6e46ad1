//! Error types for the idiom-detect crate.
//!
//! This module provides the [`DetectError`] type for errors that can occur
//! while scanning a directory of source files.
//!
//! Detection over an in-memory snippet never fails; a rule that does not
//! compile is skipped and reported through
//! [`Detector::rejected_rules`](crate::Detector::rejected_rules) instead.

use camino::Utf8PathBuf;

/// Errors that can occur during scanning operations.
///
/// # Error Recovery Strategy
///
/// - **Walker errors** ([`DetectError::Walk`]): Fatal - propagate immediately
/// - **File read errors** ([`DetectError::Read`]): Log warning, skip file, continue scan
/// - **Oversized files** ([`DetectError::TooLarge`]): Log warning, skip file, continue scan
///
/// # Examples
///
/// ```
/// use idiom_detect::DetectError;
///
/// fn handle_error(err: &DetectError) {
///     match err {
///         DetectError::Walk(e) => eprintln!("Walk error: {e}"),
///         DetectError::Read { path, .. } => eprintln!("Read error: {path}"),
///         DetectError::TooLarge { path, size, .. } => eprintln!("Skipped {path} ({size} bytes)"),
///         DetectError::Config(msg) => eprintln!("Config error: {msg}"),
///         DetectError::NonUtf8Path(p) => eprintln!("Invalid path: {}", p.display()),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// Failed to walk a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to read a file, or the file is not valid UTF-8 text.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file exceeds the configured size limit.
    #[error("file {path} is {size} bytes, larger than the {limit} byte limit")]
    TooLarge {
        /// The path of the skipped file.
        path: Utf8PathBuf,
        /// The file's size in bytes.
        size: u64,
        /// The configured limit in bytes.
        limit: u64,
    },

    /// Invalid scanner configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

impl DetectError {
    /// Creates a new [`DetectError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`DetectError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if this error is recoverable (scanning can continue).
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::TooLarge { .. })
    }

    /// Returns `true` if this error is fatal (scanning should stop).
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Read { path, .. } | Self::TooLarge { path, .. } => Some(path),
            Self::Walk(_) | Self::Config(_) | Self::NonUtf8Path(_) => None,
        }
    }
}
