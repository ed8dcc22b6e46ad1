//! Directory traversal for JavaScript and TypeScript sources.
//!
//! This module provides [`FileWalker`], which uses the `ignore` crate to
//! walk directories while respecting `.gitignore` patterns.
//!
//! # Features
//!
//! - Respects `.gitignore` and `.ignore` patterns
//! - Filters by a configurable extension list (`js`, `jsx`, `mjs`, `cjs`,
//!   `ts`, `tsx` by default)
//! - Skips hidden entries and well-known build directories
//! - Converts paths to UTF-8 [`Utf8PathBuf`](camino::Utf8PathBuf)
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use idiom_detect::FileWalker;
//!
//! let walker = FileWalker::new(Utf8Path::new("./src"))?;
//! for path in walker.collect_paths()? {
//!     println!("Found: {path}");
//! }
//! # Ok::<(), idiom_detect::DetectError>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use idiom_core::ScanConfig;
use ignore::WalkBuilder;

use crate::error::DetectError;

/// Directories that never hold hand-written sources worth coaching on.
const SKIP_DIRECTORIES: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    ".git",
    "coverage",
    ".turbo",
    ".next",
    ".nuxt",
    ".cache",
];

/// Extensions scanned when none are configured.
const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx"];

/// A file walker that discovers source files in a directory tree.
///
/// Paths are collected single-threaded and returned sorted, so callers that
/// then analyze in parallel still report in a stable order.
#[derive(Debug)]
pub struct FileWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Extensions to include, without the leading dot.
    extensions: Vec<String>,
    /// Additional directories to skip (beyond [`SKIP_DIRECTORIES`]).
    skip_dirs: Vec<String>,
    /// Whether to follow symbolic links.
    follow_links: bool,
}

impl FileWalker {
    /// Creates a walker over `root` with the default extensions.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Config`] if the root path doesn't exist or
    /// isn't a directory.
    pub fn new(root: &Utf8Path) -> Result<Self, DetectError> {
        if !root.exists() {
            return Err(DetectError::config(format!(
                "root path does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(DetectError::config(format!(
                "root path is not a directory: {root}"
            )));
        }

        Ok(Self {
            root: root.to_owned(),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            skip_dirs: Vec::new(),
            follow_links: false,
        })
    }

    /// Creates a walker over `root` configured from a [`ScanConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn from_config(root: &Utf8Path, config: &ScanConfig) -> Result<Self, DetectError> {
        let mut walker = Self::new(root)?.with_follow_links(config.follow_links);
        walker.skip_dirs.extend(config.skip_dirs.iter().cloned());
        if !config.file_extensions.is_empty() {
            walker.extensions.clone_from(&config.file_extensions);
        }
        Ok(walker)
    }

    /// Replaces the extension list.
    #[must_use]
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(ToString::to_string).collect();
        self
    }

    /// Adds directories to skip during traversal.
    ///
    /// These are in addition to the default skip list (`node_modules`, `dist`, etc.).
    #[must_use]
    pub fn with_skip_dirs(mut self, dirs: &[&str]) -> Self {
        self.skip_dirs.extend(dirs.iter().map(ToString::to_string));
        self
    }

    /// Configures whether to follow symbolic links.
    ///
    /// By default, symbolic links are not followed.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Collects all matching source file paths, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Walk`] if directory traversal fails.
    /// Returns [`DetectError::NonUtf8Path`] if a non-UTF-8 path is encountered.
    pub fn collect_paths(&self) -> Result<Vec<Utf8PathBuf>, DetectError> {
        let mut paths = Vec::new();

        for result in self.build_walker() {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let utf8_path = Utf8Path::from_path(path)
                .ok_or_else(|| DetectError::NonUtf8Path(path.to_owned()))?;

            if !self.is_source_file(utf8_path) || self.should_skip_path(utf8_path) {
                continue;
            }

            paths.push(utf8_path.to_owned());
        }

        paths.sort();
        Ok(paths)
    }

    /// Builds the ignore walker with configured settings.
    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            // .gitignore, .ignore, hidden files
            .standard_filters(true)
            .follow_links(self.follow_links)
            // Walk on one thread; analysis is parallelized afterwards
            .threads(1)
            .require_git(false)
            .build()
    }

    /// Checks if a path has one of the configured extensions.
    fn is_source_file(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Checks if any path component names a skipped directory.
    fn should_skip_path(&self, path: &Utf8Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative.components().any(|component| {
            let name = component.as_str();
            SKIP_DIRECTORIES.contains(&name) || self.skip_dirs.iter().any(|d| d == name)
        })
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}
