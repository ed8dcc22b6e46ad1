//! Pattern detection over source snippets and directory trees.
//!
//! This crate runs the catalog's detection rules. It has two layers:
//!
//! - [`Detector`]: compiles every rule once and ranks the patterns found in
//!   a snippet (confidence descending, catalog order on ties)
//! - [`scan`]: walks a directory with [`FileWalker`], analyzes files in
//!   parallel with [`FileAnalyzer`] and counts progress in
//!   [`DetectionStats`]
//!
//! # Example
//!
//! ```
//! use idiom_catalog::{GlyphRegistry, PatternCatalog};
//! use idiom_core::DetectConfig;
//! use idiom_detect::Detector;
//!
//! let glyphs = GlyphRegistry::builtin()?;
//! let catalog = PatternCatalog::builtin(&glyphs)?;
//! let detector = Detector::new(&catalog, &DetectConfig::default());
//!
//! let source = "const names = users.filter(u => u.active).map(u => u.name);";
//! let ids: Vec<&str> = detector
//!     .detect(source)
//!     .iter()
//!     .map(|m| m.pattern.id.as_str())
//!     .collect();
//!
//! assert!(ids.contains(&"array-map"));
//! assert!(ids.contains(&"array-filter"));
//! # Ok::<(), idiom_catalog::CatalogError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! scan (directory entry point)
//!     │
//!     ├── FileWalker (collect paths, ignore crate)
//!     │
//!     ├── FileAnalyzer (rayon par_iter, one file per task)
//!     │       │
//!     │       └── Detector (shared by reference)
//!     │               │
//!     │               └── RuleSet (regex, compiled once)
//!     │
//!     └── DetectionStats (atomic counters)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod analyzer;
mod detector;
mod error;
mod matches;
mod rules;
mod stats;
mod walker;

pub use analyzer::{FileAnalyzer, FileOutcome};
pub use detector::Detector;
pub use error::DetectError;
pub use matches::{Match, MatchRecord};
pub use rules::{CompiledRule, RejectedRule, RuleSet};
pub use stats::{DetectionStats, StatsSnapshot};
pub use walker::FileWalker;

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use idiom_core::ScanConfig;
use tracing::info;

/// Matches found in one file.
#[derive(Debug, Clone)]
pub struct FileReport<'c> {
    /// The scanned file.
    pub path: Utf8PathBuf,
    /// Matches, highest confidence first.
    pub matches: Vec<Match<'c>>,
}

/// Result of scanning a directory.
#[derive(Debug)]
pub struct ScanReport<'c> {
    /// One report per analyzed file, in path order.
    pub files: Vec<FileReport<'c>>,
    /// Files that could not be analyzed.
    pub errors: Vec<(Utf8PathBuf, DetectError)>,
    /// Final counters.
    pub stats: StatsSnapshot,
}

impl ScanReport<'_> {
    /// Counts how many files each pattern was found in, keyed by pattern id.
    #[must_use]
    pub fn pattern_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for file in &self.files {
            for m in &file.matches {
                *counts.entry(m.pattern.id.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Scans a directory tree and detects patterns in every source file.
///
/// File-level failures (unreadable or oversized files) are collected in
/// [`ScanReport::errors`]; only a failing directory walk aborts the scan.
///
/// # Errors
///
/// Returns [`DetectError::Config`] if `root` is not a directory,
/// [`DetectError::Walk`] or [`DetectError::NonUtf8Path`] if traversal fails.
pub fn scan<'c>(
    root: &Utf8Path,
    detector: &Detector<'c>,
    config: &ScanConfig,
) -> Result<ScanReport<'c>, DetectError> {
    info!(root = %root, "Starting scan");

    let paths = FileWalker::from_config(root, config)?.collect_paths()?;
    info!(count = paths.len(), "Collected source files");

    let stats = DetectionStats::new();
    let outcomes = FileAnalyzer::new(config.max_file_bytes).analyze_files(&paths, detector, &stats);

    let mut files = Vec::with_capacity(outcomes.len());
    let mut errors = Vec::new();
    for (path, result) in outcomes {
        match result {
            Ok(matches) => files.push(FileReport { path, matches }),
            Err(e) => errors.push((path, e)),
        }
    }

    let stats = stats.snapshot();
    info!(
        files = stats.files,
        matches = stats.matches,
        skipped = stats.skipped,
        errors = stats.errors,
        "Scan complete"
    );

    Ok(ScanReport {
        files,
        errors,
        stats,
    })
}
