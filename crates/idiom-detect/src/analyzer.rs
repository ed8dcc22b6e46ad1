//! Parallel detection over files using rayon.
//!
//! This module provides [`FileAnalyzer`], which reads each file and runs the
//! detector on it, one file per rayon task.
//!
//! # Design
//!
//! Uses the "collect-then-parallelize" pattern:
//!
//! 1. Paths are collected first by [`FileWalker`](crate::FileWalker)
//! 2. `FileAnalyzer` processes paths in parallel with `rayon::par_iter()`
//! 3. Results come back in input order, one per path
//!
//! The detector is shared by reference; it has no mutable state, so no
//! locking is involved. Progress is counted in [`DetectionStats`].

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use tracing::warn;

use crate::detector::Detector;
use crate::error::DetectError;
use crate::matches::Match;
use crate::stats::DetectionStats;

/// Result of analyzing one file.
pub type FileOutcome<'c> = (Utf8PathBuf, Result<Vec<Match<'c>>, DetectError>);

/// Parallel file analyzer.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8PathBuf;
/// use idiom_catalog::{GlyphRegistry, PatternCatalog};
/// use idiom_core::DetectConfig;
/// use idiom_detect::{DetectionStats, Detector, FileAnalyzer};
///
/// let glyphs = GlyphRegistry::builtin()?;
/// let catalog = PatternCatalog::builtin(&glyphs)?;
/// let detector = Detector::new(&catalog, &DetectConfig::default());
/// let stats = DetectionStats::new();
///
/// let paths = vec![Utf8PathBuf::from("src/app.js")];
/// for (path, result) in FileAnalyzer::new(1024 * 1024).analyze_files(&paths, &detector, &stats) {
///     match result {
///         Ok(matches) => println!("{path}: {} matches", matches.len()),
///         Err(e) => eprintln!("{path}: {e}"),
///     }
/// }
/// # Ok::<(), idiom_catalog::CatalogError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FileAnalyzer {
    /// Files larger than this many bytes are skipped.
    max_file_bytes: u64,
}

impl FileAnalyzer {
    /// Creates an analyzer that skips files larger than `max_file_bytes`.
    #[inline]
    #[must_use]
    pub const fn new(max_file_bytes: u64) -> Self {
        Self { max_file_bytes }
    }

    /// Analyzes files in parallel.
    ///
    /// Returns one `(path, result)` pair per input path, in input order.
    /// A failure on one file never stops the others.
    #[must_use]
    pub fn analyze_files<'c>(
        &self,
        paths: &[Utf8PathBuf],
        detector: &Detector<'c>,
        stats: &DetectionStats,
    ) -> Vec<FileOutcome<'c>> {
        paths
            .par_iter()
            .map(|path| {
                let result = self.analyze_single(path, detector);
                match &result {
                    Ok(matches) => stats.record_file(matches.len()),
                    Err(DetectError::TooLarge { .. }) => {
                        warn!(path = %path, "Skipping oversized file");
                        stats.increment_skipped();
                    }
                    Err(e) => {
                        warn!(path = %path, error = %e, "Failed to analyze file");
                        stats.increment_errors();
                    }
                }
                (path.clone(), result)
            })
            .collect()
    }

    /// Analyzes a single file.
    ///
    /// # Errors
    ///
    /// - [`DetectError::TooLarge`] if the file exceeds the size limit
    /// - [`DetectError::Read`] if the file cannot be read as UTF-8 text
    pub fn analyze_single<'c>(
        &self,
        path: &Utf8Path,
        detector: &Detector<'c>,
    ) -> Result<Vec<Match<'c>>, DetectError> {
        let size = fs::metadata(path)
            .map_err(|e| DetectError::read(path, e))?
            .len();
        if size > self.max_file_bytes {
            return Err(DetectError::TooLarge {
                path: path.to_owned(),
                size,
                limit: self.max_file_bytes,
            });
        }

        let contents = fs::read_to_string(path).map_err(|e| DetectError::read(path, e))?;
        Ok(detector.detect(&contents))
    }
}

#[cfg(test)]
mod tests {
    use idiom_catalog::{GlyphRegistry, PatternCatalog};
    use idiom_core::DetectConfig;

    use super::*;

    fn catalog() -> PatternCatalog {
        let glyphs = GlyphRegistry::builtin().expect("Registry should load");
        PatternCatalog::builtin(&glyphs).expect("Catalog should load")
    }

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::Builder::new()
            .prefix("idiom-analyze")
            .tempdir()
            .expect("Failed to create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_owned()).expect("Temp path is UTF-8");
        (dir, root)
    }

    #[test]
    fn test_analyze_single_detects() {
        let (_dir, root) = temp_root();
        let path = root.join("app.js");
        fs::write(&path, "const doubled = numbers.map(n => n * 2);").expect("write app.js");

        let catalog = catalog();
        let detector = Detector::new(&catalog, &DetectConfig::default());
        let matches = FileAnalyzer::new(1024)
            .analyze_single(&path, &detector)
            .expect("Analysis should succeed");

        assert!(matches.iter().any(|m| m.pattern.id == "array-map"));
    }

    #[test]
    fn test_oversized_file_is_skipped() {
        let (_dir, root) = temp_root();
        let path = root.join("bundle.js");
        fs::write(&path, "x".repeat(100)).expect("write bundle.js");

        let catalog = catalog();
        let detector = Detector::new(&catalog, &DetectConfig::default());
        let err = FileAnalyzer::new(10)
            .analyze_single(&path, &detector)
            .expect_err("Should be too large");

        assert!(matches!(err, DetectError::TooLarge { size: 100, limit: 10, .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_analyze_files_keeps_order_and_counts() {
        let (_dir, root) = temp_root();
        let a = root.join("a.js");
        let b = root.join("b.js");
        let missing = root.join("missing.js");
        fs::write(&a, "let port = config.port ?? 8080;").expect("write a.js");
        fs::write(&b, "SELECT * FROM users").expect("write b.js");

        let catalog = catalog();
        let detector = Detector::new(&catalog, &DetectConfig::default());
        let stats = DetectionStats::new();
        let paths = vec![a.clone(), b.clone(), missing.clone()];
        let results = FileAnalyzer::new(1024).analyze_files(&paths, &detector, &stats);

        let returned: Vec<&Utf8PathBuf> = results.iter().map(|(p, _)| p).collect();
        assert_eq!(returned, vec![&a, &b, &missing]);
        assert!(results[0].1.as_ref().is_ok_and(|m| !m.is_empty()));
        assert!(results[1].1.as_ref().is_ok_and(Vec::is_empty));
        assert!(results[2].1.is_err());

        let snap = stats.snapshot();
        assert_eq!(snap.files, 2);
        assert_eq!(snap.files_with_matches, 1);
        assert_eq!(snap.errors, 1);
    }
}
