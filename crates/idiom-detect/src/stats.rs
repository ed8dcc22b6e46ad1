//! Scan statistics with atomic counters.
//!
//! This module provides [`DetectionStats`] for tracking progress while files
//! are analyzed in parallel, and [`StatsSnapshot`] for point-in-time views.
//!
//! All counters use [`AtomicU64`] with relaxed ordering. They are for
//! reporting only and never drive control flow.
//!
//! # Examples
//!
//! ```
//! use idiom_detect::DetectionStats;
//!
//! let stats = DetectionStats::new();
//! stats.record_file(3);
//! stats.record_file(0);
//!
//! let snapshot = stats.snapshot();
//! assert_eq!(snapshot.files, 2);
//! assert_eq!(snapshot.files_with_matches, 1);
//! assert_eq!(snapshot.matches, 3);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters for a directory scan.
#[derive(Debug, Default)]
pub struct DetectionStats {
    /// Files analyzed successfully.
    files: AtomicU64,
    /// Files with at least one match.
    files_with_matches: AtomicU64,
    /// Matches across all files.
    matches: AtomicU64,
    /// Files skipped for exceeding the size limit.
    skipped: AtomicU64,
    /// Files that failed to read.
    errors: AtomicU64,
}

impl DetectionStats {
    /// Creates a new [`DetectionStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one analyzed file and its match count.
    #[inline]
    pub fn record_file(&self, match_count: usize) {
        self.files.fetch_add(1, Ordering::Relaxed);
        if match_count > 0 {
            self.files_with_matches.fetch_add(1, Ordering::Relaxed);
            self.matches
                .fetch_add(match_count as u64, Ordering::Relaxed);
        }
    }

    /// Increments the skipped files counter.
    #[inline]
    pub fn increment_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the error counter.
    #[inline]
    pub fn increment_errors(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            files: self.files.load(Ordering::Relaxed),
            files_with_matches: self.files_with_matches.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.files.store(0, Ordering::Relaxed);
        self.files_with_matches.store(0, Ordering::Relaxed);
        self.matches.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time copy of [`DetectionStats`].
///
/// # Examples
///
/// ```
/// use idiom_detect::StatsSnapshot;
///
/// let snap = StatsSnapshot {
///     files: 8,
///     files_with_matches: 6,
///     matches: 20,
///     skipped: 1,
///     errors: 1,
/// };
///
/// assert_eq!(snap.attempted(), 10);
/// assert!((snap.hit_rate() - 75.0).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Files analyzed successfully.
    pub files: u64,
    /// Files with at least one match.
    pub files_with_matches: u64,
    /// Matches across all files.
    pub matches: u64,
    /// Files skipped for exceeding the size limit.
    pub skipped: u64,
    /// Files that failed to read.
    pub errors: u64,
}

impl StatsSnapshot {
    /// Returns the number of files the scan tried to analyze.
    #[inline]
    #[must_use]
    pub const fn attempted(&self) -> u64 {
        self.files + self.skipped + self.errors
    }

    /// Returns the share of analyzed files with at least one match, as a
    /// percentage. Returns 0.0 when no file was analyzed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable for statistics display
    pub fn hit_rate(&self) -> f64 {
        if self.files == 0 {
            return 0.0;
        }
        (self.files_with_matches as f64 / self.files as f64) * 100.0
    }

    /// Returns the average number of matches per analyzed file.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable for statistics display
    pub fn matches_per_file(&self) -> f64 {
        if self.files == 0 {
            return 0.0;
        }
        self.matches as f64 / self.files as f64
    }
}
