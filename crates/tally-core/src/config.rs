//! Retriever configuration
//!
//! The fiscal reporting window and candidate-set size live here so they are
//! explicit constructor inputs rather than scattered constants.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

/// The fixed calendar range transactions are restricted to before any
/// other filter applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalWindow {
    pub year: i32,
    /// Inclusive
    pub month_start: u32,
    /// Inclusive
    pub month_end: u32,
}

impl Default for FiscalWindow {
    fn default() -> Self {
        // FY25 reporting window: January through October 2025
        Self {
            year: 2025,
            month_start: 1,
            month_end: 10,
        }
    }
}

impl FiscalWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year
            && date.month() >= self.month_start
            && date.month() <= self.month_end
    }
}

/// Knobs for the filtered aggregator
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Fiscal reporting window applied before all other filters
    pub window: FiscalWindow,
    /// Nearest-neighbor candidate count for non-restaurant queries
    pub top_k: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            window: FiscalWindow::default(),
            top_k: 300,
        }
    }
}

/// Index directory: `TALLY_INDEX_DIR` env var, else `./index`
pub fn default_index_dir() -> PathBuf {
    std::env::var("TALLY_INDEX_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("index"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds_inclusive() {
        let window = FiscalWindow::default();
        let jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let oct = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
        let nov = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        let prev_year = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert!(window.contains(jan));
        assert!(window.contains(oct));
        assert!(!window.contains(nov));
        assert!(!window.contains(prev_year));
    }

    #[test]
    fn test_default_top_k() {
        assert_eq!(RetrieverConfig::default().top_k, 300);
    }
}
