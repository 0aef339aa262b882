use std::sync::atomic::{AtomicU64, Ordering};

use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Include,
    Exclude,
}

#[derive(Debug, Default)]
struct FilterStats {
    lines_scanned: AtomicU64,
    lines_matched: AtomicU64,
    bytes_processed: AtomicU64,
}

/// Point-in-time copy of a filter's counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSnapshot {
    pub lines_scanned: u64,
    pub lines_matched: u64,
    pub bytes_processed: u64,
}

pub struct FilterEngine {
    matcher: RegexMatcher,
    mode: FilterMode,
    stats: FilterStats,
}

impl FilterEngine {
    pub fn new(pattern: &str, case_sensitive: bool, mode: FilterMode) -> Result<Self, FilterError> {
        let matcher = RegexMatcherBuilder::new()
            .case_insensitive(!case_sensitive)
            .multi_line(false)
            .build(pattern)
            .map_err(|e| FilterError::InvalidRegex(e.to_string()))?;

        Ok(Self {
            matcher,
            mode,
            stats: FilterStats::default(),
        })
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Whether `line` passes the filter ("matched" for include mode,
    /// "did not match" for exclude mode).
    #[inline]
    pub fn should_include(&self, line: &str) -> bool {
        self.stats.lines_scanned.fetch_add(1, Ordering::Relaxed);
        self.stats.bytes_processed.fetch_add(line.len() as u64, Ordering::Relaxed);

        let matches = self.matcher.is_match(line.as_bytes()).unwrap_or(false);

        let include = match self.mode {
            FilterMode::Include => matches,
            FilterMode::Exclude => !matches,
        };

        if include {
            self.stats.lines_matched.fetch_add(1, Ordering::Relaxed);
        }

        include
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            lines_scanned: self.stats.lines_scanned.load(Ordering::Relaxed),
            lines_matched: self.stats.lines_matched.load(Ordering::Relaxed),
            bytes_processed: self.stats.bytes_processed.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_include_mode() {
        let filter = FilterEngine::new("TAG_CHANGE", false, FilterMode::Include)
            .expect("Failed to create filter");

        assert!(filter.should_include("[Power] GameState.DebugPrintPower() - TAG_CHANGE Entity=GameEntity tag=TURN value=3"));
        assert!(!filter.should_include("[Power] GameState.DebugPrintPower() - CREATE_GAME"));
        assert!(filter.should_include("tag_change"));
    }

    #[test]
    fn test_filter_exclude_mode() {
        let filter = FilterEngine::new(r"^\[Bob\]", true, FilterMode::Exclude)
            .expect("Failed to create filter");

        assert!(!filter.should_include("[Bob] legend rank 12"));
        assert!(filter.should_include("[Zone] ZoneChangeList.ProcessChanges() - id=1"));
    }

    #[test]
    fn test_case_sensitive() {
        let filter = FilterEngine::new("Power", true, FilterMode::Include)
            .expect("Failed to create filter");

        assert!(filter.should_include("[Power] x"));
        assert!(!filter.should_include("[power] x"));
        assert!(!filter.should_include("[POWER] x"));
    }

    #[test]
    fn test_case_insensitive() {
        let filter = FilterEngine::new("power", false, FilterMode::Include)
            .expect("Failed to create filter");

        assert!(filter.should_include("[Power] x"));
        assert!(filter.should_include("[POWER] x"));
    }

    #[test]
    fn test_invalid_regex() {
        let result = FilterEngine::new("[invalid", true, FilterMode::Include);
        assert!(matches!(result, Err(FilterError::InvalidRegex(_))));
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: FilterMode = serde_json::from_str("\"exclude\"").unwrap();
        assert_eq!(mode, FilterMode::Exclude);
    }

    #[test]
    fn test_stats_tracking() {
        let filter = FilterEngine::new("Zone", false, FilterMode::Include)
            .expect("Failed to create filter");

        filter.should_include("[Zone] a");
        filter.should_include("[Power] b");
        filter.should_include("[Zone] c");

        let snapshot = filter.snapshot();
        assert_eq!(snapshot.lines_scanned, 3);
        assert_eq!(snapshot.lines_matched, 2);
        assert_eq!(snapshot.bytes_processed, 25);
    }
}
