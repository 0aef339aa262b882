//! Regex — pre-built line filters for Hearthstone client logs.
//!
//! The client interleaves Unity engine noise with output from named loggers
//! (`[Power]`, `[Zone]`, ...). These helpers build [`FilterEngine`]s that
//! keep only the loggers a reader cares about.

use crate::filter::engine::{FilterEngine, FilterError, FilterMode};

/// Well-known log line patterns.
pub struct Patterns;

impl Patterns {
    /// Any line produced by a named logger: `[Name] ...`.
    pub const NAMED_LOGGER: &'static str = r"^\[\w+\] ";

    /// Lines from the `[Power]` logger.
    pub const POWER: &'static str = r"^\[Power\] ";

    /// Lines from the `[Zone]` logger.
    pub const ZONE: &'static str = r"^\[Zone\] ";

    /// Game state dumps: the only `[Power]` method the grammar understands.
    pub const POWER_DEBUG_PRINT: &'static str = r"^\[Power\] GameState\.DebugPrintPower\(\) - ";
}

/// Build a [`FilterEngine`] that matches **any** of the given patterns.
///
/// The patterns are joined into one alternation so a single compiled matcher
/// runs per line.
pub fn multi_pattern(
    patterns: &[&str],
    mode: FilterMode,
) -> Result<FilterEngine, FilterError> {
    if patterns.is_empty() {
        return Err(FilterError::InvalidRegex("at least one pattern required".into()));
    }
    let combined = if patterns.len() == 1 {
        patterns[0].to_string()
    } else {
        patterns.iter().map(|p| format!("(?:{})", p)).collect::<Vec<_>>().join("|")
    };
    FilterEngine::new(&combined, true, mode)
}

/// Keep only lines coming from one of `names` (`"Power"`, `"Zone"`, ...).
pub fn loggers(names: &[&str]) -> Result<FilterEngine, FilterError> {
    if names.is_empty() {
        return Err(FilterError::InvalidRegex("at least one logger name required".into()));
    }
    let alternation = names.iter().map(|n| ::regex::escape(n)).collect::<Vec<_>>().join("|");
    FilterEngine::new(&format!(r"^\[(?:{})\] ", alternation), true, FilterMode::Include)
}

/// Build an include-mode filter from a single pattern.
pub fn include(pattern: &str) -> Result<FilterEngine, FilterError> {
    FilterEngine::new(pattern, false, FilterMode::Include)
}

/// Build an exclude-mode filter from a single pattern.
pub fn exclude(pattern: &str) -> Result<FilterEngine, FilterError> {
    FilterEngine::new(pattern, false, FilterMode::Exclude)
}

/// Drop everything that is not from a named logger.
pub fn named_loggers_only() -> Result<FilterEngine, FilterError> {
    FilterEngine::new(Patterns::NAMED_LOGGER, true, FilterMode::Include)
}

// ── Tests ───────────────────────────────────────────────────────
