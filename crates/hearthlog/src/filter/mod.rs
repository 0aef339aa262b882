//! Filter module — line filters applied by the cursor before parsing.

pub mod engine;
pub mod regex;

pub use engine::{FilterEngine, FilterError, FilterMode, FilterSnapshot};

/// Predicate accepting a line only when every engine accepts it.
///
/// Evaluation short-circuits, so later engines only count lines that got
/// past the earlier ones.
pub fn all_of(engines: &[FilterEngine]) -> impl Fn(&str) -> bool + '_ {
    move |line| engines.iter().all(|engine| engine.should_include(line))
}
