//! Line — anatomy of a named-logger line.
//!
//! ```text
//! [Power] GameState.DebugPrintPower() -     tag=ZONE value=DECK
//! └logger┘ └──────── method ────────┘   └──── content ─────┘
//! ```
//!
//! The number of leading spaces in the content is the line's indentation.
//! Nested blocks are indented [`INDENT_STEP`] deeper than their parent.

use regex::{Captures, Regex};
use serde::Serialize;

use crate::cursor::LineReader;
use crate::hearthstone::model::TagValue;
use crate::reader::ParseError;

pub const INDENT_STEP: usize = 4;

pub const POWER_PREFIX: &str = "[Power] GameState.DebugPrintPower() - ";
pub const ZONE_PREFIX: &str = "[Zone] ZoneChangeList.ProcessChanges() - ";

/// Indentation a parser is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Indent {
    #[default]
    Any,
    Exactly(usize),
}

impl Indent {
    pub fn accepts(self, indentation: usize) -> bool {
        match self {
            Indent::Any => true,
            Indent::Exactly(n) => n == indentation,
        }
    }

    /// Binding for the children of a block found at `own`.
    pub fn children_of(own: usize) -> Indent {
        Indent::Exactly(own + INDENT_STEP)
    }
}

pub fn is_from_named_logger(line: &str) -> bool {
    regex!(r"^\[\w+\]").is_match(line)
}

/// The content after `[Logger] Class.Method() - `, if the line has that shape.
pub fn content(line: &str) -> Option<&str> {
    regex!(r"^\[\w+\] [\w.()]+ - (.*)$")
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn count_leading_spaces(text: &str) -> usize {
    text.len() - text.trim_start_matches(' ').len()
}

pub fn indentation(line: &str) -> Option<usize> {
    content(line).map(count_leading_spaces)
}

/// Condition for lines belonging to a block found at `own`.
pub fn deeper_than(own: usize) -> impl Fn(&str) -> bool {
    move |line| indentation(line).is_some_and(|n| n > own)
}

/// Match `pattern` against `line`, where capture group 1 is the indentation,
/// and keep the match only if `indent` accepts it.
pub(crate) fn match_at<'l>(pattern: &Regex, indent: Indent, line: &'l str) -> Option<Captures<'l>> {
    let caps = pattern.captures(line)?;
    let found = caps.get(1).map_or(0, |m| m.as_str().len());
    indent.accepts(found).then_some(caps)
}

/// Read the `tag=X value=Y` lines nested under a block found at `parent`.
///
/// Stops at the first line that is not deeper than `parent`. A deeper line
/// that is not a tag, or a tag indented less than one step below the parent,
/// fails the block.
pub fn read_tag_values(reader: &mut dyn LineReader, parent: usize) -> Result<Vec<TagValue>, ParseError> {
    let in_block = deeper_than(parent);
    let mut tags = Vec::new();
    while reader.matches_next(&in_block) {
        let line = reader.consume()?;
        let caps = regex!(r"^\[Power\] GameState\.DebugPrintPower\(\) - ( *)tag=(.*) value=(.*)$")
            .captures(&line)
            .ok_or_else(|| ParseError::not_parsable(&line))?;
        let found = caps[1].len();
        if found < parent + INDENT_STEP {
            return Err(ParseError::Indentation {
                expected: parent + INDENT_STEP,
                found,
            });
        }
        tags.push(TagValue::new(&caps[2], &caps[3]));
    }
    Ok(tags)
}
