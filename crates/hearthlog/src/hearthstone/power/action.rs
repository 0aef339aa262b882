//! Action blocks.
//!
//! ```text
//! ACTION_START Entity=[name=Flame Imp id=42 ...] SubType=PLAY Index=0 Target=0
//!     TAG_CHANGE Entity=skiwi tag=RESOURCES_USED value=1
//!     ACTION_START Entity=[name=Flame Imp id=42 ...] SubType=POWER Index=-1 Target=0
//!         TAG_CHANGE Entity=[name=Gul'dan id=4 ...] tag=DAMAGE value=3
//!     ACTION_END
//! ACTION_END
//! ```
//!
//! Everything indented deeper than the `ACTION_START` belongs to it, and
//! blocks nest arbitrarily. The children are read by a nested
//! [`EntryReader`] over a [`ReadWhile`] view, with parsers built one step
//! deeper by the block's [`ChildParsers`] factory (which includes a fresh
//! `ActionStartEntryParser`). The closing `ACTION_END` sits at the block's
//! own indentation and is consumed when present.

use regex::Regex;
use tracing::trace;

use super::ChildParsers;
use crate::cursor::{LineReader, ReadWhile};
use crate::hearthstone::entity::parse_entity;
use crate::hearthstone::line::{deeper_than, match_at, Indent};
use crate::hearthstone::model::LogEntry;
use crate::reader::{EntryParser, EntryReader, ParseError};

fn action_start_pattern() -> &'static Regex {
    regex!(r"^\[Power\] GameState\.DebugPrintPower\(\) - ( *)ACTION_START Entity=(.*) SubType=(.*) Index=(.*) Target=(.*)$")
}

fn action_end_pattern() -> &'static Regex {
    regex!(r"^\[Power\] GameState\.DebugPrintPower\(\) - ( *)ACTION_END$")
}

pub struct ActionStartEntryParser {
    indent: Indent,
    children: ChildParsers,
}

impl ActionStartEntryParser {
    pub fn new(indent: Indent, children: ChildParsers) -> Self {
        Self { indent, children }
    }
}

impl EntryParser for ActionStartEntryParser {
    type Entry = LogEntry;

    fn can_parse(&self, line: &str) -> bool {
        match_at(action_start_pattern(), self.indent, line).is_some()
    }

    fn parse(&self, line: &str, reader: &mut dyn LineReader) -> Result<LogEntry, ParseError> {
        let caps = match_at(action_start_pattern(), self.indent, line)
            .ok_or_else(|| ParseError::not_parsable(line))?;
        let own = caps[1].len();

        let entries = {
            let children = self.children;
            let scoped = ReadWhile::new(&mut *reader, deeper_than(own));
            let mut nested = EntryReader::from_factory(scoped, || children(Indent::children_of(own)));
            let mut entries = Vec::new();
            for entry in nested.entries() {
                entries.push(entry?);
            }
            entries
        };

        let closed = reader.matches_next(&|next: &str| {
            match_at(action_end_pattern(), Indent::Exactly(own), next).is_some()
        });
        if closed {
            reader.consume()?;
        }

        trace!(
            indentation = own,
            sub_type = &caps[3],
            nested = entries.len(),
            closed,
            "action_start: block read"
        );

        Ok(LogEntry::ActionStart {
            indentation: own,
            entity: parse_entity(&caps[2]),
            sub_type: caps[3].to_string(),
            index: parse_entity(&caps[4]),
            target: parse_entity(&caps[5]),
            entries,
            closed,
        })
    }
}

/// An `ACTION_END` that no block claimed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionEndEntryParser {
    indent: Indent,
}

impl ActionEndEntryParser {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }
}

impl EntryParser for ActionEndEntryParser {
    type Entry = LogEntry;

    fn can_parse(&self, line: &str) -> bool {
        match_at(action_end_pattern(), self.indent, line).is_some()
    }

    fn parse(&self, line: &str, _reader: &mut dyn LineReader) -> Result<LogEntry, ParseError> {
        let caps = match_at(action_end_pattern(), self.indent, line)
            .ok_or_else(|| ParseError::not_parsable(line))?;
        Ok(LogEntry::ActionEnd {
            indentation: caps[1].len(),
        })
    }
}
