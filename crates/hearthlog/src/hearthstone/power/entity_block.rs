//! Entity headers followed by an indented run of `tag=.. value=..` lines.
//!
//! ```text
//! FULL_ENTITY - Creating ID=34 CardID=CS2_064
//!     tag=HEALTH value=6
//!     tag=ZONE value=DECK
//! ```

use regex::Regex;
use tracing::trace;

use crate::cursor::LineReader;
use crate::hearthstone::entity::parse_entity;
use crate::hearthstone::line::{match_at, read_tag_values, Indent};
use crate::hearthstone::model::LogEntry;
use crate::reader::{EntryParser, ParseError};

fn full_entity_pattern() -> &'static Regex {
    regex!(r"^\[Power\] GameState\.DebugPrintPower\(\) - ( *)FULL_ENTITY - Creating ID=(.*) CardID=(.*)$")
}

fn show_entity_pattern() -> &'static Regex {
    regex!(r"^\[Power\] GameState\.DebugPrintPower\(\) - ( *)SHOW_ENTITY - Updating Entity=(.*) CardID=(.*)$")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FullEntityEntryParser {
    indent: Indent,
}

impl FullEntityEntryParser {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }
}

impl EntryParser for FullEntityEntryParser {
    type Entry = LogEntry;

    fn can_parse(&self, line: &str) -> bool {
        match_at(full_entity_pattern(), self.indent, line).is_some()
    }

    fn parse(&self, line: &str, reader: &mut dyn LineReader) -> Result<LogEntry, ParseError> {
        let caps = match_at(full_entity_pattern(), self.indent, line)
            .ok_or_else(|| ParseError::not_parsable(line))?;
        let indentation = caps[1].len();
        let tags = read_tag_values(reader, indentation)?;
        trace!(id = &caps[2], tags = tags.len(), "full_entity: read");

        Ok(LogEntry::FullEntity {
            indentation,
            id: caps[2].to_string(),
            card_id: caps[3].to_string(),
            tags,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShowEntityEntryParser {
    indent: Indent,
}

impl ShowEntityEntryParser {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }
}

impl EntryParser for ShowEntityEntryParser {
    type Entry = LogEntry;

    fn can_parse(&self, line: &str) -> bool {
        match_at(show_entity_pattern(), self.indent, line).is_some()
    }

    fn parse(&self, line: &str, reader: &mut dyn LineReader) -> Result<LogEntry, ParseError> {
        let caps = match_at(show_entity_pattern(), self.indent, line)
            .ok_or_else(|| ParseError::not_parsable(line))?;
        let indentation = caps[1].len();
        let tags = read_tag_values(reader, indentation)?;

        Ok(LogEntry::ShowEntity {
            indentation,
            entity: parse_entity(&caps[2]),
            card_id: caps[3].to_string(),
            tags,
        })
    }
}
