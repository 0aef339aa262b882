use regex::Regex;

use crate::cursor::LineReader;
use crate::hearthstone::entity::parse_entity;
use crate::hearthstone::line::{match_at, Indent};
use crate::hearthstone::model::LogEntry;
use crate::reader::{EntryParser, ParseError};

fn tag_change_pattern() -> &'static Regex {
    regex!(r"^\[Power\] GameState\.DebugPrintPower\(\) - ( *)TAG_CHANGE Entity=(.*) tag=(.*) value=(.*)$")
}

fn hide_entity_pattern() -> &'static Regex {
    regex!(r"^\[Power\] GameState\.DebugPrintPower\(\) - ( *)HIDE_ENTITY - Entity=(.*) tag=(.*) value=(.*)$")
}

/// `TAG_CHANGE Entity=<entity> tag=<tag> value=<value>`
#[derive(Debug, Clone, Copy, Default)]
pub struct TagChangeEntryParser {
    indent: Indent,
}

impl TagChangeEntryParser {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }
}

impl EntryParser for TagChangeEntryParser {
    type Entry = LogEntry;

    fn can_parse(&self, line: &str) -> bool {
        match_at(tag_change_pattern(), self.indent, line).is_some()
    }

    fn parse(&self, line: &str, _reader: &mut dyn LineReader) -> Result<LogEntry, ParseError> {
        let caps = match_at(tag_change_pattern(), self.indent, line)
            .ok_or_else(|| ParseError::not_parsable(line))?;
        Ok(LogEntry::TagChange {
            indentation: caps[1].len(),
            entity: parse_entity(&caps[2]),
            tag: caps[3].to_string(),
            value: caps[4].to_string(),
        })
    }
}

/// `HIDE_ENTITY - Entity=<entity> tag=<tag> value=<value>`
#[derive(Debug, Clone, Copy, Default)]
pub struct HideEntityEntryParser {
    indent: Indent,
}

impl HideEntityEntryParser {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }
}

impl EntryParser for HideEntityEntryParser {
    type Entry = LogEntry;

    fn can_parse(&self, line: &str) -> bool {
        match_at(hide_entity_pattern(), self.indent, line).is_some()
    }

    fn parse(&self, line: &str, _reader: &mut dyn LineReader) -> Result<LogEntry, ParseError> {
        let caps = match_at(hide_entity_pattern(), self.indent, line)
            .ok_or_else(|| ParseError::not_parsable(line))?;
        Ok(LogEntry::HideEntity {
            indentation: caps[1].len(),
            entity: parse_entity(&caps[2]),
            tag: caps[3].to_string(),
            value: caps[4].to_string(),
        })
    }
}
