//! Zone log (`[Zone] ZoneChangeList.ProcessChanges()`) parsers.

use regex::Regex;

use crate::cursor::LineReader;
use crate::hearthstone::entity::parse_entity;
use crate::hearthstone::line::{match_at, Indent};
use crate::hearthstone::model::LogEntry;
use crate::reader::{BoxedParser, EntryParser, ParseError};

fn transitioning_pattern() -> &'static Regex {
    regex!(r"^\[Zone\] ZoneChangeList\.ProcessChanges\(\) - ( *)TRANSITIONING card (.*) to (.*)$")
}

/// `TRANSITIONING card <entity> to <zone>`
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitioningEntryParser {
    indent: Indent,
}

impl TransitioningEntryParser {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }
}

impl EntryParser for TransitioningEntryParser {
    type Entry = LogEntry;

    fn can_parse(&self, line: &str) -> bool {
        match_at(transitioning_pattern(), self.indent, line).is_some()
    }

    fn parse(&self, line: &str, _reader: &mut dyn LineReader) -> Result<LogEntry, ParseError> {
        let caps = match_at(transitioning_pattern(), self.indent, line)
            .ok_or_else(|| ParseError::not_parsable(line))?;
        Ok(LogEntry::Transitioning {
            indentation: caps[1].len(),
            entity: parse_entity(&caps[2]),
            target_zone: caps[3].to_string(),
        })
    }
}

pub fn top_level() -> Vec<BoxedParser<LogEntry>> {
    vec![Box::new(TransitioningEntryParser::default())]
}
