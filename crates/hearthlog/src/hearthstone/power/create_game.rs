//! Game creation block.
//!
//! ```text
//! CREATE_GAME
//!     GameEntity EntityID=1
//!         tag=TURN value=1
//!     Player EntityID=2 PlayerID=1 GameAccountId=[hi=144115198130930503 lo=27472745]
//!         tag=HERO_ENTITY value=4
//!     Player EntityID=3 PlayerID=2 GameAccountId=[hi=144115198130930503 lo=30571923]
//!         tag=HERO_ENTITY value=36
//! ```

use regex::Regex;
use tracing::debug;

use crate::cursor::{LineReader, ReadWhile};
use crate::hearthstone::line::{deeper_than, match_at, read_tag_values, Indent};
use crate::hearthstone::model::{GameAccountId, GameEntity, LogEntry, Player};
use crate::reader::{BoxedParser, EntryParser, EntryReader, ParseError};

fn create_game_pattern() -> &'static Regex {
    regex!(r"^\[Power\] GameState\.DebugPrintPower\(\) - ( *)CREATE_GAME$")
}

fn game_entity_pattern() -> &'static Regex {
    regex!(r"^\[Power\] GameState\.DebugPrintPower\(\) - ( *)GameEntity EntityID=(.*)$")
}

fn player_pattern() -> &'static Regex {
    regex!(r"^\[Power\] GameState\.DebugPrintPower\(\) - ( *)Player EntityID=(.*) PlayerID=(.*) GameAccountId=\[hi=(.*) lo=(.*)\].*$")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CreateGameEntryParser {
    indent: Indent,
}

impl CreateGameEntryParser {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }

    fn children(own: usize) -> Vec<BoxedParser<LogEntry>> {
        let indent = Indent::children_of(own);
        vec![
            Box::new(GameEntityEntryParser::new(indent)),
            Box::new(PlayerEntryParser::new(indent)),
        ]
    }
}

impl EntryParser for CreateGameEntryParser {
    type Entry = LogEntry;

    fn can_parse(&self, line: &str) -> bool {
        match_at(create_game_pattern(), self.indent, line).is_some()
    }

    fn parse(&self, line: &str, reader: &mut dyn LineReader) -> Result<LogEntry, ParseError> {
        let caps = match_at(create_game_pattern(), self.indent, line)
            .ok_or_else(|| ParseError::not_parsable(line))?;
        let own = caps[1].len();

        let scoped = ReadWhile::new(reader, deeper_than(own));
        let mut nested = EntryReader::from_factory(scoped, || Self::children(own));

        let game_entity = match nested.read_entry()? {
            LogEntry::GameEntity(game_entity) => game_entity,
            other => {
                return Err(ParseError::Unexpected(format!(
                    "expected game_entity first in create_game, found {}",
                    other.kind()
                )))
            }
        };

        let mut players = Vec::new();
        for entry in nested.entries() {
            match entry? {
                LogEntry::Player(player) => players.push(player),
                other => {
                    return Err(ParseError::Unexpected(format!(
                        "expected player in create_game, found {}",
                        other.kind()
                    )))
                }
            }
        }

        debug!(
            game_entity = %game_entity.entity_id,
            players = players.len(),
            "create_game: new game"
        );

        Ok(LogEntry::CreateGame {
            indentation: own,
            game_entity,
            players,
        })
    }
}

/// `GameEntity EntityID=<id>` and its tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameEntityEntryParser {
    indent: Indent,
}

impl GameEntityEntryParser {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }
}

impl EntryParser for GameEntityEntryParser {
    type Entry = LogEntry;

    fn can_parse(&self, line: &str) -> bool {
        match_at(game_entity_pattern(), self.indent, line).is_some()
    }

    fn parse(&self, line: &str, reader: &mut dyn LineReader) -> Result<LogEntry, ParseError> {
        let caps = match_at(game_entity_pattern(), self.indent, line)
            .ok_or_else(|| ParseError::not_parsable(line))?;
        let indentation = caps[1].len();
        let tags = read_tag_values(reader, indentation)?;

        Ok(LogEntry::GameEntity(GameEntity {
            indentation,
            entity_id: caps[2].to_string(),
            tags,
        }))
    }
}

/// `Player EntityID=.. PlayerID=.. GameAccountId=[hi=.. lo=..]` and its tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerEntryParser {
    indent: Indent,
}

impl PlayerEntryParser {
    pub fn new(indent: Indent) -> Self {
        Self { indent }
    }
}

impl EntryParser for PlayerEntryParser {
    type Entry = LogEntry;

    fn can_parse(&self, line: &str) -> bool {
        match_at(player_pattern(), self.indent, line).is_some()
    }

    fn parse(&self, line: &str, reader: &mut dyn LineReader) -> Result<LogEntry, ParseError> {
        let caps = match_at(player_pattern(), self.indent, line)
            .ok_or_else(|| ParseError::not_parsable(line))?;
        let indentation = caps[1].len();
        let tags = read_tag_values(reader, indentation)?;

        Ok(LogEntry::Player(Player {
            indentation,
            entity_id: caps[2].to_string(),
            player_id: caps[3].to_string(),
            game_account_id: GameAccountId {
                hi: caps[4].to_string(),
                lo: caps[5].to_string(),
            },
            tags,
        }))
    }
}
