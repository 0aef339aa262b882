//! Power log (`[Power] GameState.DebugPrintPower()`) parsers.
//!
//! Every parser is bound to an [`Indent`]. Top-level parsers accept any
//! indentation; parsers built for the inside of a block are bound to
//! exactly one step deeper than the block.
//!
//! - `single.rs`: one-line entries (`TAG_CHANGE`, `HIDE_ENTITY`)
//! - `entity_block.rs`: entity headers followed by tag lines
//! - `action.rs`: nested `ACTION_START` / `ACTION_END` blocks
//! - `create_game.rs`: `CREATE_GAME` with game entity and players

pub mod action;
pub mod create_game;
pub mod entity_block;
pub mod single;

pub use action::{ActionEndEntryParser, ActionStartEntryParser};
pub use create_game::{CreateGameEntryParser, GameEntityEntryParser, PlayerEntryParser};
pub use entity_block::{FullEntityEntryParser, ShowEntityEntryParser};
pub use single::{HideEntityEntryParser, TagChangeEntryParser};

use crate::hearthstone::line::Indent;
use crate::hearthstone::model::LogEntry;
use crate::reader::BoxedParser;

/// Builds the parser set for a given indentation.
pub type ChildParsers = fn(Indent) -> Vec<BoxedParser<LogEntry>>;

/// Parsers for entries that may appear inside an action block.
pub fn parsers_at(indent: Indent) -> Vec<BoxedParser<LogEntry>> {
    vec![
        Box::new(TagChangeEntryParser::new(indent)),
        Box::new(FullEntityEntryParser::new(indent)),
        Box::new(ShowEntityEntryParser::new(indent)),
        Box::new(HideEntityEntryParser::new(indent)),
        Box::new(ActionStartEntryParser::new(indent, parsers_at)),
        Box::new(ActionEndEntryParser::new(indent)),
    ]
}

/// Every power parser, unbound.
pub fn top_level() -> Vec<BoxedParser<LogEntry>> {
    let mut parsers = parsers_at(Indent::Any);
    parsers.push(Box::new(CreateGameEntryParser::new(Indent::Any)));
    parsers
}
