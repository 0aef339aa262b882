//! Hearthstone client log grammar.
//!
//! Parsers for the `[Power]` game state dump and the `[Zone]` change list,
//! built on the generic [`EntryReader`](crate::reader::EntryReader).
//!
//! - `line.rs`: line anatomy, indentation and tag/value blocks
//! - `entity.rs`: entity descriptors
//! - `model.rs`: the entries produced
//! - `power/`: `[Power]` parsers
//! - `zone.rs`: `[Zone]` parsers

pub mod entity;
pub mod line;
pub mod model;
pub mod power;
pub mod zone;

pub use entity::{Card, Entity};
pub use line::{Indent, INDENT_STEP};
pub use model::{GameAccountId, GameEntity, LogEntry, Player, TagValue};

use crate::reader::BoxedParser;

/// Top-level parser set for a full client log.
pub fn entry_parsers() -> Vec<BoxedParser<LogEntry>> {
    let mut parsers = power::top_level();
    parsers.extend(zone::top_level());
    parsers
}


#[cfg(test)]
mod tests {
    use super::testing::{power, reader_with, zone};
    use super::*;
    use crate::cursor::LineCursor;
    use crate::filter::regex::named_loggers_only;
    use crate::reader::EntryReader;

    fn game_excerpt() -> Vec<String> {
        vec![
            power("CREATE_GAME"),
            power("    GameEntity EntityID=1"),
            power("        tag=TURN value=1"),
            power("    Player EntityID=2 PlayerID=1 GameAccountId=[hi=144115198130930503 lo=27472745]"),
            power("        tag=HERO_ENTITY value=4"),
            power("    Player EntityID=3 PlayerID=2 GameAccountId=[hi=144115198130930503 lo=30571923]"),
            power("        tag=HERO_ENTITY value=36"),
            power("TAG_CHANGE Entity=GameEntity tag=STATE value=RUNNING"),
            power("FULL_ENTITY - Creating ID=4 CardID=HERO_07"),
            power("    tag=HEALTH value=30"),
            power("    tag=ZONE value=PLAY"),
            zone("TRANSITIONING card [name=Gul'dan id=4 zone=PLAY zonePos=0 cardId=HERO_07 player=1] to FRIENDLY PLAY (Hero)"),
            power("ACTION_START Entity=skiwi SubType=TRIGGER Index=-1 Target=0"),
            power("    TAG_CHANGE Entity=skiwi tag=TIMEOUT value=75"),
            power("    HIDE_ENTITY - Entity=[name=Dread Infernal id=34 zone=HAND zonePos=3 cardId=CS2_064 player=1] tag=ZONE value=DECK"),
            power("ACTION_END"),
        ]
    }

    #[test]
    fn test_full_excerpt_reads_in_order() {
        let mut reader = reader_with(&game_excerpt(), entry_parsers());
        let kinds: Vec<_> = reader
            .entries()
            .map(|entry| entry.unwrap().kind())
            .collect();
        assert_eq!(
            kinds,
            ["create_game", "tag_change", "full_entity", "transitioning", "action_start"]
        );
        assert_eq!(reader.stats().lines, 16);
        assert_eq!(reader.stats().not_readable, 0);
    }

    #[test]
    fn test_engine_noise_is_filtered_out() {
        let mut noisy = game_excerpt();
        noisy.insert(0, "Platform assembly: Mono.Security.dll (this message is harmless)".to_string());
        noisy.insert(4, "UnloadTime: 1.234000 ms".to_string());
        noisy.push(String::new());

        let filter = named_loggers_only().unwrap();
        let cursor = LineCursor::from_lines(noisy).with_filter(|line| filter.should_include(line));
        let mut reader = EntryReader::new(cursor, entry_parsers());

        let entries: Vec<_> = reader.entries().collect::<Result<_, _>>().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(filter.snapshot().lines_scanned, 19);
        assert_eq!(filter.snapshot().lines_matched, 16);
    }

    #[test]
    fn test_unknown_power_line_is_reported_and_skipped() {
        let lines = vec![
            power("BLOCK_START BlockType=TRIGGER Entity=GameEntity"),
            power("TAG_CHANGE Entity=GameEntity tag=TURN value=2"),
        ];
        let mut reader = reader_with(&lines, entry_parsers());
        let results: Vec<_> = reader.entries().collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(&results[0], Err(e) if e.lines == lines[..1]));
        assert!(results[1].is_ok());
    }
}
