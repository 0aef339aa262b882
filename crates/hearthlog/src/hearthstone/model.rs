//! Model — entries read from the Hearthstone client log.
//!
//! Every entry records the indentation it was found at, so nested entries
//! can be told apart from their siblings after the fact.

use serde::Serialize;

use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagValue {
    pub tag: String,
    pub value: String,
}

impl TagValue {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameAccountId {
    pub hi: String,
    pub lo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameEntity {
    pub indentation: usize,
    pub entity_id: String,
    pub tags: Vec<TagValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub indentation: usize,
    pub entity_id: String,
    pub player_id: String,
    pub game_account_id: GameAccountId,
    pub tags: Vec<TagValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    /// `TAG_CHANGE Entity=.. tag=.. value=..`
    TagChange {
        indentation: usize,
        entity: Entity,
        tag: String,
        value: String,
    },
    /// `FULL_ENTITY - Creating ID=.. CardID=..` and its tags.
    FullEntity {
        indentation: usize,
        id: String,
        card_id: String,
        tags: Vec<TagValue>,
    },
    /// `SHOW_ENTITY - Updating Entity=.. CardID=..` and its tags.
    ShowEntity {
        indentation: usize,
        entity: Entity,
        card_id: String,
        tags: Vec<TagValue>,
    },
    /// `HIDE_ENTITY - Entity=.. tag=.. value=..`
    HideEntity {
        indentation: usize,
        entity: Entity,
        tag: String,
        value: String,
    },
    /// `ACTION_START` block with everything nested under it.
    ActionStart {
        indentation: usize,
        entity: Entity,
        sub_type: String,
        index: Entity,
        target: Entity,
        entries: Vec<LogEntry>,
        /// Whether the matching `ACTION_END` was read.
        closed: bool,
    },
    /// An `ACTION_END` with no open block to close.
    ActionEnd { indentation: usize },
    /// `CREATE_GAME` with its game entity and players.
    CreateGame {
        indentation: usize,
        game_entity: GameEntity,
        players: Vec<Player>,
    },
    GameEntity(GameEntity),
    Player(Player),
    /// Zone log: `TRANSITIONING card .. to ..`
    Transitioning {
        indentation: usize,
        entity: Entity,
        target_zone: String,
    },
}

impl LogEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            LogEntry::TagChange { .. } => "tag_change",
            LogEntry::FullEntity { .. } => "full_entity",
            LogEntry::ShowEntity { .. } => "show_entity",
            LogEntry::HideEntity { .. } => "hide_entity",
            LogEntry::ActionStart { .. } => "action_start",
            LogEntry::ActionEnd { .. } => "action_end",
            LogEntry::CreateGame { .. } => "create_game",
            LogEntry::GameEntity(_) => "game_entity",
            LogEntry::Player(_) => "player",
            LogEntry::Transitioning { .. } => "transitioning",
        }
    }

    pub fn indentation(&self) -> usize {
        match self {
            LogEntry::TagChange { indentation, .. }
            | LogEntry::FullEntity { indentation, .. }
            | LogEntry::ShowEntity { indentation, .. }
            | LogEntry::HideEntity { indentation, .. }
            | LogEntry::ActionStart { indentation, .. }
            | LogEntry::ActionEnd { indentation }
            | LogEntry::CreateGame { indentation, .. }
            | LogEntry::Transitioning { indentation, .. } => *indentation,
            LogEntry::GameEntity(game_entity) => game_entity.indentation,
            LogEntry::Player(player) => player.indentation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_and_indentation() {
        let entry = LogEntry::ActionEnd { indentation: 8 };
        assert_eq!(entry.kind(), "action_end");
        assert_eq!(entry.indentation(), 8);

        let player = LogEntry::Player(Player {
            indentation: 4,
            entity_id: "2".into(),
            player_id: "1".into(),
            game_account_id: GameAccountId { hi: "1".into(), lo: "2".into() },
            tags: Vec::new(),
        });
        assert_eq!(player.kind(), "player");
        assert_eq!(player.indentation(), 4);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let entry = LogEntry::TagChange {
            indentation: 0,
            entity: Entity::named("skiwi"),
            tag: "MULLIGAN_STATE".into(),
            value: "INPUT".into(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "tag_change",
                "indentation": 0,
                "entity": {"kind": "named", "name": "skiwi"},
                "tag": "MULLIGAN_STATE",
                "value": "INPUT",
            })
        );
    }

    #[test]
    fn test_newtype_variant_flattens_struct() {
        let entry = LogEntry::GameEntity(GameEntity {
            indentation: 4,
            entity_id: "1".into(),
            tags: vec![TagValue::new("TURN", "1")],
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "game_entity");
        assert_eq!(value["entity_id"], "1");
        assert_eq!(value["tags"][0]["tag"], "TURN");
    }
}
