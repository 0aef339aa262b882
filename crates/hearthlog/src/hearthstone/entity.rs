//! Entity descriptors embedded in power and zone lines.
//!
//! The client prints an entity either as a bracketed card descriptor or as
//! a bare name (player names, `GameEntity`, plain numeric ids):
//!
//! ```text
//! [name=Dread Infernal id=34 zone=HAND zonePos=3 cardId=CS2_064 player=1]
//! [id=33 cardId= type=INVALID zone=DECK zonePos=0 player=1]
//! skiwi
//! ```

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Card(Card),
    Named { name: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Absent for hidden cards.
    pub name: Option<String>,
    pub id: String,
    pub card_id: String,
    /// Only printed for hidden cards.
    pub card_type: Option<String>,
    pub zone: String,
    pub zone_pos: String,
    pub player: String,
}

impl Entity {
    pub fn named(name: impl Into<String>) -> Self {
        Entity::Named { name: name.into() }
    }

    /// Entity id, when the descriptor carries one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Entity::Card(card) => Some(&card.id),
            Entity::Named { .. } => None,
        }
    }
}

/// Parse an entity descriptor. Anything that is not a bracketed card
/// descriptor is taken as a bare name.
pub fn parse_entity(text: &str) -> Entity {
    if let Some(caps) =
        regex!(r"^\[name=(.*) id=(.*) zone=(.*) zonePos=(.*) cardId=(.*) player=(.*)\]$").captures(text)
    {
        return Entity::Card(Card {
            name: Some(caps[1].to_string()),
            id: caps[2].to_string(),
            zone: caps[3].to_string(),
            zone_pos: caps[4].to_string(),
            card_id: caps[5].to_string(),
            player: caps[6].to_string(),
            card_type: None,
        });
    }

    if let Some(caps) =
        regex!(r"^\[id=(.*) cardId=(.*) type=(.*) zone=(.*) zonePos=(.*) player=(.*)\]$").captures(text)
    {
        return Entity::Card(Card {
            name: None,
            id: caps[1].to_string(),
            card_id: caps[2].to_string(),
            card_type: Some(caps[3].to_string()),
            zone: caps[4].to_string(),
            zone_pos: caps[5].to_string(),
            player: caps[6].to_string(),
        });
    }

    Entity::named(text)
}
