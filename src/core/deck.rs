//! Deck rows: decks, owned cards and deck cards

use crate::core::{CardId, DeckId, OwnedCardId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who a deck (and the cards feeding it) belongs to
///
/// Owner ids come from outside the catalog, so they are kept as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "owner", content = "id")]
pub enum DeckOwner {
    Hero(String),
    Npc(String),
}

impl DeckOwner {
    pub fn id(&self) -> &str {
        match self {
            DeckOwner::Hero(id) | DeckOwner::Npc(id) => id,
        }
    }
}

impl fmt::Display for DeckOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckOwner::Hero(id) => write!(f, "hero {id}"),
            DeckOwner::Npc(id) => write!(f, "npc {id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecord {
    pub id: DeckId,
    pub owner: DeckOwner,
}

/// A card in an owner's collection (hero card / npc card)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedCardRecord {
    pub id: OwnedCardId,
    pub owner: DeckOwner,
    pub card_id: CardId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCardRecord {
    pub deck_id: DeckId,
    pub card_id: CardId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_display() {
        let owner = DeckOwner::Npc("ef56".to_string());
        assert_eq!(owner.to_string(), "npc ef56");
        assert_eq!(owner.id(), "ef56");
    }

    #[test]
    fn test_owner_serialization() {
        let owner = DeckOwner::Hero("e75a".to_string());
        let json = serde_json::to_value(&owner).unwrap();
        assert_eq!(json["owner"], "Hero");
        assert_eq!(json["id"], "e75a");
    }
}
