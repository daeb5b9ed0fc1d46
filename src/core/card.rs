//! Card records

use crate::core::{CardId, CardType, Nation, Rarity};
use serde::{Deserialize, Serialize};

/// A validated card ready to be written to the catalog
///
/// Optional numbers stay `None` when the source had no value, so "no health"
/// is never confused with "zero health".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInput {
    /// Card name (unique across the catalog)
    pub name: String,
    pub nation: Nation,
    pub rarity: Rarity,
    pub mana_cost: i32,
    pub health: Option<i32>,
    pub damage: Option<i32>,
    pub card_type: CardType,
    pub tier: Option<i32>,
    pub img_url: Option<String>,
    /// Maximum copies allowed in a single deck
    pub deck_limit: Option<i32>,
}

impl CardInput {
    pub fn new(
        name: impl Into<String>,
        nation: Nation,
        rarity: Rarity,
        card_type: CardType,
        mana_cost: i32,
    ) -> Self {
        CardInput {
            name: name.into(),
            nation,
            rarity,
            mana_cost,
            health: None,
            damage: None,
            card_type,
            tier: None,
            img_url: None,
            deck_limit: None,
        }
    }

    /// Set health and damage (minions)
    pub fn with_stats(mut self, health: i32, damage: i32) -> Self {
        self.health = Some(health);
        self.damage = Some(damage);
        self
    }

    pub fn with_tier(mut self, tier: i32) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_img_url(mut self, url: impl Into<String>) -> Self {
        self.img_url = Some(url.into());
        self
    }

    pub fn with_deck_limit(mut self, limit: i32) -> Self {
        self.deck_limit = Some(limit);
        self
    }

    pub fn is_minion(&self) -> bool {
        self.card_type == CardType::Minion
    }
}

/// A stored card row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    #[serde(flatten)]
    pub card: CardInput,
}
