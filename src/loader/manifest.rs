//! JSON card manifest
//!
//! Hand-authored card lists. Either a bare array of cards or an object with a
//! `cards` array:
//!
//! ```json
//! { "cards": [
//!   { "name": "Warg Rider", "nation": "Ironmark", "rarity": "Epic",
//!     "type": "Minion", "manaCost": 5, "health": 5, "damage": 7, "tier": 3,
//!     "effects": [ { "type": "PoisonEffect", "amount": 2 } ] }
//! ] }
//! ```
//!
//! Labels go through the same normalization as the sheet, so `"epic"` and
//! `"Poison"` are accepted.

use crate::core::{CardInput, CardSeed, EffectInput, EffectPayload};
use crate::loader::kinds::EffectKindTable;
use crate::loader::normalize::{parse_label, parse_optional_label};
use crate::loader::SeedBatch;
use crate::logger::SeedLogger;
use crate::{Result, SeedError};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    Wrapped { cards: Vec<ManifestCard> },
    Bare(Vec<ManifestCard>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestCard {
    pub name: String,
    pub nation: String,
    pub rarity: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub mana_cost: i32,
    pub health: Option<i32>,
    pub damage: Option<i32>,
    pub tier: Option<i32>,
    pub img_url: Option<String>,
    pub deck_limit: Option<i32>,
    #[serde(default)]
    pub effects: Vec<ManifestEffect>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEffect {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Option<i32>,
    pub target_type: Option<String>,
    pub damage_type: Option<String>,
    pub stat: Option<String>,
    pub duration: Option<i32>,
    #[serde(default)]
    pub percentage: bool,
}

impl ManifestEffect {
    fn to_input(&self, table: &EffectKindTable) -> Result<EffectInput> {
        let payload = EffectPayload {
            amount: self.amount,
            target_type: parse_optional_label(self.target_type.as_deref().unwrap_or_default())?,
            damage_type: parse_optional_label(self.damage_type.as_deref().unwrap_or_default())?,
            stat: parse_optional_label(self.stat.as_deref().unwrap_or_default())?,
            duration: self.duration,
            percentage: self.percentage,
        };
        Ok(EffectInput {
            kind: table.resolve(&self.kind),
            payload,
        })
    }
}

impl ManifestCard {
    /// Convert into a seed; bad effects are logged and dropped
    pub fn to_seed(&self, table: &EffectKindTable, logger: &SeedLogger) -> Result<CardSeed> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SeedError::malformed("name", &self.name, "card name is empty"));
        }

        let card = CardInput {
            name: name.to_string(),
            nation: parse_label("nation", &self.nation)?,
            rarity: parse_label("rarity", &self.rarity)?,
            mana_cost: self.mana_cost,
            health: self.health,
            damage: self.damage,
            card_type: parse_label("card_type", &self.card_type)?,
            tier: self.tier,
            img_url: self.img_url.clone().filter(|url| !url.trim().is_empty()),
            deck_limit: self.deck_limit,
        };

        let effects = self
            .effects
            .iter()
            .filter_map(|effect| match effect.to_input(table) {
                Ok(input) => Some(input),
                Err(error) => {
                    logger.warn(
                        "effect",
                        &format!("Skipping effect {} for card {name}: {error}", effect.kind),
                    );
                    None
                }
            })
            .collect();

        Ok(CardSeed::new(card, effects))
    }
}

/// Loads card seeds from JSON manifests
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    table: EffectKindTable,
}

impl ManifestLoader {
    pub fn new(table: EffectKindTable) -> Self {
        ManifestLoader { table }
    }

    /// Convert manifest text into a batch
    ///
    /// Invalid JSON fails the whole manifest. Cards with bad labels are
    /// logged and counted as rejected.
    pub fn parse(&self, content: &str, logger: &SeedLogger) -> Result<SeedBatch> {
        let cards = match serde_json::from_str::<ManifestFile>(content)? {
            ManifestFile::Wrapped { cards } | ManifestFile::Bare(cards) => cards,
        };

        let mut batch = SeedBatch::default();
        for card in &cards {
            match card.to_seed(&self.table, logger) {
                Ok(seed) => batch.seeds.push(seed),
                Err(error) => {
                    logger.warn(
                        "manifest",
                        &format!("Card {} rejected: {error}", card.name),
                    );
                    batch.rejected_rows += 1;
                }
            }
        }
        Ok(batch)
    }

    pub async fn load(&self, path: &Path, logger: &SeedLogger) -> Result<SeedBatch> {
        let content = tokio::fs::read_to_string(path).await?;
        self.parse(&content, logger)
    }
}
