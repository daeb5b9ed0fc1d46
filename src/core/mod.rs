//! Core catalog types and entities

pub mod card;
pub mod deck;
pub mod effects;
pub mod ids;
pub mod labels;

pub use card::{CardInput, CardRecord};
pub use deck::{DeckCardRecord, DeckOwner, DeckRecord, OwnedCardRecord};
pub use effects::{
    EffectInput, EffectKind, EffectKindRef, EffectPayload, EffectRecord, Modifier, StatModifier,
    TypedEffect,
};
pub use ids::{CardId, DeckId, EffectId, LinkId, OwnedCardId, WrapperId};
pub use labels::{CardType, DamageType, Nation, Rarity, StatType, TargetType};

/// A card plus the ordered effects to attach to it
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CardSeed {
    pub card: CardInput,
    pub effects: Vec<EffectInput>,
}

impl CardSeed {
    pub fn new(card: CardInput, effects: Vec<EffectInput>) -> Self {
        CardSeed { card, effects }
    }
}
