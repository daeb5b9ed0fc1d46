//! Catalog storage
//!
//! The builder only ever creates rows: it inserts an entity and gets back its
//! id, or inserts a join row referencing ids it created earlier. It never reads
//! back. Stores enforce name uniqueness and foreign keys.

pub mod json_file;
pub mod memory;
pub mod session;

pub use json_file::JsonFileStore;
pub use memory::{CatalogSnapshot, MemoryStore};
pub use session::StoreSession;

use crate::core::{
    CardId, CardInput, CardType, DeckId, DeckOwner, EffectId, LinkId, OwnedCardId, TypedEffect,
    WrapperId,
};
use crate::Result;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Create-only access to the catalog tables
pub trait CatalogStore {
    /// Insert a card. Fails with `DuplicateName` if the name is taken.
    fn insert_card(&mut self, card: CardInput) -> Result<CardId>;

    /// Insert a standalone typed effect row
    fn insert_effect(&mut self, effect: TypedEffect) -> Result<EffectId>;

    /// Insert a MinionEffect or SpellEffect wrapper owned by `card_id`
    ///
    /// `scope` must match the card's type.
    fn insert_wrapper(&mut self, card_id: CardId, scope: CardType) -> Result<WrapperId>;

    /// Bind an effect into a wrapper. An effect can be linked only once.
    fn insert_link(&mut self, wrapper_id: WrapperId, effect_id: EffectId) -> Result<LinkId>;

    fn insert_deck(&mut self, owner: DeckOwner) -> Result<DeckId>;

    /// Record that `owner` holds a copy of `card_id`
    fn insert_owned_card(&mut self, owner: &DeckOwner, card_id: CardId) -> Result<OwnedCardId>;

    fn insert_deck_card(&mut self, deck_id: DeckId, card_id: CardId) -> Result<()>;

    /// Release the connection, flushing anything pending
    ///
    /// Called exactly once by `StoreSession`; a second call is a no-op.
    fn release(&mut self) -> Result<()>;
}

/// Stored MinionEffect / SpellEffect wrapper row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperRecord {
    pub id: WrapperId,
    pub card_id: CardId,
    pub scope: CardType,
    /// Links in attach order
    pub links: SmallVec<[LinkId; 4]>,
}

impl WrapperRecord {
    /// Storage table name for this wrapper's scope
    pub fn table_name(&self) -> &'static str {
        match self.scope {
            CardType::Minion => "MinionEffect",
            CardType::Spell => "SpellEffect",
        }
    }
}

/// Stored wrapper-to-effect link row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: LinkId,
    pub wrapper_id: WrapperId,
    pub effect_id: EffectId,
    /// Position of the link inside its wrapper
    pub position: usize,
}
