//! In-memory catalog store
//!
//! Tables are insertion-ordered vectors; FxHashMap indexes give O(1) id and
//! name lookups for constraint checks.

use crate::core::{
    CardId, CardInput, CardRecord, CardType, DeckCardRecord, DeckId, DeckOwner, DeckRecord,
    EffectId, EffectRecord, LinkId, OwnedCardId, OwnedCardRecord, TypedEffect, WrapperId,
};
use crate::store::{CatalogStore, LinkRecord, WrapperRecord};
use crate::{Result, SeedError};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Every catalog table, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    pub cards: Vec<CardRecord>,
    pub wrappers: Vec<WrapperRecord>,
    pub effects: Vec<EffectRecord>,
    pub links: Vec<LinkRecord>,
    pub decks: Vec<DeckRecord>,
    pub owned_cards: Vec<OwnedCardRecord>,
    pub deck_cards: Vec<DeckCardRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: CatalogSnapshot,
    card_names: FxHashMap<String, CardId>,
    card_index: FxHashMap<CardId, usize>,
    wrapper_index: FxHashMap<WrapperId, usize>,
    effect_index: FxHashMap<EffectId, usize>,
    linked_effects: FxHashSet<EffectId>,
    deck_ids: FxHashSet<DeckId>,
    released: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store (and its indexes) from previously saved tables
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        let mut store = MemoryStore::new();

        for (idx, record) in snapshot.cards.iter().enumerate() {
            if store
                .card_names
                .insert(record.card.name.clone(), record.id)
                .is_some()
            {
                return Err(SeedError::DuplicateName(record.card.name.clone()));
            }
            store.card_index.insert(record.id, idx);
        }
        for (idx, wrapper) in snapshot.wrappers.iter().enumerate() {
            store.wrapper_index.insert(wrapper.id, idx);
        }
        for (idx, effect) in snapshot.effects.iter().enumerate() {
            store.effect_index.insert(effect.id, idx);
        }
        for link in &snapshot.links {
            store.linked_effects.insert(link.effect_id);
        }
        for deck in &snapshot.decks {
            store.deck_ids.insert(deck.id);
        }

        store.tables = snapshot;
        Ok(store)
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.tables
    }

    pub fn into_snapshot(self) -> CatalogSnapshot {
        self.tables
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.tables.cards
    }

    pub fn card(&self, id: CardId) -> Option<&CardRecord> {
        self.card_index.get(&id).map(|&idx| &self.tables.cards[idx])
    }

    pub fn card_by_name(&self, name: &str) -> Option<&CardRecord> {
        self.card_names.get(name).and_then(|id| self.card(*id))
    }

    pub fn wrappers(&self) -> &[WrapperRecord] {
        &self.tables.wrappers
    }

    pub fn wrappers_for(&self, card_id: CardId) -> Vec<&WrapperRecord> {
        self.tables
            .wrappers
            .iter()
            .filter(|wrapper| wrapper.card_id == card_id)
            .collect()
    }

    pub fn effects(&self) -> &[EffectRecord] {
        &self.tables.effects
    }

    pub fn effect(&self, id: EffectId) -> Option<&EffectRecord> {
        self.effect_index.get(&id).map(|&idx| &self.tables.effects[idx])
    }

    pub fn links(&self) -> &[LinkRecord] {
        &self.tables.links
    }

    /// Effects bound into a wrapper, in link order
    pub fn effects_in(&self, wrapper_id: WrapperId) -> Vec<&TypedEffect> {
        let mut links: Vec<&LinkRecord> = self
            .tables
            .links
            .iter()
            .filter(|link| link.wrapper_id == wrapper_id)
            .collect();
        links.sort_by_key(|link| link.position);

        links
            .into_iter()
            .filter_map(|link| self.effect(link.effect_id))
            .map(|record| &record.effect)
            .collect()
    }

    pub fn decks(&self) -> &[DeckRecord] {
        &self.tables.decks
    }

    pub fn owned_cards(&self) -> &[OwnedCardRecord] {
        &self.tables.owned_cards
    }

    pub fn deck_cards(&self) -> &[DeckCardRecord] {
        &self.tables.deck_cards
    }

    fn require_card(&self, card_id: CardId, entity: &str) -> Result<&CardRecord> {
        self.card(card_id)
            .ok_or_else(|| SeedError::store_write(entity, format!("unknown card {card_id}")))
    }
}

impl CatalogStore for MemoryStore {
    fn insert_card(&mut self, card: CardInput) -> Result<CardId> {
        if self.card_names.contains_key(&card.name) {
            return Err(SeedError::DuplicateName(card.name));
        }

        let id = CardId::new();
        self.card_names.insert(card.name.clone(), id);
        self.card_index.insert(id, self.tables.cards.len());
        self.tables.cards.push(CardRecord { id, card });
        Ok(id)
    }

    fn insert_effect(&mut self, effect: TypedEffect) -> Result<EffectId> {
        let id = EffectId::new();
        self.effect_index.insert(id, self.tables.effects.len());
        self.tables.effects.push(EffectRecord { id, effect });
        Ok(id)
    }

    fn insert_wrapper(&mut self, card_id: CardId, scope: CardType) -> Result<WrapperId> {
        let card = self.require_card(card_id, "effect wrapper")?;
        if card.card.card_type != scope {
            return Err(SeedError::store_write(
                card.card.name.clone(),
                format!(
                    "a {} card cannot own a {scope} effect wrapper",
                    card.card.card_type
                ),
            ));
        }

        let id = WrapperId::new();
        self.wrapper_index.insert(id, self.tables.wrappers.len());
        self.tables.wrappers.push(WrapperRecord {
            id,
            card_id,
            scope,
            links: SmallVec::new(),
        });
        Ok(id)
    }

    fn insert_link(&mut self, wrapper_id: WrapperId, effect_id: EffectId) -> Result<LinkId> {
        let wrapper_idx = *self.wrapper_index.get(&wrapper_id).ok_or_else(|| {
            SeedError::store_write("effect link", format!("unknown wrapper {wrapper_id}"))
        })?;
        if !self.effect_index.contains_key(&effect_id) {
            return Err(SeedError::store_write(
                "effect link",
                format!("unknown effect {effect_id}"),
            ));
        }
        if !self.linked_effects.insert(effect_id) {
            return Err(SeedError::store_write(
                "effect link",
                format!("effect {effect_id} is already linked"),
            ));
        }

        let id = LinkId::new();
        let wrapper = &mut self.tables.wrappers[wrapper_idx];
        let position = wrapper.links.len();
        wrapper.links.push(id);
        self.tables.links.push(LinkRecord {
            id,
            wrapper_id,
            effect_id,
            position,
        });
        Ok(id)
    }

    fn insert_deck(&mut self, owner: DeckOwner) -> Result<DeckId> {
        if owner.id().trim().is_empty() {
            return Err(SeedError::store_write("deck", "owner id is empty"));
        }

        let id = DeckId::new();
        self.deck_ids.insert(id);
        self.tables.decks.push(DeckRecord { id, owner });
        Ok(id)
    }

    fn insert_owned_card(&mut self, owner: &DeckOwner, card_id: CardId) -> Result<OwnedCardId> {
        self.require_card(card_id, "owned card")?;

        let id = OwnedCardId::new();
        self.tables.owned_cards.push(OwnedCardRecord {
            id,
            owner: owner.clone(),
            card_id,
        });
        Ok(id)
    }

    fn insert_deck_card(&mut self, deck_id: DeckId, card_id: CardId) -> Result<()> {
        if !self.deck_ids.contains(&deck_id) {
            return Err(SeedError::store_write(
                "deck card",
                format!("unknown deck {deck_id}"),
            ));
        }
        self.require_card(card_id, "deck card")?;

        self.tables.deck_cards.push(DeckCardRecord { deck_id, card_id });
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.released = true;
        Ok(())
    }
}
