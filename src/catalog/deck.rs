//! Starter deck builder
//!
//! Gives an owner (hero or NPC) a collection of cards and fills a new deck
//! with a random selection of them.

use crate::core::{CardId, DeckId, DeckOwner};
use crate::logger::SeedLogger;
use crate::store::CatalogStore;
use crate::{log_if_verbose, Result, SeedError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Cards drawn into a fresh deck
pub const DEFAULT_DECK_SIZE: usize = 8;

#[derive(Debug)]
pub struct DeckReport {
    pub deck_id: DeckId,
    pub owner: DeckOwner,
    /// Cards successfully added to the owner's collection
    pub owned: Vec<CardId>,
    /// Cards placed in the deck, in selection order
    pub in_deck: Vec<CardId>,
    pub failures: Vec<(CardId, SeedError)>,
}

/// Create a deck for `owner` from `card_ids`
///
/// Every id becomes an owned card; up to `deck_size` distinct owned cards are
/// then chosen with `rng` and added to the deck. Individual row failures are
/// logged and collected. Only failing to create the deck itself is an error.
pub fn build_deck<S: CatalogStore, R: Rng + ?Sized>(
    store: &mut S,
    logger: &SeedLogger,
    owner: DeckOwner,
    card_ids: &[CardId],
    rng: &mut R,
    deck_size: usize,
) -> Result<DeckReport> {
    let deck_id = store.insert_deck(owner.clone())?;

    let mut owned = Vec::with_capacity(card_ids.len());
    let mut failures = Vec::new();
    for &card_id in card_ids {
        if owned.contains(&card_id) {
            continue;
        }
        match store.insert_owned_card(&owner, card_id) {
            Ok(_) => owned.push(card_id),
            Err(error) => {
                logger.error(
                    "deck",
                    &format!("Error adding card {card_id} to {owner}: {error}"),
                );
                failures.push((card_id, error));
            }
        }
    }

    let chosen: Vec<CardId> = owned.choose_multiple(rng, deck_size).copied().collect();

    let mut in_deck = Vec::with_capacity(chosen.len());
    for card_id in chosen {
        match store.insert_deck_card(deck_id, card_id) {
            Ok(()) => {
                log_if_verbose!(logger, "deck", "Added card {card_id} to deck {deck_id}");
                in_deck.push(card_id);
            }
            Err(error) => {
                logger.error(
                    "deck",
                    &format!("Error adding card {card_id} to deck {deck_id}: {error}"),
                );
                failures.push((card_id, error));
            }
        }
    }

    logger.normal(
        "deck",
        &format!(
            "Deck created for {owner} with {} random cards.",
            in_deck.len()
        ),
    );

    Ok(DeckReport {
        deck_id,
        owner,
        owned,
        in_deck,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardInput, CardType, Nation, Rarity};
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn store_with_cards(count: usize) -> (MemoryStore, Vec<CardId>) {
        let mut store = MemoryStore::new();
        let ids = (0..count)
            .map(|i| {
                store
                    .insert_card(CardInput::new(
                        format!("Card {i}"),
                        Nation::Meta,
                        Rarity::Common,
                        CardType::Minion,
                        1,
                    ))
                    .unwrap()
            })
            .collect();
        (store, ids)
    }

    fn hero() -> DeckOwner {
        DeckOwner::Hero("h".into())
    }

    #[test]
    fn test_deck_is_capped_at_deck_size() {
        let (mut store, ids) = store_with_cards(12);
        let logger = SeedLogger::capturing();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let report = build_deck(
            &mut store,
            &logger,
            DeckOwner::Hero("h1".into()),
            &ids,
            &mut rng,
            DEFAULT_DECK_SIZE,
        )
        .unwrap();

        assert_eq!(report.owned.len(), 12);
        assert_eq!(report.in_deck.len(), DEFAULT_DECK_SIZE);
        assert_eq!(store.owned_cards().len(), 12);
        assert_eq!(store.deck_cards().len(), DEFAULT_DECK_SIZE);

        let mut unique = report.in_deck.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), DEFAULT_DECK_SIZE);
    }

    #[test]
    fn test_small_collection_goes_whole_into_deck() {
        let (mut store, ids) = store_with_cards(3);
        let logger = SeedLogger::capturing();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let owner = DeckOwner::Npc("n1".into());
        let report = build_deck(&mut store, &logger, owner, &ids, &mut rng, 8).unwrap();
        assert_eq!(report.in_deck.len(), 3);
    }

    #[test]
    fn test_same_seed_same_selection() {
        let (mut store, ids) = store_with_cards(20);
        let logger = SeedLogger::capturing();

        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let a = build_deck(&mut store, &logger, hero(), &ids, &mut rng_a, 8).unwrap();
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);
        let b = build_deck(&mut store, &logger, hero(), &ids, &mut rng_b, 8).unwrap();

        assert_eq!(a.in_deck, b.in_deck);
        assert_ne!(a.deck_id, b.deck_id);
    }

    #[test]
    fn test_unknown_card_is_collected_not_fatal() {
        let (mut store, mut ids) = store_with_cards(2);
        ids.push(CardId::new());
        let logger = SeedLogger::capturing();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let report = build_deck(&mut store, &logger, hero(), &ids, &mut rng, 8).unwrap();

        assert_eq!(report.owned.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(logger.errors().len(), 1);
    }

    #[test]
    fn test_empty_owner_fails() {
        let (mut store, ids) = store_with_cards(1);
        let logger = SeedLogger::capturing();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let owner = DeckOwner::Hero(" ".into());
        assert!(build_deck(&mut store, &logger, owner, &ids, &mut rng, 8).is_err());
    }
}
