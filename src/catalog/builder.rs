//! Card catalog builder
//!
//! Writes one card and its effect graph:
//!
//! ```text
//! Card ──< EffectWrapper (MinionEffect | SpellEffect) ──< EffectLink >── TypedEffect
//! ```
//!
//! The card row is written first and stays even if later effect writes fail.
//! Each effect input is attempted on its own; failures are logged, recorded in
//! the `AttachReport` and the loop moves on to the next input.

use crate::catalog::report::{AttachReport, CardOutcome, EffectOutcome};
use crate::core::{
    CardId, CardInput, CardSeed, CardType, EffectId, EffectInput, EffectKindRef, LinkId, WrapperId,
};
use crate::logger::SeedLogger;
use crate::store::CatalogStore;
use crate::{log_if_verbose, Result, SeedError};

pub struct CatalogBuilder<'a, S: CatalogStore> {
    store: &'a mut S,
    logger: &'a SeedLogger,
}

impl<'a, S: CatalogStore> CatalogBuilder<'a, S> {
    pub fn new(store: &'a mut S, logger: &'a SeedLogger) -> Self {
        CatalogBuilder { store, logger }
    }

    /// Insert the card row under its trimmed name
    ///
    /// Fails with `DuplicateName` when a card with the same name exists; the
    /// existing card is not touched.
    pub fn create_card(&mut self, input: &CardInput) -> Result<CardId> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(SeedError::malformed("name", &input.name, "card name is empty"));
        }
        let mut card = input.clone();
        card.name = name.to_string();
        self.store.insert_card(card)
    }

    /// Create the card's effect wrapper and link every recognized effect
    ///
    /// Only a failure to create the wrapper itself is returned as `Err`.
    pub fn attach_effects(
        &mut self,
        card_id: CardId,
        card_type: CardType,
        effects: &[EffectInput],
    ) -> Result<AttachReport> {
        self.attach(card_id, card_type, &card_id.to_string(), effects)
    }

    /// Create a card and attach its effects, folding every failure into the outcome
    pub fn seed_card(&mut self, seed: &CardSeed) -> CardOutcome {
        let name = seed.card.name.clone();

        let card_id = match self.create_card(&seed.card) {
            Ok(id) => id,
            Err(SeedError::DuplicateName(_)) => {
                self.logger.normal(
                    "card",
                    &format!("Card {name} already exists in the database. Skipping..."),
                );
                return CardOutcome::Duplicate { name };
            }
            Err(error) => {
                self.logger
                    .error("card", &format!("Error creating card {name}: {error}"));
                return CardOutcome::Failed { name, error };
            }
        };

        match self.attach(card_id, seed.card.card_type, &name, &seed.effects) {
            Ok(attach) => {
                self.logger.normal(
                    "card",
                    &format!(
                        "{name} inserted successfully ({}/{} effects linked)",
                        attach.linked(),
                        seed.effects.len()
                    ),
                );
                CardOutcome::Created {
                    name,
                    card_id,
                    attach,
                }
            }
            Err(error) => {
                self.logger.error(
                    "card",
                    &format!("Card {name} was created but its effect wrapper failed: {error}"),
                );
                CardOutcome::Incomplete {
                    name,
                    card_id,
                    error,
                }
            }
        }
    }

    fn attach(
        &mut self,
        card_id: CardId,
        card_type: CardType,
        label: &str,
        effects: &[EffectInput],
    ) -> Result<AttachReport> {
        let wrapper_id = self.store.insert_wrapper(card_id, card_type)?;
        log_if_verbose!(
            self.logger,
            "effect",
            "Created {card_type} effect wrapper for card {label}"
        );

        let mut outcomes = Vec::with_capacity(effects.len());
        for (index, input) in effects.iter().enumerate() {
            match self.attach_one(wrapper_id, input) {
                Ok((effect_id, link_id)) => {
                    log_if_verbose!(
                        self.logger,
                        "effect",
                        "Linked {} into {card_type} wrapper of card {label}",
                        input.kind_name()
                    );
                    outcomes.push(EffectOutcome::Linked { effect_id, link_id });
                }
                Err(error) => {
                    self.report_effect_error(label, input, &error);
                    outcomes.push(EffectOutcome::Skipped { index, error });
                }
            }
        }

        Ok(AttachReport {
            wrapper_id,
            outcomes,
        })
    }

    fn attach_one(
        &mut self,
        wrapper_id: WrapperId,
        input: &EffectInput,
    ) -> Result<(EffectId, LinkId)> {
        let kind = match &input.kind {
            EffectKindRef::Known(kind) => *kind,
            EffectKindRef::Unrecognized(name) => {
                return Err(SeedError::UnrecognizedEffectKind(name.clone()))
            }
        };

        let effect = kind.build(&input.payload)?;
        let effect_id = self.store.insert_effect(effect)?;
        let link_id = self.store.insert_link(wrapper_id, effect_id)?;
        Ok((effect_id, link_id))
    }

    fn report_effect_error(&self, label: &str, input: &EffectInput, error: &SeedError) {
        match error {
            SeedError::UnrecognizedEffectKind(name) => self.logger.warn(
                "effect",
                &format!("Effect type '{name}' not handled for card {label}; skipping"),
            ),
            SeedError::MalformedField { .. } => self.logger.warn(
                "effect",
                &format!(
                    "Skipping malformed {} for card {label}: {error}",
                    input.kind_name()
                ),
            ),
            _ => self.logger.error(
                "effect",
                &format!(
                    "Error creating {} for card {label}: {error}",
                    input.kind_name()
                ),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        DamageType, EffectKind, EffectPayload, Nation, Rarity, TargetType, TypedEffect,
    };
    use crate::store::MemoryStore;

    fn warg_rider() -> CardInput {
        CardInput::new(
            "Warg Rider",
            Nation::Ironmark,
            Rarity::Epic,
            CardType::Minion,
            5,
        )
        .with_stats(5, 7)
        .with_tier(3)
    }

    #[test]
    fn test_create_card_rejects_blank_name() {
        let mut store = MemoryStore::new();
        let logger = SeedLogger::capturing();
        let mut builder = CatalogBuilder::new(&mut store, &logger);

        let mut card = warg_rider();
        card.name = "   ".into();
        let err = builder.create_card(&card).unwrap_err();
        assert!(matches!(err, SeedError::MalformedField { field: "name", .. }));
    }

    #[test]
    fn test_padded_name_is_still_a_duplicate() {
        let mut store = MemoryStore::new();
        let logger = SeedLogger::capturing();
        let mut builder = CatalogBuilder::new(&mut store, &logger);

        builder.create_card(&warg_rider()).unwrap();
        let mut padded = warg_rider();
        padded.name = " Warg Rider ".into();
        let err = builder.create_card(&padded).unwrap_err();
        assert!(matches!(err, SeedError::DuplicateName(_)));

        let mut fresh = warg_rider();
        fresh.name = "  Cursed Witch\t".into();
        builder.create_card(&fresh).unwrap();

        assert_eq!(store.cards().len(), 2);
        assert!(store.card_by_name("Cursed Witch").is_some());
    }

    #[test]
    fn test_attach_empty_bundle_creates_wrapper_only() {
        let mut store = MemoryStore::new();
        let logger = SeedLogger::capturing();
        let mut builder = CatalogBuilder::new(&mut store, &logger);

        let card_id = builder.create_card(&warg_rider()).unwrap();
        let report = builder.attach_effects(card_id, CardType::Minion, &[]).unwrap();

        assert!(report.outcomes.is_empty());
        assert_eq!(store.wrappers().len(), 1);
        assert!(store.links().is_empty());
    }

    #[test]
    fn test_attach_with_wrong_scope_fails_without_effects() {
        let mut store = MemoryStore::new();
        let logger = SeedLogger::capturing();
        let mut builder = CatalogBuilder::new(&mut store, &logger);

        let card_id = builder.create_card(&warg_rider()).unwrap();
        let effects = [EffectInput::with_amount(EffectKind::Poison, 2)];
        assert!(builder.attach_effects(card_id, CardType::Spell, &effects).is_err());

        assert!(store.wrappers().is_empty());
        assert!(store.effects().is_empty());
    }

    #[test]
    fn test_malformed_effect_is_warning() {
        let mut store = MemoryStore::new();
        let logger = SeedLogger::capturing();
        let mut builder = CatalogBuilder::new(&mut store, &logger);

        let seed = CardSeed::new(
            warg_rider(),
            vec![EffectInput::new(EffectKind::Poison, EffectPayload::default())],
        );
        let outcome = builder.seed_card(&seed);

        match outcome {
            CardOutcome::Created { attach, .. } => {
                assert_eq!(attach.linked(), 0);
                assert!(matches!(
                    attach.outcomes[0],
                    EffectOutcome::Skipped {
                        index: 0,
                        error: SeedError::MalformedField { .. }
                    }
                ));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(logger.warnings().len(), 1);
        assert!(store.effects().is_empty());
    }

    #[test]
    fn test_malformed_middle_effect_keeps_neighbours() {
        let mut store = MemoryStore::new();
        let logger = SeedLogger::capturing();
        let mut builder = CatalogBuilder::new(&mut store, &logger);

        let seed = CardSeed::new(
            warg_rider(),
            vec![
                EffectInput::damage(3, TargetType::Hero, DamageType::Spell),
                EffectInput::new(EffectKind::Poison, EffectPayload::default()),
                EffectInput::with_amount(EffectKind::Armor, 1),
            ],
        );
        let CardOutcome::Created { card_id, attach, .. } = builder.seed_card(&seed) else {
            panic!("card should be created");
        };

        assert_eq!(attach.outcomes.len(), 3);
        assert!(attach.outcomes[0].is_linked());
        assert!(matches!(
            attach.outcomes[1],
            EffectOutcome::Skipped {
                index: 1,
                error: SeedError::MalformedField { .. }
            }
        ));
        assert!(attach.outcomes[2].is_linked());
        assert_eq!(logger.warnings().len(), 1);
        assert!(logger.errors().is_empty());

        let wrapper = store.wrappers_for(card_id)[0].id;
        assert_eq!(
            store.effects_in(wrapper),
            vec![
                &TypedEffect::Damage {
                    amount: 3,
                    target_type: TargetType::Hero,
                    damage_type: DamageType::Spell
                },
                &TypedEffect::Armor { amount: 1 },
            ]
        );
        assert_eq!(store.effects().len(), 2);
        assert_eq!(store.links().len(), 2);
    }

    #[test]
    fn test_link_order_follows_input_order() {
        let mut store = MemoryStore::new();
        let logger = SeedLogger::capturing();
        let mut builder = CatalogBuilder::new(&mut store, &logger);

        let seed = CardSeed::new(
            warg_rider(),
            vec![
                EffectInput::bare(EffectKind::Taunt),
                EffectInput::with_amount(EffectKind::Poison, 2),
                EffectInput::bare(EffectKind::Charge),
            ],
        );
        let card_id = builder.seed_card(&seed).card_id().unwrap();

        let wrapper = store.wrappers_for(card_id)[0].id;
        assert_eq!(
            store.effects_in(wrapper),
            vec![
                &TypedEffect::Taunt,
                &TypedEffect::Poison { amount: 2 },
                &TypedEffect::Charge
            ]
        );
    }

    #[test]
    fn test_duplicate_logged_not_errored() {
        let mut store = MemoryStore::new();
        let logger = SeedLogger::capturing();
        let mut builder = CatalogBuilder::new(&mut store, &logger);

        let seed = CardSeed::new(warg_rider(), vec![]);
        builder.seed_card(&seed);
        let outcome = builder.seed_card(&seed);

        assert!(matches!(outcome, CardOutcome::Duplicate { .. }));
        assert!(logger.errors().is_empty());
        assert!(logger
            .logs()
            .iter()
            .any(|entry| entry.message.contains("already exists")));
    }
}
