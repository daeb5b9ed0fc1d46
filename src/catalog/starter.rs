//! Built-in starter set
//!
//! Hand-authored cards that every fresh catalog starts with.

use crate::core::{
    CardInput, CardSeed, CardType, DamageType, EffectInput, EffectKind, Nation, Rarity, TargetType,
};

fn minion(
    name: &str,
    nation: Nation,
    rarity: Rarity,
    tier: i32,
    cost: i32,
    health: i32,
    damage: i32,
) -> CardInput {
    CardInput::new(name, nation, rarity, CardType::Minion, cost)
        .with_stats(health, damage)
        .with_tier(tier)
}

fn spell(name: &str, nation: Nation, rarity: Rarity, tier: i32, cost: i32) -> CardInput {
    CardInput::new(name, nation, rarity, CardType::Spell, cost)
        .with_stats(0, 0)
        .with_tier(tier)
}

/// Starter minions
pub fn starter_minions() -> Vec<CardSeed> {
    use Nation::*;
    use Rarity::*;

    vec![
        CardSeed::new(
            minion("Lordaeron Footman", Dusane, Common, 1, 1, 2, 1),
            vec![],
        ),
        // Upon being played, draw two cards
        CardSeed::new(
            minion("Spellbreaker", Aylen, Common, 2, 3, 3, 5),
            vec![EffectInput::with_amount(EffectKind::Pickup, 2)],
        ),
        // Applies two poison to the enemy hero when played
        CardSeed::new(
            minion("Warg Rider", Ironmark, Epic, 3, 5, 5, 7),
            vec![EffectInput::with_amount(EffectKind::Poison, 2)],
        ),
        CardSeed::new(
            minion("Sylvan Archer", Kelidor, Common, 1, 2, 3, 2),
            vec![EffectInput::bare(EffectKind::Charge)],
        ),
        CardSeed::new(
            minion("Ironclad Defender", Ironmark, Epic, 3, 4, 6, 2),
            vec![EffectInput::bare(EffectKind::Taunt)],
        ),
        CardSeed::new(
            minion("Blood Berserker", Ironmark, Legendary, 3, 6, 8, 6),
            vec![EffectInput::bare(EffectKind::Lifesteal)],
        ),
        CardSeed::new(
            minion("Cursed Witch", Kelidor, Legendary, 3, 6, 4, 3),
            vec![EffectInput::with_amount(EffectKind::Poison, 4)],
        ),
    ]
}

/// Starter spells
pub fn starter_spells() -> Vec<CardSeed> {
    use DamageType::{Chaos, Physical, Spell};
    use Nation::*;
    use Rarity::*;

    vec![
        CardSeed::new(
            spell("Blizzard", Dusane, Common, 2, 4),
            vec![
                EffectInput::damage(4, TargetType::Minion, Spell),
                EffectInput::damage(2, TargetType::Hero, Spell),
            ],
        ),
        CardSeed::new(
            spell("Pulverize", Ironmark, Common, 1, 3),
            vec![
                EffectInput::damage(2, TargetType::Minion, Physical),
                EffectInput::damage(1, TargetType::Hero, Physical),
            ],
        ),
        CardSeed::new(
            spell("Healing Light", Aylen, Common, 2, 5),
            vec![EffectInput::heal(5, TargetType::Both)],
        ),
        // Negative poison cleanses existing stacks
        CardSeed::new(
            spell("Lesser Cleanse", Aylen, Common, 1, 1),
            vec![EffectInput::with_amount(EffectKind::Poison, -1)],
        ),
        CardSeed::new(
            spell("Cleanse", Aylen, Common, 2, 4),
            vec![EffectInput::with_amount(EffectKind::Poison, -5)],
        ),
        CardSeed::new(
            spell("Master Tactics", Dusane, Common, 1, 1),
            vec![EffectInput::with_amount(EffectKind::Initiative, 1)],
        ),
        CardSeed::new(
            spell("Chaos Bolt", Kelidor, Epic, 3, 5),
            vec![EffectInput::damage(6, TargetType::Hero, Chaos)],
        ),
        CardSeed::new(
            spell("Death Pact", Kelidor, Common, 2, 4),
            vec![
                EffectInput::damage(4, TargetType::Minion, Spell),
                EffectInput::heal(2, TargetType::Hero),
            ],
        ),
        CardSeed::new(
            spell("Shieldwall", Dusane, Common, 1, 2),
            vec![EffectInput::with_amount(EffectKind::Armor, 2)],
        ),
        CardSeed::new(
            spell("Decimate", Ironmark, Epic, 4, 8),
            vec![EffectInput::with_amount(EffectKind::Armor, -10)],
        ),
        CardSeed::new(
            spell("Shadowstrike", Kelidor, Epic, 3, 5),
            vec![
                EffectInput::damage(3, TargetType::Both, Spell),
                EffectInput::with_amount(EffectKind::Poison, 2),
            ],
        ),
        CardSeed::new(
            spell("Frostfire Bolt", Dusane, Magic, 2, 3),
            vec![EffectInput::damage(3, TargetType::Hero, Spell)],
        ),
        CardSeed::new(spell("Arcane Enlightenment", Neuhaven, Magic, 2, 2), vec![]),
        CardSeed::new(
            spell("Revitalize", Neuhaven, Magic, 2, 2),
            vec![
                EffectInput::heal(3, TargetType::Hero),
                EffectInput::with_amount(EffectKind::Resilience, 2),
            ],
        ),
    ]
}

/// Every starter card, minions first
pub fn starter_set() -> Vec<CardSeed> {
    let mut seeds = starter_minions();
    seeds.extend(starter_spells());
    seeds
}
