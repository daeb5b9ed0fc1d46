//! Typed card effects
//!
//! `TypedEffect` is a closed tagged union: each stored effect row carries
//! exactly one variant. `EffectKind` names the variants without payloads and
//! `EffectKind::build` is the total constructor used by the catalog builder.

use crate::core::{DamageType, EffectId, StatType, TargetType};
use crate::{Result, SeedError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload-free effect kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Poison,
    Initiative,
    Damage,
    Taunt,
    Charge,
    Lifesteal,
    Pickup,
    Summon,
    Resilience,
    Heal,
    Armor,
    BuffStat,
    DebuffStat,
    BuffDamage,
    DebuffDamage,
    Silence,
    Draw,
    ManaGain,
    BattleCry,
    CowardiceCurse,
    PhantomTouch,
    SprayOfKnives,
    Cleanse,
    RoarAura,
    DyingWishHeal,
}

impl EffectKind {
    pub const ALL: &'static [EffectKind] = &[
        EffectKind::Poison,
        EffectKind::Initiative,
        EffectKind::Damage,
        EffectKind::Taunt,
        EffectKind::Charge,
        EffectKind::Lifesteal,
        EffectKind::Pickup,
        EffectKind::Summon,
        EffectKind::Resilience,
        EffectKind::Heal,
        EffectKind::Armor,
        EffectKind::BuffStat,
        EffectKind::DebuffStat,
        EffectKind::BuffDamage,
        EffectKind::DebuffDamage,
        EffectKind::Silence,
        EffectKind::Draw,
        EffectKind::ManaGain,
        EffectKind::BattleCry,
        EffectKind::CowardiceCurse,
        EffectKind::PhantomTouch,
        EffectKind::SprayOfKnives,
        EffectKind::Cleanse,
        EffectKind::RoarAura,
        EffectKind::DyingWishHeal,
    ];

    /// Storage model name, e.g. "PoisonEffect"
    pub fn model_name(&self) -> String {
        format!("{self:?}Effect")
    }

    /// Build the typed effect for this kind from a loose payload
    ///
    /// Fails with `MalformedField` when a field the variant requires is
    /// missing. Fields a variant does not use are ignored.
    pub fn build(self, payload: &EffectPayload) -> Result<TypedEffect> {
        let amount = || payload.require_amount(self);
        let target = payload.target_type.unwrap_or(TargetType::Hero);

        Ok(match self {
            EffectKind::Poison => TypedEffect::Poison { amount: amount()? },
            EffectKind::Initiative => TypedEffect::Initiative { amount: amount()? },
            EffectKind::Damage => TypedEffect::Damage {
                amount: amount()?,
                target_type: target,
                damage_type: payload.damage_type.unwrap_or(DamageType::Physical),
            },
            EffectKind::Taunt => TypedEffect::Taunt,
            EffectKind::Charge => TypedEffect::Charge,
            EffectKind::Lifesteal => TypedEffect::Lifesteal {
                amount: payload.amount,
            },
            EffectKind::Pickup => TypedEffect::Pickup { amount: amount()? },
            EffectKind::Summon => TypedEffect::Summon,
            EffectKind::Resilience => TypedEffect::Resilience { amount: amount()? },
            EffectKind::Heal => TypedEffect::Heal {
                amount: amount()?,
                target_type: target,
            },
            EffectKind::Armor => TypedEffect::Armor { amount: amount()? },
            EffectKind::BuffStat => TypedEffect::BuffStat(payload.stat_modifier(self)?),
            EffectKind::DebuffStat => TypedEffect::DebuffStat(payload.stat_modifier(self)?),
            EffectKind::BuffDamage => TypedEffect::BuffDamage(payload.modifier(self)?),
            EffectKind::DebuffDamage => TypedEffect::DebuffDamage(payload.modifier(self)?),
            EffectKind::Silence => TypedEffect::Silence {
                duration: payload.duration,
            },
            EffectKind::Draw => TypedEffect::Draw { amount: amount()? },
            EffectKind::ManaGain => TypedEffect::ManaGain { amount: amount()? },
            EffectKind::BattleCry => TypedEffect::BattleCry { amount: amount()? },
            EffectKind::CowardiceCurse => TypedEffect::CowardiceCurse { amount: amount()? },
            EffectKind::PhantomTouch => TypedEffect::PhantomTouch { amount: amount()? },
            EffectKind::SprayOfKnives => TypedEffect::SprayOfKnives { amount: amount()? },
            EffectKind::Cleanse => TypedEffect::Cleanse { amount: amount()? },
            EffectKind::RoarAura => TypedEffect::RoarAura { amount: amount()? },
            EffectKind::DyingWishHeal => TypedEffect::DyingWishHeal { amount: amount()? },
        })
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Timed or percentage modifier shared by the damage buff/debuff variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub amount: i32,
    pub duration: Option<i32>,
    pub percentage: bool,
}

/// Modifier applied to one stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatType,
    pub amount: i32,
    pub duration: Option<i32>,
    pub percentage: bool,
}

/// One gameplay effect with its variant-specific payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypedEffect {
    Poison { amount: i32 },
    Initiative { amount: i32 },
    Damage {
        amount: i32,
        target_type: TargetType,
        damage_type: DamageType,
    },
    Taunt,
    Charge,
    Lifesteal { amount: Option<i32> },
    Pickup { amount: i32 },
    Summon,
    Resilience { amount: i32 },
    Heal { amount: i32, target_type: TargetType },
    Armor { amount: i32 },
    BuffStat(StatModifier),
    DebuffStat(StatModifier),
    BuffDamage(Modifier),
    DebuffDamage(Modifier),
    Silence { duration: Option<i32> },
    Draw { amount: i32 },
    ManaGain { amount: i32 },
    // Minion abilities that only carry a strength
    BattleCry { amount: i32 },
    CowardiceCurse { amount: i32 },
    PhantomTouch { amount: i32 },
    SprayOfKnives { amount: i32 },
    Cleanse { amount: i32 },
    RoarAura { amount: i32 },
    DyingWishHeal { amount: i32 },
}

impl TypedEffect {
    pub fn kind(&self) -> EffectKind {
        match self {
            TypedEffect::Poison { .. } => EffectKind::Poison,
            TypedEffect::Initiative { .. } => EffectKind::Initiative,
            TypedEffect::Damage { .. } => EffectKind::Damage,
            TypedEffect::Taunt => EffectKind::Taunt,
            TypedEffect::Charge => EffectKind::Charge,
            TypedEffect::Lifesteal { .. } => EffectKind::Lifesteal,
            TypedEffect::Pickup { .. } => EffectKind::Pickup,
            TypedEffect::Summon => EffectKind::Summon,
            TypedEffect::Resilience { .. } => EffectKind::Resilience,
            TypedEffect::Heal { .. } => EffectKind::Heal,
            TypedEffect::Armor { .. } => EffectKind::Armor,
            TypedEffect::BuffStat(_) => EffectKind::BuffStat,
            TypedEffect::DebuffStat(_) => EffectKind::DebuffStat,
            TypedEffect::BuffDamage(_) => EffectKind::BuffDamage,
            TypedEffect::DebuffDamage(_) => EffectKind::DebuffDamage,
            TypedEffect::Silence { .. } => EffectKind::Silence,
            TypedEffect::Draw { .. } => EffectKind::Draw,
            TypedEffect::ManaGain { .. } => EffectKind::ManaGain,
            TypedEffect::BattleCry { .. } => EffectKind::BattleCry,
            TypedEffect::CowardiceCurse { .. } => EffectKind::CowardiceCurse,
            TypedEffect::PhantomTouch { .. } => EffectKind::PhantomTouch,
            TypedEffect::SprayOfKnives { .. } => EffectKind::SprayOfKnives,
            TypedEffect::Cleanse { .. } => EffectKind::Cleanse,
            TypedEffect::RoarAura { .. } => EffectKind::RoarAura,
            TypedEffect::DyingWishHeal { .. } => EffectKind::DyingWishHeal,
        }
    }
}

/// Loosely-populated effect fields as they arrive from a source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectPayload {
    pub amount: Option<i32>,
    pub target_type: Option<TargetType>,
    pub damage_type: Option<DamageType>,
    pub stat: Option<StatType>,
    pub duration: Option<i32>,
    pub percentage: bool,
}

impl EffectPayload {
    pub fn amount(amount: i32) -> Self {
        EffectPayload {
            amount: Some(amount),
            ..Default::default()
        }
    }

    fn require_amount(&self, kind: EffectKind) -> Result<i32> {
        self.amount.ok_or_else(|| {
            SeedError::malformed("amount", "", format!("{kind} effect requires an amount"))
        })
    }

    fn modifier(&self, kind: EffectKind) -> Result<Modifier> {
        Ok(Modifier {
            amount: self.require_amount(kind)?,
            duration: self.duration,
            percentage: self.percentage,
        })
    }

    fn stat_modifier(&self, kind: EffectKind) -> Result<StatModifier> {
        let stat = self.stat.ok_or_else(|| {
            SeedError::malformed("stat", "", format!("{kind} effect requires a stat"))
        })?;
        Ok(StatModifier {
            stat,
            amount: self.require_amount(kind)?,
            duration: self.duration,
            percentage: self.percentage,
        })
    }
}

/// Effect kind as resolved by a source adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKindRef {
    Known(EffectKind),
    /// Name that did not resolve to a kind; kept for logging
    Unrecognized(String),
}

/// One effect the builder should attempt to attach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectInput {
    pub kind: EffectKindRef,
    pub payload: EffectPayload,
}

impl EffectInput {
    pub fn new(kind: EffectKind, payload: EffectPayload) -> Self {
        EffectInput {
            kind: EffectKindRef::Known(kind),
            payload,
        }
    }

    /// Kind with no payload (Taunt, Charge, ...)
    pub fn bare(kind: EffectKind) -> Self {
        Self::new(kind, EffectPayload::default())
    }

    pub fn with_amount(kind: EffectKind, amount: i32) -> Self {
        Self::new(kind, EffectPayload::amount(amount))
    }

    pub fn damage(amount: i32, target_type: TargetType, damage_type: DamageType) -> Self {
        Self::new(
            EffectKind::Damage,
            EffectPayload {
                amount: Some(amount),
                target_type: Some(target_type),
                damage_type: Some(damage_type),
                ..Default::default()
            },
        )
    }

    pub fn heal(amount: i32, target_type: TargetType) -> Self {
        Self::new(
            EffectKind::Heal,
            EffectPayload {
                amount: Some(amount),
                target_type: Some(target_type),
                ..Default::default()
            },
        )
    }

    pub fn unrecognized(name: impl Into<String>) -> Self {
        EffectInput {
            kind: EffectKindRef::Unrecognized(name.into()),
            payload: EffectPayload::default(),
        }
    }

    /// Human-readable kind name for log lines
    pub fn kind_name(&self) -> String {
        match &self.kind {
            EffectKindRef::Known(kind) => kind.model_name(),
            EffectKindRef::Unrecognized(name) => name.clone(),
        }
    }
}

/// A stored typed effect row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRecord {
    pub id: EffectId,
    pub effect: TypedEffect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_total() {
        let payload = EffectPayload {
            amount: Some(2),
            stat: Some(StatType::Health),
            ..Default::default()
        };
        for kind in EffectKind::ALL {
            let effect = kind.build(&payload).unwrap();
            assert_eq!(effect.kind(), *kind);
        }
    }

    #[test]
    fn test_ability_kinds_carry_amount() {
        let effect = EffectKind::RoarAura.build(&EffectPayload::amount(3)).unwrap();
        assert_eq!(effect, TypedEffect::RoarAura { amount: 3 });

        let err = EffectKind::BattleCry.build(&EffectPayload::default()).unwrap_err();
        assert!(matches!(err, SeedError::MalformedField { field: "amount", .. }));
    }

    #[test]
    fn test_damage_defaults() {
        let effect = EffectKind::Damage.build(&EffectPayload::amount(3)).unwrap();
        assert_eq!(
            effect,
            TypedEffect::Damage {
                amount: 3,
                target_type: TargetType::Hero,
                damage_type: DamageType::Physical,
            }
        );
    }

    #[test]
    fn test_missing_amount_is_malformed() {
        let err = EffectKind::Poison.build(&EffectPayload::default()).unwrap_err();
        assert!(matches!(err, SeedError::MalformedField { field: "amount", .. }));
    }

    #[test]
    fn test_stat_buff_requires_stat() {
        let err = EffectKind::BuffStat.build(&EffectPayload::amount(1)).unwrap_err();
        assert!(matches!(err, SeedError::MalformedField { field: "stat", .. }));
    }

    #[test]
    fn test_bare_kinds_ignore_amount() {
        let effect = EffectKind::Taunt.build(&EffectPayload::amount(9)).unwrap();
        assert_eq!(effect, TypedEffect::Taunt);
    }

    #[test]
    fn test_model_names() {
        assert_eq!(EffectKind::Poison.model_name(), "PoisonEffect");
        assert_eq!(EffectKind::ManaGain.model_name(), "ManaGainEffect");
        assert_eq!(
            EffectKind::SprayOfKnives.model_name(),
            "SprayOfKnivesEffect"
        );
        assert_eq!(
            EffectKind::DyingWishHeal.model_name(),
            "DyingWishHealEffect"
        );
    }

    #[test]
    fn test_effect_serialization_is_tagged() {
        let effect = TypedEffect::Poison { amount: 2 };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["kind"], "Poison");
        assert_eq!(json["amount"], 2);

        let back: TypedEffect = serde_json::from_value(json).unwrap();
        assert_eq!(back, effect);
    }
}
