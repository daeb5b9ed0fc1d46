//! Closed label enumerations shared by cards and effects
//!
//! Labels parse from their canonical spelling only ("Epic", not "epic").
//! Source adapters normalize free text before parsing.

use crate::{Result, SeedError};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = SeedError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    _ => Err(SeedError::malformed(
                        $field,
                        s,
                        format!("expected one of {:?}", $name::ALL),
                    )),
                }
            }
        }
    };
}

label_enum!(
    /// Card type; decides which wrapper table may reference the card
    CardType, "card_type" { Minion, Spell }
);

label_enum!(
    /// Rarity tier
    Rarity, "rarity" { Common, Magic, Rare, Epic, Legendary }
);

label_enum!(
    /// Nation (origin tag) of a card
    Nation, "nation" { Dusane, Aylen, Ironmark, Kelidor, Meta, Neuhaven }
);

label_enum!(
    /// Who an effect lands on
    TargetType, "target_type" { Hero, Minion, Both }
);

label_enum!(DamageType, "damage_type" { Physical, Spell, Chaos });

label_enum!(
    /// Stat touched by a stat buff or debuff
    StatType, "stat" { Health, Damage, Armor, Initiative, Mana }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_parse() {
        assert_eq!("Epic".parse::<Rarity>().unwrap(), Rarity::Epic);
        assert_eq!("Minion".parse::<CardType>().unwrap(), CardType::Minion);
        assert_eq!("Chaos".parse::<DamageType>().unwrap(), DamageType::Chaos);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("epic".parse::<Rarity>().is_err());
        assert!("HERO".parse::<TargetType>().is_err());
    }

    #[test]
    fn test_parse_error_names_field() {
        let err = "Atlantis".parse::<Nation>().unwrap_err();
        match err {
            SeedError::MalformedField { field, value, .. } => {
                assert_eq!(field, "nation");
                assert_eq!(value, "Atlantis");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_display_matches_parse() {
        for stat in StatType::ALL {
            assert_eq!(stat.to_string().parse::<StatType>().unwrap(), *stat);
        }
    }
}
