//! Opaque row identifiers
//!
//! Every stored row gets a random UUID at creation time. Each table has its
//! own newtype so a wrapper id can never be passed where a card id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Allocate a fresh identifier
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                $name(uuid)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::SeedError;

            fn from_str(s: &str) -> crate::Result<Self> {
                Uuid::parse_str(s.trim())
                    .map($name)
                    .map_err(|e| crate::SeedError::malformed(stringify!($name), s, e.to_string()))
            }
        }
    };
}

define_id!(
    /// Identifier of a Card row
    CardId
);
define_id!(
    /// Identifier of a MinionEffect / SpellEffect wrapper row
    WrapperId
);
define_id!(
    /// Identifier of a typed effect row
    EffectId
);
define_id!(
    /// Identifier of a wrapper-to-effect link row
    LinkId
);
define_id!(DeckId);
define_id!(
    /// Identifier of a hero card / npc card row
    OwnedCardId
);
