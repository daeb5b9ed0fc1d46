//! Effect kind lookup
//!
//! Maps the names sources use for effects onto `EffectKind`. Keys are stored
//! lowercased so "LifeStealEffect" and "LifestealEffect" resolve alike.

use crate::core::{EffectKind, EffectKindRef};
use crate::loader::normalize::effect_token;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct EffectKindTable {
    by_token: FxHashMap<String, EffectKind>,
}

impl Default for EffectKindTable {
    /// Every kind under its model name ("PoisonEffect", ...)
    fn default() -> Self {
        let mut table = EffectKindTable {
            by_token: FxHashMap::default(),
        };
        for &kind in EffectKind::ALL {
            table.insert(&kind.model_name(), kind);
        }
        table
    }
}

impl EffectKindTable {
    /// Resolve `alias` (any spelling) to `kind`
    pub fn with_alias(mut self, alias: &str, kind: EffectKind) -> Self {
        self.insert(alias, kind);
        self
    }

    /// Stop recognizing `kind` under every name
    pub fn disable(&mut self, kind: EffectKind) {
        self.by_token.retain(|_, k| *k != kind);
    }

    pub fn is_enabled(&self, kind: EffectKind) -> bool {
        self.by_token.values().any(|k| *k == kind)
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }

    /// Resolve a source effect name
    ///
    /// Tries the trimmed name as written, then its camel-case token.
    pub fn resolve(&self, name: &str) -> EffectKindRef {
        let trimmed = name.trim();
        self.lookup(trimmed)
            .or_else(|| self.lookup(&effect_token(trimmed)))
            .map(EffectKindRef::Known)
            .unwrap_or_else(|| EffectKindRef::Unrecognized(trimmed.to_string()))
    }

    fn lookup(&self, key: &str) -> Option<EffectKind> {
        if key.is_empty() {
            return None;
        }
        self.by_token.get(&key.to_ascii_lowercase()).copied()
    }

    fn insert(&mut self, name: &str, kind: EffectKind) {
        let token = effect_token(name);
        if !token.is_empty() {
            self.by_token.insert(token.to_ascii_lowercase(), kind);
        }
    }
}
