//! JSON-file-backed catalog store
//!
//! The whole catalog lives in one JSON document. Opening loads it (so names
//! seeded by earlier runs still count as duplicates); releasing writes it back
//! if anything was inserted. Writes go through a temporary file and a rename
//! so a crash never leaves a half-written catalog behind.

use crate::core::{
    CardId, CardInput, CardType, DeckId, DeckOwner, EffectId, LinkId, OwnedCardId, TypedEffect,
    WrapperId,
};
use crate::store::{CatalogSnapshot, CatalogStore, MemoryStore};
use crate::{Result, SeedError};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
    dirty: bool,
    released: bool,
}

impl JsonFileStore {
    /// Open the catalog at `path`, starting empty if the file does not exist
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let inner = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            let snapshot: CatalogSnapshot = serde_json::from_str(&json).map_err(|e| {
                SeedError::ParseError(format!(
                    "Failed to parse catalog file '{}': {e}",
                    path.display()
                ))
            })?;
            MemoryStore::from_snapshot(snapshot)?
        } else {
            MemoryStore::new()
        };

        Ok(JsonFileStore {
            path,
            inner,
            dirty: false,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read access to the loaded tables
    pub fn tables(&self) -> &MemoryStore {
        &self.inner
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self.inner.snapshot())?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        self.dirty = false;
        Ok(())
    }

    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_ok() {
            self.dirty = true;
        }
        result
    }
}

impl CatalogStore for JsonFileStore {
    fn insert_card(&mut self, card: CardInput) -> Result<CardId> {
        let result = self.inner.insert_card(card);
        self.track(result)
    }

    fn insert_effect(&mut self, effect: TypedEffect) -> Result<EffectId> {
        let result = self.inner.insert_effect(effect);
        self.track(result)
    }

    fn insert_wrapper(&mut self, card_id: CardId, scope: CardType) -> Result<WrapperId> {
        let result = self.inner.insert_wrapper(card_id, scope);
        self.track(result)
    }

    fn insert_link(&mut self, wrapper_id: WrapperId, effect_id: EffectId) -> Result<LinkId> {
        let result = self.inner.insert_link(wrapper_id, effect_id);
        self.track(result)
    }

    fn insert_deck(&mut self, owner: DeckOwner) -> Result<DeckId> {
        let result = self.inner.insert_deck(owner);
        self.track(result)
    }

    fn insert_owned_card(&mut self, owner: &DeckOwner, card_id: CardId) -> Result<OwnedCardId> {
        let result = self.inner.insert_owned_card(owner, card_id);
        self.track(result)
    }

    fn insert_deck_card(&mut self, deck_id: DeckId, card_id: CardId) -> Result<()> {
        let result = self.inner.insert_deck_card(deck_id, card_id);
        self.track(result)
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        if self.dirty {
            self.flush()?;
        }
        self.released = true;
        self.inner.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Nation, Rarity};

    fn temp_catalog(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("card-seeder-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("catalog.json")
    }

    fn spell(name: &str) -> CardInput {
        CardInput::new(name, Nation::Dusane, Rarity::Common, CardType::Spell, 4)
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let path = temp_catalog("empty");
        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.tables().cards().is_empty());
    }

    #[test]
    fn test_release_persists_and_reopen_rejects_duplicates() {
        let path = temp_catalog("persist");

        let mut store = JsonFileStore::open(&path).unwrap();
        let card = store.insert_card(spell("Blizzard")).unwrap();
        let wrapper = store.insert_wrapper(card, CardType::Spell).unwrap();
        let effect = store.insert_effect(TypedEffect::Poison { amount: 2 }).unwrap();
        store.insert_link(wrapper, effect).unwrap();
        store.release().unwrap();
        assert!(path.exists());

        let mut reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.tables().cards().len(), 1);
        assert_eq!(reopened.tables().effects_in(wrapper).len(), 1);
        assert!(reopened.insert_card(spell("Blizzard")).unwrap_err().is_duplicate());
    }

    #[test]
    fn test_clean_release_writes_nothing() {
        let path = temp_catalog("clean");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = temp_catalog("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, SeedError::ParseError(_)));
    }
}
