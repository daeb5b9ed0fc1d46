//! Seeder configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an empty
//! object (or no file at all) is a valid configuration. Command-line flags
//! override individual fields.

use crate::catalog::DEFAULT_DECK_SIZE;
use crate::core::EffectKind;
use crate::loader::{EffectKindTable, DEFAULT_HEADER_ROWS};
use crate::{Result, SeedError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Catalog snapshot file used by the JSON store
    pub store_path: PathBuf,
    pub sheet: SheetConfig,
    pub effect_kinds: EffectKindsConfig,
    pub blob: BlobConfig,
    /// Cards drawn into a new deck
    pub deck_size: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            store_path: PathBuf::from("catalog.json"),
            sheet: SheetConfig::default(),
            effect_kinds: EffectKindsConfig::default(),
            blob: BlobConfig::default(),
            deck_size: DEFAULT_DECK_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub header_rows: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            header_rows: DEFAULT_HEADER_ROWS,
        }
    }
}

/// Extra names for effect kinds, and kinds to stop recognizing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectKindsConfig {
    /// Source spelling -> kind, e.g. `"Toxin": "Poison"`
    pub aliases: BTreeMap<String, EffectKind>,
    pub disabled: Vec<EffectKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobConfig {
    /// Directory uploads are written under
    pub root: PathBuf,
    /// Prefix joined with the object key to form the public URL
    pub public_base_url: String,
}

impl Default for BlobConfig {
    fn default() -> Self {
        BlobConfig {
            root: PathBuf::from("blobs"),
            public_base_url: "http://localhost/".to_string(),
        }
    }
}

impl SeedConfig {
    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SeedConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.deck_size == 0 {
            return Err(SeedError::InvalidConfig("deck_size must be at least 1".into()));
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(SeedError::InvalidConfig("store_path is empty".into()));
        }
        if let Some(alias) = self.effect_kinds.aliases.keys().find(|a| a.trim().is_empty()) {
            return Err(SeedError::InvalidConfig(format!(
                "effect kind alias {alias:?} is blank"
            )));
        }
        Ok(())
    }

    /// Effect kind table with configured aliases added and disabled kinds removed
    pub fn kind_table(&self) -> EffectKindTable {
        let mut table = self
            .effect_kinds
            .aliases
            .iter()
            .fold(EffectKindTable::default(), |table, (alias, kind)| {
                table.with_alias(alias, *kind)
            });
        for kind in &self.effect_kinds.disabled {
            table.disable(*kind);
        }
        table
    }
}
