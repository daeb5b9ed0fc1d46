//! Card source adapters
//!
//! Turn spreadsheet exports and JSON manifests into `CardSeed`s for the
//! catalog builder.

pub mod csv;
pub mod effect_text;
pub mod kinds;
pub mod manifest;
pub mod normalize;
pub mod sheet;

pub use effect_text::{parse_effect_cell, parse_effect_line};
pub use kinds::EffectKindTable;
pub use manifest::ManifestLoader;
pub use normalize::{effect_token, normalize_label, parse_optional_int};
pub use sheet::{SheetLoader, SheetRow, DEFAULT_HEADER_ROWS};

use crate::core::CardSeed;

/// Seeds read from one or more sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedBatch {
    pub seeds: Vec<CardSeed>,
    /// Source rows that could not become a seed
    pub rejected_rows: usize,
}

impl SeedBatch {
    pub fn from_seeds(seeds: Vec<CardSeed>) -> Self {
        SeedBatch {
            seeds,
            rejected_rows: 0,
        }
    }

    pub fn extend(&mut self, other: SeedBatch) {
        self.seeds.extend(other.seeds);
        self.rejected_rows += other.rejected_rows;
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}
