//! Card catalog seeding
//!
//! Writes cards, their effect graphs and starter decks into a `CatalogStore`.

pub mod batch;
pub mod builder;
pub mod deck;
pub mod report;
pub mod starter;

pub use batch::seed_batch;
pub use builder::CatalogBuilder;
pub use deck::{build_deck, DeckReport, DEFAULT_DECK_SIZE};
pub use report::{AttachReport, CardOutcome, EffectOutcome, SeedReport};
pub use starter::starter_set;
