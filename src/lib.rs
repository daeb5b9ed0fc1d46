//! Card catalog seeder
//!
//! Builds a card game's static catalog: cards, their typed effects and the
//! wrapper/link rows that tie them together. Cards come from spreadsheet
//! exports, JSON manifests or the built-in starter set. Also builds starter
//! decks and uploads static item JSON to blob storage.

pub mod blob;
pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod logger;
pub mod store;

pub use error::{Result, SeedError};
