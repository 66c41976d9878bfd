//! Data-driven content for the arena.
//!
//! This crate provides loaders for the arena's data files:
//! - Character roster (JSON)
//! - Combat balance tables (TOML)
//!
//! A default roster and balance table are embedded, so the game runs without
//! any data directory. Content is consumed once at start-up and never mutated.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CharacterRecord, ConfigLoader, ContentFactory, RosterLoader, SkillsRecord};
