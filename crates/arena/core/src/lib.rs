//! Deterministic rules for the two-fighter arena.
//!
//! `arena-core` holds the canonical combat rules (selection, attack
//! resolution, battle sessions, outcome) as pure, synchronous APIs. Pacing,
//! events and I/O live in the runtime; every random decision is pulled from a
//! caller-owned [`RandomSource`].
//!
//! All state mutation flows through [`lifecycle::Arena`], and supporting
//! crates depend on the types re-exported here.
pub mod battle;
pub mod combat;
pub mod config;
pub mod lifecycle;
pub mod rng;
pub mod roster;
pub mod selection;

pub use battle::{
    BattleResult, BattleSession, EndReason, Fighter, FighterStatus, Side, TurnReport, hp_percent,
};
pub use combat::{
    AttackOutcome, AttackRoll, HitKind, decide_winner, raw_damage, resolve_attack,
    variance_from_draw,
};
pub use config::CombatConfig;
pub use lifecycle::{
    Arena, ArenaSnapshot, BattleStart, BattleSummary, LifecycleError, Phase, TurnStep,
};
pub use rng::{PcgRng, RandomSource, ScriptedRng, unit_to_range};
pub use roster::{ArmorClass, Character, CharacterId, Roster, Skills};
pub use selection::{Pairing, SelectedCharacter, SelectionChange};
