//! Combat resolution rules.
//!
//! This module provides pure functions for resolving combat interactions.
//! Randomness enters only through [`AttackRoll`], so every function here is
//! deterministic for fixed inputs.
//!
//! # Core Functions
//!
//! - `resolve_attack`: miss / hit / critical resolution for one attack
//! - `raw_damage`: damage before the miss/crit check
//! - `decide_winner`: winner of a finished battle

pub mod attack;
pub mod outcome;

pub use attack::{
    AttackOutcome, AttackRoll, HitKind, raw_damage, resolve_attack, variance_from_draw,
};
pub use outcome::decide_winner;
