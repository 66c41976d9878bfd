//! Battle runtime: fighters and the turn-by-turn session.

mod fighter;
mod session;

pub use fighter::{Fighter, FighterStatus, Side, hp_percent};
pub use session::{BattleResult, BattleSession, EndReason, TurnReport};
