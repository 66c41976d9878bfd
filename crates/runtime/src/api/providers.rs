//! Asynchronous abstraction for the post-battle decision.
//!
//! Once a battle ends the arena waits for a choice between a rematch and a
//! reset. Runtime users plug in [`DecisionProvider`] implementations so a
//! session can run with human input, scripted fixtures, or a fixed policy.
use std::collections::VecDeque;

use arena_core::BattleResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::errors::Result;

/// What to do after a battle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Decision {
    /// Same pairing, fighters back at full health.
    Rematch,
    /// Clear the pairing and end the session.
    Reset,
}

/// Trait for deciding between rematch and reset.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted decisions
/// - Testing fixtures
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Decide what follows the battle that produced `result`.
    async fn decide(&self, result: &BattleResult) -> Result<Decision>;
}

/// A provider that always resets.
/// Useful for one-shot battles or as a fallback.
pub struct AlwaysResetProvider;

#[async_trait]
impl DecisionProvider for AlwaysResetProvider {
    async fn decide(&self, _result: &BattleResult) -> Result<Decision> {
        Ok(Decision::Reset)
    }
}

/// Replays a fixed list of decisions, then resets.
pub struct ScriptedDecisionProvider {
    decisions: Mutex<VecDeque<Decision>>,
}

impl ScriptedDecisionProvider {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: Mutex::new(decisions.into_iter().collect()),
        }
    }

    /// `count` rematches followed by a reset.
    pub fn rematches(count: usize) -> Self {
        Self::new(std::iter::repeat_n(Decision::Rematch, count))
    }
}

#[async_trait]
impl DecisionProvider for ScriptedDecisionProvider {
    async fn decide(&self, _result: &BattleResult) -> Result<Decision> {
        let next = self.decisions.lock().await.pop_front();
        Ok(next.unwrap_or(Decision::Reset))
    }
}
