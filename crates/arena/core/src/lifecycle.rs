//! Session lifecycle: selection, battle, decision.
//!
//! [`Arena`] is the single owner of the roster, the pairing and the active
//! battle. It is a synchronous state machine; pacing between turns is the
//! caller's business.
//!
//! ```text
//!            select / reset
//!              ┌──────┐
//!              ▼      │
//!         ┌───────────┴┐  start_battle   ┌──────────┐
//!  ──────►│ Selecting  ├────────────────►│ Fighting │◄─┐
//!         └────────────┘                 └────┬─────┘  │
//!               ▲                   next_turn │        │ rematch
//!               │ reset      ┌────────────────▼─┐      │
//!               └────────────┤ AwaitingDecision ├──────┘
//!                            └──────────────────┘
//! ```

use crate::battle::{BattleResult, BattleSession, FighterStatus, Side, TurnReport};
use crate::config::CombatConfig;
use crate::rng::RandomSource;
use crate::roster::{CharacterId, Roster};
use crate::selection::{Pairing, SelectionChange};

/// Errors raised by lifecycle transitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("both fighters must be selected before a battle can start")]
    NotReady,

    #[error("a battle is already in progress")]
    BattleInProgress,

    #[error("the previous battle is awaiting a rematch or reset decision")]
    AwaitingDecision,

    #[error("no battle is in progress")]
    NoActiveBattle,

    #[error("rematch and reset are only available after a battle has ended")]
    NoFinishedBattle,
}

/// Coarse lifecycle position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Selecting,
    Fighting,
    AwaitingDecision,
}

#[derive(Clone, Debug)]
enum Stage {
    Selecting,
    Fighting(BattleSession),
    AwaitingDecision(BattleResult),
}

/// Returned when a battle (or rematch) begins.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStart {
    /// 1-based count of battles fought since the arena was created.
    pub battle: u32,
    pub fighter_a: FighterStatus,
    pub fighter_b: FighterStatus,
    pub first_attacker: Side,
}

/// Result of advancing a battle by one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnStep {
    Played(TurnReport),
    Concluded(BattleResult),
}

/// Active battle as seen from outside.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    pub fighter_a: FighterStatus,
    pub fighter_b: FighterStatus,
    pub attacker: Side,
    pub round: u32,
}

/// Read-only view of the whole arena.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaSnapshot {
    pub phase: Phase,
    pub pairing: Pairing,
    pub ready_to_fight: bool,
    pub battle: Option<BattleSummary>,
    pub last_result: Option<BattleResult>,
    pub battles_fought: u32,
}

/// Owner of all mutable game state for one player session.
#[derive(Clone, Debug)]
pub struct Arena {
    roster: Roster,
    config: CombatConfig,
    pairing: Pairing,
    stage: Stage,
    battles_fought: u32,
}

impl Arena {
    pub fn new(roster: Roster, config: CombatConfig) -> Self {
        Self {
            roster,
            config,
            pairing: Pairing::new(),
            stage: Stage::Selecting,
            battles_fought: 0,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn pairing(&self) -> &Pairing {
        &self.pairing
    }

    pub fn phase(&self) -> Phase {
        match self.stage {
            Stage::Selecting => Phase::Selecting,
            Stage::Fighting(_) => Phase::Fighting,
            Stage::AwaitingDecision(_) => Phase::AwaitingDecision,
        }
    }

    pub fn battle(&self) -> Option<&BattleSession> {
        match &self.stage {
            Stage::Fighting(session) => Some(session),
            _ => None,
        }
    }

    /// Roster click. Unknown ids, locked pairings and clicks outside the
    /// selection phase are silently ignored.
    pub fn select(&mut self, id: CharacterId) -> Option<SelectionChange> {
        if !matches!(self.stage, Stage::Selecting) {
            return None;
        }
        let character = self.roster.get(id)?;
        self.pairing.select(character)
    }

    /// Starts a battle from the current pairing.
    pub fn start_battle(
        &mut self,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> Result<BattleStart, LifecycleError> {
        match self.stage {
            Stage::Selecting => self.begin(rng),
            Stage::Fighting(_) => Err(LifecycleError::BattleInProgress),
            Stage::AwaitingDecision(_) => Err(LifecycleError::AwaitingDecision),
        }
    }

    /// Replays the same pairing with fighters rebuilt at full health.
    pub fn rematch(
        &mut self,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> Result<BattleStart, LifecycleError> {
        match self.stage {
            Stage::AwaitingDecision(_) => self.begin(rng),
            Stage::Fighting(_) => Err(LifecycleError::BattleInProgress),
            Stage::Selecting => Err(LifecycleError::NoFinishedBattle),
        }
    }

    /// Clears the pairing and returns to selection. Only valid once a battle
    /// has ended; a partial pairing is undone by clicking the same character.
    pub fn reset(&mut self) -> Result<SelectionChange, LifecycleError> {
        match self.stage {
            Stage::AwaitingDecision(_) => {
                self.stage = Stage::Selecting;
                Ok(self.pairing.clear())
            }
            Stage::Fighting(_) => Err(LifecycleError::BattleInProgress),
            Stage::Selecting => Err(LifecycleError::NoFinishedBattle),
        }
    }

    /// Advances the active battle: plays a turn, or concludes it once a
    /// fighter is down or the round cap is hit.
    pub fn next_turn(
        &mut self,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> Result<TurnStep, LifecycleError> {
        let Stage::Fighting(session) = &mut self.stage else {
            return Err(LifecycleError::NoActiveBattle);
        };

        if let Some(report) = session.play_turn(rng, &self.config) {
            return Ok(TurnStep::Played(report));
        }

        let result = session.result();
        self.stage = Stage::AwaitingDecision(result.clone());
        Ok(TurnStep::Concluded(result))
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        let battle = self.battle().map(|session| BattleSummary {
            fighter_a: session.fighter(Side::A).status(),
            fighter_b: session.fighter(Side::B).status(),
            attacker: session.attacker(),
            round: session.round(),
        });
        let last_result = match &self.stage {
            Stage::AwaitingDecision(result) => Some(result.clone()),
            _ => None,
        };

        ArenaSnapshot {
            phase: self.phase(),
            pairing: self.pairing.clone(),
            ready_to_fight: self.pairing.is_ready(),
            battle,
            last_result,
            battles_fought: self.battles_fought,
        }
    }

    fn begin(
        &mut self,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> Result<BattleStart, LifecycleError> {
        let (a, b) = self.pairing.both().ok_or(LifecycleError::NotReady)?;
        let session = BattleSession::start(a, b, rng, &self.config);

        self.battles_fought += 1;
        let start = BattleStart {
            battle: self.battles_fought,
            fighter_a: session.fighter(Side::A).status(),
            fighter_b: session.fighter(Side::B).status(),
            first_attacker: session.attacker(),
        };
        self.stage = Stage::Fighting(session);
        Ok(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PcgRng, ScriptedRng};
    use crate::roster::{ArmorClass, Character, Skills};

    fn roster() -> Roster {
        let config = CombatConfig::default();
        let entries = [
            ("Aiolia", ArmorClass::Gold),
            ("Shiryu", ArmorClass::Bronze),
            ("Marin", ArmorClass::Silver),
        ];
        Roster::new(
            entries
                .into_iter()
                .enumerate()
                .map(|(idx, (name, armor))| {
                    let hp = config.roster_hp(&armor);
                    Character::new(
                        CharacterId(idx as u32),
                        name,
                        armor,
                        Skills::new("main", "special"),
                        hp,
                    )
                })
                .collect(),
        )
    }

    fn ready_arena() -> Arena {
        let mut arena = Arena::new(roster(), CombatConfig::default());
        arena.select(CharacterId(0));
        arena.select(CharacterId(1));
        arena
    }

    fn run_to_end(arena: &mut Arena, rng: &mut impl RandomSource) -> BattleResult {
        loop {
            if let TurnStep::Concluded(result) = arena.next_turn(rng).unwrap() {
                return result;
            }
        }
    }

    #[test]
    fn start_requires_full_pairing() {
        let mut arena = Arena::new(roster(), CombatConfig::default());
        arena.select(CharacterId(0));

        assert_eq!(
            arena.start_battle(&mut PcgRng::new(1)),
            Err(LifecycleError::NotReady)
        );
        assert_eq!(arena.phase(), Phase::Selecting);
        assert!(arena.battle().is_none());
    }

    #[test]
    fn unknown_character_is_ignored() {
        let mut arena = Arena::new(roster(), CombatConfig::default());

        assert!(arena.select(CharacterId(42)).is_none());
        assert!(arena.pairing().is_empty());
    }

    #[test]
    fn start_is_rejected_while_fighting() {
        let mut arena = ready_arena();
        let mut rng = PcgRng::new(5);
        arena.start_battle(&mut rng).unwrap();

        assert_eq!(
            arena.start_battle(&mut rng),
            Err(LifecycleError::BattleInProgress)
        );
        assert_eq!(arena.reset(), Err(LifecycleError::BattleInProgress));
        assert_eq!(arena.rematch(&mut rng), Err(LifecycleError::BattleInProgress));
        assert!(arena.select(CharacterId(2)).is_none());
    }

    #[test]
    fn battle_concludes_into_awaiting_decision() {
        let mut arena = ready_arena();
        let mut rng = PcgRng::new(11);
        let start = arena.start_battle(&mut rng).unwrap();
        assert_eq!(start.battle, 1);
        assert_eq!(start.fighter_a.hp, 220);

        let result = run_to_end(&mut arena, &mut rng);

        assert_eq!(arena.phase(), Phase::AwaitingDecision);
        assert_eq!(arena.snapshot().last_result, Some(result));
        assert_eq!(
            arena.start_battle(&mut rng),
            Err(LifecycleError::AwaitingDecision)
        );
        assert_eq!(arena.next_turn(&mut rng), Err(LifecycleError::NoActiveBattle));
    }

    #[test]
    fn rematch_restores_full_health() {
        let mut arena = ready_arena();
        let mut rng = PcgRng::new(3);
        arena.start_battle(&mut rng).unwrap();
        let first = run_to_end(&mut arena, &mut rng);
        assert!(first.fighter_a.hp.min(first.fighter_b.hp) <= 0);

        let rematch = arena.rematch(&mut rng).unwrap();

        assert_eq!(rematch.battle, 2);
        assert_eq!(rematch.fighter_a.hp, 220);
        assert_eq!(rematch.fighter_a.max_hp, 220);
        assert_eq!(rematch.fighter_b.hp, 200);
        assert_eq!(arena.phase(), Phase::Fighting);
    }

    /// Draws for one turn: special, miss/crit, variance.
    fn turn(special: bool, miss_crit: f64, variance_draw: f64) -> [f64; 3] {
        [if special { 0.1 } else { 0.9 }, miss_crit, variance_draw]
    }

    #[test]
    fn rematch_rebuilds_a_fighter_that_ended_at_five_hp() {
        let mut arena = ready_arena();
        arena.start_battle(&mut ScriptedRng::new(vec![0.1])).unwrap();

        let a_miss = turn(false, 0.01, 0.5);
        let b_miss = turn(false, 0.01, 0.5);
        let b_hit_12 = turn(false, 0.5, 0.35);
        let b_hit_11 = turn(false, 0.5, 0.25);
        // (18 + 6 + 6) * 1.7 = 51
        let a_crit_special = turn(true, 0.99, 0.95);

        let mut draws = Vec::new();
        for round in 0..18 {
            draws.extend(a_miss);
            draws.extend(if round < 17 { b_hit_12 } else { b_hit_11 });
        }
        for _ in 0..3 {
            draws.extend(a_crit_special);
            draws.extend(b_miss);
        }
        draws.extend(a_crit_special);

        let first = run_to_end(&mut arena, &mut ScriptedRng::new(draws));
        assert_eq!(first.winner, Side::A);
        assert_eq!(first.fighter_a.hp, 5);
        assert_eq!(first.fighter_a.max_hp, 220);
        assert_eq!(first.fighter_b.hp, -4);
        assert_eq!(first.rounds, 43);

        let rematch = arena.rematch(&mut PcgRng::new(8)).unwrap();

        assert_eq!(rematch.fighter_a.hp, 220);
        let session = arena.battle().unwrap();
        assert_eq!(session.fighter(Side::A).hp, 220);
        assert_eq!(session.fighter(Side::B).hp, 200);
        assert_eq!(session.round(), 0);
    }

    #[test]
    fn reset_clears_pairing() {
        let mut arena = ready_arena();
        let mut rng = PcgRng::new(21);
        arena.start_battle(&mut rng).unwrap();
        run_to_end(&mut arena, &mut rng);

        let change = arena.reset().unwrap();

        assert!(change.a.is_none() && change.b.is_none());
        let snapshot = arena.snapshot();
        assert_eq!(snapshot.phase, Phase::Selecting);
        assert!(!snapshot.ready_to_fight);
        assert!(snapshot.pairing.is_empty());
        assert!(snapshot.last_result.is_none());
        assert_eq!(
            arena.rematch(&mut rng),
            Err(LifecycleError::NoFinishedBattle)
        );
    }

    #[test]
    fn reset_before_any_battle_is_rejected() {
        let mut arena = Arena::new(roster(), CombatConfig::default());
        arena.select(CharacterId(0));

        assert_eq!(arena.reset(), Err(LifecycleError::NoFinishedBattle));
        assert_eq!(arena.phase(), Phase::Selecting);
        assert_eq!(arena.pairing().side_of(CharacterId(0)), Some(Side::A));

        arena.select(CharacterId(1));
        assert_eq!(arena.reset(), Err(LifecycleError::NoFinishedBattle));
        assert!(arena.snapshot().ready_to_fight);
    }

    #[test]
    fn snapshot_tracks_active_battle() {
        let mut arena = ready_arena();
        let mut rng = ScriptedRng::new(vec![0.9]);
        arena.start_battle(&mut rng).unwrap();

        let snapshot = arena.snapshot();
        let battle = snapshot.battle.unwrap();

        assert_eq!(snapshot.phase, Phase::Fighting);
        assert!(snapshot.ready_to_fight);
        assert_eq!(battle.attacker, Side::B);
        assert_eq!(battle.round, 0);
        assert_eq!(battle.fighter_a.name, "Aiolia");
    }
}
