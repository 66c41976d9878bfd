//! A single battle between two fighters.

use crate::combat::{AttackOutcome, AttackRoll, decide_winner, resolve_attack};
use crate::config::CombatConfig;
use crate::rng::RandomSource;
use crate::selection::SelectedCharacter;

use super::fighter::{Fighter, FighterStatus, Side};

/// Why a battle stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndReason {
    /// A fighter dropped to zero hp or below.
    Knockout,
    /// The round cap was reached with both fighters standing.
    RoundCap,
}

/// What happened during one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// 1-based turn number.
    pub round: u32,
    pub attacker: Side,
    pub attacker_name: String,
    pub defender: Side,
    pub defender_name: String,
    pub outcome: AttackOutcome,
    /// Defender hp after the turn (internal value, may be negative).
    pub defender_hp: i32,
    pub defender_max_hp: i32,
}

impl TurnReport {
    /// Defender hp clamped for display.
    pub fn defender_display_hp(&self) -> i32 {
        self.defender_hp.max(0)
    }
}

/// Final outcome of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub winner: Side,
    pub reason: EndReason,
    pub rounds: u32,
    pub fighter_a: FighterStatus,
    pub fighter_b: FighterStatus,
}

impl BattleResult {
    pub fn winner_status(&self) -> &FighterStatus {
        match self.winner {
            Side::A => &self.fighter_a,
            Side::B => &self.fighter_b,
        }
    }
}

/// Live battle state. Fighter hp is only ever written by [`BattleSession::play_turn`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    fighter_a: Fighter,
    fighter_b: Fighter,
    attacker: Side,
    round: u32,
    max_rounds: u32,
}

impl BattleSession {
    pub fn new(fighter_a: Fighter, fighter_b: Fighter, first: Side, max_rounds: u32) -> Self {
        Self {
            fighter_a,
            fighter_b,
            attacker: first,
            round: 0,
            max_rounds,
        }
    }

    /// Builds fresh full-health fighters from the selection snapshots and
    /// draws the initiative (`< 0.5` goes to A).
    pub fn start(
        a: &SelectedCharacter,
        b: &SelectedCharacter,
        rng: &mut (impl RandomSource + ?Sized),
        config: &CombatConfig,
    ) -> Self {
        let first = if rng.chance(0.5) { Side::A } else { Side::B };
        Self::new(
            Fighter::from_selection(a, config),
            Fighter::from_selection(b, config),
            first,
            config.max_rounds,
        )
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::A => &self.fighter_a,
            Side::B => &self.fighter_b,
        }
    }

    fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        match side {
            Side::A => &mut self.fighter_a,
            Side::B => &mut self.fighter_b,
        }
    }

    /// Side attacking next.
    pub fn attacker(&self) -> Side {
        self.attacker
    }

    pub fn defender(&self) -> Side {
        self.attacker.other()
    }

    /// Turns played so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// True once a fighter is down or the round cap is reached.
    pub fn is_finished(&self) -> bool {
        !(self.fighter_a.is_alive() && self.fighter_b.is_alive() && self.round < self.max_rounds)
    }

    /// Plays one turn: roll, resolve, apply, swap roles, count the round.
    ///
    /// Callers check [`is_finished`](Self::is_finished) first; playing a turn
    /// on a finished battle is a no-op that returns `None`.
    pub fn play_turn(
        &mut self,
        rng: &mut (impl RandomSource + ?Sized),
        config: &CombatConfig,
    ) -> Option<TurnReport> {
        if self.is_finished() {
            return None;
        }

        let roll = AttackRoll::draw(rng, config);
        Some(self.apply_roll(&roll, config))
    }

    /// Plays one turn with a caller-supplied roll.
    pub fn apply_roll(&mut self, roll: &AttackRoll, config: &CombatConfig) -> TurnReport {
        let attacker = self.attacker;
        let defender = attacker.other();

        let outcome = resolve_attack(self.fighter(attacker), roll, config);
        if let Some(damage) = outcome.damage() {
            self.fighter_mut(defender).take_damage(damage);
        }

        self.round += 1;
        self.attacker = defender;

        let target = self.fighter(defender);
        TurnReport {
            round: self.round,
            attacker,
            attacker_name: self.fighter(attacker).name.clone(),
            defender,
            defender_name: target.name.clone(),
            outcome,
            defender_hp: target.hp,
            defender_max_hp: target.max_hp,
        }
    }

    /// Winner as of now. Meaningful once the battle is finished.
    pub fn winner(&self) -> Side {
        decide_winner(&self.fighter_a, &self.fighter_b)
    }

    /// Summarizes the battle.
    pub fn result(&self) -> BattleResult {
        let reason = if self.fighter_a.is_alive() && self.fighter_b.is_alive() {
            EndReason::RoundCap
        } else {
            EndReason::Knockout
        };
        BattleResult {
            winner: self.winner(),
            reason,
            rounds: self.round,
            fighter_a: self.fighter_a.status(),
            fighter_b: self.fighter_b.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PcgRng, ScriptedRng};
    use crate::roster::{ArmorClass, Character, CharacterId, Skills};

    fn selected(id: u32, armor: ArmorClass) -> SelectedCharacter {
        let config = CombatConfig::default();
        let hp = config.roster_hp(&armor);
        SelectedCharacter::snapshot(&Character::new(
            CharacterId(id),
            format!("saint-{id}"),
            armor,
            Skills::new("main", "special"),
            hp,
        ))
    }

    #[test]
    fn start_builds_full_health_fighters() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::new(vec![0.7]);

        let session = BattleSession::start(
            &selected(0, ArmorClass::Gold),
            &selected(1, ArmorClass::Bronze),
            &mut rng,
            &config,
        );

        assert_eq!(session.attacker(), Side::B);
        assert_eq!(session.round(), 0);
        assert_eq!(session.fighter(Side::A).hp, 220);
        assert_eq!(session.fighter(Side::A).base_attack, 18);
        assert_eq!(session.fighter(Side::B).max_hp, 200);
        assert_eq!(session.fighter(Side::B).base_attack, 12);
    }

    #[test]
    fn attacks_alternate_and_hp_never_rises() {
        let config = CombatConfig::default();
        let mut rng = PcgRng::new(99);
        let mut session = BattleSession::start(
            &selected(0, ArmorClass::Silver),
            &selected(1, ArmorClass::Gold),
            &mut rng,
            &config,
        );

        let mut previous_attacker = None;
        let mut hp = [session.fighter(Side::A).hp, session.fighter(Side::B).hp];

        while let Some(report) = session.play_turn(&mut rng, &config) {
            assert_ne!(Some(report.attacker), previous_attacker);
            previous_attacker = Some(report.attacker);

            let now = [session.fighter(Side::A).hp, session.fighter(Side::B).hp];
            assert!(now[0] <= hp[0] && now[1] <= hp[1]);
            hp = now;
        }

        assert!(session.is_finished());
        assert!(session.round() <= config.max_rounds);
    }

    #[test]
    fn misses_leave_hp_untouched() {
        let config = CombatConfig::default();
        let mut session = BattleSession::start(
            &selected(0, ArmorClass::Bronze),
            &selected(1, ArmorClass::Bronze),
            &mut ScriptedRng::new(vec![0.1]),
            &config,
        );

        let report = session.apply_roll(&AttackRoll::new(false, 0.01, 6), &config);

        assert!(report.outcome.is_miss());
        assert_eq!(report.attacker, Side::A);
        assert_eq!(report.defender_hp, 200);
        assert_eq!(session.attacker(), Side::B);
        assert_eq!(session.round(), 1);
    }

    #[test]
    fn round_cap_terminates_a_battle_of_misses() {
        let config = CombatConfig::default();
        // never special, always a miss
        let mut rng = ScriptedRng::new(vec![0.9, 0.0, 0.5]);
        let mut session = BattleSession::start(
            &selected(0, ArmorClass::Bronze),
            &selected(1, ArmorClass::Bronze),
            &mut ScriptedRng::new(vec![0.2]),
            &config,
        );

        let mut turns = 0;
        while session.play_turn(&mut rng, &config).is_some() {
            turns += 1;
        }

        assert_eq!(turns, 200);
        let result = session.result();
        assert_eq!(result.reason, EndReason::RoundCap);
        assert_eq!(result.winner, Side::A);
        assert_eq!(result.rounds, 200);
    }

    #[test]
    fn knockout_is_reported_with_negative_hp_kept() {
        let config = CombatConfig::default();
        let mut session = BattleSession::new(
            Fighter::from_selection(&selected(0, ArmorClass::Gold), &config),
            Fighter {
                hp: 10,
                ..Fighter::from_selection(&selected(1, ArmorClass::Bronze), &config)
            },
            Side::A,
            config.max_rounds,
        );

        let report = session.apply_roll(&AttackRoll::new(true, 0.99, 5), &config);

        // floor((18 + 5 + 6) * 1.7) = floor(49.3) = 49
        assert_eq!(report.outcome.damage(), Some(49));
        assert_eq!(report.defender_hp, -39);
        assert_eq!(report.defender_display_hp(), 0);
        assert!(session.is_finished());
        assert!(session.play_turn(&mut PcgRng::new(1), &config).is_none());

        let result = session.result();
        assert_eq!(result.reason, EndReason::Knockout);
        assert_eq!(result.winner, Side::A);
        assert_eq!(result.fighter_b.hp, -39);
    }
}
