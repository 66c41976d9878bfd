//! Event types for different topics.

use arena_core::{
    BattleResult, BattleStart, FighterStatus, HitKind, SelectionChange, Side, TurnReport,
    hp_percent,
};
use serde::{Deserialize, Serialize};

/// Events related to the pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// A roster click changed the pairing, or a reset cleared it.
    Changed(SelectionChange),
}

/// Events related to a battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// Fighters are built and the initiative is decided.
    BattleStarted {
        battle: u32,
        fighter_a: FighterStatus,
        fighter_b: FighterStatus,
        first_attacker: Side,
    },

    /// An attack missed.
    Missed {
        round: u32,
        attacker: Side,
        attacker_name: String,
        defender_name: String,
        attack_name: String,
    },

    /// An attack landed.
    DamageApplied {
        round: u32,
        attacker: Side,
        attacker_name: String,
        defender: Side,
        defender_name: String,
        attack_name: String,
        damage: i32,
        kind: HitKind,
        /// Defender hp clamped to zero.
        display_hp: i32,
        max_hp: i32,
        /// HP bar fill, 0..=100.
        hp_percent: u8,
    },

    /// The battle is over; the arena now waits for a decision.
    BattleEnded(BattleResult),
}

impl CombatEvent {
    pub fn started(start: &BattleStart) -> Self {
        Self::BattleStarted {
            battle: start.battle,
            fighter_a: start.fighter_a.clone(),
            fighter_b: start.fighter_b.clone(),
            first_attacker: start.first_attacker,
        }
    }

    /// Event describing one played turn.
    pub fn from_turn(report: &TurnReport) -> Self {
        match report.outcome.hit_kind() {
            None => Self::Missed {
                round: report.round,
                attacker: report.attacker,
                attacker_name: report.attacker_name.clone(),
                defender_name: report.defender_name.clone(),
                attack_name: report.outcome.attack_name().to_owned(),
            },
            Some(kind) => Self::DamageApplied {
                round: report.round,
                attacker: report.attacker,
                attacker_name: report.attacker_name.clone(),
                defender: report.defender,
                defender_name: report.defender_name.clone(),
                attack_name: report.outcome.attack_name().to_owned(),
                damage: report.outcome.damage().unwrap_or_default(),
                kind,
                display_hp: report.defender_display_hp(),
                max_hp: report.defender_max_hp,
                hp_percent: hp_percent(report.defender_hp, report.defender_max_hp),
            },
        }
    }

    /// Name of the fighter that took the initiative.
    pub fn first_attacker_name(&self) -> Option<&str> {
        match self {
            Self::BattleStarted {
                fighter_a,
                fighter_b,
                first_attacker,
                ..
            } => Some(match first_attacker {
                Side::A => &fighter_a.name,
                Side::B => &fighter_b.name,
            }),
            _ => None,
        }
    }
}

/// Events related to the session lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A rematch of the same pairing was requested.
    Rematch { battle: u32 },
    /// The pairing was cleared.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{AttackOutcome, CharacterId};

    fn report(outcome: AttackOutcome, defender_hp: i32) -> TurnReport {
        TurnReport {
            round: 7,
            attacker: Side::B,
            attacker_name: "Hyoga".into(),
            defender: Side::A,
            defender_name: "Shun".into(),
            outcome,
            defender_hp,
            defender_max_hp: 200,
        }
    }

    #[test]
    fn miss_turn_becomes_missed_event() {
        let event = CombatEvent::from_turn(&report(
            AttackOutcome::Miss {
                attack_name: "Diamond Dust".into(),
            },
            200,
        ));

        assert_eq!(
            event,
            CombatEvent::Missed {
                round: 7,
                attacker: Side::B,
                attacker_name: "Hyoga".into(),
                defender_name: "Shun".into(),
                attack_name: "Diamond Dust".into(),
            }
        );
    }

    #[test]
    fn lethal_hit_clamps_display_hp() {
        let event = CombatEvent::from_turn(&report(
            AttackOutcome::Hit {
                damage: 40,
                critical: true,
                special: true,
                attack_name: "Aurora Execution".into(),
            },
            -15,
        ));

        let CombatEvent::DamageApplied {
            damage,
            kind,
            display_hp,
            hp_percent,
            ..
        } = event
        else {
            panic!("expected DamageApplied, got {event:?}");
        };
        assert_eq!(damage, 40);
        assert_eq!(kind, HitKind::Critical);
        assert_eq!(display_hp, 0);
        assert_eq!(hp_percent, 0);
    }

    #[test]
    fn started_event_names_first_attacker() {
        let status = |id, name: &str, hp| FighterStatus {
            id: CharacterId(id),
            name: name.into(),
            hp,
            max_hp: hp,
        };
        let event = CombatEvent::started(&BattleStart {
            battle: 1,
            fighter_a: status(0, "Seiya", 200),
            fighter_b: status(6, "Aiolia", 220),
            first_attacker: Side::B,
        });

        assert_eq!(event.first_attacker_name(), Some("Aiolia"));
    }
}
