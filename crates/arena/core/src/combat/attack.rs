//! Attack resolution: one attacker, one roll, one outcome.

use crate::battle::Fighter;
use crate::config::CombatConfig;
use crate::rng::{RandomSource, unit_to_range};

/// The three independent draws behind a single attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRoll {
    /// Whether the attacker uses the special attack.
    pub use_special: bool,
    /// Uniform draw in `[0, 1)` deciding miss / hit / critical.
    pub miss_crit: f64,
    /// Flat damage variance.
    pub variance: i32,
}

impl AttackRoll {
    pub const fn new(use_special: bool, miss_crit: f64, variance: i32) -> Self {
        Self {
            use_special,
            miss_crit,
            variance,
        }
    }

    /// Draws a roll from `rng`.
    ///
    /// Draw order is fixed: special, miss/crit, variance.
    pub fn draw(rng: &mut (impl RandomSource + ?Sized), config: &CombatConfig) -> Self {
        let use_special = rng.chance(config.special_chance);
        let miss_crit = rng.next_unit();
        let variance = variance_from_draw(rng.next_unit(), config);
        Self::new(use_special, miss_crit, variance)
    }
}

/// Maps a unit draw onto the configured variance range.
pub fn variance_from_draw(draw: f64, config: &CombatConfig) -> i32 {
    unit_to_range(draw, config.variance_min, config.variance_max)
}

/// Visual classification of a landed hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitKind {
    Normal,
    Special,
    Critical,
}

/// Result of a single attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Attack missed; nothing is applied.
    Miss { attack_name: String },
    /// Attack landed for `damage` (may be zero or negative).
    Hit {
        damage: i32,
        critical: bool,
        special: bool,
        attack_name: String,
    },
}

impl AttackOutcome {
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }

    pub fn damage(&self) -> Option<i32> {
        match self {
            Self::Miss { .. } => None,
            Self::Hit { damage, .. } => Some(*damage),
        }
    }

    pub fn attack_name(&self) -> &str {
        match self {
            Self::Miss { attack_name } | Self::Hit { attack_name, .. } => attack_name,
        }
    }

    /// Critical beats special for display purposes.
    pub fn hit_kind(&self) -> Option<HitKind> {
        match self {
            Self::Miss { .. } => None,
            Self::Hit { critical: true, .. } => Some(HitKind::Critical),
            Self::Hit { special: true, .. } => Some(HitKind::Special),
            Self::Hit { .. } => Some(HitKind::Normal),
        }
    }
}

/// Damage before the miss/crit check.
///
/// ```text
/// raw = base_attack + variance + (special ? special_bonus : 0)
/// ```
pub fn raw_damage(attacker: &Fighter, roll: &AttackRoll, config: &CombatConfig) -> i32 {
    let special_bonus = if roll.use_special {
        config.special_bonus
    } else {
        0
    };
    attacker.base_attack + roll.variance + special_bonus
}

/// Resolves one attack. Pure: the defender's state does not enter the formula.
///
/// ```text
/// miss_crit <  miss_chance      -> miss
/// miss_crit >  1 - crit_chance  -> damage = floor(raw * crit_multiplier)
/// otherwise                     -> damage = raw
/// ```
///
/// Damage is not clamped; a very negative variance can yield zero or negative
/// damage and it is applied as-is.
pub fn resolve_attack(attacker: &Fighter, roll: &AttackRoll, config: &CombatConfig) -> AttackOutcome {
    let attack_name = attacker.skills.attack_name(roll.use_special).to_owned();

    if roll.miss_crit < config.miss_chance {
        return AttackOutcome::Miss { attack_name };
    }

    let raw = raw_damage(attacker, roll, config);
    let critical = roll.miss_crit > 1.0 - config.crit_chance;
    let damage = if critical {
        (f64::from(raw) * config.crit_multiplier).floor() as i32
    } else {
        raw
    };

    AttackOutcome::Hit {
        damage,
        critical,
        special: roll.use_special,
        attack_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{CharacterId, Skills};
    use crate::rng::ScriptedRng;

    fn attacker(base_attack: i32) -> Fighter {
        Fighter {
            id: CharacterId(0),
            name: "Seiya".into(),
            skills: Skills::new("Pegasus Meteor Fist", "Pegasus Comet Fist"),
            hp: 200,
            max_hp: 200,
            base_attack,
        }
    }

    #[test]
    fn low_miss_crit_draw_misses() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::new(vec![0.5, 0.05, 0.3]);
        let roll = AttackRoll::draw(&mut rng, &config);

        assert!(!roll.use_special);
        assert_eq!(roll.variance, 0);

        let outcome = resolve_attack(&attacker(12), &roll, &config);
        assert_eq!(
            outcome,
            AttackOutcome::Miss {
                attack_name: "Pegasus Meteor Fist".into()
            }
        );
        assert_eq!(outcome.damage(), None);
    }

    #[test]
    fn special_hit_adds_bonus_without_crit() {
        let config = CombatConfig::default();
        let roll = AttackRoll::new(true, 0.5, 3);

        let outcome = resolve_attack(&attacker(12), &roll, &config);

        assert_eq!(
            outcome,
            AttackOutcome::Hit {
                damage: 21,
                critical: false,
                special: true,
                attack_name: "Pegasus Comet Fist".into(),
            }
        );
        assert_eq!(outcome.hit_kind(), Some(HitKind::Special));
    }

    #[test]
    fn high_draw_crits_and_floors() {
        let config = CombatConfig::default();
        let roll = AttackRoll::new(true, 0.95, 3);

        let outcome = resolve_attack(&attacker(12), &roll, &config);

        // floor(21 * 1.7) = floor(35.7) = 35
        assert_eq!(outcome.damage(), Some(35));
        assert_eq!(outcome.hit_kind(), Some(HitKind::Critical));
    }

    #[test]
    fn boundaries_of_miss_and_crit_windows() {
        let config = CombatConfig::default();
        let fighter = attacker(12);

        // miss_crit == miss_chance is a hit
        let at_miss_edge = resolve_attack(&fighter, &AttackRoll::new(false, 0.08, 0), &config);
        assert_eq!(at_miss_edge.damage(), Some(12));

        let below_crit = resolve_attack(&fighter, &AttackRoll::new(false, 0.875, 0), &config);
        assert_eq!(below_crit.hit_kind(), Some(HitKind::Normal));

        let above_crit = resolve_attack(&fighter, &AttackRoll::new(false, 0.885, 0), &config);
        assert_eq!(above_crit.hit_kind(), Some(HitKind::Critical));
        assert_eq!(above_crit.damage(), Some(20));
    }

    #[test]
    fn damage_is_not_clamped() {
        let config = CombatConfig {
            atk_base: 1,
            ..CombatConfig::default()
        };
        let weak = attacker(config.atk_base);

        let plain = resolve_attack(&weak, &AttackRoll::new(false, 0.5, -3), &config);
        assert_eq!(plain.damage(), Some(-2));

        // floor(-2 * 1.7) = floor(-3.4) = -4
        let crit = resolve_attack(&weak, &AttackRoll::new(false, 0.99, -3), &config);
        assert_eq!(crit.damage(), Some(-4));
    }

    #[test]
    fn variance_covers_closed_range() {
        let config = CombatConfig::default();
        let seen: Vec<i32> = (0..10)
            .map(|step| variance_from_draw(f64::from(step) / 10.0 + 0.05, &config))
            .collect();

        assert_eq!(seen, (-3..=6).collect::<Vec<_>>());
    }

    #[test]
    fn draw_order_is_special_then_miss_crit_then_variance() {
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::new(vec![0.1, 0.6, 0.95]);

        let roll = AttackRoll::draw(&mut rng, &config);

        assert_eq!(roll, AttackRoll::new(true, 0.6, 6));
        assert_eq!(rng.consumed(), 3);
    }
}
