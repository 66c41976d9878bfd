//! Balance tables for the combat rules.

use crate::roster::ArmorClass;

/// Combat balance parameters.
///
/// Every field has a default, so balance files only need to list the values
/// they override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Roster HP every character receives at load time.
    pub hp_base: i32,
    /// Extra roster HP for Gold armor.
    pub hp_gold_bonus: i32,
    /// Base attack of every fighter.
    pub atk_base: i32,
    /// Extra attack for Gold armor.
    pub atk_gold_bonus: i32,
    /// Flat damage added when the special attack is used.
    pub special_bonus: i32,
    /// Probability (0..1) that the attacker picks the special attack.
    pub special_chance: f64,
    /// Probability (0..1) that an attack misses.
    pub miss_chance: f64,
    /// Probability (0..1) of a critical hit.
    pub crit_chance: f64,
    /// Damage multiplier applied on a critical hit (result is floored).
    pub crit_multiplier: f64,
    /// Lowest damage variance (inclusive).
    pub variance_min: i32,
    /// Highest damage variance (inclusive).
    pub variance_max: i32,
    /// Hard cap on rounds; guarantees every battle terminates.
    pub max_rounds: u32,
}

impl CombatConfig {
    pub const DEFAULT_HP_BASE: i32 = 200;
    pub const DEFAULT_HP_GOLD_BONUS: i32 = 20;
    pub const DEFAULT_ATK_BASE: i32 = 12;
    pub const DEFAULT_ATK_GOLD_BONUS: i32 = 6;
    pub const DEFAULT_SPECIAL_BONUS: i32 = 6;
    pub const DEFAULT_SPECIAL_CHANCE: f64 = 0.2;
    pub const DEFAULT_MISS_CHANCE: f64 = 0.08;
    pub const DEFAULT_CRIT_CHANCE: f64 = 0.12;
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.7;
    pub const DEFAULT_VARIANCE_MIN: i32 = -3;
    pub const DEFAULT_VARIANCE_MAX: i32 = 6;
    pub const DEFAULT_MAX_ROUNDS: u32 = 200;

    pub const fn new() -> Self {
        Self {
            hp_base: Self::DEFAULT_HP_BASE,
            hp_gold_bonus: Self::DEFAULT_HP_GOLD_BONUS,
            atk_base: Self::DEFAULT_ATK_BASE,
            atk_gold_bonus: Self::DEFAULT_ATK_GOLD_BONUS,
            special_bonus: Self::DEFAULT_SPECIAL_BONUS,
            special_chance: Self::DEFAULT_SPECIAL_CHANCE,
            miss_chance: Self::DEFAULT_MISS_CHANCE,
            crit_chance: Self::DEFAULT_CRIT_CHANCE,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            variance_min: Self::DEFAULT_VARIANCE_MIN,
            variance_max: Self::DEFAULT_VARIANCE_MAX,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }

    /// Returns a copy with a different round cap.
    #[must_use]
    pub const fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Roster HP for a character wearing `armor`.
    pub fn roster_hp(&self, armor: &ArmorClass) -> i32 {
        if armor.is_gold() {
            self.hp_base + self.hp_gold_bonus
        } else {
            self.hp_base
        }
    }

    /// Base attack for a fighter wearing `armor`.
    pub fn base_attack(&self, armor: &ArmorClass) -> i32 {
        if armor.is_gold() {
            self.atk_base + self.atk_gold_bonus
        } else {
            self.atk_base
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
