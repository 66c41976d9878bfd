//! Battle-time combatants.

use crate::config::CombatConfig;
use crate::roster::{CharacterId, Skills};
use crate::selection::SelectedCharacter;

/// Which pairing slot a fighter came from. `A` is the first selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The opposing side.
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// A combatant derived from a selection snapshot.
///
/// `hp` is signed and never clamped: damage can push it below zero. Only
/// presentation clamps, through [`Fighter::display_hp`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub id: CharacterId,
    pub name: String,
    pub skills: Skills,
    pub hp: i32,
    pub max_hp: i32,
    pub base_attack: i32,
}

impl Fighter {
    /// Builds a fresh fighter at full health from a selection snapshot.
    pub fn from_selection(selected: &SelectedCharacter, config: &CombatConfig) -> Self {
        let character = &selected.character;
        Self {
            id: character.id,
            name: character.name.clone(),
            skills: character.skills.clone(),
            hp: selected.max_hp,
            max_hp: selected.max_hp,
            base_attack: config.base_attack(&character.armor),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// HP as shown to players (never below zero).
    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }

    /// HP bar fill in whole percent, clamped to `0..=100`.
    pub fn hp_percent(&self) -> u8 {
        hp_percent(self.hp, self.max_hp)
    }

    pub fn status(&self) -> FighterStatus {
        FighterStatus {
            id: self.id,
            name: self.name.clone(),
            hp: self.hp,
            max_hp: self.max_hp,
        }
    }

    /// Subtracts `damage` as-is (negative damage raises hp).
    pub(crate) fn take_damage(&mut self, damage: i32) {
        self.hp = self.hp.saturating_sub(damage);
    }
}

/// Rounded HP percentage clamped to `0..=100`.
pub fn hp_percent(hp: i32, max_hp: i32) -> u8 {
    if max_hp <= 0 {
        return 0;
    }
    let pct = (f64::from(hp) / f64::from(max_hp) * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Lightweight view of a fighter for snapshots and results.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterStatus {
    pub id: CharacterId,
    pub name: String,
    /// Internal hp, may be negative.
    pub hp: i32,
    pub max_hp: i32,
}

impl FighterStatus {
    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }

    pub fn hp_percent(&self) -> u8 {
        hp_percent(self.hp, self.max_hp)
    }
}
