//! Two-slot pairing of combatants.
//!
//! Clicking a roster entry toggles it in or out of the pairing. Once both
//! slots are filled the pairing is locked until a reset.

use crate::battle::Side;
use crate::roster::{Character, CharacterId};

/// A character placed in a slot, with its HP captured at selection time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedCharacter {
    pub character: Character,
    /// Snapshot of `character.hp` when it was selected.
    pub max_hp: i32,
}

impl SelectedCharacter {
    pub fn snapshot(character: &Character) -> Self {
        Self {
            character: character.clone(),
            max_hp: character.hp,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.character.id
    }
}

/// Pairing state after a change, as pushed to presentation layers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionChange {
    pub a: Option<SelectedCharacter>,
    pub b: Option<SelectedCharacter>,
    pub ready_to_fight: bool,
}

/// The two selection slots.
///
/// Invariant: `a` and `b` never hold the same character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pairing {
    a: Option<SelectedCharacter>,
    b: Option<SelectedCharacter>,
}

impl Pairing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn a(&self) -> Option<&SelectedCharacter> {
        self.a.as_ref()
    }

    pub fn b(&self) -> Option<&SelectedCharacter> {
        self.b.as_ref()
    }

    pub fn slot(&self, side: Side) -> Option<&SelectedCharacter> {
        match side {
            Side::A => self.a(),
            Side::B => self.b(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.a.is_some() && self.b.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_none() && self.b.is_none()
    }

    /// Both slots, when the pairing is complete.
    pub fn both(&self) -> Option<(&SelectedCharacter, &SelectedCharacter)> {
        Some((self.a.as_ref()?, self.b.as_ref()?))
    }

    /// Which slot holds `id`, if any.
    pub fn side_of(&self, id: CharacterId) -> Option<Side> {
        if holds(&self.a, id) {
            Some(Side::A)
        } else if holds(&self.b, id) {
            Some(Side::B)
        } else {
            None
        }
    }

    /// Applies a roster click.
    ///
    /// Returns `None` when nothing changed (pairing locked, or the click cannot
    /// be placed without breaking the distinct-slots invariant).
    pub fn select(&mut self, character: &Character) -> Option<SelectionChange> {
        if self.is_ready() {
            return None;
        }

        if holds(&self.a, character.id) {
            self.a = None;
        } else if holds(&self.b, character.id) {
            self.b = None;
        } else if self.a.is_none() {
            self.a = Some(SelectedCharacter::snapshot(character));
        } else if self.b.is_none() {
            self.b = Some(SelectedCharacter::snapshot(character));
        } else {
            return None;
        }

        Some(self.change())
    }

    /// Empties both slots.
    pub fn clear(&mut self) -> SelectionChange {
        self.a = None;
        self.b = None;
        self.change()
    }

    /// Current pairing as a change notification.
    pub fn change(&self) -> SelectionChange {
        SelectionChange {
            a: self.a.clone(),
            b: self.b.clone(),
            ready_to_fight: self.is_ready(),
        }
    }
}

fn holds(slot: &Option<SelectedCharacter>, id: CharacterId) -> bool {
    slot.as_ref().is_some_and(|selected| selected.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PcgRng, RandomSource};
    use crate::roster::{ArmorClass, Skills};

    fn character(id: u32, hp: i32) -> Character {
        Character::new(
            CharacterId(id),
            format!("saint-{id}"),
            ArmorClass::Bronze,
            Skills::new("main", "special"),
            hp,
        )
    }

    #[test]
    fn fills_a_then_b() {
        let mut pairing = Pairing::new();

        let first = pairing.select(&character(0, 200)).unwrap();
        assert_eq!(first.a.as_ref().map(SelectedCharacter::id), Some(CharacterId(0)));
        assert!(first.b.is_none());
        assert!(!first.ready_to_fight);

        let second = pairing.select(&character(1, 220)).unwrap();
        assert_eq!(second.b.as_ref().map(|s| s.max_hp), Some(220));
        assert!(second.ready_to_fight);
    }

    #[test]
    fn clicking_selected_character_toggles_it_off() {
        let mut pairing = Pairing::new();
        pairing.select(&character(0, 200));

        let change = pairing.select(&character(0, 200)).unwrap();

        assert!(change.a.is_none());
        assert!(pairing.is_empty());
    }

    #[test]
    fn freed_first_slot_is_refilled_first() {
        let mut pairing = Pairing::new();
        pairing.select(&character(0, 200));
        pairing.select(&character(0, 200));
        pairing.select(&character(2, 200));

        assert_eq!(pairing.side_of(CharacterId(2)), Some(Side::A));
        assert!(pairing.b().is_none());
    }

    #[test]
    fn locked_pairing_ignores_clicks() {
        let mut pairing = Pairing::new();
        pairing.select(&character(0, 200));
        pairing.select(&character(1, 200));

        assert!(pairing.select(&character(2, 200)).is_none());
        assert!(pairing.select(&character(0, 200)).is_none());
        assert_eq!(pairing.side_of(CharacterId(0)), Some(Side::A));
        assert_eq!(pairing.side_of(CharacterId(2)), None);
    }

    #[test]
    fn max_hp_is_a_snapshot() {
        let mut pairing = Pairing::new();
        let mut saint = character(0, 220);
        pairing.select(&saint);

        saint.hp = 1;

        assert_eq!(pairing.a().map(|s| s.max_hp), Some(220));
    }

    #[test]
    fn slots_never_share_a_character() {
        let roster: Vec<Character> = (0..4).map(|id| character(id, 200)).collect();
        let mut rng = PcgRng::new(0xA11CE);
        let mut pairing = Pairing::new();

        for _ in 0..5_000 {
            let pick = rng.range_inclusive(0, 3) as usize;
            pairing.select(&roster[pick]);

            if let Some((a, b)) = pairing.both() {
                assert_ne!(a.id(), b.id());
                pairing.clear();
            }
            if let (Some(a), Some(b)) = (pairing.a(), pairing.b()) {
                assert_ne!(a.id(), b.id());
            }
        }
    }
}
