//! Winner determination at the end of a battle.

use crate::battle::{Fighter, Side};

/// Decides the winner from the terminal state of both fighters.
///
/// ```text
/// a alive, b down   -> A
/// b alive, a down   -> B
/// otherwise         -> strictly greater hp; tie goes to A
/// ```
///
/// The last branch covers the round cap (both alive) and the degenerate case
/// of both fighters at or below zero.
pub fn decide_winner(fighter_a: &Fighter, fighter_b: &Fighter) -> Side {
    match (fighter_a.is_alive(), fighter_b.is_alive()) {
        (true, false) => Side::A,
        (false, true) => Side::B,
        _ if fighter_b.hp > fighter_a.hp => Side::B,
        _ => Side::A,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{CharacterId, Skills};

    fn fighter(id: u32, hp: i32) -> Fighter {
        Fighter {
            id: CharacterId(id),
            name: format!("fighter-{id}"),
            skills: Skills::new("main", "special"),
            hp,
            max_hp: 200,
            base_attack: 12,
        }
    }

    #[test]
    fn tie_after_round_cap_goes_to_first_slot() {
        assert_eq!(decide_winner(&fighter(0, 10), &fighter(1, 10)), Side::A);
    }

    #[test]
    fn knocked_out_first_slot_loses() {
        assert_eq!(decide_winner(&fighter(0, 0), &fighter(1, 5)), Side::B);
    }

    #[test]
    fn knocked_out_second_slot_loses() {
        assert_eq!(decide_winner(&fighter(0, 1), &fighter(1, -7)), Side::A);
    }

    #[test]
    fn round_cap_with_both_alive_picks_higher_hp() {
        assert_eq!(decide_winner(&fighter(0, 40), &fighter(1, 41)), Side::B);
        assert_eq!(decide_winner(&fighter(0, 90), &fighter(1, 12)), Side::A);
    }

    #[test]
    fn both_down_picks_less_negative() {
        assert_eq!(decide_winner(&fighter(0, -3), &fighter(1, 0)), Side::B);
        assert_eq!(decide_winner(&fighter(0, -1), &fighter(1, -1)), Side::A);
    }
}
