//! Terminal rendering of arena events.
//!
//! Text-only counterpart of the browser game's log panel, HP bars and toasts.

use arena_core::{
    BattleResult, Character, EndReason, FighterStatus, HitKind, Roster, SelectionChange, Side,
};
use arena_runtime::{CombatEvent, Event, SelectionEvent, SessionEvent};
use tokio::sync::broadcast;

/// Width of an HP bar in characters.
pub const HP_BAR_WIDTH: usize = 20;

/// `[#######.............]` style bar for a `0..=100` percentage.
pub fn hp_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn status_line(status: &FighterStatus) -> String {
    format!(
        "{:<12} {} {:>3}/{}",
        status.name,
        hp_bar(status.hp_percent(), HP_BAR_WIDTH),
        status.display_hp(),
        status.max_hp
    )
}

/// One roster line, as listed before selection.
pub fn roster_line(character: &Character) -> String {
    let mut line = format!("[{}] {}", character.id.0, character.name);
    if !character.constellation.is_empty() || !character.rank.is_empty() {
        line.push_str(&format!(" ({} • {})", character.constellation, character.rank));
    }
    line.push_str(&format!(" - {} armor, HP {}", character.armor, character.hp));
    line
}

/// Whole roster listing.
pub fn render_roster(roster: &Roster) -> String {
    roster
        .iter()
        .map(roster_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn slot_name(change: &SelectionChange, side: Side) -> &str {
    let slot = match side {
        Side::A => &change.a,
        Side::B => &change.b,
    };
    slot.as_ref()
        .map(|selected| selected.character.name.as_str())
        .unwrap_or("-")
}

/// Text for a single event, or `None` for events that are not shown.
pub fn render(event: &Event) -> Option<String> {
    match event {
        Event::Selection(SelectionEvent::Changed(change)) => {
            let mut line = format!(
                "A: {} | B: {}",
                slot_name(change, Side::A),
                slot_name(change, Side::B)
            );
            if change.ready_to_fight {
                line.push_str("  -> ready to fight");
            }
            Some(line)
        }
        Event::Combat(combat) => render_combat(combat),
        Event::Session(SessionEvent::Rematch { battle }) => {
            Some(format!("\n=== Rematch (battle {battle}) ==="))
        }
        Event::Session(SessionEvent::Reset) => Some("Arena reset. Pick two new fighters.".into()),
    }
}

fn render_combat(event: &CombatEvent) -> Option<String> {
    match event {
        CombatEvent::BattleStarted {
            fighter_a,
            fighter_b,
            ..
        } => Some(format!(
            "Fight begins: {} vs {}\n{}\n{}\n{} takes the initiative.",
            fighter_a.name,
            fighter_b.name,
            status_line(fighter_a),
            status_line(fighter_b),
            event.first_attacker_name().unwrap_or_default()
        )),
        CombatEvent::Missed {
            attacker_name,
            attack_name,
            ..
        } => Some(format!("{attacker_name} tries {attack_name} but misses!")),
        CombatEvent::DamageApplied {
            attacker_name,
            defender_name,
            attack_name,
            damage,
            kind,
            display_hp,
            max_hp,
            hp_percent,
            ..
        } => {
            let tag = match kind {
                HitKind::Critical => "(CRIT) ",
                HitKind::Special => "(SPECIAL) ",
                HitKind::Normal => "",
            };
            Some(format!(
                "{attacker_name} uses {attack_name} {tag}for {damage} -> {defender_name} {} {display_hp}/{max_hp}",
                hp_bar(*hp_percent, HP_BAR_WIDTH)
            ))
        }
        // the decision prompt shows the result
        CombatEvent::BattleEnded(_) => None,
    }
}

/// Final banner for a finished battle.
pub fn render_result(result: &BattleResult) -> String {
    let reason = match result.reason {
        EndReason::Knockout => "knockout",
        EndReason::RoundCap => "round limit",
    };
    format!(
        "\nWinner: {} ({}, {} rounds)\n{}\n{}",
        result.winner_status().name,
        reason,
        result.rounds,
        status_line(&result.fighter_a),
        status_line(&result.fighter_b)
    )
}

/// Prints every event from the three topics until all streams close.
pub async fn run_presenter(
    selection: broadcast::Receiver<Event>,
    combat: broadcast::Receiver<Event>,
    session: broadcast::Receiver<Event>,
) {
    use broadcast::error::RecvError;

    let mut selection = Some(selection);
    let mut combat = Some(combat);
    let mut session = Some(session);

    loop {
        let received = tokio::select! {
            Some(result) = recv_from(&mut selection) => result,
            Some(result) = recv_from(&mut combat) => result,
            Some(result) = recv_from(&mut session) => result,
            else => break,
        };
        match received {
            Ok(event) => {
                if let Some(text) = render(&event) {
                    println!("{text}");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "presenter lagged behind event stream");
            }
            Err(RecvError::Closed) => {}
        }
    }
}

/// Receives from an optional receiver; a closed stream disables it.
async fn recv_from(
    slot: &mut Option<broadcast::Receiver<Event>>,
) -> Option<Result<Event, broadcast::error::RecvError>> {
    let rx = slot.as_mut()?;
    let result = rx.recv().await;
    if matches!(result, Err(broadcast::error::RecvError::Closed)) {
        *slot = None;
    }
    Some(result)
}
