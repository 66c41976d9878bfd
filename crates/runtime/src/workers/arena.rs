//! Arena worker that owns the authoritative [`arena_core::Arena`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), advances
//! the active battle one paced turn at a time, and publishes events to the
//! EventBus. The pacing sleep is the only suspension point between turns;
//! commands that arrive during it are handled right away.

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use arena_core::{
    Arena, ArenaSnapshot, BattleStart, CharacterId, RandomSource, Roster, SelectionChange,
    TurnStep,
};

use crate::api::Result;
use crate::events::{CombatEvent, Event, EventBus, SelectionEvent, SessionEvent};
use crate::runtime::PacingConfig;

/// Commands that can be sent to the arena worker
pub enum Command {
    /// Roster click.
    Select {
        id: CharacterId,
        reply: oneshot::Sender<Option<SelectionChange>>,
    },
    /// Start a battle from the current pairing.
    StartBattle {
        reply: oneshot::Sender<Result<BattleStart>>,
    },
    /// Replay the finished battle's pairing.
    Rematch {
        reply: oneshot::Sender<Result<BattleStart>>,
    },
    /// Clear the pairing.
    Reset {
        reply: oneshot::Sender<Result<SelectionChange>>,
    },
    /// Query the current arena state (read-only).
    QueryState { reply: oneshot::Sender<ArenaSnapshot> },
    /// Query the roster (read-only).
    QueryRoster { reply: oneshot::Sender<Roster> },
}

/// Background task that processes arena commands and plays battle turns.
pub struct ArenaWorker {
    arena: Arena,
    rng: Box<dyn RandomSource + Send>,
    pacing: PacingConfig,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    /// When the next battle turn is due. `None` outside of a battle.
    next_turn_at: Option<Instant>,
}

impl ArenaWorker {
    /// Creates a new arena worker.
    pub fn new(
        arena: Arena,
        rng: Box<dyn RandomSource + Send>,
        pacing: PacingConfig,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "arena::worker",
            roster = arena.roster().len(),
            max_rounds = arena.config().max_rounds,
            "ArenaWorker initialized"
        );

        Self {
            arena,
            rng,
            pacing,
            command_rx,
            event_bus,
            next_turn_at: None,
        }
    }

    /// Main worker loop. Ends once every handle is dropped.
    pub async fn run(mut self) {
        loop {
            let deadline = self.next_turn_at;
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.advance_battle();
                }
            }
        }

        debug!(target: "arena::worker", "command channel closed, worker stopping");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Select { id, reply } => {
                let change = self.handle_select(id);
                if reply.send(change).is_err() {
                    debug!("Select reply channel closed (caller dropped)");
                }
            }
            Command::StartBattle { reply } => {
                let result = self.handle_start_battle();
                if reply.send(result).is_err() {
                    debug!("StartBattle reply channel closed (caller dropped)");
                }
            }
            Command::Rematch { reply } => {
                let result = self.handle_rematch();
                if reply.send(result).is_err() {
                    debug!("Rematch reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                let result = self.handle_reset();
                if reply.send(result).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.arena.snapshot()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::QueryRoster { reply } => {
                if reply.send(self.arena.roster().clone()).is_err() {
                    debug!("QueryRoster reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_select(&mut self, id: CharacterId) -> Option<SelectionChange> {
        let change = self.arena.select(id);
        match &change {
            Some(change) => {
                debug!(
                    target: "arena::worker",
                    character = %id,
                    ready = change.ready_to_fight,
                    "pairing changed"
                );
                self.event_bus
                    .publish(Event::Selection(SelectionEvent::Changed(change.clone())));
            }
            None => debug!(target: "arena::worker", character = %id, "selection ignored"),
        }
        change
    }

    fn handle_start_battle(&mut self) -> Result<BattleStart> {
        let start = self.arena.start_battle(self.rng.as_mut()).inspect_err(|error| {
            warn!(target: "arena::worker", %error, "start battle rejected");
        })?;

        self.announce_battle(&start);
        self.next_turn_at = Some(Instant::now());
        Ok(start)
    }

    fn handle_rematch(&mut self) -> Result<BattleStart> {
        let start = self.arena.rematch(self.rng.as_mut()).inspect_err(|error| {
            warn!(target: "arena::worker", %error, "rematch rejected");
        })?;

        self.event_bus.publish(Event::Session(SessionEvent::Rematch {
            battle: start.battle,
        }));
        self.announce_battle(&start);
        self.next_turn_at = Some(Instant::now() + self.pacing.rematch_delay);
        Ok(start)
    }

    fn handle_reset(&mut self) -> Result<SelectionChange> {
        let change = self.arena.reset().inspect_err(|error| {
            warn!(target: "arena::worker", %error, "reset rejected");
        })?;

        info!(target: "arena::worker", "arena reset");
        self.next_turn_at = None;
        self.event_bus.publish(Event::Session(SessionEvent::Reset));
        self.event_bus
            .publish(Event::Selection(SelectionEvent::Changed(change.clone())));
        Ok(change)
    }

    fn announce_battle(&self, start: &BattleStart) {
        info!(
            target: "arena::worker",
            battle = start.battle,
            fighter_a = %start.fighter_a.name,
            fighter_b = %start.fighter_b.name,
            first = %start.first_attacker,
            "battle started"
        );
        self.event_bus
            .publish(Event::Combat(CombatEvent::started(start)));
    }

    /// Plays the due turn, or concludes the battle when it is over.
    fn advance_battle(&mut self) {
        match self.arena.next_turn(self.rng.as_mut()) {
            Ok(TurnStep::Played(report)) => {
                debug!(
                    target: "arena::worker",
                    round = report.round,
                    attacker = %report.attacker_name,
                    damage = ?report.outcome.damage(),
                    defender_hp = report.defender_hp,
                    "turn played"
                );
                let delay = self.pacing.delay_after(&report.outcome);
                self.event_bus
                    .publish(Event::Combat(CombatEvent::from_turn(&report)));
                self.next_turn_at = Some(Instant::now() + delay);
            }
            Ok(TurnStep::Concluded(result)) => {
                info!(
                    target: "arena::worker",
                    winner = %result.winner_status().name,
                    reason = %result.reason,
                    rounds = result.rounds,
                    "battle ended"
                );
                self.next_turn_at = None;
                self.event_bus
                    .publish(Event::Combat(CombatEvent::BattleEnded(result)));
            }
            Err(error) => {
                warn!(target: "arena::worker", %error, "turn scheduled without an active battle");
                self.next_turn_at = None;
            }
        }
    }
}
