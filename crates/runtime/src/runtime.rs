//! High-level runtime orchestrator.
//!
//! The runtime owns the arena worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive sessions.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use arena_core::{
    Arena, AttackOutcome, BattleResult, CombatConfig, PcgRng, RandomSource, Roster,
};

use crate::api::{Decision, DecisionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::{CombatEvent, Event, EventBus, Topic};
use crate::random::EntropyRng;
use crate::workers::{ArenaWorker, Command};

/// Pauses between battle turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Pause after a missed attack.
    pub miss_delay: Duration,
    /// Pause after a landed attack.
    pub hit_delay: Duration,
    /// Pause before the first turn of a rematch.
    pub rematch_delay: Duration,
}

impl PacingConfig {
    pub const DEFAULT_MISS_DELAY: Duration = Duration::from_millis(700);
    pub const DEFAULT_HIT_DELAY: Duration = Duration::from_millis(900);
    pub const DEFAULT_REMATCH_DELAY: Duration = Duration::from_millis(300);

    /// No pauses at all; battles resolve as fast as the worker can play them.
    pub const fn instant() -> Self {
        Self {
            miss_delay: Duration::ZERO,
            hit_delay: Duration::ZERO,
            rematch_delay: Duration::ZERO,
        }
    }

    /// Pause owed after a turn with `outcome`.
    pub fn delay_after(&self, outcome: &AttackOutcome) -> Duration {
        if outcome.is_miss() {
            self.miss_delay
        } else {
            self.hit_delay
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            miss_delay: Self::DEFAULT_MISS_DELAY,
            hit_delay: Self::DEFAULT_HIT_DELAY,
            rematch_delay: Self::DEFAULT_REMATCH_DELAY,
        }
    }
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    pub pacing: PacingConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for a replayable battle stream. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            pacing: PacingConfig::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

/// Battles played by [`Runtime::run_session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub results: Vec<BattleResult>,
}

impl SessionSummary {
    pub fn battles(&self) -> usize {
        self.results.len()
    }
}

/// Main runtime that orchestrates the arena
///
/// Design: Runtime owns the worker and coordinates sessions.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    // Shared handle (can be cloned for clients)
    handle: RuntimeHandle,

    // Decision provider (injected by user)
    decision_provider: Option<Box<dyn DecisionProvider>>,

    // Background worker
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Set the decision provider
    pub fn set_decision_provider(&mut self, provider: impl DecisionProvider + 'static) {
        self.decision_provider = Some(Box::new(provider));
    }

    /// Run one session: start a battle from the current pairing, then loop
    /// battle → decision until the provider chooses [`Decision::Reset`].
    ///
    /// The pairing must be complete before calling this.
    pub async fn run_session(&self) -> Result<SessionSummary> {
        let provider = self
            .decision_provider
            .as_ref()
            .ok_or(RuntimeError::DecisionProviderNotSet)?;

        // Subscribe before starting so the battle's end cannot be missed.
        let mut combat_rx = self.handle.subscribe(Topic::Combat);
        self.handle.start_battle().await?;

        let mut summary = SessionSummary::default();
        loop {
            let result = self.wait_for_battle_end(&mut combat_rx).await?;
            summary.results.push(result.clone());

            let decision = provider.decide(&result).await?;
            info!(target: "arena::session", %decision, battles = summary.battles(), "decision");

            match decision {
                Decision::Rematch => {
                    self.handle.rematch().await?;
                }
                Decision::Reset => {
                    self.handle.reset().await?;
                    return Ok(summary);
                }
            }
        }
    }

    async fn wait_for_battle_end(
        &self,
        combat_rx: &mut broadcast::Receiver<Event>,
    ) -> Result<BattleResult> {
        loop {
            match combat_rx.recv().await {
                Ok(Event::Combat(CombatEvent::BattleEnded(result))) => return Ok(result),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(target: "arena::session", skipped, "combat stream lagged");
                    if let Some(result) = self.handle.current_state().await?.last_result {
                        return Ok(result);
                    }
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(RuntimeError::EventStreamClosed {
                        topic: Topic::Combat,
                    });
                }
            }
        }
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every handle (including clones held elsewhere)
    /// has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    roster: Option<Roster>,
    rng: Option<Box<dyn RandomSource + Send>>,
    decision_provider: Option<Box<dyn DecisionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: None,
            rng: None,
            decision_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required roster
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Override combat balance
    pub fn combat(mut self, combat: CombatConfig) -> Self {
        self.config.combat = combat;
        self
    }

    /// Override turn pacing
    pub fn pacing(mut self, pacing: PacingConfig) -> Self {
        self.config.pacing = pacing;
        self
    }

    /// Seed the battle stream for replayable sessions
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Supply the random source directly (takes precedence over the seed)
    pub fn rng(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Set decision provider (optional)
    pub fn decision_provider(mut self, provider: impl DecisionProvider + 'static) -> Self {
        self.decision_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let roster = self.roster.ok_or(RuntimeError::MissingRoster)?;

        let rng: Box<dyn RandomSource + Send> = match (self.rng, self.config.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => Box::new(PcgRng::new(seed)),
            (None, None) => Box::new(EntropyRng::new()),
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = ArenaWorker::new(
            Arena::new(roster, self.config.combat),
            rng,
            self.config.pacing,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            decision_provider: self.decision_provider,
            worker_handle,
        })
    }
}
