//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the arena or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use arena_core::{ArenaSnapshot, BattleStart, CharacterId, Roster, SelectionChange};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Roster click on `id`.
    ///
    /// Returns the new pairing, or `None` when the click changed nothing
    /// (unknown id, locked pairing, or not in the selection phase).
    pub async fn select(&self, id: CharacterId) -> Result<Option<SelectionChange>> {
        self.request(|reply| Command::Select { id, reply }).await
    }

    /// Start a battle from the current pairing.
    pub async fn start_battle(&self) -> Result<BattleStart> {
        self.request(|reply| Command::StartBattle { reply }).await?
    }

    /// Replay the last pairing with both fighters at full health.
    pub async fn rematch(&self) -> Result<BattleStart> {
        self.request(|reply| Command::Rematch { reply }).await?
    }

    /// Clear the pairing and return to selection.
    pub async fn reset(&self) -> Result<SelectionChange> {
        self.request(|reply| Command::Reset { reply }).await?
    }

    /// Query the current arena state (read-only snapshot)
    pub async fn current_state(&self) -> Result<ArenaSnapshot> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Query the roster the arena was built with
    pub async fn roster(&self) -> Result<Roster> {
        self.request(|reply| Command::QueryRoster { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Selection` - Pairing changes
    /// - `Topic::Combat` - Battle start, each turn, battle end
    /// - `Topic::Session` - Rematch and reset decisions
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use arena_runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Render the turn
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
