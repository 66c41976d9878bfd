//! Runtime orchestration for the arena.
//!
//! This crate wires the pure rules of `arena-core` into an async runtime: a
//! single worker task owns the [`arena_core::Arena`], paces battle turns, and
//! publishes what happens on a topic-based event bus. Consumers embed
//! [`Runtime`] to run whole sessions and interact with the arena through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`random`] provides the entropy-backed random source
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod random;
pub mod runtime;

mod workers;

pub use api::{
    AlwaysResetProvider, Decision, DecisionProvider, Result, RuntimeError, RuntimeHandle,
    ScriptedDecisionProvider,
};
pub use events::{CombatEvent, Event, EventBus, SelectionEvent, SessionEvent, Topic};
pub use random::EntropyRng;
pub use runtime::{PacingConfig, Runtime, RuntimeBuilder, RuntimeConfig, SessionSummary};
