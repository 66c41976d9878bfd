//! Terminal client for the arena.
//!
//! # Architecture
//!
//! ```text
//! main
//!   ├─→ ClientConfig (environment)
//!   ├─→ Content (roster + balance, from files or embedded)
//!   ├─→ Runtime (arena worker, event bus)
//!   ├─→ Presenter task (prints events)
//!   └─→ Prompts (pairing selection, rematch / reset decision)
//! ```
//!
//! Prompts and the presenter only talk to the game through
//! [`arena_runtime::RuntimeHandle`] and its event topics.

pub mod config;
pub mod logging;
pub mod presenter;
pub mod prompt;

pub use config::ClientConfig;
pub use prompt::{Console, PromptDecisionProvider};
