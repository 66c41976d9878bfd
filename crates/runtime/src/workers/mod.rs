//! Worker tasks that back the runtime orchestration.
//!
//! The arena worker owns all mutable game state and processes commands and
//! paced battle turns on a single task.

mod arena;

pub use arena::{ArenaWorker, Command};
