//! Unified error types surfaced by the runtime API.
//!
//! Wraps lifecycle rejections and worker coordination failures so clients can
//! bubble them up with consistent context.

use arena_core::LifecycleError;
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("arena worker command channel closed")]
    CommandChannelClosed,

    #[error("arena worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("event stream for {topic} closed")]
    EventStreamClosed { topic: crate::events::Topic },

    #[error("arena worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a roster to be configured before building")]
    MissingRoster,

    #[error("decision provider not set")]
    DecisionProviderNotSet,

    #[error("decision provider failed: {0}")]
    Decision(String),
}
