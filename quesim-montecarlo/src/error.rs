//! Error types for Monte Carlo sessions

use quesim_core::SimError;
use thiserror::Error;

/// Errors surfaced by the replication driver and session layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("replication count must be at least 1")]
    NoReplications,

    #[error(transparent)]
    Sim(#[from] SimError),

    /// A background replication panicked. The session is failed as a whole;
    /// `completed` replications finished before the fault and their results
    /// remain available.
    #[error("worker fault after {completed} completed replications: {message}")]
    WorkerFault { message: String, completed: usize },
}
