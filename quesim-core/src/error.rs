//! Error types for the simulation engine

use thiserror::Error;

/// Errors surfaced when constructing simulation inputs.
///
/// All validation happens up front, before any simulation work starts. A
/// constructed [`crate::SimulationParameters`] is always valid, so the engine
/// itself never fails mid-run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("arrival rate must be positive and finite, got {0}")]
    InvalidArrivalRate(f64),

    #[error("service rate must be positive and finite, got {0}")]
    InvalidServiceRate(f64),

    #[error("server count must be at least 1")]
    NoServers,

    #[error("simulation horizon must be positive")]
    InvalidHorizon,
}
