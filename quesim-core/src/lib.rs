//! Discrete-event simulation engine for M/M/c queues.
//!
//! This crate provides the building blocks for simulating a multi-server
//! queue with exponential interarrival and service times:
//!
//! - [`SimTime`]: the virtual clock value, nanosecond-precision and totally
//!   ordered.
//! - [`SimulationParameters`]: validated, immutable inputs (λ, μ, c, and the
//!   time horizon).
//! - [`VariateSource`] / [`ChaChaVariates`]: seedable exponential sample
//!   streams, one per run, so replications stay independent and
//!   reproducible.
//! - [`QueueSimulation`]: the event loop itself — arrivals and departures
//!   advancing the clock until the horizon.
//! - [`WaitStats`] / [`RunResult`]: wait-time accumulation and the frozen
//!   per-run summary.
//!
//! # Basic usage
//!
//! ```
//! use quesim_core::{ChaChaVariates, QueueSimulation, SimTime, SimulationParameters};
//!
//! let params = SimulationParameters::new(1.0, 1.2, 1, SimTime::from_secs(100))?;
//! let source = Box::new(ChaChaVariates::from_seed(42));
//! let result = QueueSimulation::new(&params, source).run();
//! assert!(result.mean_wait >= 0.0);
//! # Ok::<(), quesim_core::SimError>(())
//! ```
//!
//! Running many replications and aggregating their mean waits is the job of
//! the `quesim-montecarlo` crate; this crate is strictly single-run.
//!
//! # Time model
//!
//! All timing uses [`SimTime`], which is simulation time, not wall-clock
//! time. A run is deterministic given its parameters and its variate
//! stream's seed.

pub mod config;
pub mod dists;
pub mod error;
pub mod logging;
pub mod queue;
pub mod stats;
pub mod time;

pub use config::SimulationParameters;
pub use dists::{ChaChaVariates, VariateSource};
pub use error::SimError;
pub use logging::{init_logging, init_logging_with_level, replication_span, session_span};
pub use queue::{QueueSimulation, RunState};
pub use stats::{RunResult, WaitStats};
pub use time::SimTime;
