//! Monte Carlo replication layer for the M/M/c queue engine.
//!
//! `quesim-core` runs one simulation; this crate runs many. The
//! [`MonteCarloDriver`] executes N independent replications — fresh
//! [`quesim_core::QueueSimulation`] and fresh seeded stream per run — and
//! collects each run's mean wait into a [`ReplicationSet`]. [`Session`]
//! moves that loop onto a background thread with a progress channel, a
//! coarse-grained stop, and fault isolation per replication.
//!
//! # Basic usage
//!
//! ```
//! use quesim_core::{SimTime, SimulationParameters};
//! use quesim_montecarlo::{MonteCarloDriver, NullProgress};
//!
//! let params = SimulationParameters::new(1.0, 1.2, 1, SimTime::from_secs(100))?;
//! let driver = MonteCarloDriver::new(params, 50, 42)?;
//! let set = driver.run_all(&mut NullProgress);
//! assert_eq!(set.len(), 50);
//! let summary = set.summary();
//! assert!(summary.mean_wait >= 0.0);
//! # Ok::<(), quesim_montecarlo::SessionError>(())
//! ```
//!
//! For interactive consumers, spawn a [`Session`] instead and drain
//! [`SessionUpdate`]s while the worker runs.

pub mod driver;
pub mod error;
pub mod session;
pub mod summary;

pub use driver::{MonteCarloDriver, NullProgress, ProgressSink};
pub use error::SessionError;
pub use session::{Session, SessionHandle, SessionOutcome, SessionUpdate};
pub use summary::ReplicationSet;
