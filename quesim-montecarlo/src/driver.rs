//! Sequential Monte Carlo replication driver

use crate::error::SessionError;
use crate::summary::ReplicationSet;
use quesim_core::{
    replication_span, session_span, ChaChaVariates, QueueSimulation, RunResult,
    SimulationParameters,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Receives a notification after each finished replication.
///
/// Implemented for any `FnMut(usize)`, so a closure, a channel-sending
/// adapter, or [`NullProgress`] can all act as the sink. Indices arrive as
/// `1..=replications`, one each, in completion order.
pub trait ProgressSink {
    fn replication_completed(&mut self, index: usize);
}

impl<F: FnMut(usize)> ProgressSink for F {
    fn replication_completed(&mut self, index: usize) {
        self(index)
    }
}

/// A sink that discards progress notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn replication_completed(&mut self, _index: usize) {}
}

/// Runs N independent [`QueueSimulation`]s and collects each run's mean
/// wait.
///
/// Replications share nothing mutable: every run gets a fresh simulation
/// instance and its own variate stream, seeded by mixing the session's base
/// seed with the replication index. Two drivers built with the same
/// parameters, count, and base seed therefore produce identical
/// [`ReplicationSet`]s.
#[derive(Debug, Clone)]
pub struct MonteCarloDriver {
    params: SimulationParameters,
    replications: usize,
    base_seed: u64,
}

impl MonteCarloDriver {
    /// Create a driver for `replications` runs of `params`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoReplications`] if `replications` is zero.
    /// Parameter validity is already guaranteed by
    /// [`SimulationParameters::new`].
    pub fn new(
        params: SimulationParameters,
        replications: usize,
        base_seed: u64,
    ) -> Result<Self, SessionError> {
        if replications == 0 {
            return Err(SessionError::NoReplications);
        }
        Ok(Self {
            params,
            replications,
            base_seed,
        })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn replications(&self) -> usize {
        self.replications
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Execute one replication (1-based `index`) from scratch.
    ///
    /// Exposed so a background worker can interleave replications with
    /// cancellation checks and fault isolation.
    pub fn run_replication(&self, index: usize) -> RunResult {
        let _span = replication_span(index).entered();
        let source = Box::new(ChaChaVariates::from_seed(self.seed_for(index)));
        QueueSimulation::new(&self.params, source).run()
    }

    /// Run every replication sequentially, notifying `progress` after each.
    pub fn run_all<P: ProgressSink>(&self, progress: &mut P) -> ReplicationSet {
        let never = AtomicBool::new(false);
        self.run_until(progress, &never)
    }

    /// Like [`MonteCarloDriver::run_all`], but checks `stop` at each
    /// replication boundary and returns the partial set once it is raised.
    /// Cancellation is coarse-grained: a replication in flight always
    /// finishes.
    pub fn run_until<P: ProgressSink>(&self, progress: &mut P, stop: &AtomicBool) -> ReplicationSet {
        let _span = session_span(self.replications).entered();
        let mut set = ReplicationSet::with_capacity(self.replications);
        for index in 1..=self.replications {
            if stop.load(Ordering::Relaxed) {
                info!(completed = set.len(), "session stopped at replication boundary");
                return set;
            }
            let result = self.run_replication(index);
            set.push(result.mean_wait);
            progress.replication_completed(index);
        }
        info!(replications = set.len(), "session complete");
        set
    }

    /// Seed for one replication's variate stream.
    fn seed_for(&self, index: usize) -> u64 {
        derive_seed(self.base_seed, index as u64)
    }
}

/// Mix a base seed with a replication index (SplitMix64 finalizer).
///
/// Adjacent indices produce statistically unrelated seeds, so replications
/// keyed `base_seed + i` do not share stream prefixes.
fn derive_seed(base: u64, index: u64) -> u64 {
    let mut x = base.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
