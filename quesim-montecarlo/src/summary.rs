//! Aggregation of per-replication mean waits

use quesim_core::{RunResult, WaitStats};
use serde::{Deserialize, Serialize};

/// The ordered sequence of mean-wait values across one session's
/// replications.
///
/// Grows monotonically while the session runs and is frozen once handed to
/// the consumer. The raw sequence is what a presentation layer histograms;
/// [`ReplicationSet::summary`] gives the session-level aggregate for
/// consumers that want one number set instead of the full list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationSet {
    means: Vec<f64>,
}

impl ReplicationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            means: Vec::with_capacity(capacity),
        }
    }

    /// Rebuild a set from previously extracted means.
    pub fn from_means(means: Vec<f64>) -> Self {
        Self { means }
    }

    pub(crate) fn push(&mut self, mean_wait: f64) {
        self.means.push(mean_wait);
    }

    /// Per-replication mean waits, in replication order.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Consume the set, yielding the raw sequence.
    pub fn into_means(self) -> Vec<f64> {
        self.means
    }

    /// Session-level statistics over the per-replication means — the mean,
    /// Bessel-corrected variance, maximum, and count of the means
    /// themselves.
    pub fn summary(&self) -> RunResult {
        let mut stats = WaitStats::new();
        for &mean in &self.means {
            stats.record(mean);
        }
        stats.summarize()
    }
}
