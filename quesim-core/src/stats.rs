//! Wait-time statistics accumulation

use serde::{Deserialize, Serialize};

/// Accumulates observed wait times for a single simulation run.
///
/// Recording only appends; [`WaitStats::summarize`] is non-mutating and may
/// be called at any point. Only customers who actually queued have a wait
/// recorded — a customer served on arrival contributes no sample, so the
/// resulting mean is a mean over queued customers, not over all customers.
#[derive(Debug, Clone, Default)]
pub struct WaitStats {
    waits: Vec<f64>,
}

impl WaitStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed wait, in seconds.
    pub fn record(&mut self, wait: f64) {
        debug_assert!(wait >= 0.0, "waits are non-negative by construction");
        self.waits.push(wait);
    }

    /// Number of recorded waits so far.
    pub fn count(&self) -> usize {
        self.waits.len()
    }

    /// Snapshot the accumulated statistics.
    ///
    /// With no samples every field is zero; with a single sample the variance
    /// is zero by policy (Bessel's correction would otherwise divide by
    /// zero). Neither case is an error.
    pub fn summarize(&self) -> RunResult {
        let n = self.waits.len();
        if n == 0 {
            return RunResult::default();
        }

        let mean = self.waits.iter().sum::<f64>() / n as f64;
        let variance = if n < 2 {
            0.0
        } else {
            self.waits.iter().map(|w| (w - mean) * (w - mean)).sum::<f64>() / (n - 1) as f64
        };
        let max = self.waits.iter().copied().fold(0.0, f64::max);

        RunResult {
            mean_wait: mean,
            variance_wait: variance,
            max_wait: max,
            sample_count: n,
        }
    }
}

/// Frozen outcome of one simulation run.
///
/// Produced once when a run completes and read-only thereafter. All times
/// are in seconds. `sample_count` is the number of customers who queued;
/// when it is zero the other fields are zero as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Arithmetic mean of recorded waits.
    pub mean_wait: f64,
    /// Sample variance of recorded waits (Bessel-corrected, n − 1).
    pub variance_wait: f64,
    /// Largest recorded wait.
    pub max_wait: f64,
    /// Number of recorded waits.
    pub sample_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collector_is_all_zero() {
        let stats = WaitStats::new();
        assert_eq!(stats.summarize(), RunResult::default());
        assert_eq!(stats.count(), 0);
    }

    #[test]
    fn single_sample_has_zero_variance() {
        let mut stats = WaitStats::new();
        stats.record(3.5);
        let result = stats.summarize();
        assert_eq!(result.mean_wait, 3.5);
        assert_eq!(result.variance_wait, 0.0);
        assert_eq!(result.max_wait, 3.5);
        assert_eq!(result.sample_count, 1);
    }

    #[test]
    fn two_samples_use_bessel_correction() {
        let (a, b) = (1.0, 4.0);
        let mut stats = WaitStats::new();
        stats.record(a);
        stats.record(b);
        let result = stats.summarize();
        assert!((result.variance_wait - (a - b) * (a - b) / 2.0).abs() < 1e-12);
        assert_eq!(result.mean_wait, 2.5);
        assert_eq!(result.max_wait, 4.0);
    }

    #[test]
    fn known_sample_set() {
        let mut stats = WaitStats::new();
        for w in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.record(w);
        }
        let result = stats.summarize();
        assert_eq!(result.mean_wait, 5.0);
        // Sum of squared deviations is 32; 32 / (8 - 1).
        assert!((result.variance_wait - 32.0 / 7.0).abs() < 1e-12);
        assert_eq!(result.max_wait, 9.0);
        assert_eq!(result.sample_count, 8);
    }

    #[test]
    fn summarize_is_idempotent() {
        let mut stats = WaitStats::new();
        stats.record(1.0);
        stats.record(2.0);
        assert_eq!(stats.summarize(), stats.summarize());
    }
}
