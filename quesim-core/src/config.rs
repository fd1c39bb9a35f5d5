//! Validated simulation parameters

use crate::error::SimError;
use crate::time::SimTime;
use serde::{Deserialize, Serialize};

/// Immutable parameter set for one M/M/c simulation run.
///
/// Construction is the single validation point: a value of this type always
/// holds positive, finite rates, at least one server, and a positive horizon.
/// The same parameters may be shared across every replication of a Monte
/// Carlo session; only the random stream varies between runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    arrival_rate: f64,
    service_rate: f64,
    server_count: usize,
    horizon: SimTime,
}

impl SimulationParameters {
    /// Create a validated parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`] if `arrival_rate` or `service_rate` is not a
    /// positive finite number, if `server_count` is zero, or if `horizon`
    /// is zero.
    pub fn new(
        arrival_rate: f64,
        service_rate: f64,
        server_count: usize,
        horizon: SimTime,
    ) -> Result<Self, SimError> {
        if !(arrival_rate.is_finite() && arrival_rate > 0.0) {
            return Err(SimError::InvalidArrivalRate(arrival_rate));
        }
        if !(service_rate.is_finite() && service_rate > 0.0) {
            return Err(SimError::InvalidServiceRate(service_rate));
        }
        if server_count == 0 {
            return Err(SimError::NoServers);
        }
        if horizon == SimTime::zero() {
            return Err(SimError::InvalidHorizon);
        }
        Ok(Self {
            arrival_rate,
            service_rate,
            server_count,
            horizon,
        })
    }

    /// Mean customer arrivals per second (λ).
    pub fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    /// Mean service completions per second per server (μ).
    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    /// Number of parallel servers (c).
    pub fn server_count(&self) -> usize {
        self.server_count
    }

    /// Virtual-time cutoff at which a run stops.
    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    /// Traffic intensity ρ = λ / (cμ).
    ///
    /// Values at or above 1.0 mean the queue has no steady state; runs still
    /// terminate at the horizon, but waits grow with the horizon.
    pub fn utilization(&self) -> f64 {
        self.arrival_rate / (self.server_count as f64 * self.service_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizon() -> SimTime {
        SimTime::from_secs(100)
    }

    #[test]
    fn accepts_valid_parameters() {
        let params = SimulationParameters::new(1.0, 1.2, 1, horizon()).unwrap();
        assert_eq!(params.arrival_rate(), 1.0);
        assert_eq!(params.service_rate(), 1.2);
        assert_eq!(params.server_count(), 1);
        assert_eq!(params.horizon(), horizon());
    }

    #[test]
    fn rejects_zero_arrival_rate() {
        assert_eq!(
            SimulationParameters::new(0.0, 1.2, 1, horizon()),
            Err(SimError::InvalidArrivalRate(0.0))
        );
    }

    #[test]
    fn rejects_negative_service_rate() {
        assert_eq!(
            SimulationParameters::new(1.0, -0.5, 1, horizon()),
            Err(SimError::InvalidServiceRate(-0.5))
        );
    }

    #[test]
    fn rejects_non_finite_rates() {
        assert!(SimulationParameters::new(f64::NAN, 1.2, 1, horizon()).is_err());
        assert!(SimulationParameters::new(1.0, f64::INFINITY, 1, horizon()).is_err());
    }

    #[test]
    fn rejects_zero_servers() {
        assert_eq!(
            SimulationParameters::new(1.0, 1.2, 0, horizon()),
            Err(SimError::NoServers)
        );
    }

    #[test]
    fn rejects_zero_horizon() {
        assert_eq!(
            SimulationParameters::new(1.0, 1.2, 1, SimTime::zero()),
            Err(SimError::InvalidHorizon)
        );
    }

    #[test]
    fn utilization_is_rho() {
        let params = SimulationParameters::new(1.0, 1.2, 2, horizon()).unwrap();
        assert!((params.utilization() - 1.0 / 2.4).abs() < 1e-12);
    }
}
