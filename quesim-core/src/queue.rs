//! Discrete-event M/M/c queue engine
//!
//! One [`QueueSimulation`] owns one run: a virtual clock advanced through
//! arrival and departure events until a fixed horizon, feeding completed
//! waits into a [`WaitStats`] collector. Instances are single-use — `run`
//! consumes the simulation and returns the frozen [`RunResult`].

use crate::config::SimulationParameters;
use crate::dists::VariateSource;
use crate::stats::{RunResult, WaitStats};
use crate::time::SimTime;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use tracing::{debug, trace};

/// Coarse lifecycle of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The clock has not yet reached the horizon.
    Running,
    /// The clock reached or passed the horizon; no further events fire.
    Finished,
}

/// A single M/M/c queue run driven by event scheduling.
///
/// Two event kinds exist: the next customer arrival (always scheduled) and
/// the earliest pending departure (one per busy server). Each step advances
/// the clock to whichever comes first; when both land on the same instant,
/// the arrival is processed first. Customers still waiting or in service
/// when the horizon is reached are discarded, not drained.
pub struct QueueSimulation {
    params: SimulationParameters,
    source: Box<dyn VariateSource>,
    clock: SimTime,
    busy_servers: usize,
    /// Arrival timestamps of customers waiting for a server, oldest first.
    /// Entries are non-decreasing because arrivals are processed in time
    /// order.
    waiting: VecDeque<SimTime>,
    /// Scheduled departure times, one per busy server (min-heap).
    departures: BinaryHeap<Reverse<SimTime>>,
    next_arrival: SimTime,
    stats: WaitStats,
}

impl QueueSimulation {
    /// Set up a run at clock zero with an idle system.
    ///
    /// The first interarrival time is drawn immediately, so the first draw
    /// of `source` determines the first arrival.
    pub fn new(params: &SimulationParameters, mut source: Box<dyn VariateSource>) -> Self {
        let first_arrival = sample_time(source.as_mut(), params.arrival_rate());
        Self {
            params: *params,
            source,
            clock: SimTime::zero(),
            busy_servers: 0,
            waiting: VecDeque::new(),
            departures: BinaryHeap::new(),
            next_arrival: first_arrival,
            stats: WaitStats::new(),
        }
    }

    /// Current simulation time.
    pub fn time(&self) -> SimTime {
        self.clock
    }

    /// Whether the run is still advancing.
    pub fn state(&self) -> RunState {
        if self.clock < self.params.horizon() {
            RunState::Running
        } else {
            RunState::Finished
        }
    }

    /// Execute the run to completion and return its statistics.
    pub fn run(mut self) -> RunResult {
        while self.step() {}
        let result = self.stats.summarize();
        debug!(
            final_clock = %self.clock,
            queued_customers = result.sample_count,
            mean_wait = result.mean_wait,
            "simulation run finished"
        );
        result
    }

    /// Process the next event. Returns `false` once the horizon is reached.
    ///
    /// The horizon check happens before each event, so the one event whose
    /// timestamp crosses the horizon is still processed in full.
    fn step(&mut self) -> bool {
        if self.state() == RunState::Finished {
            return false;
        }
        match self.departures.peek() {
            // Arrivals win ties, so a departure fires only when it is
            // strictly earliest.
            Some(&Reverse(departure)) if departure < self.next_arrival => {
                self.process_departure(departure);
            }
            _ => self.process_arrival(),
        }
        true
    }

    fn process_arrival(&mut self) {
        self.clock = self.next_arrival;
        if self.busy_servers < self.params.server_count() {
            self.busy_servers += 1;
            let departure = self.clock + self.sample_service_time();
            self.departures.push(Reverse(departure));
            trace!(at = %self.clock, %departure, busy = self.busy_servers, "arrival served");
        } else {
            self.waiting.push_back(self.clock);
            trace!(at = %self.clock, queued = self.waiting.len(), "arrival queued");
        }
        self.next_arrival = self.clock + self.sample_interarrival_time();
    }

    fn process_departure(&mut self, departure: SimTime) {
        self.clock = departure;
        self.departures.pop();
        if let Some(arrived) = self.waiting.pop_front() {
            let wait = self.clock.duration_since(arrived).as_secs_f64();
            self.stats.record(wait);
            // The freed server picks up the next customer immediately.
            let next_departure = self.clock + self.sample_service_time();
            self.departures.push(Reverse(next_departure));
            trace!(at = %self.clock, wait, queued = self.waiting.len(), "departure, queue drained by one");
        } else {
            self.busy_servers -= 1;
            trace!(at = %self.clock, busy = self.busy_servers, "departure, server idle");
        }
    }

    fn sample_interarrival_time(&mut self) -> SimTime {
        sample_time(self.source.as_mut(), self.params.arrival_rate())
    }

    fn sample_service_time(&mut self) -> SimTime {
        sample_time(self.source.as_mut(), self.params.service_rate())
    }
}

/// Draw an exponential sample and convert it to a clock increment.
///
/// Samples are clamped to the 1 ns tick: the source guarantees a strictly
/// positive value, and the clamp keeps that guarantee through the
/// nanosecond conversion so the clock always advances.
fn sample_time(source: &mut dyn VariateSource, rate: f64) -> SimTime {
    SimTime::from_secs_f64(source.next_exponential(rate)).max(SimTime::from_nanos(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dists::ChaChaVariates;

    /// Replays a fixed sequence of "exponential" samples, ignoring the rate.
    struct ScriptedVariates {
        samples: VecDeque<f64>,
    }

    impl ScriptedVariates {
        fn new(samples: &[f64]) -> Box<Self> {
            Box::new(Self {
                samples: samples.iter().copied().collect(),
            })
        }
    }

    impl VariateSource for ScriptedVariates {
        fn next_exponential(&mut self, _rate: f64) -> f64 {
            self.samples.pop_front().expect("script exhausted")
        }
    }

    fn params(server_count: usize, horizon_secs: u64) -> SimulationParameters {
        SimulationParameters::new(1.0, 1.2, server_count, SimTime::from_secs(horizon_secs))
            .unwrap()
    }

    #[test]
    fn scripted_single_server_waits() {
        // Draw order: first interarrival; on a served arrival the service
        // draw precedes the next-arrival draw; a queued arrival only draws
        // the next arrival; a departure that dequeues draws one service.
        //
        // Arrivals at t=1, 2, 3, then 203. The t=1 customer is served until
        // t=6; the t=2 and t=3 customers queue and wait 4s and 5s. The t=203
        // arrival crosses the horizon and ends the run.
        let script = ScriptedVariates::new(&[
            1.0, // first arrival at 1
            5.0, 1.0, // t=1: service until 6, next arrival at 2
            1.0, // t=2: queued, next arrival at 3
            200.0, // t=3: queued, next arrival at 203
            2.0, // t=6: dequeue t=2 (wait 4), service until 8
            1.0, // t=8: dequeue t=3 (wait 5), service until 9
            // t=9: queue empty, server idles, no draw
            1.0, 1.0, // t=203: served arrival past the horizon
        ]);
        let result = QueueSimulation::new(&params(1, 100), script).run();
        assert_eq!(result.sample_count, 2);
        assert!((result.mean_wait - 4.5).abs() < 1e-9);
        assert!((result.variance_wait - 0.5).abs() < 1e-9);
        assert!((result.max_wait - 5.0).abs() < 1e-9);
    }

    #[test]
    fn arrival_wins_simultaneous_departure() {
        // Arrival and departure both land on t=2. The arrival is processed
        // first, so the customer queues and is dequeued by the departure at
        // the same instant, recording a zero wait. If the departure won the
        // tie, the server would be free on arrival and nothing would be
        // recorded.
        let script = ScriptedVariates::new(&[
            1.0, // first arrival at 1
            1.0, 1.0, // t=1: service until 2, next arrival at 2
            10.0, // t=2: queued (tie goes to the arrival), next arrival at 12
            1.0, // t=2: departure dequeues, wait 0, service until 3
            // t=3: idle, no draw
            1.0, 1.0, // t=12: served arrival past the horizon
        ]);
        let result = QueueSimulation::new(&params(1, 5), script).run();
        assert_eq!(result.sample_count, 1);
        assert_eq!(result.mean_wait, 0.0);
        assert_eq!(result.max_wait, 0.0);
    }

    #[test]
    fn run_terminates_and_clock_reaches_horizon() {
        let source = Box::new(ChaChaVariates::from_seed(99));
        let params = params(2, 200);
        let mut sim = QueueSimulation::new(&params, source);
        assert_eq!(sim.state(), RunState::Running);
        while sim.step() {}
        assert_eq!(sim.state(), RunState::Finished);
        assert!(sim.time() >= params.horizon());
    }

    #[test]
    fn oversized_server_pool_records_no_waits() {
        let params =
            SimulationParameters::new(1.0, 1.2, 1000, SimTime::from_secs(100)).unwrap();
        let result =
            QueueSimulation::new(&params, Box::new(ChaChaVariates::from_seed(5))).run();
        assert_eq!(result.sample_count, 0);
        assert_eq!(result.mean_wait, 0.0);
        assert_eq!(result.variance_wait, 0.0);
        assert_eq!(result.max_wait, 0.0);
    }

    #[test]
    fn waits_are_non_negative() {
        for seed in 0..20 {
            let params =
                SimulationParameters::new(2.0, 1.0, 1, SimTime::from_secs(50)).unwrap();
            let result =
                QueueSimulation::new(&params, Box::new(ChaChaVariates::from_seed(seed))).run();
            assert!(result.mean_wait >= 0.0);
            assert!(result.max_wait >= result.mean_wait);
        }
    }

    #[test]
    fn same_seed_same_result() {
        let params = params(1, 100);
        let a = QueueSimulation::new(&params, Box::new(ChaChaVariates::from_seed(42))).run();
        let b = QueueSimulation::new(&params, Box::new(ChaChaVariates::from_seed(42))).run();
        assert_eq!(a, b);
    }
}
