//! Determinism guardrail tests
//!
//! These tests detect accidental introduction of non-determinism into the
//! engine: a run must be a pure function of its parameters and the seed of
//! its variate stream.

use quesim_core::{ChaChaVariates, QueueSimulation, SimTime, SimulationParameters};

fn run_once(seed: u64) -> quesim_core::RunResult {
    let params = SimulationParameters::new(1.0, 1.2, 1, SimTime::from_secs(100))
        .expect("valid parameters");
    QueueSimulation::new(&params, Box::new(ChaChaVariates::from_seed(seed))).run()
}

#[test]
fn identical_seed_identical_run_across_many_repeats() {
    let baseline = run_once(42);
    for _ in 0..50 {
        assert_eq!(run_once(42), baseline);
    }
}

#[test]
fn different_seeds_give_different_runs() {
    // Not guaranteed in principle, but over a 100 s horizon two seeds
    // producing identical statistics would indicate a broken stream.
    let a = run_once(1);
    let b = run_once(2);
    assert_ne!(a, b);
}

#[test]
fn results_are_stable_under_parameter_copy() {
    // Parameters are Copy; sharing one value across runs must not differ
    // from rebuilding it per run.
    let shared = SimulationParameters::new(1.5, 2.0, 2, SimTime::from_secs(80))
        .expect("valid parameters");
    let rebuilt = SimulationParameters::new(1.5, 2.0, 2, SimTime::from_secs(80))
        .expect("valid parameters");

    let a = QueueSimulation::new(&shared, Box::new(ChaChaVariates::from_seed(7))).run();
    let b = QueueSimulation::new(&rebuilt, Box::new(ChaChaVariates::from_seed(7))).run();
    assert_eq!(a, b);
}
