//! Demo consumer for a Monte Carlo session.
//!
//! Plays the role of the presentation layer: supplies parameters, watches
//! progress while the session runs in the background, then renders the
//! distribution of per-replication mean waits as a text histogram.
//!
//! Run with `cargo run --example wait_time_histogram`, optionally with
//! `RUST_LOG=debug` for per-run detail.

use quesim_core::{init_logging, SimTime, SimulationParameters};
use quesim_montecarlo::{MonteCarloDriver, Session, SessionError, SessionOutcome, SessionUpdate};
use std::time::Duration;

const REPLICATIONS: usize = 500;
const SEED: u64 = 42;
const HISTOGRAM_BINS: usize = 20;
const BAR_WIDTH: usize = 50;

fn main() -> Result<(), SessionError> {
    init_logging();

    // The classic near-saturated M/M/1: expected queueing delay ≈ 4.17 s.
    let params = SimulationParameters::new(1.0, 1.2, 1, SimTime::from_secs(100))?;
    println!(
        "M/M/{} with λ={}, μ={}, horizon {}, ρ={:.3}; {} replications, seed {}",
        params.server_count(),
        params.arrival_rate(),
        params.service_rate(),
        params.horizon(),
        params.utilization(),
        REPLICATIONS,
        SEED,
    );

    let driver = MonteCarloDriver::new(params, REPLICATIONS, SEED)?;
    let mut handle = Session::spawn(driver);

    while !handle.is_finished() {
        match handle.poll() {
            Some(SessionUpdate::ReplicationFinished { index, .. }) => {
                if index % 50 == 0 {
                    println!("  {index}/{REPLICATIONS} replications done");
                }
            }
            Some(_) => {}
            None => std::thread::sleep(Duration::from_millis(20)),
        }
    }

    let set = match handle.wait() {
        SessionOutcome::Completed(set) => set,
        SessionOutcome::Stopped(set) => set,
        SessionOutcome::Failed { message, partial } => {
            return Err(SessionError::WorkerFault {
                message,
                completed: partial.len(),
            });
        }
    };

    let summary = set.summary();
    println!(
        "\nmean of means {:.3} s, variance {:.3}, max {:.3} s over {} replications\n",
        summary.mean_wait, summary.variance_wait, summary.max_wait, summary.sample_count
    );
    print_histogram(set.means());
    Ok(())
}

fn print_histogram(means: &[f64]) {
    let lo = means.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(lo.is_finite() && hi > lo) {
        println!("(not enough spread to draw a histogram)");
        return;
    }

    let width = (hi - lo) / HISTOGRAM_BINS as f64;
    let mut counts = [0usize; HISTOGRAM_BINS];
    for &mean in means {
        let bin = (((mean - lo) / width) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }
    let peak = counts.iter().copied().max().unwrap_or(1).max(1);

    println!("mean wait (s)  replications");
    for (bin, &count) in counts.iter().enumerate() {
        let left = lo + width * bin as f64;
        let bar = "#".repeat(count * BAR_WIDTH / peak);
        println!("{left:>10.2}  {count:>5}  {bar}");
    }
}
