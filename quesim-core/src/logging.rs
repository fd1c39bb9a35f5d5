//! Structured logging setup for simulation runs
//!
//! The engine and the Monte Carlo driver emit `tracing` events (trace-level
//! per-event detail, debug-level run summaries, info-level session
//! progress). Nothing is logged unless a subscriber is installed; binaries
//! and examples call one of the init helpers below.
//!
//! `RUST_LOG` overrides the level as usual, e.g.
//! `RUST_LOG=quesim_core::queue=trace` to watch individual events.

use tracing::{info, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a subscriber with sensible defaults (info level).
pub fn init_logging() {
    init_logging_with_level("info");
}

/// Install a subscriber at a specific level ("trace" through "error").
///
/// The level is only the fallback; an explicit `RUST_LOG` wins.
pub fn init_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("quesim_core={level},quesim_montecarlo={level}").into());

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .init();

    info!(level, "simulation logging initialized");
}

/// Span covering one Monte Carlo session.
pub fn session_span(replications: usize) -> Span {
    tracing::info_span!("session", replications)
}

/// Span covering one replication run.
pub fn replication_span(index: usize) -> Span {
    tracing::debug_span!("replication", index)
}
