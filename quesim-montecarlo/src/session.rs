//! Background session execution
//!
//! A full Monte Carlo session can take long enough that it should not run on
//! an interactive thread. [`Session::spawn`] moves the replication loop onto
//! a worker thread and reports back over a single-producer/single-consumer
//! channel: one [`SessionUpdate`] per finished replication, then exactly one
//! terminal update. The foreground drains at its own pace — the channel is
//! unbounded, so a slow consumer never back-pressures the worker.
//!
//! A panic inside a replication does not vanish: it becomes the
//! [`SessionUpdate::Failed`] terminal update, and everything collected
//! before the fault stays available in the outcome.

use crate::driver::MonteCarloDriver;
use crate::error::SessionError;
use crate::summary::ReplicationSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::warn;

/// One message from the session worker to the foreground.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// Replication `index` (1-based) finished with the given mean wait.
    ReplicationFinished { index: usize, mean_wait: f64 },
    /// Terminal: every replication ran.
    Completed,
    /// Terminal: a stop request was honored at a replication boundary.
    Stopped,
    /// Terminal: a replication panicked; the session is failed.
    Failed { message: String },
}

/// Final disposition of a session, carrying the collected means.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Completed(ReplicationSet),
    Stopped(ReplicationSet),
    Failed {
        message: String,
        partial: ReplicationSet,
    },
}

impl SessionOutcome {
    /// Treat the outcome as a result: a fault becomes
    /// [`SessionError::WorkerFault`], a completed or stopped session yields
    /// its replication set.
    pub fn into_result(self) -> Result<ReplicationSet, SessionError> {
        match self {
            SessionOutcome::Completed(set) | SessionOutcome::Stopped(set) => Ok(set),
            SessionOutcome::Failed { message, partial } => Err(SessionError::WorkerFault {
                message,
                completed: partial.len(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
enum Terminal {
    Completed,
    Stopped,
    Failed(String),
}

/// Entry point for background Monte Carlo execution.
pub struct Session;

impl Session {
    /// Run `driver`'s replications on a worker thread.
    pub fn spawn(driver: MonteCarloDriver) -> SessionHandle {
        let replications = driver.replications();
        Self::spawn_with(replications, move |index| {
            driver.run_replication(index).mean_wait
        })
    }

    /// Run an arbitrary replication body on a worker thread.
    ///
    /// `run_one` is called with indices `1..=replications` and returns the
    /// replication's mean wait. This is the seam for models other than the
    /// built-in M/M/c queue.
    pub fn spawn_with<F>(replications: usize, mut run_one: F) -> SessionHandle
    where
        F: FnMut(usize) -> f64 + Send + 'static,
    {
        let (updates_tx, updates_rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop);

        let worker = std::thread::spawn(move || {
            run_worker(replications, &mut run_one, &worker_stop, &updates_tx);
        });

        SessionHandle {
            updates: updates_rx,
            stop,
            worker: Some(worker),
            collected: Vec::new(),
            terminal: None,
        }
    }
}

fn run_worker<F>(
    replications: usize,
    run_one: &mut F,
    stop: &AtomicBool,
    updates: &Sender<SessionUpdate>,
) where
    F: FnMut(usize) -> f64,
{
    for index in 1..=replications {
        if stop.load(Ordering::Relaxed) {
            let _ = updates.send(SessionUpdate::Stopped);
            return;
        }
        match catch_unwind(AssertUnwindSafe(|| run_one(index))) {
            Ok(mean_wait) => {
                // A send failure means the handle is gone; stop quietly.
                if updates
                    .send(SessionUpdate::ReplicationFinished { index, mean_wait })
                    .is_err()
                {
                    return;
                }
            }
            Err(payload) => {
                let message = panic_message(payload);
                warn!(index, %message, "replication panicked, failing session");
                let _ = updates.send(SessionUpdate::Failed { message });
                return;
            }
        }
    }
    let _ = updates.send(SessionUpdate::Completed);
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

/// Foreground handle to a running session.
///
/// Drain updates with [`SessionHandle::poll`] (non-blocking) or block for
/// the final [`SessionOutcome`] with [`SessionHandle::wait`]. The handle
/// accumulates the per-replication means it has seen, so the outcome always
/// reflects every drained update.
pub struct SessionHandle {
    updates: Receiver<SessionUpdate>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    collected: Vec<f64>,
    terminal: Option<Terminal>,
}

impl SessionHandle {
    /// Ask the worker to stop before its next replication. The replication
    /// in flight, if any, still completes.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Take the next update if one is ready.
    ///
    /// Returns `None` when no update is pending; after a terminal update has
    /// been returned no further updates arrive.
    pub fn poll(&mut self) -> Option<SessionUpdate> {
        match self.updates.try_recv() {
            Ok(update) => {
                self.absorb(&update);
                Some(update)
            }
            Err(_) => None,
        }
    }

    /// Whether a terminal update has been observed yet.
    pub fn is_finished(&self) -> bool {
        self.terminal.is_some()
    }

    /// Block until the session reaches its terminal update, join the
    /// worker, and return the outcome with all collected means.
    pub fn wait(mut self) -> SessionOutcome {
        while self.terminal.is_none() {
            match self.updates.recv() {
                Ok(update) => self.absorb(&update),
                // Worker hung up without a terminal update; treated as a
                // fault below.
                Err(_) => break,
            }
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }

        let terminal = self.terminal.take();
        let set = ReplicationSet::from_means(std::mem::take(&mut self.collected));
        match terminal {
            Some(Terminal::Completed) => SessionOutcome::Completed(set),
            Some(Terminal::Stopped) => SessionOutcome::Stopped(set),
            Some(Terminal::Failed(message)) => SessionOutcome::Failed {
                message,
                partial: set,
            },
            None => SessionOutcome::Failed {
                message: "session worker disconnected without finishing".to_string(),
                partial: set,
            },
        }
    }

    fn absorb(&mut self, update: &SessionUpdate) {
        match update {
            SessionUpdate::ReplicationFinished { mean_wait, .. } => {
                self.collected.push(*mean_wait);
            }
            SessionUpdate::Completed => self.terminal = Some(Terminal::Completed),
            SessionUpdate::Stopped => self.terminal = Some(Terminal::Stopped),
            SessionUpdate::Failed { message } => {
                self.terminal = Some(Terminal::Failed(message.clone()));
            }
        }
    }
}
