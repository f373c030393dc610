//! Concurrent multi-stop timetable aggregation.
//!
//! One task per stop is spawned eagerly. Each task performs exactly one fetch
//! and sends exactly one outcome; a failed stop never stops the others. A
//! coordinator task owns all fetch tasks, waits for them, and closes the
//! result channel once the last one is done.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

use crate::api::FetchError;
use crate::domain::Stop;
use crate::fetch::{LineFilter, TimetableFetcher};
use crate::stops::StopDirectory;

use super::stream::{FetchOutcome, TimetableStream};

/// Configuration for the aggregation engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Replace upstream stop names with the names from the local directory.
    pub override_stop_names: bool,

    /// Maximum number of fetches in flight at once. `None` means one
    /// concurrent fetch per matching stop with no limit.
    pub max_in_flight: Option<usize>,
}

impl EngineConfig {
    /// Enable or disable stop-name override.
    pub fn with_override_stop_names(mut self, enabled: bool) -> Self {
        self.override_stop_names = enabled;
        self
    }

    /// Limit concurrent fetches.
    pub fn with_max_in_flight(mut self, n: usize) -> Self {
        self.max_in_flight = Some(n);
        self
    }
}

/// Resolves stop-name patterns and fetches all matching timetables at once.
#[derive(Clone)]
pub struct AggregationEngine {
    directory: Arc<StopDirectory>,
    fetcher: Arc<dyn TimetableFetcher>,
    override_stop_names: bool,
    limiter: Option<Arc<Semaphore>>,
}

impl AggregationEngine {
    /// Create a new engine.
    pub fn new(
        directory: Arc<StopDirectory>,
        fetcher: Arc<dyn TimetableFetcher>,
        config: EngineConfig,
    ) -> Self {
        Self {
            directory,
            fetcher,
            override_stop_names: config.override_stop_names,
            // A zero limit would never let anything through
            limiter: config
                .max_in_flight
                .map(|n| Arc::new(Semaphore::new(n.max(1)))),
        }
    }

    /// The directory patterns are resolved against.
    pub fn directory(&self) -> &StopDirectory {
        &self.directory
    }

    /// Fetch the timetables of every stop whose name matches `pattern`.
    ///
    /// Returns immediately; fetches run in the background and their outcomes
    /// arrive on the returned stream in completion order. The empty pattern
    /// selects every stop in the directory.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn aggregate(&self, pattern: &str, filter: &LineFilter, exact: bool) -> TimetableStream {
        let candidates = self.directory.match_by_name(pattern, exact);
        debug!(
            pattern,
            exact,
            matched = candidates.len(),
            "Resolved stop pattern"
        );
        self.aggregate_stops(candidates, filter)
    }

    /// Fetch the timetables of the given stops.
    ///
    /// Same contract as [`AggregationEngine::aggregate`], for stops that were
    /// resolved some other way (e.g. given by code).
    pub fn aggregate_stops(&self, stops: Vec<Stop>, filter: &LineFilter) -> TimetableStream {
        let dispatched = stops.len();
        // One slot per stop, so no sender ever waits on the consumer
        let (tx, rx) = mpsc::channel(dispatched.max(1));
        let mut tasks = JoinSet::new();

        for stop in stops {
            let unit = FetchUnit {
                fetcher: Arc::clone(&self.fetcher),
                limiter: self.limiter.clone(),
                override_stop_names: self.override_stop_names,
                filter: filter.clone(),
                stop,
            };
            let tx = tx.clone();

            tasks.spawn(async move {
                let outcome = unit.run().await;
                // A closed channel means the consumer went away; nothing to do
                let _ = tx.send(outcome).await;
            });
        }

        let coordinator = tokio::spawn(coordinate(tasks, tx, dispatched));
        TimetableStream::new(rx, coordinator, dispatched)
    }
}

/// Everything one fetch task needs.
struct FetchUnit {
    fetcher: Arc<dyn TimetableFetcher>,
    limiter: Option<Arc<Semaphore>>,
    override_stop_names: bool,
    filter: LineFilter,
    stop: Stop,
}

impl FetchUnit {
    /// Fetch one stop, always producing an outcome.
    async fn run(self) -> FetchOutcome {
        let _permit = match &self.limiter {
            Some(limiter) => match Arc::clone(limiter).acquire_owned().await {
                Ok(permit) => Some(permit),
                Err(_) => {
                    return FetchOutcome::Failure {
                        stop: self.stop,
                        error: FetchError::TaskFailed("concurrency limiter closed".into()),
                    };
                }
            },
            None => None,
        };

        let query = self.filter.query_for(self.stop.code.clone());
        trace!(stop = %self.stop.code, "Fetching timetable");

        let result = AssertUnwindSafe(self.fetcher.fetch(&query))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(mut timetable)) => {
                if self.override_stop_names {
                    timetable.override_stop_name(&self.stop.name);
                }
                FetchOutcome::Success(timetable)
            }
            Ok(Err(error)) => FetchOutcome::Failure {
                stop: self.stop,
                error,
            },
            Err(panic) => FetchOutcome::Failure {
                stop: self.stop,
                error: FetchError::TaskFailed(panic_message(&*panic)),
            },
        }
    }
}

/// Wait for every fetch task, then close the channel by dropping the last
/// sender.
async fn coordinate(
    mut tasks: JoinSet<()>,
    tx: mpsc::Sender<FetchOutcome>,
    dispatched: usize,
) {
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            // Fetch panics are caught inside the task, so this is a cancellation
            warn!(error = %e, "Fetch task ended abnormally");
        }
    }

    debug!(dispatched, "All timetable fetches complete");
    drop(tx);
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("fetch panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("fetch panicked: {s}")
    } else {
        "fetch panicked".to_string()
    }
}
