//! The result stream of an aggregation.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::FetchError;
use crate::domain::{Stop, StopCode, StopTimetable};

/// Result of fetching one stop's timetable.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(StopTimetable),
    Failure { stop: Stop, error: FetchError },
}

impl FetchOutcome {
    /// Code of the stop this outcome is for.
    pub fn stop_code(&self) -> &StopCode {
        match self {
            FetchOutcome::Success(timetable) => &timetable.stop_code,
            FetchOutcome::Failure { stop, .. } => &stop.code,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    /// Convert into a `Result`, discarding the failed stop.
    #[cfg(test)]
    pub(crate) fn into_result(self) -> Result<StopTimetable, FetchError> {
        match self {
            FetchOutcome::Success(timetable) => Ok(timetable),
            FetchOutcome::Failure { error, .. } => Err(error),
        }
    }
}

/// Stream of [`FetchOutcome`]s in completion order.
///
/// Yields exactly one outcome per dispatched stop and then ends. The end of
/// the stream is the only completion signal. Order is whatever order the
/// fetches finish in; use [`TimetableStream::collect_sorted`] for a stable
/// order.
///
/// Dropping the stream before it ends cancels every fetch still in flight.
pub struct TimetableStream {
    rx: mpsc::Receiver<FetchOutcome>,
    coordinator: JoinHandle<()>,
    dispatched: usize,
}

impl TimetableStream {
    pub(super) fn new(
        rx: mpsc::Receiver<FetchOutcome>,
        coordinator: JoinHandle<()>,
        dispatched: usize,
    ) -> Self {
        Self {
            rx,
            coordinator,
            dispatched,
        }
    }

    /// Number of stops a fetch was dispatched for.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Drain the stream, keeping completion order.
    pub async fn collect_all(self) -> Vec<FetchOutcome> {
        self.collect().await
    }

    /// Drain the stream and order outcomes by stop code.
    ///
    /// The sort is stable, so several outcomes for one code keep their
    /// completion order.
    pub async fn collect_sorted(self) -> Vec<FetchOutcome> {
        let mut outcomes = self.collect_all().await;
        outcomes.sort_by(|a, b| a.stop_code().cmp(b.stop_code()));
        outcomes
    }
}

impl Stream for TimetableStream {
    type Item = FetchOutcome;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for TimetableStream {
    fn drop(&mut self) {
        // The coordinator owns the fetch tasks; aborting it aborts them too.
        self.coordinator.abort();
    }
}
