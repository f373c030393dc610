//! Concurrent multi-stop timetable aggregation.
//!
//! Given a stop-name pattern and line filters, the engine resolves matching
//! stops through the [`StopDirectory`](crate::stops::StopDirectory), fetches
//! every stop's timetable concurrently, and delivers the outcomes on a
//! [`TimetableStream`] as they complete. Failures are outcomes like any other.

mod engine;
mod stream;


pub use engine::{AggregationEngine, EngineConfig};
pub use stream::{FetchOutcome, TimetableStream};
