//! Single-stop timetable fetching.
//!
//! [`TimetableFetcher`] is the seam between the aggregation engine and the
//! network: one call, one stop, one round-trip. Implementations must not share
//! mutable state between calls since the engine runs many of them at once.

mod fixture;
mod http;
mod memo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::FetchError;
use crate::domain::{StopCode, StopTimetable, VehicleType};

pub use fixture::FixtureFetcher;
pub use http::HttpFetcher;
pub use memo::{MemoConfig, MemoizedFetcher};

/// Optional server-side filters applied to every stop of an aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LineFilter {
    /// Only arrivals of this vehicle type.
    pub vehicle_type: Option<VehicleType>,
    /// Only arrivals of this line number.
    pub line_number: Option<String>,
}

impl LineFilter {
    /// A filter that lets everything through.
    #[cfg(test)]
    pub(crate) fn any() -> Self {
        Self::default()
    }

    /// Create a filter. Empty line numbers are treated as absent.
    pub fn new(vehicle_type: Option<VehicleType>, line_number: Option<String>) -> Self {
        Self {
            vehicle_type,
            line_number: line_number.filter(|n| !n.is_empty()),
        }
    }

    /// Build the query for one stop.
    pub fn query_for(&self, stop_code: StopCode) -> TimetableQuery {
        TimetableQuery {
            stop_code,
            vehicle_type: self.vehicle_type.clone(),
            line_number: self.line_number.clone(),
        }
    }
}

/// Request for one stop's timetable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimetableQuery {
    pub stop_code: StopCode,
    pub vehicle_type: Option<VehicleType>,
    pub line_number: Option<String>,
}

impl TimetableQuery {
    /// A query for every line at a stop.
    #[cfg(test)]
    pub(crate) fn stop(stop_code: StopCode) -> Self {
        LineFilter::any().query_for(stop_code)
    }
}

/// Fetches the timetable of a single stop.
///
/// Filters in the query are hints for the server; implementations return the
/// decoded timetable as-is, without filtering it locally. A timetable with no
/// lines is a successful result.
#[async_trait]
pub trait TimetableFetcher: Send + Sync {
    async fn fetch(&self, query: &TimetableQuery) -> Result<StopTimetable, FetchError>;
}

#[async_trait]
impl<F: TimetableFetcher + ?Sized> TimetableFetcher for Arc<F> {
    async fn fetch(&self, query: &TimetableQuery) -> Result<StopTimetable, FetchError> {
        (**self).fetch(query).await
    }
}
