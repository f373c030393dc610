//! Timetable fetcher backed by the arrivals API.

use async_trait::async_trait;

use crate::api::{ApiClient, FetchError, convert_arrivals};
use crate::domain::StopTimetable;

use super::{TimetableFetcher, TimetableQuery};

/// Fetches timetables from the real-time arrivals API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: ApiClient,
}

impl HttpFetcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TimetableFetcher for HttpFetcher {
    async fn fetch(&self, query: &TimetableQuery) -> Result<StopTimetable, FetchError> {
        let response = self
            .client
            .fetch_arrivals(
                &query.stop_code,
                query.vehicle_type.as_ref(),
                query.line_number.as_deref(),
            )
            .await?;

        Ok(convert_arrivals(response, &query.stop_code))
    }
}
