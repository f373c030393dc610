//! Fixture-backed fetcher for working without network access.
//!
//! Loads arrivals boards from JSON files and serves them as if they were live
//! API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ArrivalsResponse, FetchError, convert_arrivals};
use crate::domain::{StopCode, StopTimetable};

use super::{TimetableFetcher, TimetableQuery};

/// Fetcher that serves arrivals boards from a directory of JSON files.
///
/// Filters in the query are ignored; fixture data is static.
#[derive(Debug, Clone)]
pub struct FixtureFetcher {
    /// Pre-loaded boards, keyed by stop code.
    boards: Arc<HashMap<StopCode, ArrivalsResponse>>,
}

impl FixtureFetcher {
    /// Load every `{code}.json` file in a directory.
    ///
    /// Files whose stem isn't a valid stop code are skipped. A file that can't
    /// be parsed is an error, as is a directory with no boards at all.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let data_dir = data_dir.as_ref();
        let mut boards = HashMap::new();

        for entry in std::fs::read_dir(data_dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // "0012.json" -> "0012"
            let Some(code) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| StopCode::parse(s).ok())
            else {
                continue;
            };

            let json = std::fs::read_to_string(&path)?;
            let board: ArrivalsResponse =
                serde_json::from_str(&json).map_err(|e| FetchError::json(e, &json))?;

            boards.insert(code, board);
        }

        if boards.is_empty() {
            return Err(FetchError::NotFound(format!(
                "no fixture boards in {}",
                data_dir.display()
            )));
        }

        Ok(Self::from_boards(boards))
    }

    /// Create a fetcher from boards already in memory.
    pub fn from_boards(boards: HashMap<StopCode, ArrivalsResponse>) -> Self {
        Self {
            boards: Arc::new(boards),
        }
    }

    /// Stop codes with a fixture board.
    pub fn available_stops(&self) -> Vec<StopCode> {
        let mut codes: Vec<StopCode> = self.boards.keys().cloned().collect();
        codes.sort();
        codes
    }
}

#[async_trait]
impl TimetableFetcher for FixtureFetcher {
    async fn fetch(&self, query: &TimetableQuery) -> Result<StopTimetable, FetchError> {
        let board = self
            .boards
            .get(&query.stop_code)
            .ok_or_else(|| FetchError::NotFound(format!("no fixture for stop {}", query.stop_code)))?;

        Ok(convert_arrivals(board.clone(), &query.stop_code))
    }
}
