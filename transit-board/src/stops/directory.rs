//! Stop directory: the list of every known stop.

use std::collections::HashMap;

use crate::api::{ApiClient, FetchError, convert_stops};
use crate::domain::{Stop, StopCode};
use crate::i18n::Language;

/// The full list of known stops, in upstream order unless sorted.
///
/// Loaded once per invocation; there is no refresh. Codes are assumed to be
/// unique. If upstream repeats a code, lookups by code find the first entry.
#[derive(Debug, Clone, Default)]
pub struct StopDirectory {
    stops: Vec<Stop>,
    by_code: HashMap<StopCode, usize>,
}

impl StopDirectory {
    /// Build a directory from a list of stops.
    pub fn new(stops: Vec<Stop>) -> Self {
        let by_code = build_index(&stops);
        Self { stops, by_code }
    }

    /// Fetch the stop list with names in the given language.
    ///
    /// This will fail if the resources host is unreachable or the list is
    /// malformed; there is no fallback.
    pub async fn load(client: &ApiClient, language: Language) -> Result<Self, FetchError> {
        let stops = client.fetch_stops(language).await?;
        Ok(Self::new(convert_stops(stops)))
    }

    /// Stops whose name matches `pattern`.
    ///
    /// With `exact`, the name must equal the pattern (case-sensitive).
    /// Otherwise both sides are upper-cased and the name must contain the
    /// pattern, so the empty pattern matches every stop. No match is an empty
    /// list, not an error.
    pub fn match_by_name(&self, pattern: &str, exact: bool) -> Vec<Stop> {
        if exact {
            return self
                .stops
                .iter()
                .filter(|s| s.name == pattern)
                .cloned()
                .collect();
        }

        let pattern = pattern.to_uppercase();
        self.stops
            .iter()
            .filter(|s| s.name.to_uppercase().contains(&pattern))
            .cloned()
            .collect()
    }

    /// Sort stops by code, ordinally ("10" sorts before "9").
    ///
    /// The sort is stable, so stops sharing a code keep their relative order.
    pub fn sort_by_code(&mut self) {
        self.stops.sort_by(|a, b| a.code.cmp(&b.code));
        self.by_code = build_index(&self.stops);
    }

    /// Look up a stop by code.
    pub fn get(&self, code: &StopCode) -> Option<&Stop> {
        self.by_code.get(code).map(|&i| &self.stops[i])
    }

    /// All stops, in directory order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Get the number of stops in the directory.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Build the code → position index, keeping the first occurrence of a code.
fn build_index(stops: &[Stop]) -> HashMap<StopCode, usize> {
    let mut index = HashMap::with_capacity(stops.len());
    for (i, stop) in stops.iter().enumerate() {
        index.entry(stop.code.clone()).or_insert(i);
    }
    index
}
