//! Conversion from upstream DTOs to domain types.

use tracing::debug;

use crate::domain::{Arrival, LineArrivals, Stop, StopCode, StopTimetable};

use super::types::{ArrivalsResponse, StopDto};

/// Convert an arrivals response into a [`StopTimetable`].
///
/// The timetable always carries `requested`, the code the board was fetched
/// for. A different code in the response is only logged.
pub fn convert_arrivals(response: ArrivalsResponse, requested: &StopCode) -> StopTimetable {
    let upstream_code = response.code.as_deref().unwrap_or_default();
    if !upstream_code.is_empty() && upstream_code != requested.as_str() {
        debug!(
            requested = %requested,
            upstream = upstream_code,
            "Arrivals board reports a different stop code"
        );
    }

    let lines = response
        .lines
        .unwrap_or_default()
        .into_iter()
        .map(|line| LineArrivals {
            vehicle_type: line.vehicle_type,
            line_number: line.name,
            arrivals: line
                .arrivals
                .unwrap_or_default()
                .into_iter()
                .map(|a| Arrival {
                    time: a.time,
                    has_air_conditioning: a.has_air_conditioning,
                    is_wheelchair_accessible: a.is_wheelchair_accessible,
                })
                .collect(),
        })
        .collect();

    StopTimetable {
        stop_code: requested.clone(),
        stop_name: response.name.unwrap_or_default(),
        generation_time: response.timestamp_calculated.unwrap_or_default(),
        lines,
    }
}

/// Convert the stop list, dropping entries with unusable codes.
pub fn convert_stops(stops: Vec<StopDto>) -> Vec<Stop> {
    stops
        .into_iter()
        .filter_map(|s| match StopCode::parse(s.code.trim()) {
            Ok(code) => Some(Stop::new(code, s.name)),
            Err(e) => {
                debug!(error = %e, "Skipping stop with invalid code");
                None
            }
        })
        .collect()
}
