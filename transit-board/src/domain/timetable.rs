//! Real-time timetable types.
//!
//! A [`StopTimetable`] is built by decoding one upstream arrivals response.
//! After construction the only field that may change is the stop name, which
//! can be replaced by the locally known (possibly translated) name.

use super::{StopCode, VehicleType};

/// One expected arrival of a vehicle at a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    /// Estimated time of arrival, as sent upstream (normally "HH:MM:SS").
    pub time: String,
    pub has_air_conditioning: bool,
    pub is_wheelchair_accessible: bool,
}

/// Expected arrivals of one line at one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineArrivals {
    pub vehicle_type: VehicleType,
    pub line_number: String,
    pub arrivals: Vec<Arrival>,
}

/// All expected arrivals at one stop, grouped by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTimetable {
    pub stop_code: StopCode,
    pub stop_name: String,
    /// When the upstream service calculated this timetable.
    pub generation_time: String,
    pub lines: Vec<LineArrivals>,
}

impl StopTimetable {
    /// Whether there are no lines in this timetable.
    ///
    /// Empty timetables are valid results; the report just doesn't show them.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Replace the stop name with a locally known one.
    ///
    /// An empty local name leaves the upstream name in place.
    pub fn override_stop_name(&mut self, name: &str) {
        if !name.is_empty() {
            self.stop_name = name.to_string();
        }
    }
}
