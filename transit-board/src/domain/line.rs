//! Transit line identity.

use std::fmt;

use super::VehicleType;

/// A transit line: a vehicle type paired with a line number.
///
/// Line numbers are only unique per vehicle type (there is both a bus 1 and a
/// tram 1), so both parts are needed to identify a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Line {
    pub vehicle_type: VehicleType,
    pub number: String,
}

impl Line {
    pub fn new(vehicle_type: VehicleType, number: impl Into<String>) -> Self {
        Self {
            vehicle_type,
            number: number.into(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vehicle_type, self.number)
    }
}
