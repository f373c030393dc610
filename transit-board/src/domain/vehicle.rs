//! Vehicle types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type of vehicle serving a line.
///
/// The upstream APIs identify vehicle types by short wire names. Names this
/// crate doesn't know are kept verbatim in [`VehicleType::Other`] so they can
/// still be displayed and sent back as filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleType {
    Bus,
    Trolleybus,
    Tram,
    Metro,
    Other(String),
}

impl VehicleType {
    /// The known vehicle types, in display order.
    pub const KNOWN: [VehicleType; 4] = [
        VehicleType::Bus,
        VehicleType::Trolleybus,
        VehicleType::Tram,
        VehicleType::Metro,
    ];

    /// Decode a vehicle type from its upstream wire name.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "bus" => VehicleType::Bus,
            "trolley" => VehicleType::Trolleybus,
            "tram" => VehicleType::Tram,
            "metro" => VehicleType::Metro,
            other => VehicleType::Other(other.to_string()),
        }
    }

    /// The upstream wire name, as sent in the `type` query parameter.
    pub fn as_wire(&self) -> &str {
        match self {
            VehicleType::Bus => "bus",
            VehicleType::Trolleybus => "trolley",
            VehicleType::Tram => "tram",
            VehicleType::Metro => "metro",
            VehicleType::Other(name) => name,
        }
    }
}

impl From<String> for VehicleType {
    fn from(s: String) -> Self {
        VehicleType::from_wire(&s)
    }
}

impl From<VehicleType> for String {
    fn from(vt: VehicleType) -> Self {
        vt.as_wire().to_string()
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}
