//! Upstream API response DTOs.
//!
//! These types map directly to the JSON served by the arrivals API and the
//! static resources host. Most fields are `Option` because upstream omits or
//! nulls them rather than sending empty values.

use serde::{Deserialize, Serialize};

use crate::domain::VehicleType;

/// One entry of `stops-{bg,en}.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopDto {
    /// Stop code.
    #[serde(rename = "c")]
    pub code: String,

    /// Stop name, in the language of the file.
    #[serde(rename = "n")]
    pub name: String,
}

/// Response from `/api/v1/arrivals/{code}/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArrivalsResponse {
    /// Code of the stop.
    pub code: Option<String>,

    /// Name of the stop (Bulgarian, possibly empty).
    pub name: Option<String>,

    /// When the board was calculated.
    pub timestamp_calculated: Option<String>,

    /// Lines with upcoming arrivals.
    pub lines: Option<Vec<LineArrivalsDto>>,
}

/// Upcoming arrivals of one line.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineArrivalsDto {
    /// Vehicle type wire name ("bus", "trolley", "tram", ...).
    pub vehicle_type: VehicleType,

    /// Line number.
    pub name: String,

    /// Upcoming arrivals.
    pub arrivals: Option<Vec<ArrivalDto>>,
}

/// A single upcoming arrival.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArrivalDto {
    /// Estimated arrival time ("HH:MM:SS").
    pub time: String,

    #[serde(default)]
    pub has_air_conditioning: bool,

    #[serde(default)]
    pub is_wheelchair_accessible: bool,
}

/// One entry of `routes.json`: every line of a vehicle type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehicleRoutesDto {
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,

    pub lines: Vec<LineRoutesDto>,
}

/// The routes (normally one per direction) of one line.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineRoutesDto {
    /// Line number.
    pub name: String,

    pub routes: Vec<RouteDto>,
}

/// The ordered stop codes of one route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteDto {
    pub codes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_arrivals_response() {
        let json = r#"{
            "code": "0012",
            "name": "ЦЕНТРАЛНА ГАРА",
            "timestamp_calculated": "2024-03-15 10:00:00",
            "lines": [
                {
                    "vehicle_type": "trolley",
                    "name": "5",
                    "arrivals": [
                        {"time": "10:04:00", "has_air_conditioning": true, "is_wheelchair_accessible": false}
                    ]
                }
            ]
        }"#;

        let resp: ArrivalsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.code.as_deref(), Some("0012"));
        let lines = resp.lines.unwrap();
        assert_eq!(lines[0].vehicle_type, VehicleType::Trolleybus);
        let arrivals = lines[0].arrivals.as_ref().unwrap();
        assert!(arrivals[0].has_air_conditioning);
        assert!(!arrivals[0].is_wheelchair_accessible);
    }

    #[test]
    fn decode_arrivals_with_null_lines() {
        let json = r#"{"code": "0012", "name": "", "timestamp_calculated": null, "lines": null}"#;
        let resp: ArrivalsResponse = serde_json::from_str(json).unwrap();
        assert!(resp.lines.is_none());
        assert!(resp.timestamp_calculated.is_none());
    }

    #[test]
    fn decode_stop_list() {
        let json = r#"[{"c": "0012", "n": "CENTRAL STATION"}, {"c": "0013", "n": "WEST END"}]"#;
        let stops: Vec<StopDto> = serde_json::from_str(json).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[1].name, "WEST END");
    }

    #[test]
    fn decode_route_list() {
        let json = r#"[{"type": "tram", "lines": [{"name": "5", "routes": [{"codes": ["1", "2"]}, {"codes": ["2", "1"]}]}]}]"#;
        let routes: Vec<VehicleRoutesDto> = serde_json::from_str(json).unwrap();
        assert_eq!(routes[0].vehicle_type, VehicleType::Tram);
        assert_eq!(routes[0].lines[0].routes.len(), 2);
    }
}
