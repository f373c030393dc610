//! Route catalog: the stop sequences served by every line.

use tracing::debug;

use crate::api::{ApiClient, FetchError, VehicleRoutesDto};
use crate::domain::{Line, Stop, StopCode, VehicleType};
use crate::stops::StopDirectory;

/// Errors from resolving routes against the stop directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A route needs a first and a last stop to be named
    #[error("route should have at least two stops")]
    TooFewStops,

    /// A route refers to a stop the directory doesn't know
    #[error("could not find stop {0} in the stop list")]
    UnknownStop(StopCode),
}

/// The ordered stops of a line in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub stop_codes: Vec<StopCode>,
}

impl Route {
    /// Name of the route: "`<first stop> - <last stop>`".
    pub fn name(&self, directory: &StopDirectory) -> Result<String, RouteError> {
        let [first, .., last] = self.stop_codes.as_slice() else {
            return Err(RouteError::TooFewStops);
        };

        let first = lookup(directory, first)?;
        let last = lookup(directory, last)?;
        Ok(format!("{} - {}", first.name, last.name))
    }

    /// Resolve every stop of the route.
    pub fn stops(&self, directory: &StopDirectory) -> Result<Vec<Stop>, RouteError> {
        self.stop_codes
            .iter()
            .map(|code| lookup(directory, code).cloned())
            .collect()
    }
}

fn lookup<'a>(directory: &'a StopDirectory, code: &StopCode) -> Result<&'a Stop, RouteError> {
    directory
        .get(code)
        .ok_or_else(|| RouteError::UnknownStop(code.clone()))
}

/// All routes of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRoutes {
    pub line: Line,
    pub routes: Vec<Route>,
}

impl LineRoutes {
    /// Name every route and resolve its stops.
    pub fn named(&self, directory: &StopDirectory) -> Result<NamedLineRoutes, RouteError> {
        let routes = self
            .routes
            .iter()
            .map(|route| {
                Ok(NamedRoute {
                    name: route.name(directory)?,
                    stops: route.stops(directory)?,
                })
            })
            .collect::<Result<Vec<_>, RouteError>>()?;

        Ok(NamedLineRoutes {
            line: self.line.clone(),
            routes,
        })
    }
}

/// A route with a display name and resolved stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRoute {
    pub name: String,
    pub stops: Vec<Stop>,
}

/// A line with named routes, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLineRoutes {
    pub line: Line,
    pub routes: Vec<NamedRoute>,
}

/// Every line's routes, in upstream order.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    lines: Vec<LineRoutes>,
}

impl RouteCatalog {
    /// Fetch the route list.
    pub async fn load(client: &ApiClient) -> Result<Self, FetchError> {
        let dtos = client.fetch_routes().await?;
        Ok(Self::from_dtos(dtos))
    }

    /// Build the catalog from the upstream route list.
    ///
    /// Invalid stop codes inside a route are dropped.
    pub fn from_dtos(dtos: Vec<VehicleRoutesDto>) -> Self {
        let lines = dtos
            .into_iter()
            .flat_map(|vehicle| {
                let vehicle_type = vehicle.vehicle_type;
                vehicle.lines.into_iter().map(move |line| LineRoutes {
                    line: Line::new(vehicle_type.clone(), line.name),
                    routes: line
                        .routes
                        .into_iter()
                        .map(|route| Route {
                            stop_codes: route
                                .codes
                                .iter()
                                .filter_map(|c| match StopCode::parse(c) {
                                    Ok(code) => Some(code),
                                    Err(e) => {
                                        debug!(error = %e, "Skipping invalid stop code in route");
                                        None
                                    }
                                })
                                .collect(),
                        })
                        .collect(),
                })
            })
            .collect();

        Self { lines }
    }

    /// Lines matching optional vehicle-type and number filters.
    pub fn matching(
        &self,
        vehicle_type: Option<&VehicleType>,
        number: Option<&str>,
    ) -> Vec<&LineRoutes> {
        self.lines
            .iter()
            .filter(|l| vehicle_type.is_none_or(|vt| &l.line.vehicle_type == vt))
            .filter(|l| number.is_none_or(|n| l.line.number == n))
            .collect()
    }

    /// Line numbers grouped by vehicle type, in upstream order.
    pub fn numbers_by_vehicle_type(&self) -> Vec<(VehicleType, Vec<String>)> {
        let mut groups: Vec<(VehicleType, Vec<String>)> = Vec::new();
        for l in &self.lines {
            match groups.iter_mut().find(|(vt, _)| vt == &l.line.vehicle_type) {
                Some((_, numbers)) => numbers.push(l.line.number.clone()),
                None => groups.push((l.line.vehicle_type.clone(), vec![l.line.number.clone()])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES: &str = r#"[
        {"type": "bus", "lines": [
            {"name": "94", "routes": [{"codes": ["0001", "0002", "0003"]}, {"codes": ["0003", "0002", "0001"]}]},
            {"name": "1", "routes": [{"codes": ["0001", "bad code", "0004"]}]}
        ]},
        {"type": "tram", "lines": [
            {"name": "1", "routes": [{"codes": ["0002", "0004"]}]}
        ]}
    ]"#;

    fn catalog() -> RouteCatalog {
        RouteCatalog::from_dtos(serde_json::from_str(ROUTES).unwrap())
    }

    fn line<'a>(
        catalog: &'a RouteCatalog,
        vehicle_type: VehicleType,
        number: &str,
    ) -> &'a LineRoutes {
        let matching = catalog.matching(Some(&vehicle_type), Some(number));
        assert_eq!(matching.len(), 1, "expected exactly one {vehicle_type} {number}");
        matching[0]
    }

    fn directory() -> StopDirectory {
        StopDirectory::new(vec![
            Stop::new(StopCode::parse("0001").unwrap(), "Central Station"),
            Stop::new(StopCode::parse("0002").unwrap(), "Market"),
            Stop::new(StopCode::parse("0003").unwrap(), "Airport"),
        ])
    }

    #[test]
    fn builds_lines_from_dtos() {
        let catalog = catalog();
        assert_eq!(catalog.lines.len(), 3);

        let bus_1 = line(&catalog, VehicleType::Bus, "1");
        // The invalid code is dropped
        assert_eq!(bus_1.routes[0].stop_codes.len(), 2);
    }

    #[test]
    fn same_number_different_vehicle_types() {
        let catalog = catalog();
        let bus = line(&catalog, VehicleType::Bus, "1");
        let tram = line(&catalog, VehicleType::Tram, "1");
        assert_ne!(bus.routes, tram.routes);
        assert_eq!(catalog.matching(None, Some("1")).len(), 2);
    }

    #[test]
    fn unknown_line_matches_nothing() {
        let catalog = catalog();
        assert!(catalog.matching(Some(&VehicleType::Trolleybus), Some("1")).is_empty());
        assert!(catalog.matching(None, Some("404")).is_empty());
    }

    #[test]
    fn matching_without_filters_returns_all() {
        assert_eq!(catalog().matching(None, None).len(), 3);
        assert_eq!(catalog().matching(Some(&VehicleType::Bus), None).len(), 2);
    }

    #[test]
    fn named_routes_use_first_and_last_stop() {
        let catalog = catalog();
        let dir = directory();
        let named = line(&catalog, VehicleType::Bus, "94").named(&dir).unwrap();

        assert_eq!(named.routes.len(), 2);
        assert_eq!(named.routes[0].name, "Central Station - Airport");
        assert_eq!(named.routes[1].name, "Airport - Central Station");
        assert_eq!(named.routes[0].stops.len(), 3);
    }

    #[test]
    fn route_with_unknown_stop() {
        let catalog = catalog();
        let dir = directory();
        let err = line(&catalog, VehicleType::Tram, "1").named(&dir).unwrap_err();

        assert_eq!(err, RouteError::UnknownStop(StopCode::parse("0004").unwrap()));
    }

    #[test]
    fn route_with_too_few_stops() {
        let route = Route {
            stop_codes: vec![StopCode::parse("0001").unwrap()],
        };
        assert_eq!(route.name(&directory()), Err(RouteError::TooFewStops));

        let empty = Route { stop_codes: vec![] };
        assert_eq!(empty.name(&directory()), Err(RouteError::TooFewStops));
    }

    #[test]
    fn numbers_grouped_by_vehicle_type() {
        let groups = catalog().numbers_by_vehicle_type();
        assert_eq!(
            groups,
            vec![
                (VehicleType::Bus, vec!["94".to_string(), "1".to_string()]),
                (VehicleType::Tram, vec!["1".to_string()]),
            ]
        );
    }
}
