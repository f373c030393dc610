//! Stop lists, route lists and line lists.

use std::fmt::Write as _;

use crate::domain::{Stop, VehicleType};
use crate::i18n::{Language, vehicle_type_name};
use crate::routes::NamedLineRoutes;

use super::underlined;

/// Numbered stop list, one "`N. name (code)`" per line.
pub fn render_stop_list(stops: &[Stop]) -> String {
    let mut s = String::new();
    for (i, stop) in stops.iter().enumerate() {
        let _ = writeln!(s, "{}. {stop}", i + 1);
    }
    s
}

/// Routes of one line, each with its stops.
pub fn render_named_routes(line: &NamedLineRoutes, language: Language) -> String {
    let title = format!(
        "{} {}",
        vehicle_type_name(&line.line.vehicle_type, language),
        line.line.number
    );
    let mut s = underlined(&title, '=');

    for route in &line.routes {
        s.push('\n');
        s.push_str(&underlined(&route.name, '-'));
        s.push_str(&render_stop_list(&route.stops));
    }

    s
}

/// Line numbers grouped by vehicle type.
pub fn render_line_numbers(groups: &[(VehicleType, Vec<String>)], language: Language) -> String {
    let mut s = String::new();
    for (vehicle_type, numbers) in groups {
        let _ = writeln!(
            s,
            "* {}: {}",
            vehicle_type_name(vehicle_type, language),
            numbers.join(", ")
        );
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Line, StopCode};
    use crate::routes::NamedRoute;

    fn stop(code: &str, name: &str) -> Stop {
        Stop::new(StopCode::parse(code).unwrap(), name)
    }

    #[test]
    fn stop_list_is_numbered_from_one() {
        let stops = vec![stop("0001", "Central Station"), stop("0002", "Market")];
        assert_eq!(
            render_stop_list(&stops),
            "1. Central Station (0001)\n2. Market (0002)\n"
        );
    }

    #[test]
    fn empty_stop_list() {
        assert_eq!(render_stop_list(&[]), "");
    }

    #[test]
    fn route_list_layout() {
        let line = NamedLineRoutes {
            line: Line::new(VehicleType::Tram, "5"),
            routes: vec![NamedRoute {
                name: "Market - Airport".to_string(),
                stops: vec![stop("0002", "Market"), stop("0003", "Airport")],
            }],
        };

        assert_eq!(
            render_named_routes(&line, Language::English),
            "tram 5\n\
             ======\n\
             \n\
             Market - Airport\n\
             ----------------\n\
             1. Market (0002)\n\
             2. Airport (0003)\n"
        );
    }

    #[test]
    fn line_numbers_in_bulgarian() {
        let groups = vec![
            (VehicleType::Bus, vec!["94".to_string(), "280".to_string()]),
            (VehicleType::Metro, vec!["M1".to_string()]),
        ];
        assert_eq!(
            render_line_numbers(&groups, Language::Bulgarian),
            "* автобус: 94, 280\n* метро: M1\n"
        );
    }
}
