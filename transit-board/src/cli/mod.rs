//! The `transit-board` command-line tool.
//!
//! Arguments are parsed and validated into explicit values up front
//! ([`TimetablePlan`], [`ApiConfig`], [`DisplayOptions`](crate::render::DisplayOptions));
//! nothing touches the network until they are known to be good.

mod args;
mod error;
mod run;

use crate::api::ApiConfig;
use crate::domain::{StopCode, VehicleType};
use crate::fetch::LineFilter;
use crate::i18n::parse_vehicle_type;

pub use args::{Cli, Command, RoutesArgs, StopListArgs, TimetablesArgs};
pub use error::{CliError, ConfigError};
pub use run::{run, write_routes, write_timetables};

/// Overrides the arrivals API base URL.
pub const ARRIVALS_URL_VAR: &str = "TRANSIT_ARRIVALS_URL";

/// Overrides the resources base URL.
pub const RESOURCES_URL_VAR: &str = "TRANSIT_RESOURCES_URL";

/// Split a comma-separated list.
///
/// Items are trimmed, empty items dropped, and an item equal to the one before
/// it is dropped too.
pub fn parse_list(list: &str) -> Vec<String> {
    let mut items: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    items.dedup();
    items
}

fn parse_optional_list(list: Option<&str>) -> Vec<String> {
    list.map(parse_list).unwrap_or_default()
}

/// Parse a comma-separated list of vehicle types in any supported language.
pub fn parse_vehicle_types(list: Option<&str>) -> Result<Vec<VehicleType>, ConfigError> {
    parse_optional_list(list)
        .into_iter()
        .map(|name| parse_vehicle_type(&name).ok_or(ConfigError::UnknownVehicleType(name)))
        .collect()
}

/// Every combination of vehicle type and line number.
///
/// An empty list leaves that part of the filter open, so two empty lists give
/// a single filter that matches everything.
pub fn line_filters(vehicle_types: &[VehicleType], line_numbers: &[String]) -> Vec<LineFilter> {
    let types: Vec<Option<VehicleType>> = if vehicle_types.is_empty() {
        vec![None]
    } else {
        vehicle_types.iter().cloned().map(Some).collect()
    };
    let numbers: Vec<Option<String>> = if line_numbers.is_empty() {
        vec![None]
    } else {
        line_numbers.iter().cloned().map(Some).collect()
    };

    types
        .iter()
        .flat_map(|vt| {
            numbers
                .iter()
                .map(move |n| LineFilter::new(vt.clone(), n.clone()))
        })
        .collect()
}

/// What a `timetables` invocation will fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetablePlan {
    /// Stop-name patterns, each aggregated separately.
    pub patterns: Vec<String>,
    /// Stops given by code, aggregated as one extra batch.
    pub stop_codes: Vec<StopCode>,
    /// Line filters applied to every pattern and to the code batch.
    pub filters: Vec<LineFilter>,
    /// Match names exactly.
    pub exact: bool,
}

impl TimetablePlan {
    /// Validate `timetables` arguments.
    ///
    /// With neither names nor codes, the plan covers every stop through the
    /// empty pattern.
    pub fn from_args(args: &TimetablesArgs) -> Result<Self, ConfigError> {
        let vehicle_types = parse_vehicle_types(args.vehicle_types.as_deref())?;
        let line_numbers = parse_optional_list(args.line_numbers.as_deref());
        let stop_codes = parse_optional_list(args.stop_codes.as_deref())
            .iter()
            .map(|code| StopCode::parse(code))
            .collect::<Result<Vec<_>, _>>()?;

        let mut patterns = args.stop_names.clone();
        if patterns.is_empty() && stop_codes.is_empty() {
            patterns.push(String::new());
        }

        Ok(Self {
            patterns,
            stop_codes,
            filters: line_filters(&vehicle_types, &line_numbers),
            exact: args.exact,
        })
    }
}

/// Build the API configuration from environment overrides.
pub fn api_config_from_env_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ApiConfig, ConfigError> {
    let mut config = ApiConfig::new();

    if let Some(url) = lookup(ARRIVALS_URL_VAR).filter(|u| !u.is_empty()) {
        validate_base_url(ARRIVALS_URL_VAR, &url)?;
        config = config.with_arrivals_base_url(url);
    }
    if let Some(url) = lookup(RESOURCES_URL_VAR).filter(|u| !u.is_empty()) {
        validate_base_url(RESOURCES_URL_VAR, &url)?;
        config = config.with_resources_base_url(url);
    }

    Ok(config)
}

fn validate_base_url(variable: &'static str, url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        variable,
        url: url.to_string(),
        reason,
    };

    let parsed = reqwest::Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn list_items_are_trimmed_and_deduplicated_in_a_row() {
        assert_eq!(parse_list(" 94, 94 ,280,,94"), ["94", "280", "94"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn vehicle_types_in_either_language() {
        let types = parse_vehicle_types(Some("bus, трамвай,Trolleybus")).unwrap();
        assert_eq!(
            types,
            [VehicleType::Bus, VehicleType::Tram, VehicleType::Trolleybus]
        );
        assert!(parse_vehicle_types(None).unwrap().is_empty());
    }

    #[test]
    fn unknown_vehicle_type_is_rejected() {
        let err = parse_vehicle_types(Some("bus,ferry")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownVehicleType(name) if name == "ferry"));
    }

    #[test]
    fn filters_are_the_product_of_types_and_lines() {
        let filters = line_filters(
            &[VehicleType::Bus, VehicleType::Tram],
            &["1".to_string(), "5".to_string()],
        );
        assert_eq!(filters.len(), 4);
        assert_eq!(
            filters[1],
            LineFilter::new(Some(VehicleType::Bus), Some("5".into()))
        );
    }

    #[test]
    fn open_filters() {
        assert_eq!(line_filters(&[], &[]), [LineFilter::any()]);
        assert_eq!(
            line_filters(&[], &["94".to_string()]),
            [LineFilter::new(None, Some("94".into()))]
        );
    }

    #[test]
    fn plan_without_names_or_codes_covers_all_stops() {
        let plan = TimetablePlan::from_args(&TimetablesArgs::default()).unwrap();
        assert_eq!(plan.patterns, [""]);
        assert!(plan.stop_codes.is_empty());
        assert_eq!(plan.filters, [LineFilter::any()]);
    }

    #[test]
    fn plan_with_only_codes_has_no_patterns() {
        let args = TimetablesArgs {
            stop_codes: Some("0012, 2193".into()),
            ..Default::default()
        };
        let plan = TimetablePlan::from_args(&args).unwrap();
        assert!(plan.patterns.is_empty());
        assert_eq!(plan.stop_codes.len(), 2);
    }

    #[test]
    fn plan_rejects_malformed_codes() {
        let args = TimetablesArgs {
            stop_codes: Some("0012,12/3".into()),
            ..Default::default()
        };
        assert!(matches!(
            TimetablePlan::from_args(&args),
            Err(ConfigError::InvalidStopCode(_))
        ));
    }

    #[test]
    fn api_config_defaults_without_overrides() {
        let config = api_config_from_env_lookup(|_| None).unwrap();
        assert_eq!(config.arrivals_base_url, crate::api::DEFAULT_ARRIVALS_BASE_URL);
    }

    #[test]
    fn api_config_overrides() {
        let env = HashMap::from([
            (ARRIVALS_URL_VAR, "http://127.0.0.1:8080"),
            (RESOURCES_URL_VAR, ""),
        ]);
        let config =
            api_config_from_env_lookup(|var| env.get(var).map(|v| v.to_string())).unwrap();

        assert_eq!(config.arrivals_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.resources_base_url, crate::api::DEFAULT_RESOURCES_BASE_URL);
    }

    #[test]
    fn api_config_rejects_bad_urls() {
        for bad in ["not a url", "ftp://example.com"] {
            let err = api_config_from_env_lookup(|var| {
                (var == RESOURCES_URL_VAR).then(|| bad.to_string())
            })
            .unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidBaseUrl { variable: RESOURCES_URL_VAR, .. }
            ));
        }
    }
}
