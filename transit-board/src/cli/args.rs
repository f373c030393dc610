//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::i18n::Language;

/// Real-time arrivals, stops and routes of Sofia's public transit.
#[derive(Debug, Parser)]
#[command(name = "transit-board", version)]
pub struct Cli {
    /// Language of the report (en or bg). Defaults to the locale.
    #[arg(long, global = true)]
    pub lang: Option<Language>,

    /// Maximum number of stops fetched at once. Unlimited by default.
    #[arg(long, global = true, value_name = "N")]
    pub max_concurrent: Option<usize>,

    /// Serve arrival boards from a directory of `<stop code>.json` files.
    #[arg(long, global = true, hide = true, value_name = "DIR")]
    pub fixtures: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the virtual arrival boards of matching stops
    Timetables(TimetablesArgs),
    /// List all stops
    Stops(StopListArgs),
    /// List line numbers by vehicle type
    Lines,
    /// Show the routes of matching lines
    Routes(RoutesArgs),
}

/// Options shared by every subcommand that loads the stop list.
#[derive(Debug, Clone, Default, Args)]
pub struct StopListArgs {
    /// Order stops by code
    #[arg(long)]
    pub sort_stops: bool,

    /// Use stop names in the report language instead of Bulgarian
    #[arg(long)]
    pub translate_stop_names: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct TimetablesArgs {
    /// Stop names (or parts of names) to look up. All stops when omitted.
    #[arg(value_name = "STOP_NAME")]
    pub stop_names: Vec<String>,

    /// Comma-separated line numbers
    #[arg(short = 'l', long = "lines", value_name = "LINES")]
    pub line_numbers: Option<String>,

    /// Comma-separated vehicle types (bus, trolleybus, tram, metro)
    #[arg(short = 't', long = "types", value_name = "TYPES")]
    pub vehicle_types: Option<String>,

    /// Comma-separated stop codes
    #[arg(short = 's', long = "stop-codes", value_name = "CODES")]
    pub stop_codes: Option<String>,

    /// Match stop names exactly instead of by substring
    #[arg(long)]
    pub exact: bool,

    /// Show when each board was generated
    #[arg(long)]
    pub show_time: bool,

    /// Show the time left until each arrival
    #[arg(long)]
    pub remaining_time: bool,

    /// Mark air conditioning and wheelchair accessibility
    #[arg(long)]
    pub show_facilities: bool,

    #[command(flatten)]
    pub stop_list: StopListArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RoutesArgs {
    /// Comma-separated line numbers
    #[arg(short = 'l', long = "lines", value_name = "LINES")]
    pub line_numbers: Option<String>,

    /// Comma-separated vehicle types (bus, trolleybus, tram, metro)
    #[arg(short = 't', long = "types", value_name = "TYPES")]
    pub vehicle_types: Option<String>,

    #[command(flatten)]
    pub stop_list: StopListArgs,
}
