//! Subcommand execution.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveTime};
use tracing::{debug, warn};

use crate::aggregate::{AggregationEngine, EngineConfig};
use crate::api::{ApiClient, ApiConfig};
use crate::domain::Stop;
use crate::fetch::{
    FixtureFetcher, HttpFetcher, LineFilter, MemoConfig, MemoizedFetcher, TimetableFetcher,
};
use crate::i18n::Language;
use crate::render::{
    DisplayOptions, ReportSummary, render_line_numbers, render_named_routes, render_stop_list,
    render_stream,
};
use crate::routes::RouteCatalog;
use crate::stops::StopDirectory;

use super::args::{Cli, Command, RoutesArgs, StopListArgs, TimetablesArgs};
use super::error::{CliError, ConfigError};
use super::{TimetablePlan, line_filters, parse_list, parse_vehicle_types};

/// Run one invocation, writing the report to `out`.
pub async fn run(cli: Cli, api: ApiConfig, out: &mut impl Write) -> Result<(), CliError> {
    let language = cli.lang.unwrap_or_else(Language::detect);
    if cli.max_concurrent == Some(0) {
        return Err(ConfigError::ZeroConcurrency.into());
    }
    debug!(%language, "Starting");

    let client = ApiClient::new(api).map_err(CliError::Client)?;

    match cli.command {
        Command::Timetables(args) => {
            timetables(
                &client,
                &args,
                language,
                cli.max_concurrent,
                cli.fixtures.as_deref(),
                out,
            )
            .await
        }
        Command::Stops(args) => {
            let directory = load_directory(&client, language, &args).await?;
            out.write_all(render_stop_list(directory.stops()).as_bytes())?;
            Ok(())
        }
        Command::Lines => {
            let catalog = RouteCatalog::load(&client)
                .await
                .map_err(CliError::load("route list"))?;
            let groups = catalog.numbers_by_vehicle_type();
            out.write_all(render_line_numbers(&groups, language).as_bytes())?;
            Ok(())
        }
        Command::Routes(args) => routes(&client, &args, language, out).await,
    }
}

async fn timetables(
    client: &ApiClient,
    args: &TimetablesArgs,
    language: Language,
    max_concurrent: Option<usize>,
    fixtures: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let plan = TimetablePlan::from_args(args)?;
    let fetcher = build_fetcher(client, fixtures)?;
    let directory = load_directory(client, language, &args.stop_list).await?;

    let mut config =
        EngineConfig::default().with_override_stop_names(args.stop_list.translate_stop_names);
    if let Some(n) = max_concurrent {
        config = config.with_max_in_flight(n);
    }
    let engine = AggregationEngine::new(Arc::new(directory), fetcher, config);

    let options = DisplayOptions {
        language,
        show_generation_time: args.show_time,
        show_remaining_time: args.remaining_time,
        show_facilities: args.show_facilities,
    };

    let summary = write_timetables(
        &engine,
        &plan,
        &options,
        args.stop_list.sort_stops,
        Local::now().time(),
        out,
    )
    .await?;
    debug!(
        rendered = summary.rendered,
        empty = summary.empty,
        failed = summary.failed,
        "Timetables done"
    );
    Ok(())
}

/// Aggregate and render every batch of a plan.
///
/// Stops given by code come first, then each name pattern, each under every
/// line filter of the plan. Codes missing from the directory are still
/// fetched, without a local name.
pub async fn write_timetables(
    engine: &AggregationEngine,
    plan: &TimetablePlan,
    options: &DisplayOptions,
    sorted: bool,
    now: NaiveTime,
    out: &mut impl Write,
) -> Result<ReportSummary, CliError> {
    let mut summary = ReportSummary::default();

    let by_code: Vec<Stop> = plan
        .stop_codes
        .iter()
        .map(|code| {
            engine
                .directory()
                .get(code)
                .cloned()
                .unwrap_or_else(|| Stop::unnamed(code.clone()))
        })
        .collect();

    if !by_code.is_empty() {
        for filter in &plan.filters {
            let stream = engine.aggregate_stops(by_code.clone(), filter);
            summary += render_stream(stream, options, now, sorted, out).await?;
        }
    }

    for pattern in &plan.patterns {
        for filter in &plan.filters {
            let stream = engine.aggregate(pattern, filter, plan.exact);
            summary += render_stream(stream, options, now, sorted, out).await?;
        }
    }

    Ok(summary)
}

async fn routes(
    client: &ApiClient,
    args: &RoutesArgs,
    language: Language,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let vehicle_types = parse_vehicle_types(args.vehicle_types.as_deref())?;
    let line_numbers = args
        .line_numbers
        .as_deref()
        .map(parse_list)
        .unwrap_or_default();
    let filters = line_filters(&vehicle_types, &line_numbers);

    let directory = load_directory(client, language, &args.stop_list).await?;
    let catalog = RouteCatalog::load(client)
        .await
        .map_err(CliError::load("route list"))?;

    write_routes(&catalog, &directory, &filters, language, out)
}

/// Render the routes of every line matching any of `filters`.
///
/// Filters that match no line, and lines whose routes can't be resolved
/// against the directory, are logged and skipped.
pub fn write_routes(
    catalog: &RouteCatalog,
    directory: &StopDirectory,
    filters: &[LineFilter],
    language: Language,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for filter in filters {
        let matching = catalog.matching(filter.vehicle_type.as_ref(), filter.line_number.as_deref());
        if matching.is_empty() {
            warn!(
                vehicle_type = ?filter.vehicle_type,
                line = ?filter.line_number,
                "No matching line in the route list"
            );
            continue;
        }

        for line_routes in matching {
            match line_routes.named(directory) {
                Ok(named) => {
                    out.write_all(render_named_routes(&named, language).as_bytes())?;
                    writeln!(out)?;
                }
                Err(e) => warn!(line = %line_routes.line, error = %e, "Skipping line"),
            }
        }
    }
    Ok(())
}

/// Load the stop list in the language stop names should appear in.
///
/// Stop names are Bulgarian unless translation was asked for and the report
/// is in English.
async fn load_directory(
    client: &ApiClient,
    language: Language,
    args: &StopListArgs,
) -> Result<StopDirectory, CliError> {
    let names_in = if args.translate_stop_names && language == Language::English {
        Language::English
    } else {
        Language::Bulgarian
    };

    let mut directory = StopDirectory::load(client, names_in)
        .await
        .map_err(CliError::load("stop list"))?;
    if args.sort_stops {
        directory.sort_by_code();
    }

    debug!(stops = directory.len(), language = %names_in, "Loaded stop list");
    Ok(directory)
}

fn build_fetcher(
    client: &ApiClient,
    fixtures: Option<&Path>,
) -> Result<Arc<dyn TimetableFetcher>, CliError> {
    let inner: Arc<dyn TimetableFetcher> = match fixtures {
        Some(dir) => {
            let fetcher = FixtureFetcher::load(dir).map_err(CliError::load("fixtures"))?;
            debug!(dir = %dir.display(), stops = fetcher.available_stops().len(), "Serving arrivals from fixtures");
            Arc::new(fetcher)
        }
        None => Arc::new(HttpFetcher::new(client.clone())),
    };

    Ok(Arc::new(MemoizedFetcher::new(inner, &MemoConfig::default())))
}
