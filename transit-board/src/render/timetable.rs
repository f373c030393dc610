//! Timetable report rendering.

use std::fmt::Write as _;
use std::io;
use std::ops::AddAssign;

use chrono::{NaiveTime, TimeDelta, Timelike};
use futures::StreamExt;
use tracing::{debug, warn};

use crate::aggregate::{FetchOutcome, TimetableStream};
use crate::domain::{Arrival, StopTimetable};
use crate::i18n::{Term, vehicle_type_name};

use super::{DisplayOptions, underlined};

/// What happened to the outcomes of one report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Timetables written to the report.
    pub rendered: usize,
    /// Successful timetables skipped because they had no lines.
    pub empty: usize,
    /// Failed stops, logged and left out.
    pub failed: usize,
}

impl AddAssign for ReportSummary {
    fn add_assign(&mut self, other: ReportSummary) {
        self.rendered += other.rendered;
        self.empty += other.empty;
        self.failed += other.failed;
    }
}

/// Render one arrival.
///
/// `now` is only used when remaining time is shown.
pub fn render_arrival(arrival: &Arrival, options: &DisplayOptions, now: NaiveTime) -> String {
    let mut s = if options.show_remaining_time {
        match remaining_time(&arrival.time, now) {
            Some(remaining) => remaining,
            None => {
                warn!(time = %arrival.time, "Could not parse arrival time");
                arrival.time.clone()
            }
        }
    } else {
        arrival.time.clone()
    };

    if options.show_facilities {
        let lang = options.language;
        let _ = write!(
            s,
            " ({}{}, {}{})",
            marker(arrival.has_air_conditioning),
            Term::AirConditioningAbbreviation.text(lang),
            marker(arrival.is_wheelchair_accessible),
            Term::WheelchairAccessibilityAbbreviation.text(lang),
        );
    }

    s
}

fn marker(present: bool) -> char {
    if present { '+' } else { '-' }
}

/// Time left from `now` until an "HH:MM:SS" arrival, as "HH:MM:SS".
///
/// Seconds of the arrival are ignored. Arrivals are taken to be within twelve
/// hours of `now`, on whichever side of midnight that puts them. Arrivals
/// already due render with a leading minus sign.
fn remaining_time(time: &str, now: NaiveTime) -> Option<String> {
    let parsed = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .ok()?;
    let arrival = parsed.with_second(0)?;

    let mut delta = arrival.signed_duration_since(now);
    if delta < -TimeDelta::hours(12) {
        delta += TimeDelta::days(1);
    } else if delta > TimeDelta::hours(12) {
        delta -= TimeDelta::days(1);
    }

    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let total = delta.num_seconds().abs();
    Some(format!(
        "{sign}{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    ))
}

/// Render a full stop timetable.
pub fn render_timetable(timetable: &StopTimetable, options: &DisplayOptions, now: NaiveTime) -> String {
    let title = format!("{} ({})", timetable.stop_name, timetable.stop_code);
    let mut s = underlined(&title, '=');

    if options.show_generation_time {
        let _ = writeln!(
            s,
            "({}: {})",
            Term::GenerationTime.text(options.language),
            timetable.generation_time
        );
    }

    for line in &timetable.lines {
        let arrivals: Vec<String> = line
            .arrivals
            .iter()
            .map(|a| render_arrival(a, options, now))
            .collect();
        let _ = writeln!(
            s,
            "* {} {}: {}",
            vehicle_type_name(&line.vehicle_type, options.language),
            line.line_number,
            arrivals.join(", ")
        );
    }

    s
}

/// Render one outcome into `report`, logging failures.
fn render_outcome(
    outcome: FetchOutcome,
    options: &DisplayOptions,
    now: NaiveTime,
    report: &mut String,
) -> ReportSummary {
    match outcome {
        FetchOutcome::Failure { stop, error } => {
            warn!(
                stop = %stop.code,
                name = %stop.name,
                kind = ?error.kind(),
                error = %error,
                "Failed to fetch timetable"
            );
            ReportSummary {
                failed: 1,
                ..Default::default()
            }
        }
        FetchOutcome::Success(timetable) if timetable.is_empty() => ReportSummary {
            empty: 1,
            ..Default::default()
        },
        FetchOutcome::Success(timetable) => {
            report.push_str(&render_timetable(&timetable, options, now));
            report.push('\n');
            ReportSummary {
                rendered: 1,
                ..Default::default()
            }
        }
    }
}

/// Render already-collected outcomes, in the given order.
pub fn render_outcomes(
    outcomes: impl IntoIterator<Item = FetchOutcome>,
    options: &DisplayOptions,
    now: NaiveTime,
) -> (String, ReportSummary) {
    let mut report = String::new();
    let mut summary = ReportSummary::default();
    for outcome in outcomes {
        summary += render_outcome(outcome, options, now, &mut report);
    }
    (report, summary)
}

/// Drain a stream to exhaustion, writing each timetable as it arrives.
///
/// With `sorted`, the whole stream is collected first and written in stop-code
/// order instead.
pub async fn render_stream(
    stream: TimetableStream,
    options: &DisplayOptions,
    now: NaiveTime,
    sorted: bool,
    out: &mut impl io::Write,
) -> io::Result<ReportSummary> {
    let dispatched = stream.dispatched();

    let summary = if sorted {
        let (report, summary) = render_outcomes(stream.collect_sorted().await, options, now);
        out.write_all(report.as_bytes())?;
        summary
    } else {
        let mut stream = stream;
        let mut summary = ReportSummary::default();
        while let Some(outcome) = stream.next().await {
            let mut report = String::new();
            summary += render_outcome(outcome, options, now, &mut report);
            out.write_all(report.as_bytes())?;
        }
        summary
    };

    debug!(
        dispatched,
        rendered = summary.rendered,
        empty = summary.empty,
        failed = summary.failed,
        "Report complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use crate::domain::{LineArrivals, Stop, StopCode, VehicleType};
    use crate::i18n::Language;

    fn now() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    }

    fn arrival(time: &str, ac: bool, wheelchair: bool) -> Arrival {
        Arrival {
            time: time.to_string(),
            has_air_conditioning: ac,
            is_wheelchair_accessible: wheelchair,
        }
    }

    fn timetable(code: &str, lines: Vec<LineArrivals>) -> StopTimetable {
        StopTimetable {
            stop_code: StopCode::parse(code).unwrap(),
            stop_name: "Central Station".to_string(),
            generation_time: "2024-03-15 10:00:00".to_string(),
            lines,
        }
    }

    fn bus_94() -> LineArrivals {
        LineArrivals {
            vehicle_type: VehicleType::Bus,
            line_number: "94".to_string(),
            arrivals: vec![
                arrival("10:04:00", true, false),
                arrival("10:19:30", false, true),
            ],
        }
    }

    #[test]
    fn plain_arrival_is_its_time() {
        let options = DisplayOptions::default();
        assert_eq!(render_arrival(&arrival("10:04:00", true, true), &options, now()), "10:04:00");
    }

    #[test]
    fn arrival_with_facilities() {
        let options = DisplayOptions {
            show_facilities: true,
            ..Default::default()
        };
        assert_eq!(
            render_arrival(&arrival("10:04:00", true, false), &options, now()),
            "10:04:00 (+A, -W)"
        );

        let options = DisplayOptions {
            show_facilities: true,
            language: Language::Bulgarian,
            ..Default::default()
        };
        assert_eq!(
            render_arrival(&arrival("10:04:00", false, true), &options, now()),
            "10:04:00 (-К, +И)"
        );
    }

    #[test]
    fn remaining_time_ignores_arrival_seconds() {
        assert_eq!(remaining_time("10:04:59", now()).as_deref(), Some("00:04:00"));
        assert_eq!(remaining_time("11:30:00", now()).as_deref(), Some("01:30:00"));
    }

    #[test]
    fn remaining_time_for_past_arrival_is_negative() {
        assert_eq!(remaining_time("09:58:00", now()).as_deref(), Some("-00:02:00"));
    }

    #[test]
    fn remaining_time_wraps_past_midnight() {
        let late = NaiveTime::from_hms_opt(23, 58, 0).unwrap();
        assert_eq!(remaining_time("00:05:00", late).as_deref(), Some("00:07:00"));
    }

    #[test]
    fn remaining_time_for_arrival_before_midnight_read_after_it() {
        let early = NaiveTime::from_hms_opt(0, 2, 0).unwrap();
        assert_eq!(remaining_time("23:59:00", early).as_deref(), Some("-00:03:00"));
    }

    #[test]
    fn unparseable_time_falls_back_to_raw() {
        let options = DisplayOptions {
            show_remaining_time: true,
            ..Default::default()
        };
        assert_eq!(render_arrival(&arrival("soon", false, false), &options, now()), "soon");
    }

    #[test]
    fn timetable_layout() {
        let t = timetable("0012", vec![bus_94()]);
        let rendered = render_timetable(&t, &DisplayOptions::default(), now());

        assert_eq!(
            rendered,
            "Central Station (0012)\n\
             ======================\n\
             * bus 94: 10:04:00, 10:19:30\n"
        );
    }

    #[test]
    fn timetable_with_generation_time_in_bulgarian() {
        let t = timetable("0012", vec![bus_94()]);
        let options = DisplayOptions {
            language: Language::Bulgarian,
            show_generation_time: true,
            ..Default::default()
        };
        let rendered = render_timetable(&t, &options, now());

        assert!(rendered.contains("(време на генериране: 2024-03-15 10:00:00)\n"));
        assert!(rendered.contains("* автобус 94: "));
    }

    #[test]
    fn outcomes_skip_failures_and_empty_timetables() {
        let outcomes = vec![
            FetchOutcome::Success(timetable("0001", vec![bus_94()])),
            FetchOutcome::Success(timetable("0002", vec![])),
            FetchOutcome::Failure {
                stop: Stop::new(StopCode::parse("0003").unwrap(), "West End"),
                error: FetchError::NotFound("stop 0003".into()),
            },
        ];

        let (report, summary) = render_outcomes(outcomes, &DisplayOptions::default(), now());

        assert_eq!(
            summary,
            ReportSummary {
                rendered: 1,
                empty: 1,
                failed: 1
            }
        );
        assert!(report.contains("(0001)"));
        assert!(!report.contains("(0002)"));
        assert!(!report.contains("West End"));
    }
}
