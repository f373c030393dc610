//! Plain-text rendering of timetables, stop lists and routes.
//!
//! Every formatting choice comes in through [`DisplayOptions`]; nothing here
//! reads process-wide state.

mod lists;
mod timetable;

use crate::i18n::Language;

pub use lists::{render_line_numbers, render_named_routes, render_stop_list};
pub use timetable::{ReportSummary, render_arrival, render_outcomes, render_stream, render_timetable};

/// How timetables are displayed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOptions {
    /// Language of the report vocabulary.
    pub language: Language,
    /// Show when each timetable was generated.
    pub show_generation_time: bool,
    /// Show the time left until each arrival instead of the arrival time.
    pub show_remaining_time: bool,
    /// Show air-conditioning and wheelchair-accessibility markers.
    pub show_facilities: bool,
}

/// Underline a heading with `ch`, one per character of the heading.
fn underlined(title: &str, ch: char) -> String {
    let rule: String = std::iter::repeat_n(ch, title.chars().count()).collect();
    format!("{title}\n{rule}\n")
}
