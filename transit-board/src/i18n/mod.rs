//! Localization: language resolution and report vocabulary.

mod language;
mod terms;

pub use language::{Language, UnknownLanguage};
pub use terms::{Term, parse_vehicle_type, vehicle_type_name};
