//! Real-time arrival boards for Sofia's public transit.
//!
//! Looks up stops by name, fetches every matching stop's virtual arrival
//! board concurrently, and renders the results as a plain-text report.

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod domain;
pub mod fetch;
pub mod i18n;
pub mod render;
pub mod routes;
pub mod stops;
