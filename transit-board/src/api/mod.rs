//! Upstream API client.
//!
//! Talks to the real-time arrivals API and the static resources host, and
//! converts their JSON into domain types.

mod client;
mod convert;
mod error;
mod types;

pub use client::{ApiClient, ApiConfig, DEFAULT_ARRIVALS_BASE_URL, DEFAULT_RESOURCES_BASE_URL};
pub use convert::{convert_arrivals, convert_stops};
pub use error::{ErrorKind, FetchError};
pub use types::{
    ArrivalDto, ArrivalsResponse, LineArrivalsDto, LineRoutesDto, RouteDto, StopDto,
    VehicleRoutesDto,
};
