//! Domain types for the transit board.
//!
//! Stops, lines and timetables as the rest of the crate sees them, decoupled
//! from the upstream wire format.

mod line;
mod stop;
mod timetable;
mod vehicle;

pub use line::Line;
pub use stop::{InvalidStopCode, Stop, StopCode};
pub use timetable::{Arrival, LineArrivals, StopTimetable};
pub use vehicle::VehicleType;
