//! Stop list and name matching.
//!
//! The stop directory is fetched from the resources host once per invocation
//! and resolves the user's stop-name patterns into concrete stops.

mod directory;

pub use directory::StopDirectory;
