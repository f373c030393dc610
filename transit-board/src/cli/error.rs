//! Errors that end an invocation.

use std::io;

use crate::api::FetchError;
use crate::domain::InvalidStopCode;

/// Invalid command-line or environment configuration.
///
/// Always detected before any network activity.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown vehicle type {0:?}")]
    UnknownVehicleType(String),

    #[error("--max-concurrent must be at least 1")]
    ZeroConcurrency,

    #[error("invalid base URL {url:?} in {variable}: {reason}")]
    InvalidBaseUrl {
        variable: &'static str,
        url: String,
        reason: String,
    },

    #[error(transparent)]
    InvalidStopCode(#[from] InvalidStopCode),
}

/// Any error that makes the tool exit unsuccessfully.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create the HTTP client: {0}")]
    Client(#[source] FetchError),

    /// A fetch nothing else can proceed without.
    #[error("could not load {what}: {source}")]
    Load {
        what: &'static str,
        #[source]
        source: FetchError,
    },

    #[error("could not write the report: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub(crate) fn load(what: &'static str) -> impl FnOnce(FetchError) -> Self {
        move |source| CliError::Load { what, source }
    }
}
