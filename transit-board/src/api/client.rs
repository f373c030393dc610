//! HTTP client for the upstream transit services.
//!
//! Two hosts are involved: the arrivals API, which serves real-time boards
//! per stop, and the resources host, which serves the static stop and route
//! lists. A single `reqwest::Client` (and its connection pool) is shared by
//! every request, including the concurrent per-stop fetches of an aggregation.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::domain::{StopCode, VehicleType};
use crate::i18n::Language;

use super::error::FetchError;
use super::types::{ArrivalsResponse, StopDto, VehicleRoutesDto};

/// Default base URL for the real-time arrivals API.
pub const DEFAULT_ARRIVALS_BASE_URL: &str = "https://api-arrivals.sofiatraffic.bg";

/// Default base URL for the static resources (stop and route lists).
pub const DEFAULT_RESOURCES_BASE_URL: &str = "https://routes.sofiatraffic.bg";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of idle pooled connections kept per host.
///
/// An aggregation over "all stops" fans out thousands of requests at once, so
/// the pool is sized well above reqwest's usual needs.
const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 64;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the arrivals API
    pub arrivals_base_url: String,
    /// Base URL of the static resources host
    pub resources_base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Idle connections kept per host
    pub pool_max_idle_per_host: usize,
}

impl ApiConfig {
    /// Create a config pointing at the production services.
    pub fn new() -> Self {
        Self {
            arrivals_base_url: DEFAULT_ARRIVALS_BASE_URL.to_string(),
            resources_base_url: DEFAULT_RESOURCES_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
        }
    }

    /// Set a custom arrivals API base URL.
    pub fn with_arrivals_base_url(mut self, url: impl Into<String>) -> Self {
        self.arrivals_base_url = url.into();
        self
    }

    /// Set a custom resources base URL.
    pub fn with_resources_base_url(mut self, url: impl Into<String>) -> Self {
        self.resources_base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the connection pool size per host.
    pub fn with_pool_max_idle_per_host(mut self, n: usize) -> Self {
        self.pool_max_idle_per_host = n;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the arrivals API and the static resources host.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    arrivals_base_url: String,
    resources_base_url: String,
}

impl ApiClient {
    /// Create a new API client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()?;

        Ok(Self {
            http,
            arrivals_base_url: config.arrivals_base_url.trim_end_matches('/').to_string(),
            resources_base_url: config.resources_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the arrivals board for a stop.
    pub fn arrivals_url(&self, stop: &StopCode) -> String {
        format!("{}/api/v1/arrivals/{}/", self.arrivals_base_url, stop)
    }

    /// URL of the stop list in the given language.
    pub fn stops_url(&self, language: Language) -> String {
        format!(
            "{}/resources/stops-{}.json",
            self.resources_base_url,
            language.code()
        )
    }

    /// URL of the route list.
    pub fn routes_url(&self) -> String {
        format!("{}/resources/routes.json", self.resources_base_url)
    }

    /// Fetch the real-time arrivals board for a stop.
    ///
    /// The `vehicle_type` and `line` filters are passed to the server as
    /// `type` and `line` query parameters, and only when present.
    pub async fn fetch_arrivals(
        &self,
        stop: &StopCode,
        vehicle_type: Option<&VehicleType>,
        line: Option<&str>,
    ) -> Result<ArrivalsResponse, FetchError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(vt) = vehicle_type {
            query.push(("type", vt.as_wire()));
        }
        if let Some(line) = line {
            query.push(("line", line));
        }

        self.get_json(&self.arrivals_url(stop), &query).await
    }

    /// Fetch the full stop list with names in the given language.
    pub async fn fetch_stops(&self, language: Language) -> Result<Vec<StopDto>, FetchError> {
        self.get_json(&self.stops_url(language), &[]).await
    }

    /// Fetch the route list of every line.
    pub async fn fetch_routes(&self) -> Result<Vec<VehicleRoutesDto>, FetchError> {
        self.get_json(&self.routes_url(), &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FetchError::json(e, &body))
    }
}
