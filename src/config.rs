use crate::error::{NotifierError, Result};
use std::time::Duration;

pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Immutable dispatch settings, built once at startup and handed to the
/// dispatcher and the HTTP gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    endpoint: String,
    api_key: String,
    max_in_flight: usize,
    timeout: Option<Duration>,
}

impl DispatchConfig {
    /// Validates the endpoint and returns a config with default concurrency and
    /// no timeout.
    ///
    /// An empty API key is accepted: the remote API rejects it per row.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into().trim().to_string();
        if endpoint.is_empty() {
            return Err(NotifierError::Config(
                "the payment API endpoint is not set".to_string(),
            ));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(NotifierError::Config(format!(
                "endpoint must be an absolute http(s) URL, got '{endpoint}'"
            )));
        }

        Ok(Self {
            endpoint,
            api_key: api_key.into(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            timeout: None,
        })
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Result<Self> {
        if max_in_flight == 0 {
            return Err(NotifierError::Config(
                "max in-flight submissions must be at least 1".to_string(),
            ));
        }
        self.max_in_flight = max_in_flight;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The key as it may appear in logs: first five characters, then `...`.
    pub fn masked_api_key(&self) -> String {
        mask_key(&self.api_key)
    }
}

pub fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "<none>".to_string();
    }
    let prefix: String = key.chars().take(5).collect();
    format!("{prefix}...")
}
