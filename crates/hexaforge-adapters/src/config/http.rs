//! Blocking HTTP fetch of the configuration payload.

use std::time::Duration;

use hexaforge_core::{
    application::{ApplicationError, ports::ConfigSource},
    domain::RemoteConfig,
    error::HexaforgeResult,
};
use tracing::{debug, instrument};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// `GET <url>` returning the configuration JSON.
#[derive(Debug, Clone)]
pub struct HttpConfigSource {
    url: String,
    timeout: Duration,
}

impl HttpConfigSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Configure the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn failed(reason: impl ToString) -> ApplicationError {
    ApplicationError::Configuration {
        reason: reason.to_string(),
    }
}

impl ConfigSource for HttpConfigSource {
    #[instrument(skip_all, fields(url = %self.url))]
    fn fetch(&self) -> HexaforgeResult<RemoteConfig> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(failed)?;

        let response = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(failed)?;
        debug!(status = %response.status(), "Configuration received");

        let config = response.json::<RemoteConfig>().map_err(failed)?;
        Ok(config)
    }
}
