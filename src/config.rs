//! Client configuration.
//!
//! Defaults mirror the provider-side deployment values: 5s request timeout,
//! 5 workers, one token every 300ms with a burst of 2. All of them are
//! env-overridable so operators can tune a deployment without a rebuild.

use crate::{Error, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_WORKERS: usize = 5;
pub const DEFAULT_REFILL_INTERVAL: Duration = Duration::from_millis(300);
pub const DEFAULT_BURST: u32 = 2;
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the provider API, no trailing slash.
    pub api_endpoint: String,
    /// Value placed after `x-api-key` in the Authorization header.
    pub api_key: String,
    pub http_timeout: Duration,
    /// Fixed worker count per batch.
    pub workers: usize,
    /// Token-bucket refill interval shared by one batch.
    pub refill_interval: Duration,
    /// Token-bucket burst capacity.
    pub burst: u32,
}

impl Config {
    pub fn new(api_endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            api_key: api_key.into(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            workers: DEFAULT_WORKERS,
            refill_interval: DEFAULT_REFILL_INTERVAL,
            burst: DEFAULT_BURST,
        }
    }

    /// Read configuration from the environment.
    ///
    /// - `MIDTOOLS_API_ENDPOINT` (required)
    /// - `MIDTOOLS_API_KEY` (required)
    /// - `MIDTOOLS_HTTP_TIMEOUT_SECS` (default 5)
    /// - `MIDTOOLS_WORKERS` (default 5)
    /// - `MIDTOOLS_REFILL_MS` (default 300)
    /// - `MIDTOOLS_BURST` (default 2)
    pub fn from_env() -> Result<Self> {
        let api_endpoint = env::var("MIDTOOLS_API_ENDPOINT")
            .map_err(|_| Error::configuration("MIDTOOLS_API_ENDPOINT is not set"))?;
        let api_key = env::var("MIDTOOLS_API_KEY")
            .map_err(|_| Error::configuration("MIDTOOLS_API_KEY is not set"))?;

        let mut config = Self::new(api_endpoint, api_key);

        if let Some(secs) = read_env_u64("MIDTOOLS_HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(workers) = read_env_u64("MIDTOOLS_WORKERS") {
            config.workers = workers as usize;
        }
        if let Some(ms) = read_env_u64("MIDTOOLS_REFILL_MS") {
            config.refill_interval = Duration::from_millis(ms);
        }
        if let Some(burst) = read_env_u64("MIDTOOLS_BURST") {
            config.burst = burst as u32;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_endpoint.trim().is_empty() {
            return Err(Error::configuration("api_endpoint is required"));
        }
        if self.workers == 0 {
            return Err(Error::configuration("workers must be non-zero"));
        }
        Ok(())
    }
}

fn read_env_u64(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|s| s.parse::<u64>().ok())
}
