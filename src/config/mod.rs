//! Configuration module
//!
//! Resolves the probe configuration from defaults, the environment and
//! command-line overrides.

mod env;

pub use env::{load_dotenv, print_env_help, EnvConfig, DEFAULT_ENV_FILE};

use anyhow::{bail, Context, Result};
use reqwest::Url;
use std::time::Duration;

use crate::models::PROBE_CLIENT_NAME;

/// Backend URL used when the environment provides none
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Suffix appended to the backend URL to reach the API
pub const API_PREFIX: &str = "/api";

/// Connectivity check timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// API request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Resolved probe configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Backend root, e.g. `http://localhost:8001`
    pub backend_url: String,

    /// Timeout for the connectivity check
    pub connect_timeout: Duration,

    /// Timeout for every API request
    pub request_timeout: Duration,

    /// Client name submitted when creating a status check
    pub client_name: String,

    /// Number of times the suite is run
    pub rounds: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            client_name: PROBE_CLIENT_NAME.to_string(),
            rounds: 1,
        }
    }
}

impl ProbeConfig {
    /// Build configuration from environment values
    pub fn from_env(env: &EnvConfig) -> Self {
        Self {
            backend_url: env.backend_url_or(DEFAULT_BACKEND_URL),
            connect_timeout: Duration::from_secs(
                env.connect_timeout_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            request_timeout: Duration::from_secs(env.timeout_or(DEFAULT_REQUEST_TIMEOUT_SECS)),
            rounds: env.rounds_or(1),
            ..Self::default()
        }
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// API root: the backend URL followed by `/api`
    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.backend_url.trim_end_matches('/'), API_PREFIX)
    }

    /// Reject configurations that cannot produce a meaningful run
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.backend_url)
            .with_context(|| format!("Invalid backend URL: {}", self.backend_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "Backend URL must use http or https, got {}",
                url.scheme()
            );
        }
        if self.connect_timeout.is_zero() || self.request_timeout.is_zero() {
            bail!("Timeouts must be greater than zero");
        }
        if self.rounds == 0 {
            bail!("Rounds must be at least 1");
        }

        Ok(())
    }
}
