//! Environment variable configuration
//!
//! Reads the backend URL and probe overrides from the process environment,
//! optionally seeded from a dotenv file.

use std::env;
use std::io::ErrorKind;
use std::path::Path;

/// Environment variable prefix for probe settings
const ENV_PREFIX: &str = "BACKEND_PROBE";

/// Backend URL variable shared with the frontend build
pub const BACKEND_URL_VAR: &str = "REACT_APP_BACKEND_URL";

/// Dotenv file read when no other path is given
pub const DEFAULT_ENV_FILE: &str = "/app/frontend/.env";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Backend base URL from REACT_APP_BACKEND_URL
    pub backend_url: Option<String>,
    /// API request timeout from BACKEND_PROBE_TIMEOUT
    pub timeout: Option<u64>,
    /// Connectivity timeout from BACKEND_PROBE_CONNECT_TIMEOUT
    pub connect_timeout: Option<u64>,
    /// Rounds from BACKEND_PROBE_ROUNDS
    pub rounds: Option<u32>,
    /// Output format from BACKEND_PROBE_FORMAT
    pub format: Option<String>,
    /// Verbose from BACKEND_PROBE_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            backend_url: non_empty(env::var(BACKEND_URL_VAR).ok()),
            timeout: get_env_parse("TIMEOUT"),
            connect_timeout: get_env_parse("CONNECT_TIMEOUT"),
            rounds: get_env_parse("ROUNDS"),
            format: get_env("FORMAT"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.backend_url.is_some()
            || self.timeout.is_some()
            || self.connect_timeout.is_some()
            || self.rounds.is_some()
            || self.format.is_some()
            || self.verbose.is_some()
    }

    /// Get backend URL with fallback
    pub fn backend_url_or(&self, default: &str) -> String {
        self.backend_url
            .clone()
            .unwrap_or_else(|| default.to_string())
    }

    /// Get API timeout with fallback
    pub fn timeout_or(&self, default: u64) -> u64 {
        self.timeout.unwrap_or(default)
    }

    /// Get connectivity timeout with fallback
    pub fn connect_timeout_or(&self, default: u64) -> u64 {
        self.connect_timeout.unwrap_or(default)
    }

    /// Get rounds with fallback
    pub fn rounds_or(&self, default: u32) -> u32 {
        self.rounds.unwrap_or(default)
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {BACKEND_URL_VAR}:          {:?}", self.backend_url);
        println!("  {ENV_PREFIX}_TIMEOUT:         {:?}", self.timeout);
        println!("  {ENV_PREFIX}_CONNECT_TIMEOUT: {:?}", self.connect_timeout);
        println!("  {ENV_PREFIX}_ROUNDS:          {:?}", self.rounds);
        println!("  {ENV_PREFIX}_FORMAT:          {:?}", self.format);
        println!("  {ENV_PREFIX}_VERBOSE:         {:?}", self.verbose);
    }
}

/// Load variables from a dotenv file into the process environment.
///
/// Variables already present in the environment keep their values. Returns
/// `Ok(false)` when the file does not exist.
pub fn load_dotenv(path: impl AsRef<Path>) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// An empty value counts as unset
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.trim().parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables in tests
#[cfg(test)]
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

#[cfg(test)]
impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.vars.push((BACKEND_URL_VAR.to_string(), url.into()));
        self
    }

    pub fn timeout(mut self, timeout: u64) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_TIMEOUT"), timeout.to_string()));
        self
    }

    pub fn connect_timeout(mut self, timeout: u64) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_CONNECT_TIMEOUT"), timeout.to_string()));
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_VERBOSE"), verbose.to_string()));
        self
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        for (key, value) in self.vars {
            env::set_var(key, value);
        }

        EnvGuard { previous }
    }
}

/// Guard that restores environment variables on drop
#[cfg(test)]
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print recognised environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {BACKEND_URL_VAR}          Backend base URL (default http://localhost:8001)");
    println!("  {ENV_PREFIX}_TIMEOUT         API request timeout in seconds (default 10)");
    println!("  {ENV_PREFIX}_CONNECT_TIMEOUT Connectivity timeout in seconds (default 5)");
    println!("  {ENV_PREFIX}_ROUNDS          Number of suite rounds (default 1)");
    println!("  {ENV_PREFIX}_FORMAT          Output format (table, json, json-pretty, summary)");
    println!("  {ENV_PREFIX}_VERBOSE         Enable debug logging (true/false)");
    println!();
    println!("Variables are also read from {DEFAULT_ENV_FILE} when it exists.");
    println!();
    println!("Example:");
    println!("  export {BACKEND_URL_VAR}=http://localhost:8001");
    println!("  backend-probe run");
}
