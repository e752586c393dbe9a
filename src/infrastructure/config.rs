//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `5000`)
//! - `PROCESSING_DELAY_MS`: Simulated processing latency (default: `100`)
//! - `MAX_PROMPT_LENGTH`: Maximum prompt length in characters (default: unlimited)
//! - `WORKER_THREADS`: Number of tokio worker threads (default: logical CPU count)
//!
//! Empty or whitespace-only values are treated as unset.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use super::processor::DEFAULT_PROCESSING_DELAY;
use crate::domain::PromptPolicy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

// =============================================================================
// Errors
// =============================================================================

/// Error type for environment variable parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvParseError {
    /// Value is not a valid unsigned integer.
    #[error("Invalid value for {name}: {message} (got '{value}')")]
    InvalidNumber {
        /// Variable name.
        name: String,
        /// Parser message.
        message: String,
        /// Actual value.
        value: String,
    },

    /// Value is not valid unicode.
    #[error("Invalid value for {name}: not valid unicode")]
    NotUnicode {
        /// Variable name.
        name: String,
    },
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment parsing error.
    #[error("Environment parsing error: {0}")]
    EnvParseError(#[from] EnvParseError),

    /// A value that must be positive was zero.
    #[error("{0} must be greater than 0")]
    ZeroValue(&'static str),

    /// Host and port do not form a socket address.
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),
}

// =============================================================================
// App Config
// =============================================================================

/// Runtime configuration for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Simulated processing latency.
    pub processing_delay: Duration,
    /// Prompt validation policy.
    pub prompt_policy: PromptPolicy,
    /// Tokio worker threads; `None` uses the runtime default.
    pub worker_threads: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            processing_delay: DEFAULT_PROCESSING_DELAY,
            prompt_policy: PromptPolicy::unbounded(),
            worker_threads: None,
        }
    }
}

impl AppConfig {
    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any variable holds an unparsable value or
    /// if `MAX_PROMPT_LENGTH` or `WORKER_THREADS` is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let host = read_var(&lookup, "HOST")?.unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = parse_var::<u16, _>(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);

        let processing_delay = parse_var::<u64, _>(&lookup, "PROCESSING_DELAY_MS")?
            .map_or(DEFAULT_PROCESSING_DELAY, Duration::from_millis);

        let prompt_policy = match parse_var::<usize, _>(&lookup, "MAX_PROMPT_LENGTH")? {
            Some(0) => return Err(ConfigError::ZeroValue("MAX_PROMPT_LENGTH")),
            Some(max) => PromptPolicy::with_max_length(max),
            None => PromptPolicy::unbounded(),
        };

        let worker_threads = match parse_var::<usize, _>(&lookup, "WORKER_THREADS")? {
            Some(0) => return Err(ConfigError::ZeroValue("WORKER_THREADS")),
            other => other,
        };

        Ok(Self {
            host,
            port,
            processing_delay,
            prompt_policy,
            worker_threads,
        })
    }

    /// Returns the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] if host and port do not parse
    /// as a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(address))
    }
}

// =============================================================================
// Environment Variable Parsing
// =============================================================================

/// Reads a variable, treating missing and blank values as `None`.
fn read_var<F>(lookup: &F, name: &str) -> Result<Option<String>, EnvParseError>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match lookup(name) {
        Ok(value) => {
            let trimmed = value.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(EnvParseError::NotUnicode {
            name: name.to_string(),
        }),
    }
}

/// Parses a numeric variable.
///
/// Returns `None` if the variable is not set.
fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, EnvParseError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
    F: Fn(&str) -> Result<String, env::VarError>,
{
    let Some(value) = read_var(lookup, name)? else {
        return Ok(None);
    };

    value
        .parse()
        .map(Some)
        .map_err(|error: std::num::ParseIntError| EnvParseError::InvalidNumber {
            name: name.to_string(),
            message: error.to_string(),
            value,
        })
}

// =============================================================================
// Tests
// =============================================================================
