//! Startup configuration loaded from environment variables.
//!
//! Everything here runs before the server binds a socket. A failure is fatal:
//! the binary logs it and exits without accepting requests.

use std::env;

use thiserror::Error;

use crate::auth::ttl::{ParseTtlError, TokenTtl};
use crate::state::security_config::SecurityConfig;

pub const JWT_SECRET_VAR: &str = "JWT_SECRET";
pub const JWT_EXPIRES_IN_VAR: &str = "JWT_EXPIRES_IN";
pub const HOST_VAR: &str = "GATEWAY_HOST";
pub const PORT_VAR: &str = "GATEWAY_PORT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Fatal startup configuration problems. Messages name the variable, never its value
/// when the value is secret.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
    #[error("{var} must be a valid port number, got '{value}'")]
    InvalidPort {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("{var} is not a valid duration: '{value}'")]
    InvalidDuration {
        var: &'static str,
        value: String,
        #[source]
        source: ParseTtlError,
    },
}

/// Centralized application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// Load and validate all configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading values through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(JWT_SECRET_VAR).ok_or(ConfigError::Missing {
            var: JWT_SECRET_VAR,
        })?;

        let token_ttl = match lookup(JWT_EXPIRES_IN_VAR) {
            Some(value) => value
                .parse::<TokenTtl>()
                .map_err(|source| ConfigError::InvalidDuration {
                    var: JWT_EXPIRES_IN_VAR,
                    value,
                    source,
                })?,
            None => TokenTtl::DEFAULT,
        };

        let security = SecurityConfig::new(secret)?.with_token_ttl(token_ttl);

        let host = lookup(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_VAR) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort {
                    var: PORT_VAR,
                    value,
                    source,
                })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            security,
        })
    }
}
