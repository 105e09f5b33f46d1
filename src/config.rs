//! Runtime configuration for the interaction router.
//!
//! Values come from the process environment ([`RouterConfig::from_env`]),
//! from any lookup function ([`RouterConfig::from_lookup`]), or from a host
//! configuration file through `serde`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::interaction::adapters::http::DEFAULT_API_BASE_URL;
use crate::logging::LogLevel;

/// Environment variable holding the application id.
pub const APPLICATION_ID_VAR: &str = "DISCORD_APPLICATION_ID";
/// Environment variable holding the hex-encoded public key.
pub const PUBLIC_KEY_VAR: &str = "DISCORD_PUBLIC_KEY";
/// Environment variable holding the bot token.
pub const BOT_TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
/// Environment variable overriding the REST API base URL.
pub const API_BASE_URL_VAR: &str = "DISCORD_API_BASE_URL";
/// Environment variable selecting the log level.
pub const LOG_LEVEL_VAR: &str = "DISCORD_LOG_LEVEL";

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required configuration variable {0}")]
    MissingVariable(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("invalid value for {variable}: {value}")]
    InvalidValue {
        /// Variable name.
        variable: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Settings needed to serve and register interactions.
///
/// The `Debug` output masks the bot token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Discord application id.
    pub application_id: String,
    /// Hex-encoded Ed25519 public key of the application.
    pub public_key: String,
    /// Bot token; deferred commands and registration need it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    /// REST API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Log level used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: LogLevel,
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("application_id", &self.application_id)
            .field("public_key", &self.public_key)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_owned()
}

impl RouterConfig {
    /// Creates a configuration with defaults for the optional settings.
    #[must_use]
    pub fn new(application_id: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            public_key: public_key.into(),
            bot_token: None,
            api_base_url: default_api_base_url(),
            log_level: LogLevel::default(),
        }
    }

    /// Sets the bot token.
    #[must_use]
    pub fn with_bot_token(mut self, bot_token: impl Into<String>) -> Self {
        self.bot_token = Some(bot_token.into());
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| read(name).ok_or(ConfigError::MissingVariable(name));

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                variable: LOG_LEVEL_VAR,
                value,
            })?,
            None => LogLevel::default(),
        };

        Ok(Self {
            application_id: required(APPLICATION_ID_VAR)?,
            public_key: required(PUBLIC_KEY_VAR)?,
            bot_token: read(BOT_TOKEN_VAR),
            api_base_url: read(API_BASE_URL_VAR).unwrap_or_else(default_api_base_url),
            log_level,
        })
    }
}
