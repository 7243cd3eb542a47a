//! Environment-driven server configuration.
//!
//! # Invariants
//! - Every setting has a fixed default; an unset variable never fails.
//! - A set but unparsable numeric variable fails startup instead of silently
//!   falling back.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PATH: &str = "sticky_wall.sqlite3";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024;

/// Error raised for malformed configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { name: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { name, value } => {
                write!(f, "environment variable {name} must be a number, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: PathBuf,
    pub public_dir: PathBuf,
    pub max_body_bytes: usize,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when `None`.
    pub log_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_level: stickywall_core::default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let text = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match text("PORT") {
            Some(value) => parse_number("PORT", value)?,
            None => defaults.port,
        };
        let max_body_bytes = match text("STICKYWALL_MAX_BODY_BYTES") {
            Some(value) => parse_number("STICKYWALL_MAX_BODY_BYTES", value)?,
            None => defaults.max_body_bytes,
        };

        Ok(Self {
            port,
            db_path: text("STICKYWALL_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            public_dir: text("STICKYWALL_PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            max_body_bytes,
            log_level: text("STICKYWALL_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: text("STICKYWALL_LOG_DIR"),
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}
