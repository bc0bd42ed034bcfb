//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric setting could not be parsed.
    #[error("failed to parse {name} '{value}': {source}")]
    NumberParseError {
        name: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A setting parsed but violates an invariant (zero bound, empty URL, ...).
    #[error("invalid {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("unknown judgment variant '{value}' (expected 'standard' or 'confidence')")]
    UnknownVariant { value: String },

    #[error("failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },
}
