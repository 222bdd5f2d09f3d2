//! Error types surfaced by the library.
//!
//! Nothing here is retried internally; every failure is handed back to the
//! caller, which decides whether to keep previously displayed data.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single feed request.
#[derive(Error, Debug)]
pub enum FetchError {
    /// DNS, connect, timeout or any other failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status (bad key, rate limit, ...).
    #[error("feed API returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// The body was not JSON or lacked a required field.
    #[error("malformed feed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("invalid feed endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error(transparent)]
    InvalidWindow(#[from] WindowError),
}

impl FetchError {
    /// HTTP status code, when the failure came from the API itself.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}

/// Rejected feed window.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WindowError {
    #[error("unsupported span of {0} days (expected 1, 3 or 7)")]
    UnsupportedSpan(u32),

    #[error("end date precedes start date")]
    Reversed,

    #[error("date range overflows the calendar")]
    OutOfRange,
}

/// Failure reading or writing the API-key config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config file '{}': {source}", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        source: serde_json::Error,
        path: PathBuf,
    },
}
