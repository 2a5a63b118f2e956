//! Error types for the token screener core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for screener operations.
pub type PulseResult<T> = std::result::Result<T, PulseError>;

/// Main error type for the token screener core.
///
/// The core is almost entirely total: the generator, feed, and store cannot
/// fail. The two surfaces that can are the simulated initial fetch (which
/// injects failures by design) and configuration validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum PulseError {
    /// The simulated initial fetch failed.
    ///
    /// Outside of frozen mode the fetcher synthesizes occasional failures so
    /// callers exercise their retry path.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// Invalid configuration parameter.
    ///
    /// Raised when a fetcher or retry configuration is out of range, such as
    /// a failure rate above 1 or a backoff multiplier below 1.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl PulseError {
    /// Returns true if this error came from the simulated fetch.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::FetchFailed(_))
    }

    /// Returns true if this error is related to configuration issues.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }

    /// Returns the error message as a string slice.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::FetchFailed(msg) | Self::InvalidConfiguration(msg) => msg,
        }
    }
}
