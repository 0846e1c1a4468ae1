//! Errors that abort a whole check.

use shadowcheck_api::ApiError;
use shadowcheck_core::CoreError;
use thiserror::Error;

/// Fatal failures of a check. Probe failures are never represented here.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The handle could not be normalized into something checkable
    #[error("invalid handle: {0}")]
    InvalidHandle(#[source] CoreError),

    /// The profile could not be resolved
    #[error("profile lookup failed: {0}")]
    Profile(#[from] ApiError),

    /// The web UI base URL is not a usable URL
    #[error("invalid web base URL {url}: {reason}")]
    InvalidBaseUrl {
        /// The configured value
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ScanError {
    /// Whether the account does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Profile(e) if e.is_not_found())
    }
}

/// Result type alias for scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;
