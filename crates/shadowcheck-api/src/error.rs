//! Error types for the API clients.

use thiserror::Error;

/// Errors from the structured platform API that callers cannot degrade around.
///
/// Only the profile lookup surfaces these; the probe lookups fold every
/// failure into [`crate::Lookup::Unavailable`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// The account does not exist (or the API returned no user)
    #[error("account not found: {handle}")]
    NotFound {
        /// Handle that was looked up
        handle: String,
    },

    /// The API answered with a non-200 status
    #[error("upstream API returned status {status}")]
    Upstream {
        /// HTTP status code
        status: u16,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("failed to decode API response: {0}")]
    Decode(String),

    /// No bearer credential configured
    #[error("API bearer token is not configured")]
    MissingCredential,

    /// Base URL could not be parsed
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The offending URL
        url: String,
        /// Parser message
        reason: String,
    },
}

impl ApiError {
    /// Whether the error means the account does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from the human-verification service.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// No verification secret configured
    #[error("verification secret is not configured")]
    NotConfigured,

    /// The verification service could not be reached or answered badly
    #[error("verification service error: {0}")]
    Service(String),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound {
            handle: "ghost_account".to_string(),
        };
        assert_eq!(err.to_string(), "account not found: ghost_account");
        assert!(err.is_not_found());

        let err = ApiError::Upstream { status: 429 };
        assert_eq!(err.to_string(), "upstream API returned status 429");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_verify_error_display() {
        let err = VerifyError::Service("HTTP 503".to_string());
        assert_eq!(err.to_string(), "verification service error: HTTP 503");
    }
}
