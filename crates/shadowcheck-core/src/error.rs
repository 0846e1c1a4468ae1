//! Core error types for shadowcheck.
//!
//! Errors raised by the domain types themselves live here. Subsystem crates
//! (browser, api, scanner) define their own error enums and wrap these where
//! they need to.

use thiserror::Error;

/// Central error type for domain-level operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Validation("handle must not be empty".to_string());
        assert_eq!(err.to_string(), "validation error: handle must not be empty");

        let err = ConfigError::InvalidValue {
            field: "api.bearer_token".to_string(),
            reason: "missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for api.bearer_token: missing"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let core_err: CoreError = config_err.into();
        assert!(matches!(core_err, CoreError::Config(_)));
    }
}
