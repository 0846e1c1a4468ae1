use chromiumoxide::error::CdpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    ChromiumError(String),

    #[error("browser launch failed: {0}")]
    LaunchError(String),

    #[error("navigation failed: {0}")]
    NavigationError(String),

    #[error("selector not found: {0}")]
    SelectorNotFound(String),

    #[error("script evaluation failed: {0}")]
    ScriptError(String),

    #[error("timeout: {0}")]
    Timeout(String),
}

impl BrowserError {
    /// Whether the failure was a timeout rather than a fault.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Classify a CDP failure. The protocol's own request timeout stays a
    /// timeout; everything else is wrapped by `fault` with some context.
    pub(crate) fn from_cdp(err: CdpError, context: &str, fault: fn(String) -> Self) -> Self {
        match err {
            CdpError::Timeout => Self::Timeout(format!("{context}: CDP request timed out")),
            other => fault(format!("{context}: {other}")),
        }
    }
}
