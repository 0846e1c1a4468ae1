use crate::error::{BrowserError, Result};
use std::time::Duration;

/// Browser actions used by the observational probes
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL and wait for the network to go idle, up to `timeout`
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Whether at least one element currently matches the selector
    async fn element_exists(&self, selector: &str) -> Result<bool>;

    /// Wait for a selector to appear; `BrowserError::Timeout` if it never does
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Read an attribute from the first element matching the selector
    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>>;

    /// Rendered text of the whole page
    async fn body_text(&self) -> Result<String>;

    /// Click an element by selector
    async fn click(&self, selector: &str) -> Result<()>;

    /// Type text into an element by selector
    async fn type_text(&self, selector: &str, text: &str) -> Result<()>;
}

/// One isolated browser session. Must be closed by its owner.
#[async_trait::async_trait]
pub trait BrowserSession: BrowserActions {
    /// Tear the session down and release the browser process
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Factory for fresh, unshared browser sessions.
#[async_trait::async_trait]
pub trait SessionLauncher: Send + Sync {
    /// Launch a new session with a fresh identity
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// Launch and immediately close a session to find out whether rendering works here.
pub async fn renderer_available(launcher: &dyn SessionLauncher) -> bool {
    match launcher.launch().await {
        Ok(session) => {
            if let Err(e) = session.close().await {
                tracing::warn!("Renderer probe session did not close cleanly: {}", e);
            }
            true
        }
        Err(e) => {
            tracing::error!("Renderer unavailable: {}", e);
            false
        }
    }
}

/// Resolve a link found on a page (often site-relative) against the page's base URL
pub fn resolve_link(base: &str, href: &str) -> Result<String> {
    let base = url::Url::parse(base)
        .map_err(|e| BrowserError::NavigationError(format!("Invalid URL: {}", e)))?;

    base.join(href)
        .map(String::from)
        .map_err(|e| BrowserError::NavigationError(format!("Invalid link '{}': {}", href, e)))
}
