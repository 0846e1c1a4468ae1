use crate::actions::{BrowserActions, BrowserSession, SessionLauncher};
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromiumConfig};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use shadowcheck_core::BrowserConfig;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};

/// Polling interval for element waits and network-idle detection
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Quiet period with no new resource requests that counts as network idle
const NETWORK_QUIET: Duration = Duration::from_millis(500);

const RESOURCE_COUNT_JS: &str = "performance.getEntriesByType('resource').length";
const BODY_TEXT_JS: &str = "document.body ? document.body.innerText : ''";

/// Launches one headless Chromium per session
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    config: BrowserConfig,
}

impl ChromiumLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    fn launch_timeout(&self) -> Duration {
        Duration::from_secs(self.config.launch_timeout_secs)
    }

    /// CDP requests may run as long as a page load; callers bound them tighter.
    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.page_load_timeout_secs)
    }

    fn chromium_config(
        &self,
        fingerprint: &FingerprintConfig,
        profile_dir: &TempDir,
    ) -> Result<ChromiumConfig> {
        let mut builder = ChromiumConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .user_data_dir(profile_dir.path())
            .request_timeout(self.request_timeout())
            .arg(format!("--user-agent={}", fingerprint.user_agent))
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--no-first-run");

        if !self.config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(BrowserError::LaunchError)
    }
}

#[async_trait::async_trait]
impl SessionLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let fingerprint = FingerprintConfig::for_session(&self.config);

        // Fresh profile per session: no cookies or history carried between probes
        let profile_dir = tempfile::Builder::new()
            .prefix("shadowcheck-session-")
            .tempdir()
            .map_err(|e| BrowserError::LaunchError(format!("profile dir: {e}")))?;

        let config = self.chromium_config(&fingerprint, &profile_dir)?;

        let (mut browser, mut handler) = timeout(self.launch_timeout(), Browser::launch(config))
            .await
            .map_err(|_| BrowserError::Timeout("launching chromium".to_string()))?
            .map_err(|e| BrowserError::LaunchError(e.to_string()))?;

        // Drive the CDP connection for the lifetime of the session
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("chromium handler event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(BrowserError::from_cdp(e, "opening page", BrowserError::ChromiumError));
            }
        };

        tracing::debug!(user_agent = %fingerprint.user_agent, "browser session launched");

        Ok(Box::new(ChromiumSession {
            browser,
            page,
            handler_task,
            _profile_dir: profile_dir,
        }))
    }
}

/// A live Chromium process with a single page
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    _profile_dir: TempDir,
}

impl ChromiumSession {
    async fn resource_count(&self) -> Result<u64> {
        self.page
            .evaluate(RESOURCE_COUNT_JS)
            .await
            .map_err(|e| BrowserError::from_cdp(e, "resource count", BrowserError::ScriptError))?
            .into_value::<u64>()
            .map_err(|e| BrowserError::ScriptError(e.to_string()))
    }

    async fn wait_for_network_idle(&self) -> Result<()> {
        let mut last = self.resource_count().await?;
        let mut quiet_since = Instant::now();

        loop {
            sleep(POLL_INTERVAL).await;
            let current = self.resource_count().await?;
            if current != last {
                last = current;
                quiet_since = Instant::now();
            } else if quiet_since.elapsed() >= NETWORK_QUIET {
                return Ok(());
            }
        }
    }
}

#[async_trait::async_trait]
impl BrowserActions for ChromiumSession {
    async fn navigate(&self, url: &str, limit: Duration) -> Result<()> {
        let load = async {
            self.page
                .goto(url)
                .await
                .map_err(|e| BrowserError::from_cdp(e, url, BrowserError::NavigationError))?;
            self.wait_for_network_idle().await
        };

        timeout(limit, load)
            .await
            .map_err(|_| BrowserError::Timeout(format!("loading {url} after {limit:?}")))?
    }

    async fn element_exists(&self, selector: &str) -> Result<bool> {
        self.page
            .find_elements(selector)
            .await
            .map(|elements| !elements.is_empty())
            .map_err(|e| BrowserError::from_cdp(e, selector, BrowserError::ChromiumError))
    }

    async fn wait_for_selector(&self, selector: &str, limit: Duration) -> Result<()> {
        let poll = async {
            loop {
                if self.element_exists(selector).await? {
                    return Ok(());
                }
                sleep(POLL_INTERVAL).await;
            }
        };

        timeout(limit, poll)
            .await
            .map_err(|_| BrowserError::Timeout(format!("waiting for {selector} after {limit:?}")))?
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| BrowserError::from_cdp(e, selector, BrowserError::ChromiumError))?;

        match elements.first() {
            Some(element) => element
                .attribute(name)
                .await
                .map_err(|e| BrowserError::from_cdp(e, selector, BrowserError::ChromiumError)),
            None => Ok(None),
        }
    }

    async fn body_text(&self) -> Result<String> {
        self.page
            .evaluate(BODY_TEXT_JS)
            .await
            .map_err(|e| BrowserError::from_cdp(e, "body text", BrowserError::ScriptError))?
            .into_value::<String>()
            .map_err(|e| BrowserError::ScriptError(e.to_string()))
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| BrowserError::from_cdp(e, selector, BrowserError::SelectorNotFound))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::from_cdp(e, selector, BrowserError::ChromiumError))?;
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| BrowserError::from_cdp(e, selector, BrowserError::SelectorNotFound))?;
        element
            .type_str(text)
            .await
            .map_err(|e| BrowserError::from_cdp(e, selector, BrowserError::ChromiumError))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserSession for ChromiumSession {
    async fn close(self: Box<Self>) -> Result<()> {
        let mut session = self;
        let closed = session
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::ChromiumError(e.to_string()));
        if let Err(e) = session.browser.wait().await {
            tracing::warn!("waiting for chromium exit failed: {}", e);
        }
        tracing::debug!("browser session closed");
        closed
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
