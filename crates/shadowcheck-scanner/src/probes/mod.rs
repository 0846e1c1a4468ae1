//! Visibility probes.
//!
//! Each probe answers one yes/no question about how the platform treats an
//! account. Probes with an API tier ask it first and only launch a browser
//! when the API reports it cannot answer; the rest go straight to the web UI.
//!
//! Every browser-backed probe runs through [`observe`], which owns the
//! session for its whole lifetime: launch a fresh session, run the probe's
//! script, close the session, then map a timeout or fault to an outcome.

mod deboost;
mod ghost;
mod replies;
mod search;
mod suggestion;

pub use deboost::ReplyDeboostProbe;
pub use ghost::GhostProbe;
pub use search::SearchProbe;
pub use suggestion::SuggestionProbe;

use crate::error::{Result, ScanError};
use crate::pages::PlatformPages;
use async_trait::async_trait;
use shadowcheck_api::{Lookup, PlatformApi};
use shadowcheck_browser::{BrowserSession, SessionLauncher};
use shadowcheck_core::{BrowserConfig, Handle, ProbeCategory, ProbeOutcome};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on tearing a session down.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Reason reported by every observation when the host cannot render pages.
pub(crate) const SCRAPING_UNAVAILABLE: &str = "scraping unavailable";

/// A single visibility question asked about one account.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Which question this probe answers.
    fn category(&self) -> ProbeCategory;

    /// Run the probe. Never fails: faults become `ProbeError`.
    async fn run(&self, handle: &Handle) -> ProbeOutcome;
}

/// How long probes wait on the web UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTiming {
    /// Budget for one navigation to become ready
    pub page_load: Duration,
    /// Budget for an expected element to appear
    pub wait: Duration,
    /// Pause after typing into search so suggestions can render
    pub suggestion_settle: Duration,
}

impl Default for ProbeTiming {
    fn default() -> Self {
        Self {
            page_load: Duration::from_secs(30),
            wait: Duration::from_secs(10),
            suggestion_settle: Duration::from_millis(2000),
        }
    }
}

/// Where and how patiently the probes look.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Web UI locations
    pub pages: PlatformPages,
    /// Wait budgets
    pub timing: ProbeTiming,
    /// Whether the host can launch a renderer at all. When false, probes
    /// never launch a session and observations report indeterminate.
    pub renderer_available: bool,
}

impl ProbeSettings {
    /// Derive settings from the browser section of the configuration.
    pub fn from_config(config: &BrowserConfig) -> Result<Self> {
        let pages =
            PlatformPages::new(&config.web_base_url).map_err(|e| ScanError::InvalidBaseUrl {
                url: config.web_base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            pages,
            timing: ProbeTiming {
                page_load: Duration::from_secs(config.page_load_timeout_secs),
                wait: Duration::from_secs(config.wait_timeout_secs),
                suggestion_settle: Duration::from_millis(config.suggestion_settle_ms),
            },
            renderer_available: true,
        })
    }

    /// Record the outcome of the startup renderer check.
    #[must_use]
    pub fn with_renderer_available(mut self, available: bool) -> Self {
        self.renderer_available = available;
        self
    }
}

/// Everything a probe needs: both tiers and the settings. Cheap to clone.
#[derive(Clone)]
pub struct ProbeContext {
    api: Arc<dyn PlatformApi>,
    launcher: Arc<dyn SessionLauncher>,
    settings: Arc<ProbeSettings>,
}

impl ProbeContext {
    /// Bundle the tiers and settings shared by every probe.
    #[must_use]
    pub fn new(
        api: Arc<dyn PlatformApi>,
        launcher: Arc<dyn SessionLauncher>,
        settings: ProbeSettings,
    ) -> Self {
        Self {
            api,
            launcher,
            settings: Arc::new(settings),
        }
    }

    pub(crate) fn api(&self) -> &dyn PlatformApi {
        self.api.as_ref()
    }

    pub(crate) fn pages(&self) -> &PlatformPages {
        &self.settings.pages
    }

    pub(crate) fn timing(&self) -> ProbeTiming {
        self.settings.timing
    }
}

/// The browser-driven half of a probe.
#[async_trait]
pub(crate) trait Observation: Send + Sync {
    /// Drive the session and interpret what renders.
    async fn script(
        &self,
        session: &dyn BrowserSession,
        handle: &Handle,
    ) -> shadowcheck_browser::Result<ProbeOutcome>;

    /// Verdict when a navigation or an expected element times out.
    fn on_timeout(&self) -> ProbeOutcome;
}

/// Run one observation in its own session and always release the session.
pub(crate) async fn observe(
    ctx: &ProbeContext,
    category: ProbeCategory,
    observation: &dyn Observation,
    handle: &Handle,
) -> ProbeOutcome {
    if !ctx.settings.renderer_available {
        tracing::debug!(probe = %category, "Renderer unavailable, skipping observation");
        return ProbeOutcome::indeterminate(SCRAPING_UNAVAILABLE);
    }

    let session = match ctx.launcher.launch().await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(probe = %category, error = %e, "Could not start browser session");
            return ProbeOutcome::error(e.to_string());
        }
    };

    let result = observation.script(&*session, handle).await;

    match tokio::time::timeout(CLOSE_TIMEOUT, session.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(probe = %category, "Session did not close cleanly: {}", e),
        Err(_) => tracing::warn!(probe = %category, "Session close timed out"),
    }

    match result {
        Ok(outcome) => outcome,
        Err(e) if e.is_timeout() => {
            let outcome = observation.on_timeout();
            tracing::debug!(probe = %category, "Timed out ({}), treating as {:?}", e, outcome);
            outcome
        }
        Err(e) => {
            tracing::error!(probe = %category, error = %e, "Observation failed");
            ProbeOutcome::error(e.to_string())
        }
    }
}

/// Take the API's answer if it has one, otherwise run the observation.
pub(crate) async fn answer_or_observe<F>(
    category: ProbeCategory,
    answer: Lookup<ProbeOutcome>,
    observation: F,
) -> ProbeOutcome
where
    F: Future<Output = ProbeOutcome> + Send,
{
    match answer {
        Lookup::Answered(outcome) => {
            tracing::debug!(probe = %category, "Answered by API: {:?}", outcome);
            outcome
        }
        Lookup::Unavailable(reason) => {
            tracing::warn!(probe = %category, %reason, "API unavailable, observing web UI");
            observation.await
        }
    }
}
