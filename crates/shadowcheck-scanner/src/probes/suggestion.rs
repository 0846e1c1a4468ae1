//! Suggestion visibility.

use super::{answer_or_observe, observe, Observation, Probe, ProbeContext};
use crate::pages::SEARCH_BOX;
use async_trait::async_trait;
use shadowcheck_api::Lookup;
use shadowcheck_browser::BrowserSession;
use shadowcheck_core::{Handle, ProbeCategory, ProbeOutcome};

/// Does the account show up when someone starts typing it into search?
///
/// The API tier only proves the account resolves; the web UI is what
/// actually exposes the type-ahead list.
pub struct SuggestionProbe {
    ctx: ProbeContext,
}

impl SuggestionProbe {
    /// Create the probe over shared context.
    #[must_use]
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }

    async fn ask_api(&self, handle: &Handle) -> Lookup<ProbeOutcome> {
        self.ctx
            .api()
            .account_exists(handle)
            .await
            .map(|exists| ProbeOutcome::from_restricted(!exists))
    }
}

#[async_trait]
impl Probe for SuggestionProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::Suggestion
    }

    async fn run(&self, handle: &Handle) -> ProbeOutcome {
        let answer = self.ask_api(handle).await;
        answer_or_observe(
            self.category(),
            answer,
            observe(&self.ctx, self.category(), self, handle),
        )
        .await
    }
}

#[async_trait]
impl Observation for SuggestionProbe {
    async fn script(
        &self,
        session: &dyn BrowserSession,
        handle: &Handle,
    ) -> shadowcheck_browser::Result<ProbeOutcome> {
        let timing = self.ctx.timing();

        session
            .navigate(&self.ctx.pages().explore(), timing.page_load)
            .await?;
        session.wait_for_selector(SEARCH_BOX, timing.wait).await?;
        session.click(SEARCH_BOX).await?;
        session.type_text(SEARCH_BOX, &handle.mention()).await?;

        // Suggestions render asynchronously after the last keystroke
        tokio::time::sleep(timing.suggestion_settle).await;

        let text = session.body_text().await?;
        Ok(ProbeOutcome::from_restricted(!handle.is_mentioned_in(&text)))
    }

    fn on_timeout(&self) -> ProbeOutcome {
        ProbeOutcome::Restricted
    }
}
