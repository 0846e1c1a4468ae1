//! Reply ranking ("reply deboosting").

use super::replies::{open_latest_reply, NO_RECENT_REPLIES};
use super::{observe, Observation, Probe, ProbeContext};
use crate::pages::COLLAPSED_REPLIES_TEXT;
use async_trait::async_trait;
use shadowcheck_browser::BrowserSession;
use shadowcheck_core::{Handle, ProbeCategory, ProbeOutcome};

/// Are the account's replies pushed behind the "Show more replies" control?
pub struct ReplyDeboostProbe {
    ctx: ProbeContext,
}

impl ReplyDeboostProbe {
    /// Create the probe over shared context.
    #[must_use]
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }
}

fn mentions_collapsed_replies(text: &str) -> bool {
    text.contains(COLLAPSED_REPLIES_TEXT)
}

#[async_trait]
impl Probe for ReplyDeboostProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::ReplyDeboost
    }

    async fn run(&self, handle: &Handle) -> ProbeOutcome {
        observe(&self.ctx, self.category(), self, handle).await
    }
}

#[async_trait]
impl Observation for ReplyDeboostProbe {
    async fn script(
        &self,
        session: &dyn BrowserSession,
        handle: &Handle,
    ) -> shadowcheck_browser::Result<ProbeOutcome> {
        let thread = open_latest_reply(&self.ctx, session, handle).await?;
        if let Some(outcome) = thread.unavailable_outcome() {
            return Ok(outcome);
        }

        let text = session.body_text().await?;
        Ok(ProbeOutcome::from_restricted(mentions_collapsed_replies(&text)))
    }

    fn on_timeout(&self) -> ProbeOutcome {
        ProbeOutcome::indeterminate(NO_RECENT_REPLIES)
    }
}
