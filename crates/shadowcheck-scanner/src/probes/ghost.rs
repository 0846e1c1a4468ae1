//! Reply visibility ("ghost ban").

use super::replies::{open_latest_reply, NO_RECENT_REPLIES};
use super::{observe, Observation, Probe, ProbeContext};
use crate::pages::REPLY_MARKER;
use async_trait::async_trait;
use shadowcheck_browser::BrowserSession;
use shadowcheck_core::{Handle, ProbeCategory, ProbeOutcome};

/// Do the account's replies render inside the thread they answer?
///
/// Observation only. Opens the thread of the latest reply and checks for a
/// rendered reply element; an empty thread means the reply is hidden.
pub struct GhostProbe {
    ctx: ProbeContext,
}

impl GhostProbe {
    /// Create the probe over shared context.
    #[must_use]
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Probe for GhostProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::Ghost
    }

    async fn run(&self, handle: &Handle) -> ProbeOutcome {
        observe(&self.ctx, self.category(), self, handle).await
    }
}

#[async_trait]
impl Observation for GhostProbe {
    async fn script(
        &self,
        session: &dyn BrowserSession,
        handle: &Handle,
    ) -> shadowcheck_browser::Result<ProbeOutcome> {
        let thread = open_latest_reply(&self.ctx, session, handle).await?;
        if let Some(outcome) = thread.unavailable_outcome() {
            return Ok(outcome);
        }

        let rendered = session.element_exists(REPLY_MARKER).await?;
        Ok(ProbeOutcome::from_restricted(!rendered))
    }

    fn on_timeout(&self) -> ProbeOutcome {
        ProbeOutcome::indeterminate(NO_RECENT_REPLIES)
    }
}
