//! Search visibility.

use super::{answer_or_observe, observe, Observation, Probe, ProbeContext};
use crate::pages::{SearchFilter, POST_MARKER};
use async_trait::async_trait;
use shadowcheck_api::Lookup;
use shadowcheck_browser::BrowserSession;
use shadowcheck_core::{Handle, ProbeCategory, ProbeOutcome};

/// Reason reported when the profile itself shows nothing to search for.
pub(crate) const NO_PROFILE_POSTS: &str = "no recent tweets on profile";

/// Do the account's posts show up in live search?
///
/// API tier: recent-post search scoped to the author. Any returned post
/// means searchable; an answered empty result means restricted.
///
/// Observation: the profile must render at least one post first, otherwise
/// an empty live search would prove nothing.
pub struct SearchProbe {
    ctx: ProbeContext,
}

impl SearchProbe {
    /// Create the probe over shared context.
    #[must_use]
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }

    async fn ask_api(&self, handle: &Handle) -> Lookup<ProbeOutcome> {
        self.ctx
            .api()
            .search_recent(handle)
            .await
            .map(|posts| ProbeOutcome::from_restricted(posts.is_empty()))
    }
}

#[async_trait]
impl Probe for SearchProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::Search
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
impl Observation for SearchProbe {
    async fn script(
        &self,
        session: &dyn BrowserSession,
        handle: &Handle,
    ) -> shadowcheck_browser::Result<ProbeOutcome> {
        let pages = self.ctx.pages();
        let timing = self.ctx.timing();

        session
            .navigate(&pages.profile(handle), timing.page_load)
            .await?;
        if !session.element_exists(POST_MARKER).await? {
            return Ok(ProbeOutcome::indeterminate(NO_PROFILE_POSTS));
        }

        session
            .navigate(
                &pages.live_search(handle, SearchFilter::Posts),
                timing.page_load,
            )
            .await?;

        match session.wait_for_selector(POST_MARKER, timing.wait).await {
            Ok(()) => Ok(ProbeOutcome::NotRestricted),
            Err(e) if e.is_timeout() => Ok(ProbeOutcome::Restricted),
            Err(e) => Err(e),
        }
    }

    fn on_timeout(&self) -> ProbeOutcome {
        ProbeOutcome::Restricted
    }
}
