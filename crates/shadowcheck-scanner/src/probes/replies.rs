//! Shared first half of the reply probes: find the account's latest reply
//! and open its thread.

use super::ProbeContext;
use crate::pages::{SearchFilter, POST_MARKER, REPLY_LINK};
use shadowcheck_browser::BrowserSession;
use shadowcheck_core::{Handle, ProbeOutcome};

pub(crate) const NO_RECENT_REPLIES: &str = "no recent replies";
pub(crate) const NO_REPLY_URL: &str = "could not extract reply URL";

/// Where the session ended up after looking for a reply thread.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ReplyThread {
    /// The thread of the latest reply is loaded
    Opened,
    /// The reply search rendered nothing in time
    NoReplies,
    /// A reply rendered but carried no usable permalink
    NoLink,
}

impl ReplyThread {
    /// Outcome for the cases where there is no thread to inspect.
    pub(crate) fn unavailable_outcome(&self) -> Option<ProbeOutcome> {
        match self {
            Self::Opened => None,
            Self::NoReplies => Some(ProbeOutcome::indeterminate(NO_RECENT_REPLIES)),
            Self::NoLink => Some(ProbeOutcome::indeterminate(NO_REPLY_URL)),
        }
    }
}

pub(crate) async fn open_latest_reply(
    ctx: &ProbeContext,
    session: &dyn BrowserSession,
    handle: &Handle,
) -> shadowcheck_browser::Result<ReplyThread> {
    let pages = ctx.pages();
    let timing = ctx.timing();

    session
        .navigate(
            &pages.live_search(handle, SearchFilter::Replies),
            timing.page_load,
        )
        .await?;

    match session.wait_for_selector(POST_MARKER, timing.wait).await {
        Ok(()) => {}
        Err(e) if e.is_timeout() => return Ok(ReplyThread::NoReplies),
        Err(e) => return Err(e),
    }

    let Some(href) = session.attribute(REPLY_LINK, "href").await? else {
        return Ok(ReplyThread::NoLink);
    };
    let thread_url = pages.resolve(&href)?;
    tracing::debug!(handle = %handle, url = %thread_url, "Opening reply thread");

    session
        .navigate(&thread_url, timing.page_load)
        .await?;
    Ok(ReplyThread::Opened)
}
