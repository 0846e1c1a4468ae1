//! Detection orchestrator.
//!
//! The `Detector` runs one check end to end: normalize the handle, resolve
//! the profile, then run the four probes concurrently. Each probe writes to
//! its own slot of the [`CheckResult`], so one probe's failure or slowness
//! never changes another's outcome.

use crate::error::{Result, ScanError};
use crate::probes::{
    GhostProbe, Probe, ProbeContext, ProbeSettings, ReplyDeboostProbe, SearchProbe,
    SuggestionProbe,
};
use crate::profile::ProfileResolver;
use shadowcheck_api::PlatformApi;
use shadowcheck_browser::SessionLauncher;
use shadowcheck_core::{CheckResult, Handle, ProbeCategory};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Runs visibility checks for account handles.
pub struct Detector {
    resolver: ProfileResolver,
    search: SearchProbe,
    suggestion: SuggestionProbe,
    ghost: GhostProbe,
    reply_deboost: ReplyDeboostProbe,
}

impl Detector {
    /// Create a detector over the API tier and a browser session launcher.
    #[must_use]
    pub fn new(
        api: Arc<dyn PlatformApi>,
        launcher: Arc<dyn SessionLauncher>,
        settings: ProbeSettings,
    ) -> Self {
        let ctx = ProbeContext::new(api.clone(), launcher, settings);
        Self {
            resolver: ProfileResolver::new(api),
            search: SearchProbe::new(ctx.clone()),
            suggestion: SuggestionProbe::new(ctx.clone()),
            ghost: GhostProbe::new(ctx.clone()),
            reply_deboost: ReplyDeboostProbe::new(ctx),
        }
    }

    /// Check a raw, user-supplied handle (leading `@` and whitespace allowed).
    ///
    /// # Errors
    /// - [`ScanError::InvalidHandle`] if nothing checkable remains after normalization
    /// - [`ScanError::Profile`] if the profile cannot be resolved
    pub async fn check(&self, raw: &str) -> Result<CheckResult> {
        let handle = Handle::parse(raw).map_err(ScanError::InvalidHandle)?;
        self.check_handle(&handle).await
    }

    /// Check an already-normalized handle.
    pub async fn check_handle(&self, handle: &Handle) -> Result<CheckResult> {
        let span = tracing::info_span!("check", handle = %handle);
        self.run_check(handle).instrument(span).await
    }

    async fn run_check(&self, handle: &Handle) -> Result<CheckResult> {
        let started = Instant::now();
        tracing::info!("Starting visibility check");

        let profile = self.resolver.resolve(handle).await?;

        let (search, suggestion, ghost, reply_deboost) = tokio::join!(
            self.search.run(handle),
            self.suggestion.run(handle),
            self.ghost.run(handle),
            self.reply_deboost.run(handle),
        );

        let result = CheckResult {
            profile,
            search,
            suggestion,
            ghost,
            reply_deboost,
        };

        for category in ProbeCategory::ALL {
            tracing::info!(probe = %category, "{}", result.label(category));
        }
        tracing::info!("Check finished in {}ms", started.elapsed().as_millis());

        Ok(result)
    }
}
