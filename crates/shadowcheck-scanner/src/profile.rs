//! Profile resolution.

use crate::error::Result;
use shadowcheck_api::PlatformApi;
use shadowcheck_core::{Handle, ProfileSummary};
use std::sync::Arc;

/// Resolves a handle to its public profile through the structured API.
///
/// There is no observational fallback here: if the API cannot produce a
/// profile the whole check fails.
#[derive(Clone)]
pub struct ProfileResolver {
    api: Arc<dyn PlatformApi>,
}

impl ProfileResolver {
    /// Create a resolver over the given API tier.
    #[must_use]
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }

    /// Look up the profile. Missing fields come back as placeholders.
    pub async fn resolve(&self, handle: &Handle) -> Result<ProfileSummary> {
        let profile = self.api.lookup_profile(handle).await?;
        tracing::debug!(
            handle = %handle,
            followers = profile.followers(),
            "Resolved profile"
        );
        Ok(profile)
    }
}
