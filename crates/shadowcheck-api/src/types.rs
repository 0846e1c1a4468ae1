//! Wire types for the X API v2 endpoints the checker uses.

use serde::Deserialize;
use shadowcheck_core::ProfileSummary;

/// A recent post returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostStub {
    /// Post ID
    pub id: String,
    /// Post text
    #[serde(default)]
    pub text: String,
}

/// `GET /2/tweets/search/recent` envelope. `data` is omitted when there are no results.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(default)]
    pub data: Vec<PostStub>,
}

/// `GET /2/users/by/username/{username}` envelope. `data` is omitted when the
/// user does not exist (the API reports that in `errors` with status 200).
#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub data: Option<ApiUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiUser {
    pub username: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub profile_image_url: Option<String>,
    pub public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PublicMetrics {
    pub followers_count: Option<u64>,
}

impl ApiUser {
    /// Convert to a summary, filling gaps with defaults. Empty strings count as missing.
    pub fn into_summary(self, requested: &str) -> ProfileSummary {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        ProfileSummary::new(non_empty(self.username).unwrap_or_else(|| requested.to_string()))
            .with_display_name(non_empty(self.name))
            .with_followers(self.public_metrics.and_then(|m| m.followers_count))
            .with_bio(non_empty(self.description))
            .with_avatar_url(non_empty(self.profile_image_url))
    }
}
