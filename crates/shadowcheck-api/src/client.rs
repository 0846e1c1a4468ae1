//! HTTP client for the X API v2.
//!
//! Wraps `reqwest` with bearer authentication, explicit timeouts and typed
//! response decoding. Probe lookups never return errors: every failure is
//! folded into [`Lookup::Unavailable`] so the caller can fall back. The
//! profile lookup is the exception, since nothing can stand in for it.

use crate::error::{ApiError, Result};
use crate::lookup::Lookup;
use crate::types::{PostStub, SearchEnvelope, UserEnvelope};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use shadowcheck_core::{ApiConfig, Handle, ProfileSummary, Secret};
use std::time::Duration;

const PROFILE_FIELDS: &str = "public_metrics,profile_image_url,description,name";
const SEARCH_MAX_RESULTS: &str = "10";

/// The structured-API tier used by the profile resolver and the probes.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Canonical profile metadata. Failure is fatal for the check.
    async fn lookup_profile(&self, handle: &Handle) -> Result<ProfileSummary>;

    /// Recent posts authored by the handle.
    async fn search_recent(&self, handle: &Handle) -> Lookup<Vec<PostStub>>;

    /// Whether the API resolves the handle to an account.
    async fn account_exists(&self, handle: &Handle) -> Lookup<bool>;
}

/// Client for the X API v2.
///
/// Use [`XApiClient::from_config`] for production or
/// [`XApiClient::with_base_url`] to point at a mock server in tests.
pub struct XApiClient {
    client: Client,
    bearer_token: Secret,
    base_url: Url,
}

impl XApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns [`ApiError::MissingCredential`] when no bearer token is configured.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let token = config
            .bearer_token
            .clone()
            .ok_or(ApiError::MissingCredential)?;
        Self::build(
            token,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    /// Build a client against a custom base URL (for testing with wiremock).
    pub fn with_base_url(bearer_token: &str, timeout_secs: u64, base_url: &str) -> Result<Self> {
        Self::build(
            Secret::new(bearer_token),
            base_url,
            Duration::from_secs(timeout_secs),
            Duration::from_secs(timeout_secs.min(10)),
        )
    }

    fn build(
        bearer_token: Secret,
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        // Exactly one trailing slash so joined paths append instead of replacing
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            bearer_token,
            base_url,
        })
    }

    fn user_url(&self, handle: &Handle) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["2", "users", "by", "username", handle.as_str()]);
        }
        url
    }

    fn search_url(&self, handle: &Handle) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["2", "tweets", "search", "recent"]);
        }
        url.query_pairs_mut()
            .append_pair("query", &format!("from:{handle}"))
            .append_pair("max_results", SEARCH_MAX_RESULTS);
        url
    }

    async fn get(&self, url: Url) -> std::result::Result<Response, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .bearer_auth(self.bearer_token.expose())
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let reset = response
                .headers()
                .get("x-rate-limit-reset")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::warn!(reset = %reset, "X API rate limit reached");
        }

        Ok(response)
    }
}

#[async_trait]
impl PlatformApi for XApiClient {
    async fn lookup_profile(&self, handle: &Handle) -> Result<ProfileSummary> {
        let mut url = self.user_url(handle);
        url.query_pairs_mut()
            .append_pair("user.fields", PROFILE_FIELDS);

        let response = self.get(url).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                handle: handle.to_string(),
            });
        }
        if status != StatusCode::OK {
            return Err(ApiError::Upstream {
                status: status.as_u16(),
            });
        }

        let envelope: UserEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let user = envelope.data.ok_or_else(|| ApiError::NotFound {
            handle: handle.to_string(),
        })?;

        Ok(user.into_summary(handle.as_str()))
    }

    async fn search_recent(&self, handle: &Handle) -> Lookup<Vec<PostStub>> {
        let response = match self.get(self.search_url(handle)).await {
            Ok(response) => response,
            Err(e) => return Lookup::Unavailable(format!("search request failed: {e}")),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Lookup::Unavailable(format!("search returned HTTP {}", status.as_u16()));
        }

        match response.json::<SearchEnvelope>().await {
            Ok(envelope) => Lookup::Answered(envelope.data),
            Err(e) => Lookup::Unavailable(format!("search response undecodable: {e}")),
        }
    }

    async fn account_exists(&self, handle: &Handle) -> Lookup<bool> {
        let response = match self.get(self.user_url(handle)).await {
            Ok(response) => response,
            Err(e) => return Lookup::Unavailable(format!("user request failed: {e}")),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Lookup::Unavailable(format!("user lookup returned HTTP {}", status.as_u16()));
        }

        match response.json::<UserEnvelope>().await {
            Ok(envelope) => Lookup::Answered(envelope.data.is_some()),
            Err(e) => Lookup::Unavailable(format!("user response undecodable: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> XApiClient {
        XApiClient::with_base_url("test-token", 5, "https://api.x.com/").expect("create client")
    }

    #[test]
    fn test_user_url() {
        let handle = Handle::parse("@Jack").expect("handle");
        assert_eq!(
            client().user_url(&handle).as_str(),
            "https://api.x.com/2/users/by/username/Jack"
        );
    }

    #[test]
    fn test_search_url() {
        let handle = Handle::parse("jack").expect("handle");
        assert_eq!(
            client().search_url(&handle).as_str(),
            "https://api.x.com/2/tweets/search/recent?query=from%3Ajack&max_results=10"
        );
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let client = XApiClient::with_base_url("t", 5, "http://127.0.0.1:9000/proxy")
            .expect("create client");
        let handle = Handle::parse("jack").expect("handle");
        assert_eq!(
            client.user_url(&handle).as_str(),
            "http://127.0.0.1:9000/proxy/2/users/by/username/jack"
        );
    }

    #[test]
    fn test_from_config_requires_token() {
        let config = ApiConfig::default();
        assert!(matches!(
            XApiClient::from_config(&config),
            Err(ApiError::MissingCredential)
        ));

        let config = ApiConfig {
            bearer_token: Some(Secret::new("token")),
            ..ApiConfig::default()
        };
        assert!(XApiClient::from_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            XApiClient::with_base_url("t", 5, "not a url"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }
}
