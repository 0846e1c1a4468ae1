//! Human-verification (reCAPTCHA) token validation.

use crate::error::VerifyError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shadowcheck_core::{Secret, VerificationConfig};
use std::time::Duration;

/// Validates a human-verification token before a public check runs.
#[async_trait]
pub trait HumanVerifier: Send + Sync {
    /// `Ok(true)` if the token is accepted, `Ok(false)` if rejected.
    async fn verify(&self, token: &str) -> Result<bool, VerifyError>;
}

/// Verifier backed by Google's `siteverify` endpoint.
pub struct RecaptchaVerifier {
    client: Client,
    verify_url: String,
    secret: Option<Secret>,
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

impl RecaptchaVerifier {
    /// Build a verifier from configuration. A missing secret is reported on
    /// first use rather than here, so the trusted endpoints still work
    /// without one.
    pub fn from_config(config: &VerificationConfig) -> Result<Self, VerifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            verify_url: config.verify_url.clone(),
            secret: config.secret.clone(),
        })
    }
}

#[async_trait]
impl HumanVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<bool, VerifyError> {
        let secret = self.secret.as_ref().ok_or(VerifyError::NotConfigured)?;

        let response = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", secret.expose()), ("response", token)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::Service(format!("HTTP {}", status.as_u16())));
        }

        let body: SiteVerifyResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::Service(format!("undecodable response: {e}")))?;

        if !body.success {
            tracing::info!(error_codes = ?body.error_codes, "verification token rejected");
        }
        Ok(body.success)
    }
}
