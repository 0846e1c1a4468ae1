//! Request failures and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shadowcheck_api::VerifyError;
use shadowcheck_scanner::ScanError;
use thiserror::Error;

/// Everything that can end a request without a result.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No verification token was supplied
    #[error("reCAPTCHA required")]
    VerificationRequired,

    /// The verification service rejected the token
    #[error("reCAPTCHA verification failed")]
    VerificationFailed,

    /// The verification service could not be consulted
    #[error("reCAPTCHA service error")]
    VerificationService(#[source] VerifyError),

    /// The check itself failed
    #[error(transparent)]
    Scan(#[from] ScanError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ServerError {
    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::VerificationRequired | Self::VerificationFailed => StatusCode::BAD_REQUEST,
            Self::VerificationService(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Scan(ScanError::InvalidHandle(_)) => StatusCode::BAD_REQUEST,
            Self::Scan(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Scan(ScanError::Profile(_)) => StatusCode::BAD_GATEWAY,
            Self::Scan(ScanError::InvalidBaseUrl { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                Self::VerificationService(source) => {
                    tracing::error!(error = %source, "{}", self);
                }
                _ => tracing::error!("{}", self),
            }
        } else {
            tracing::warn!("{}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowcheck_api::ApiError;
    use shadowcheck_core::CoreError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServerError::VerificationRequired, StatusCode::BAD_REQUEST),
            (ServerError::VerificationFailed, StatusCode::BAD_REQUEST),
            (
                ServerError::VerificationService(VerifyError::NotConfigured),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServerError::Scan(ScanError::InvalidHandle(CoreError::Validation(
                    "empty".to_string(),
                ))),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServerError::Scan(
                    ApiError::NotFound {
                        handle: "ghost".to_string(),
                    }
                    .into(),
                ),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::Scan(ApiError::Upstream { status: 429 }.into()),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }

    #[test]
    fn test_verification_messages() {
        assert_eq!(ServerError::VerificationRequired.to_string(), "reCAPTCHA required");
        assert_eq!(
            ServerError::VerificationFailed.to_string(),
            "reCAPTCHA verification failed"
        );
        assert_eq!(
            ServerError::VerificationService(VerifyError::Service("HTTP 503".to_string()))
                .to_string(),
            "reCAPTCHA service error"
        );
    }
}
