//! Shadowcheck API - clients for the services the checker talks to over HTTP.
//!
//! - [`client`] - the platform's structured data API (X API v2), the fast
//!   authoritative tier of every probe that has one
//! - [`verify`] - human-verification token validation (reCAPTCHA)
//!
//! Both are reached through traits ([`PlatformApi`], [`HumanVerifier`]) so the
//! detection pipeline and the HTTP shell can be tested against fakes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod error;
pub mod lookup;
pub mod types;
pub mod verify;

pub use client::{PlatformApi, XApiClient};
pub use error::{ApiError, Result, VerifyError};
pub use lookup::Lookup;
pub use types::PostStub;
pub use verify::{HumanVerifier, RecaptchaVerifier};
