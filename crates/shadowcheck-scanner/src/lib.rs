//! Shadowcheck Scanner - visibility-restriction detection.
//!
//! This crate runs the detection pipeline for one account handle: it resolves
//! the account's profile through the structured API and runs four independent
//! probes, each of which asks the API first and falls back to watching the
//! public web UI in a fresh headless browser when the API cannot answer.
//!
//! # Probes
//!
//! - Search visibility: do the account's posts show up in live search?
//! - Suggestion visibility: does the account show up in type-ahead suggestions?
//! - Reply visibility ("ghost"): do the account's replies render in their thread?
//! - Reply ranking ("deboost"): are replies collapsed behind "Show more replies"?
//!
//! A probe never fails the check. Whatever goes wrong inside it ends up as an
//! `Indeterminate` or `ProbeError` outcome; only profile resolution is fatal.
//!
//! # Example
//!
//! ```rust,ignore
//! use shadowcheck_scanner::{Detector, ProbeSettings};
//! use std::sync::Arc;
//!
//! let detector = Detector::new(
//!     Arc::new(x_api_client),
//!     Arc::new(chromium_launcher),
//!     ProbeSettings::from_config(&config.browser),
//! );
//!
//! let result = detector.check("@jack").await?;
//! println!("{}", result.label(ProbeCategory::Search));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod pages;
pub mod probes;
pub mod profile;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use orchestrator::Detector;
pub use pages::{PlatformPages, SearchFilter};
pub use probes::{
    GhostProbe, Probe, ProbeContext, ProbeSettings, ProbeTiming, ReplyDeboostProbe, SearchProbe,
    SuggestionProbe,
};
pub use profile::ProfileResolver;
