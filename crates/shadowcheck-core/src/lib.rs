//! Shadowcheck Core - Foundation crate for the shadowcheck visibility checker.
//!
//! This crate provides the domain types, error handling and configuration
//! management that the browser, API, scanner and server crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Newtypes shared across crates (`Handle`, `ProfileSummary`, `Timestamp`)
//! - [`outcome`] - Probe verdicts and the composite `CheckResult`
//!
//! # Example
//!
//! ```rust
//! use shadowcheck_core::{Handle, ProbeCategory, ProbeOutcome};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let handle = Handle::parse("@jack")?;
//! assert_eq!(handle.as_str(), "jack");
//!
//! let label = ProbeCategory::Search.label(&ProbeOutcome::NotRestricted);
//! assert_eq!(label, "No search ban");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod outcome;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, AppConfig, BrowserConfig, Secret, ServerConfig, VerificationConfig};
pub use error::{ConfigError, ConfigResult, CoreError, Result};
pub use outcome::{CheckResult, ProbeCategory, ProbeOutcome};
pub use types::{Handle, ProfileSummary, Timestamp};
