//! Headless browser sessions for observational probes.
//!
//! Every session is an isolated, disposable Chromium instance with its own
//! profile directory and client identity. Probes talk to sessions through the
//! [`BrowserActions`] trait so they can be exercised against scripted fakes.

pub mod actions;
pub mod engine;
pub mod error;
pub mod fingerprint;

pub use actions::{renderer_available, BrowserActions, BrowserSession, SessionLauncher};
pub use engine::{ChromiumLauncher, ChromiumSession};
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
