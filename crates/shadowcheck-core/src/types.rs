//! Shared types used across shadowcheck.
//!
//! This module defines common newtypes that provide type safety
//! and clear domain modeling.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Display name used when the platform returns none.
pub const DEFAULT_DISPLAY_NAME: &str = "N/A";

/// Bio used when the platform returns none.
pub const DEFAULT_BIO: &str = "N/A";

/// Avatar used when the platform returns none.
pub const DEFAULT_AVATAR_URL: &str = "https://via.placeholder.com/50";

/// Normalized account handle.
///
/// Leading `@` characters and surrounding whitespace are stripped; case is
/// preserved so the handle can be passed to the API and placed in URLs as
/// the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Parse and normalize a raw handle.
    ///
    /// # Errors
    /// Returns error if nothing is left after normalization, or if the handle
    /// contains whitespace or URL delimiters.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, CoreError> {
        let normalized = Self::normalize(raw.as_ref());
        Self::validate(normalized)?;
        Ok(Self(normalized.to_string()))
    }

    /// Strip surrounding whitespace and every leading `@`. Idempotent.
    #[must_use]
    pub fn normalize(raw: &str) -> &str {
        raw.trim().trim_start_matches('@')
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The handle as it is written in a mention, e.g. `@jack`.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("@{}", self.0)
    }

    /// Whether rendered page text mentions this handle, ignoring case.
    #[must_use]
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.mention().to_lowercase())
    }

    fn validate(handle: &str) -> Result<(), CoreError> {
        static HANDLE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex =
            HANDLE_REGEX.get_or_init(|| Regex::new(r"^[^\s/?#%]+$").expect("valid regex"));

        if handle.is_empty() {
            return Err(CoreError::Validation(
                "invalid handle: must not be empty".to_string(),
            ));
        }

        if regex.is_match(handle) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "invalid handle: must not contain whitespace or URL delimiters, got '{handle}'"
            )))
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Handle {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

/// Canonical account metadata returned by the profile lookup.
///
/// Built once per check. Missing fields fall back to the platform-neutral
/// defaults above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    handle: String,
    display_name: String,
    followers: u64,
    bio: String,
    avatar_url: String,
}

impl ProfileSummary {
    /// Create a summary with only the handle known.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            followers: 0,
            bio: DEFAULT_BIO.to_string(),
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
        }
    }

    /// Set the display name; `None` keeps the default.
    #[must_use]
    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        if let Some(name) = name {
            self.display_name = name;
        }
        self
    }

    /// Set the follower count; `None` keeps 0.
    #[must_use]
    pub fn with_followers(mut self, followers: Option<u64>) -> Self {
        if let Some(followers) = followers {
            self.followers = followers;
        }
        self
    }

    /// Set the bio; `None` keeps the default.
    #[must_use]
    pub fn with_bio(mut self, bio: Option<String>) -> Self {
        if let Some(bio) = bio {
            self.bio = bio;
        }
        self
    }

    /// Set the avatar URL; `None` keeps the placeholder.
    #[must_use]
    pub fn with_avatar_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.avatar_url = url;
        }
        self
    }

    /// Account handle as reported by the platform.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Follower count.
    #[must_use]
    pub fn followers(&self) -> u64 {
        self.followers
    }

    /// Bio text.
    #[must_use]
    pub fn bio(&self) -> &str {
        &self.bio
    }

    /// Avatar image URL.
    #[must_use]
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
