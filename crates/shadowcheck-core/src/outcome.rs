//! Probe verdicts and the composite check result.

use crate::types::ProfileSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict of a single restriction probe.
///
/// `Indeterminate` means the probe could not gather enough evidence and is a
/// valid final answer; `ProbeError` means something unexpected went wrong
/// while probing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Evidence of the restriction was found
    Restricted,
    /// Evidence that the restriction is not in place was found
    NotRestricted,
    /// Not enough evidence either way
    Indeterminate(String),
    /// The probe failed unexpectedly
    ProbeError(String),
}

impl ProbeOutcome {
    /// Shorthand for an indeterminate outcome.
    #[must_use]
    pub fn indeterminate(reason: impl Into<String>) -> Self {
        Self::Indeterminate(reason.into())
    }

    /// Shorthand for a probe error.
    #[must_use]
    pub fn error(reason: impl Into<String>) -> Self {
        Self::ProbeError(reason.into())
    }

    /// Map a boolean "restriction observed" into a definite verdict.
    #[must_use]
    pub fn from_restricted(restricted: bool) -> Self {
        if restricted {
            Self::Restricted
        } else {
            Self::NotRestricted
        }
    }

    /// Whether the outcome is `Restricted` or `NotRestricted`.
    #[must_use]
    pub fn is_definite(&self) -> bool {
        matches!(self, Self::Restricted | Self::NotRestricted)
    }
}

/// The four restriction categories a check reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeCategory {
    /// Posts missing from live search
    Search,
    /// Account missing from type-ahead suggestions
    Suggestion,
    /// Replies hidden from other viewers of the thread
    Ghost,
    /// Replies collapsed behind "show more replies"
    ReplyDeboost,
}

impl ProbeCategory {
    /// All categories in reporting order.
    pub const ALL: [Self; 4] = [Self::Search, Self::Suggestion, Self::Ghost, Self::ReplyDeboost];

    /// Human-readable label for an outcome in this category.
    #[must_use]
    pub fn label(self, outcome: &ProbeOutcome) -> String {
        match outcome {
            ProbeOutcome::NotRestricted => match self {
                Self::Search => "No search ban".to_string(),
                Self::Suggestion => "No suggestion ban".to_string(),
                Self::Ghost => "No ghost ban".to_string(),
                Self::ReplyDeboost => "No reply deboost".to_string(),
            },
            ProbeOutcome::Restricted => match self {
                Self::Search => "Search ban detected".to_string(),
                Self::Suggestion => "Suggestion ban detected".to_string(),
                Self::Ghost => "Ghost ban detected".to_string(),
                Self::ReplyDeboost => "Reply deboost detected".to_string(),
            },
            ProbeOutcome::Indeterminate(reason) => format!("Unable to detect ({reason})"),
            ProbeOutcome::ProbeError(_) => format!("Error checking {}", self.noun()),
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Search => "search ban",
            Self::Suggestion => "suggestion ban",
            Self::Ghost => "ghost ban",
            Self::ReplyDeboost => "reply deboost",
        }
    }
}

impl fmt::Display for ProbeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Composite result of one check: profile metadata plus one verdict per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Account metadata
    pub profile: ProfileSummary,
    /// Search-visibility verdict
    pub search: ProbeOutcome,
    /// Suggestion-visibility verdict
    pub suggestion: ProbeOutcome,
    /// Reply-visibility ("ghost") verdict
    pub ghost: ProbeOutcome,
    /// Reply-ranking ("deboost") verdict
    pub reply_deboost: ProbeOutcome,
}

impl CheckResult {
    /// Verdict for a category.
    #[must_use]
    pub fn outcome(&self, category: ProbeCategory) -> &ProbeOutcome {
        match category {
            ProbeCategory::Search => &self.search,
            ProbeCategory::Suggestion => &self.suggestion,
            ProbeCategory::Ghost => &self.ghost,
            ProbeCategory::ReplyDeboost => &self.reply_deboost,
        }
    }

    /// Human-readable label for a category's verdict.
    #[must_use]
    pub fn label(&self, category: ProbeCategory) -> String {
        category.label(self.outcome(category))
    }
}
