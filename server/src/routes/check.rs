//! Check endpoints and the result payload.

use crate::error::ServerError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use shadowcheck_core::{CheckResult, ProbeCategory};

#[derive(Debug, Deserialize)]
pub(super) struct CheckRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    recaptcha: Option<String>,
}

/// Body of a successful check.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub results: CheckSummary,
}

/// Flattened, labeled view of a [`CheckResult`].
#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub username: String,
    pub nickname: String,
    pub followers: u64,
    pub description: String,
    pub avatar: String,
    pub search_ban: String,
    pub suggestion_ban: String,
    pub ghost_ban: String,
    pub reply_deboost: String,
}

impl From<&CheckResult> for CheckSummary {
    fn from(result: &CheckResult) -> Self {
        let profile = &result.profile;
        Self {
            username: profile.handle().to_string(),
            nickname: profile.display_name().to_string(),
            followers: profile.followers(),
            description: profile.bio().to_string(),
            avatar: profile.avatar_url().to_string(),
            search_ban: result.label(ProbeCategory::Search),
            suggestion_ban: result.label(ProbeCategory::Suggestion),
            ghost_ban: result.label(ProbeCategory::Ghost),
            reply_deboost: result.label(ProbeCategory::ReplyDeboost),
        }
    }
}

/// `POST /check`: verify the caller is human, then run the check.
pub(super) async fn check_verified(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ServerError> {
    let token = request
        .recaptcha
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ServerError::VerificationRequired)?;

    match state.verifier.verify(token).await {
        Ok(true) => {}
        Ok(false) => return Err(ServerError::VerificationFailed),
        Err(e) => return Err(ServerError::VerificationService(e)),
    }

    run_check(&state, &request.username).await
}

/// `GET /check/{username}`: unverified check for trusted callers.
pub(super) async fn check_trusted(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<CheckResponse>, ServerError> {
    run_check(&state, &username).await
}

async fn run_check(state: &AppState, username: &str) -> Result<Json<CheckResponse>, ServerError> {
    let result = state.detector.check(username).await?;
    Ok(Json(CheckResponse {
        results: CheckSummary::from(&result),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowcheck_core::{ProbeOutcome, ProfileSummary};

    #[test]
    fn test_summary_labels_and_placeholders() {
        let result = CheckResult {
            profile: ProfileSummary::new("jack").with_followers(Some(42)),
            search: ProbeOutcome::NotRestricted,
            suggestion: ProbeOutcome::Restricted,
            ghost: ProbeOutcome::indeterminate("no recent replies"),
            reply_deboost: ProbeOutcome::error("net::ERR_ABORTED"),
        };

        let json = serde_json::to_value(CheckResponse {
            results: CheckSummary::from(&result),
        })
        .expect("serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "results": {
                    "username": "jack",
                    "nickname": "N/A",
                    "followers": 42,
                    "description": "N/A",
                    "avatar": "https://via.placeholder.com/50",
                    "search_ban": "No search ban",
                    "suggestion_ban": "Suggestion ban detected",
                    "ghost_ban": "Unable to detect (no recent replies)",
                    "reply_deboost": "Error checking reply deboost"
                }
            })
        );
    }
}
