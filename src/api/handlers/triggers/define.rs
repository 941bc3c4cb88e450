//! Define trigger: decide the next step of the session.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::challenge::{Decision, FailureReason, RoundResult, define, normalize_email, valid_email};

use super::state::TriggerState;
use super::types::{ChallengeDecisionResponse, DefineChallengeRequest};

#[utoipa::path(
    post,
    path = "/v1/triggers/define",
    request_body = DefineChallengeRequest,
    responses(
        (status = 200, description = "Decision for the session", body = ChallengeDecisionResponse),
        (status = 400, description = "Missing or invalid payload", body = String)
    ),
    tag = "triggers"
)]
pub async fn define_challenge(
    state: Extension<Arc<TriggerState>>,
    payload: Option<Json<DefineChallengeRequest>>,
) -> impl IntoResponse {
    let request: DefineChallengeRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let email = normalize_email(&request.principal_email);
    if !valid_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            "Invalid principal email".to_string(),
        )
            .into_response();
    }

    let prior_rounds: Vec<RoundResult> = request
        .prior_rounds
        .iter()
        .map(|round| RoundResult {
            answer_correct: round.answer_correct,
        })
        .collect();

    let decision = define(&prior_rounds, request.verified, state.policy());
    let response = match decision {
        Decision::IssueNextChallenge => ChallengeDecisionResponse {
            issue_new_challenge: true,
            answer_correct: None,
            fail_authentication: false,
        },
        Decision::Succeed => ChallengeDecisionResponse {
            issue_new_challenge: false,
            answer_correct: None,
            fail_authentication: false,
        },
        Decision::Fail(reason) => {
            match reason {
                FailureReason::UnverifiedPrincipal => {
                    warn!(email = %email, "define: principal not verified, failing session");
                }
                FailureReason::AttemptsExhausted => {
                    warn!(
                        email = %email,
                        rounds = prior_rounds.len(),
                        "define: attempt cap reached, failing session"
                    );
                }
            }
            ChallengeDecisionResponse {
                issue_new_challenge: false,
                answer_correct: None,
                fail_authentication: true,
            }
        }
    };

    debug!(
        email = %email,
        rounds = prior_rounds.len(),
        issue = response.issue_new_challenge,
        fail = response.fail_authentication,
        "define decision"
    );

    Json(response).into_response()
}

#[cfg(test)]
mod tests {
    use super::super::types::RoundSummary;
    use super::*;
    use crate::api::email::LogEmailSender;
    use crate::challenge::ChallengePolicy;
    use anyhow::{Context, Result};
    use axum::body::to_bytes;

    fn state() -> Extension<Arc<TriggerState>> {
        let policy = ChallengePolicy::new("no-reply@sesamo.dev".to_string());
        Extension(Arc::new(TriggerState::new(
            policy,
            Arc::new(LogEmailSender),
        )))
    }

    async fn decision_for(
        verified: bool,
        outcomes: &[bool],
    ) -> Result<ChallengeDecisionResponse> {
        let request = DefineChallengeRequest {
            principal_email: "alice@example.com".to_string(),
            verified,
            prior_rounds: outcomes
                .iter()
                .map(|&answer_correct| RoundSummary { answer_correct })
                .collect(),
        };
        let response = define_challenge(state(), Some(Json(request)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .context("failed to read response body")?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    #[tokio::test]
    async fn missing_payload_is_rejected() {
        let response = define_challenge(state(), None).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let request = DefineChallengeRequest {
            principal_email: "not-an-email".to_string(),
            verified: true,
            prior_rounds: Vec::new(),
        };
        let response = define_challenge(state(), Some(Json(request)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fresh_session_issues_challenge() -> Result<()> {
        let decision = decision_for(true, &[]).await?;
        assert!(decision.issue_new_challenge);
        assert!(!decision.fail_authentication);
        Ok(())
    }

    #[tokio::test]
    async fn matched_round_succeeds() -> Result<()> {
        let decision = decision_for(true, &[false, true]).await?;
        assert!(!decision.issue_new_challenge);
        assert!(!decision.fail_authentication);
        Ok(())
    }

    #[tokio::test]
    async fn exhausted_attempts_fail() -> Result<()> {
        let decision = decision_for(true, &[false, false, false]).await?;
        assert!(!decision.issue_new_challenge);
        assert!(decision.fail_authentication);
        Ok(())
    }

    #[tokio::test]
    async fn unverified_principal_fails() -> Result<()> {
        let decision = decision_for(false, &[]).await?;
        assert!(!decision.issue_new_challenge);
        assert!(decision.fail_authentication);
        Ok(())
    }
}
