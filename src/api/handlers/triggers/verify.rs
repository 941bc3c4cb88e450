//! Verify trigger: constant-time check of the submitted answer.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::debug;

use crate::challenge::{ChallengeRound, Verification, normalize_email, valid_email, verify};

use super::state::TriggerState;
use super::types::{ChallengeDecisionResponse, VerifyChallengeRequest};

#[utoipa::path(
    post,
    path = "/v1/triggers/verify",
    request_body = VerifyChallengeRequest,
    responses(
        (status = 200, description = "Whether the answer matched", body = ChallengeDecisionResponse),
        (status = 400, description = "Missing or invalid payload", body = String)
    ),
    tag = "triggers"
)]
pub async fn verify_challenge(
    state: Extension<Arc<TriggerState>>,
    payload: Option<Json<VerifyChallengeRequest>>,
) -> impl IntoResponse {
    let request: VerifyChallengeRequest = match payload {
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

    let round_index = u32::try_from(request.prior_rounds.len())
        .unwrap_or(u32::MAX)
        .saturating_add(1);

    let mut round = ChallengeRound::new(
        round_index,
        SecretString::from(request.expected_answer),
        request.issued_at,
    );
    if request.consumed {
        round.mark_consumed();
    }

    let now = crate::challenge::now_unix_seconds();
    let matched = verify(&round, &request.challenge_answer, now, state.policy())
        == Verification::Matched;

    debug!(email = %email, round_index, matched, "verify decision");

    Json(ChallengeDecisionResponse {
        issue_new_challenge: false,
        answer_correct: Some(matched),
        fail_authentication: false,
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::email::LogEmailSender;
    use crate::challenge::ChallengePolicy;
    use anyhow::Result;
    use axum::body::to_bytes;

    fn state() -> Extension<Arc<TriggerState>> {
        let policy = ChallengePolicy::new("no-reply@sesamo.dev".to_string());
        Extension(Arc::new(TriggerState::new(
            policy,
            Arc::new(LogEmailSender),
        )))
    }

    fn request(expected: &str, answer: &str, issued_at: i64) -> VerifyChallengeRequest {
        VerifyChallengeRequest {
            principal_email: "alice@example.com".to_string(),
            expected_answer: expected.to_string(),
            issued_at,
            consumed: false,
            challenge_answer: answer.to_string(),
            prior_rounds: Vec::new(),
        }
    }

    async fn answer_correct(request: VerifyChallengeRequest) -> Result<bool> {
        let response = verify_challenge(state(), Some(Json(request)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let decision: ChallengeDecisionResponse = serde_json::from_slice(&bytes)?;
        assert!(!decision.issue_new_challenge);
        assert!(!decision.fail_authentication);
        Ok(decision.answer_correct.unwrap_or_default())
    }

    fn now() -> i64 {
        crate::challenge::now_unix_seconds()
    }

    #[tokio::test]
    async fn missing_payload_is_rejected() {
        let response = verify_challenge(state(), None).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn matching_answer_is_accepted() -> Result<()> {
        assert!(answer_correct(request("123456", "123456", now())).await?);
        Ok(())
    }

    #[tokio::test]
    async fn mismatching_answer_is_rejected() -> Result<()> {
        assert!(!answer_correct(request("123456", "654321", now())).await?);
        Ok(())
    }

    #[tokio::test]
    async fn consumed_round_is_rejected() -> Result<()> {
        let mut request = request("123456", "123456", now());
        request.consumed = true;
        assert!(!answer_correct(request).await?);
        Ok(())
    }

    #[tokio::test]
    async fn expired_code_is_rejected() -> Result<()> {
        let stale = now() - 3_600;
        assert!(!answer_correct(request("123456", "123456", stale)).await?);
        Ok(())
    }
}
