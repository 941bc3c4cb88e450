//! Create trigger: issue a one-time code for the next round.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::error;

use crate::challenge::{ChallengeError, issue, normalize_email, valid_email};

use super::state::TriggerState;
use super::types::{
    CreateChallengeRequest, CreateChallengeResponse, PrivateChallengeParameters,
    PublicChallengeParameters,
};

#[utoipa::path(
    post,
    path = "/v1/triggers/create",
    request_body = CreateChallengeRequest,
    responses(
        (status = 200, description = "Challenge issued; the code is in the private parameters", body = CreateChallengeResponse),
        (status = 400, description = "Missing or invalid payload", body = String),
        (status = 409, description = "Principal not verified", body = String),
        (status = 502, description = "Code delivery failed", body = String)
    ),
    tag = "triggers"
)]
pub async fn create_challenge(
    state: Extension<Arc<TriggerState>>,
    payload: Option<Json<CreateChallengeRequest>>,
) -> impl IntoResponse {
    let request: CreateChallengeRequest = match payload {
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

    // The define step fails unverified principals before this trigger runs;
    // reject here as well so a misbehaving provider cannot mint codes.
    if !request.verified {
        return (StatusCode::CONFLICT, "Principal not verified".to_string()).into_response();
    }

    let round_index = u32::try_from(request.prior_rounds.len())
        .unwrap_or(u32::MAX)
        .saturating_add(1);

    match issue(&email, round_index, state.policy(), state.sender()).await {
        Ok(issued) => {
            let response = CreateChallengeResponse {
                public_parameters: PublicChallengeParameters {
                    email: email.clone(),
                },
                private_parameters: PrivateChallengeParameters {
                    answer: issued.secret().expose_secret().to_string(),
                    issued_at: issued.issued_at(),
                },
                challenge_metadata: format!("EMAIL_OTP_ROUND_{round_index}"),
            };
            Json(response).into_response()
        }
        Err(ChallengeError::DeliveryFailure { source }) => {
            error!(email = %email, round_index, "code delivery failed: {source:#}");
            (StatusCode::BAD_GATEWAY, "Code delivery failed".to_string()).into_response()
        }
        Err(err) => {
            error!(email = %email, round_index, "challenge issuance failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Challenge issuance failed".to_string(),
            )
                .into_response()
        }
    }
}
