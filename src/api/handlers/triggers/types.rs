//! Request/response types for the trigger endpoints.
//!
//! The wire shape is provider-defined (camelCase); these types map onto it
//! faithfully.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of one completed round as the provider reports it.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub answer_correct: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DefineChallengeRequest {
    pub principal_email: String,
    pub verified: bool,
    #[serde(default)]
    pub prior_rounds: Vec<RoundSummary>,
}

/// Shared decision envelope: define leaves `answerCorrect` unset, verify
/// fills it in. `Succeed` is both flags false.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDecisionResponse {
    pub issue_new_challenge: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_correct: Option<bool>,
    pub fail_authentication: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeRequest {
    pub principal_email: String,
    pub verified: bool,
    #[serde(default)]
    pub prior_rounds: Vec<RoundSummary>,
}

/// Parameters the provider may show to the client.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PublicChallengeParameters {
    pub email: String,
}

/// Parameters the provider keeps to itself; the client never sees these.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PrivateChallengeParameters {
    pub answer: String,
    pub issued_at: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeResponse {
    pub public_parameters: PublicChallengeParameters,
    pub private_parameters: PrivateChallengeParameters,
    pub challenge_metadata: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VerifyChallengeRequest {
    pub principal_email: String,
    /// The private `answer` parameter stored when the round was created.
    pub expected_answer: String,
    /// The private `issuedAt` parameter stored when the round was created.
    pub issued_at: i64,
    /// Whether the provider already accepted an answer for this round.
    #[serde(default)]
    pub consumed: bool,
    pub challenge_answer: String,
    #[serde(default)]
    pub prior_rounds: Vec<RoundSummary>,
}
