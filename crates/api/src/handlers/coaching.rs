//! Handlers for the opener and practice-chat endpoints.
//!
//! Neither endpoint reports completion failures: the services substitute
//! their fallback line and the response is always 200.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use clearcare_core::coaching::{OpenerContext, PracticeMessage};
use clearcare_core::types::null_as_default;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StarterResponse {
    pub starter: String,
}

/// Body of `POST /practice-chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeChatRequest {
    pub scenario_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<PracticeMessage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_message: String,
}

#[derive(Debug, Serialize)]
pub struct PracticeChatResponse {
    pub response: String,
}

/// POST /generate-starter
pub async fn generate_starter(
    State(state): State<AppState>,
    Json(context): Json<OpenerContext>,
) -> Json<StarterResponse> {
    let starter = state.opener.generate(&context).await;
    Json(StarterResponse { starter })
}

/// POST /practice-chat
pub async fn practice_chat(
    State(state): State<AppState>,
    Json(input): Json<PracticeChatRequest>,
) -> Json<PracticeChatResponse> {
    let response = state
        .practice
        .next_reply(input.scenario_id, &input.messages, &input.user_message)
        .await;
    Json(PracticeChatResponse { response })
}
