//! Handlers for conversation records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use clearcare_core::conversation::{validate_status_transition, ConversationDraft, ConversationPatch};
use clearcare_core::error::CoreError;
use clearcare_core::lifecycle::filter_conversations;
use clearcare_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Archive search (`?q=`).
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

/// GET /conversations?q=
///
/// All conversations, newest first, optionally filtered by title or
/// counterpart name.
pub async fn list_conversations(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let all = state.store.list().await?;
    let data = match params.q.as_deref() {
        Some(q) => filter_conversations(&all, q).into_iter().cloned().collect(),
        None => all,
    };
    Ok(Json(DataResponse { data }))
}

/// POST /conversations
pub async fn create_conversation(
    State(state): State<AppState>,
    Json(draft): Json<ConversationDraft>,
) -> AppResult<impl IntoResponse> {
    let conversation = state.store.create(&draft).await?;

    tracing::info!(
        conversation_id = ?conversation.id,
        tone = conversation.tone().label,
        "Conversation created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: conversation })))
}

/// GET /conversations/{id}
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let conversation = state
        .store
        .get(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
            id,
        }))?;

    Ok(Json(DataResponse { data: conversation }))
}

/// PATCH /conversations/{id}
///
/// Rejects a status that would move a completed conversation back to
/// prepared with 409.
pub async fn update_conversation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<ConversationPatch>,
) -> AppResult<impl IntoResponse> {
    if let Some(requested) = patch.status {
        let current = state
            .store
            .get(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Conversation",
                id,
            }))?;
        validate_status_transition(current.status, requested)?;
    }

    let conversation = state.store.update(id, &patch).await?;

    tracing::info!(
        conversation_id = id,
        status = conversation.status.as_str(),
        "Conversation updated"
    );

    Ok(Json(DataResponse { data: conversation }))
}
