//! Repository for the `conversations` table.

use sqlx::types::Json;
use sqlx::PgPool;

use clearcare_core::conversation::{ConversationDraft, ConversationPatch};
use clearcare_core::types::DbId;

use crate::models::conversation::ConversationRow;

/// Column list for conversations queries.
const COLUMNS: &str = "id, title, person_name, conversation_type, relationship_context, \
    warmth_level, structure_level, care_c, care_a, care_r, care_e, \
    clear_c, clear_l, clear_e, clear_a, clear_r, conversation_starter, additional_notes, \
    status, notes, checklist, duration_seconds, reflection, created_at, updated_at";

/// Provides persistence operations for conversations.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Insert a prepared conversation, returning the created row.
    pub async fn create(
        pool: &PgPool,
        draft: &ConversationDraft,
    ) -> Result<ConversationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO conversations
                (title, person_name, conversation_type, relationship_context,
                 warmth_level, structure_level,
                 care_c, care_a, care_r, care_e,
                 clear_c, clear_l, clear_e, clear_a, clear_r,
                 conversation_starter, additional_notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConversationRow>(&query)
            .bind(&draft.title)
            .bind(&draft.person_name)
            .bind(draft.conversation_type.map(|t| t.id()))
            .bind(&draft.relationship)
            .bind(i32::from(draft.warmth.value()))
            .bind(i32::from(draft.structure.value()))
            .bind(&draft.care.connection)
            .bind(&draft.care.acknowledge)
            .bind(&draft.care.respect)
            .bind(&draft.care.empathy)
            .bind(&draft.clear.context)
            .bind(&draft.clear.listen_first)
            .bind(&draft.clear.expectations)
            .bind(&draft.clear.agreements)
            .bind(&draft.clear.revisit)
            .bind(&draft.opener)
            .bind(&draft.prep_notes)
            .fetch_one(pool)
            .await
    }

    /// Find a conversation by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ConversationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM conversations WHERE id = $1");
        sqlx::query_as::<_, ConversationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all conversations, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ConversationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM conversations
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ConversationRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the updated row.
    ///
    /// A completed conversation keeps its status whatever the patch asks for.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &ConversationPatch,
    ) -> Result<Option<ConversationRow>, sqlx::Error> {
        let query = format!(
            "UPDATE conversations SET
                status = CASE WHEN status = 'completed' THEN status
                              ELSE COALESCE($2, status) END,
                duration_seconds = COALESCE($3, duration_seconds),
                notes = COALESCE($4, notes),
                checklist = COALESCE($5, checklist),
                reflection = COALESCE($6, reflection),
                conversation_starter = COALESCE($7, conversation_starter),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let duration = patch
            .duration_secs
            .map(|d| i32::try_from(d).unwrap_or(i32::MAX));
        sqlx::query_as::<_, ConversationRow>(&query)
            .bind(id)
            .bind(patch.status.map(|s| s.as_str()))
            .bind(duration)
            .bind(patch.notes.as_ref().map(Json))
            .bind(patch.checklist.as_ref().map(Json))
            .bind(patch.reflection.as_ref().map(Json))
            .bind(&patch.opener)
            .fetch_optional(pool)
            .await
    }
}
