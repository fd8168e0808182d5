//! [`RecordStore`] backed by PostgreSQL.

use async_trait::async_trait;

use clearcare_core::conversation::{Conversation, ConversationDraft, ConversationPatch};
use clearcare_core::store::{RecordStore, StoreError};
use clearcare_core::types::DbId;

use crate::repositories::ConversationRepo;
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn unavailable(op: &'static str, e: sqlx::Error) -> StoreError {
    tracing::error!(op, error = %e, "Conversation store query failed");
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, draft: &ConversationDraft) -> Result<Conversation, StoreError> {
        let row = ConversationRepo::create(&self.pool, draft)
            .await
            .map_err(|e| unavailable("create", e))?;
        tracing::debug!(conversation_id = row.id, "Conversation inserted");
        Ok(row.into())
    }

    async fn update(&self, id: DbId, patch: &ConversationPatch) -> Result<Conversation, StoreError> {
        ConversationRepo::update(&self.pool, id, patch)
            .await
            .map_err(|e| unavailable("update", e))?
            .map(Conversation::from)
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Conversation>, StoreError> {
        let rows = ConversationRepo::list(&self.pool)
            .await
            .map_err(|e| unavailable("list", e))?;
        Ok(rows.into_iter().map(Conversation::from).collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<Conversation>, StoreError> {
        let row = ConversationRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| unavailable("get", e))?;
        Ok(row.map(Conversation::from))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| unavailable("ping", e))
    }
}
