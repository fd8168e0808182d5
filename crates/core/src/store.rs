//! Record store seam for conversations.
//!
//! [`RecordStore`] is implemented by the PostgreSQL adapter in `clearcare-db`
//! and by [`MemoryStore`] here, which backs tests and database-less runs.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::conversation::{Conversation, ConversationDraft, ConversationPatch};
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not complete the operation.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Conversation {0} not found")]
    NotFound(DbId),
}

/// Persistence for [`Conversation`] records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a draft, returning the record with its id and timestamps.
    async fn create(&self, draft: &ConversationDraft) -> Result<Conversation, StoreError>;

    /// Apply a partial update and refresh `updated_at`.
    async fn update(&self, id: DbId, patch: &ConversationPatch) -> Result<Conversation, StoreError>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<Conversation>, StoreError>;

    async fn get(&self, id: DbId) -> Result<Option<Conversation>, StoreError>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Process-local store. Ids start at 1 and increase monotonically.
#[derive(Debug)]
pub struct MemoryStore {
    records: RwLock<Vec<Conversation>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, draft: &ConversationDraft) -> Result<Conversation, StoreError> {
        let now = Utc::now();
        let mut record = Conversation::from_draft(draft.clone());
        record.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        record.created_at = Some(now);
        record.updated_at = Some(now);

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: DbId, patch: &ConversationPatch) -> Result<Conversation, StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|c| c.id == Some(id))
            .ok_or(StoreError::NotFound(id))?;
        record.apply(patch);
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn list(&self) -> Result<Vec<Conversation>, StoreError> {
        let mut records = self.records.read().await.clone();
        // Ids are assigned in insertion order, so they break timestamp ties.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn get(&self, id: DbId) -> Result<Option<Conversation>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|c| c.id == Some(id))
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
