//! Conversation row model.

use sqlx::types::Json;
use sqlx::FromRow;

use clearcare_core::conversation::{Checklist, Conversation, ConversationStatus, Note, Reflection};
use clearcare_core::framework::{CareMap, ClearMap, ConversationType};
use clearcare_core::tone::ToneLevel;
use clearcare_core::types::{DbId, Timestamp};

/// A row from the `conversations` table.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationRow {
    pub id: DbId,
    pub title: String,
    pub person_name: String,
    pub conversation_type: Option<String>,
    pub relationship_context: String,
    pub warmth_level: i32,
    pub structure_level: i32,
    pub care_c: String,
    pub care_a: String,
    pub care_r: String,
    pub care_e: String,
    pub clear_c: String,
    pub clear_l: String,
    pub clear_e: String,
    pub clear_a: String,
    pub clear_r: String,
    pub conversation_starter: Option<String>,
    pub additional_notes: String,
    pub status: String,
    pub notes: Json<Vec<Note>>,
    pub checklist: Json<Checklist>,
    pub duration_seconds: i32,
    pub reflection: Option<Json<Reflection>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ConversationRow> for Conversation {
    fn from(row: ConversationRow) -> Self {
        Conversation {
            id: Some(row.id),
            title: row.title,
            person_name: row.person_name,
            conversation_type: row.conversation_type.as_deref().and_then(ConversationType::from_id),
            relationship: row.relationship_context,
            warmth: ToneLevel::new(i64::from(row.warmth_level)),
            structure: ToneLevel::new(i64::from(row.structure_level)),
            care: CareMap {
                connection: row.care_c,
                acknowledge: row.care_a,
                respect: row.care_r,
                empathy: row.care_e,
            },
            clear: ClearMap {
                context: row.clear_c,
                listen_first: row.clear_l,
                expectations: row.clear_e,
                agreements: row.clear_a,
                revisit: row.clear_r,
            },
            opener: row.conversation_starter,
            prep_notes: row.additional_notes,
            status: ConversationStatus::from_str_lossy(&row.status),
            notes: row.notes.0,
            checklist: row.checklist.0,
            duration_secs: u32::try_from(row.duration_seconds).unwrap_or(0),
            reflection: row.reflection.map(|r| r.0),
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}
