//! Conversation data model.
//!
//! A [`Conversation`] is created from a [`ConversationDraft`] when preparation
//! is submitted, mutated through [`ConversationPatch`]es during live capture
//! and reflection, and read back from the archive afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::framework::{CareAnswers, CareMap, ClearAnswers, ClearMap, ConversationType, FrameworkLetter};
use crate::tone::{classify, ToneClassification, ToneLevel};
use crate::types::{null_as_default, DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status. Only ever moves `Prepared` -> `Completed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    #[default]
    Prepared,
    Completed,
}

impl ConversationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationStatus::Prepared => "prepared",
            ConversationStatus::Completed => "completed",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "completed" => ConversationStatus::Completed,
            _ => ConversationStatus::Prepared,
        }
    }

    /// The status after requesting `next`. A completed conversation stays
    /// completed.
    pub fn advance(self, next: ConversationStatus) -> ConversationStatus {
        match (self, next) {
            (ConversationStatus::Completed, _) => ConversationStatus::Completed,
            (_, next) => next,
        }
    }
}

/// Reject a requested status that would move a conversation backwards.
pub fn validate_status_transition(
    current: ConversationStatus,
    requested: ConversationStatus,
) -> Result<(), CoreError> {
    if current.advance(requested) != requested {
        return Err(CoreError::Conflict(format!(
            "Conversation status cannot move from '{}' to '{}'",
            current.as_str(),
            requested.as_str()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Notes and checklist
// ---------------------------------------------------------------------------

/// Category tag for a live-capture note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteCategory {
    Quote,
    Action,
    Followup,
    #[default]
    Note,
}

/// A timestamped note taken during the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    #[serde(rename = "type")]
    pub category: NoteCategory,
    /// Seconds since the conversation started.
    #[serde(rename = "time")]
    pub elapsed_secs: u32,
}

impl Note {
    pub fn new(text: impl Into<String>, category: NoteCategory, elapsed_secs: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            category,
            elapsed_secs,
        }
    }
}

/// Per-letter completion state ticked off during the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checklist {
    pub care: CareMap<bool>,
    pub clear: ClearMap<bool>,
}

impl Checklist {
    pub fn is_checked(&self, letter: FrameworkLetter) -> bool {
        match letter {
            FrameworkLetter::Care(l) => *self.care.get(l),
            FrameworkLetter::Clear(l) => *self.clear.get(l),
        }
    }

    /// Flip one letter and return its new state.
    pub fn toggle(&mut self, letter: FrameworkLetter) -> bool {
        let slot = match letter {
            FrameworkLetter::Care(l) => self.care.get_mut(l),
            FrameworkLetter::Clear(l) => self.clear.get_mut(l),
        };
        *slot = !*slot;
        *slot
    }

    /// Number of CARE letters checked (out of 4).
    pub fn care_progress(&self) -> usize {
        self.care.iter().filter(|(_, checked)| **checked).count()
    }

    /// Number of CLEAR letters checked (out of 5).
    pub fn clear_progress(&self) -> usize {
        self.clear.iter().filter(|(_, checked)| **checked).count()
    }
}

// ---------------------------------------------------------------------------
// Reflection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Accomplished,
    Hopeful,
    Uncertain,
    Concerned,
    Relieved,
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const DEFAULT_RATING: u8 = 3;

/// Self-assessed effectiveness, clamped to 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Self {
        Self(value.clamp(i64::from(MIN_RATING), i64::from(MAX_RATING)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(DEFAULT_RATING)
    }
}

impl From<i64> for Rating {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        i64::from(rating.0)
    }
}

/// Post-conversation self-reflection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reflection {
    pub mood: Option<Mood>,
    pub care_rating: Rating,
    pub clear_rating: Rating,
    pub what_worked: String,
    pub what_to_improve: String,
    pub next_steps: String,
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Everything gathered during preparation, before the store assigns an id.
///
/// Nothing here is validated: missing fields simply take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversationDraft {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub person_name: String,
    #[serde(rename = "type", deserialize_with = "lenient_conversation_type")]
    pub conversation_type: Option<ConversationType>,
    #[serde(deserialize_with = "null_as_default")]
    pub relationship: String,
    #[serde(deserialize_with = "null_as_default")]
    pub warmth: ToneLevel,
    #[serde(deserialize_with = "null_as_default")]
    pub structure: ToneLevel,
    #[serde(deserialize_with = "null_as_default")]
    pub care: CareAnswers,
    #[serde(deserialize_with = "null_as_default")]
    pub clear: ClearAnswers,
    #[serde(rename = "starter")]
    pub opener: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub prep_notes: String,
}

/// Unknown or empty type strings (the wizard starts with `""`) become `None`.
fn lenient_conversation_type<'de, D>(deserializer: D) -> Result<Option<ConversationType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(ConversationType::from_id))
}

impl ConversationDraft {
    pub fn tone(&self) -> ToneClassification {
        classify(self.warmth, self.structure)
    }
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// A prepared, held, or reflected-on conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Assigned by the record store; `None` for a memory-only record.
    pub id: Option<DbId>,
    pub title: String,
    pub person_name: String,
    #[serde(rename = "type")]
    pub conversation_type: Option<ConversationType>,
    pub relationship: String,
    pub warmth: ToneLevel,
    pub structure: ToneLevel,
    pub care: CareAnswers,
    pub clear: ClearAnswers,
    #[serde(rename = "starter")]
    pub opener: Option<String>,
    pub prep_notes: String,
    pub status: ConversationStatus,
    pub notes: Vec<Note>,
    pub checklist: Checklist,
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    pub reflection: Option<Reflection>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Conversation {
    /// Build an unsaved (id-less) record from a draft.
    pub fn from_draft(draft: ConversationDraft) -> Self {
        Self {
            id: None,
            title: draft.title,
            person_name: draft.person_name,
            conversation_type: draft.conversation_type,
            relationship: draft.relationship,
            warmth: draft.warmth,
            structure: draft.structure,
            care: draft.care,
            clear: draft.clear,
            opener: draft.opener,
            prep_notes: draft.prep_notes,
            status: ConversationStatus::Prepared,
            notes: Vec::new(),
            checklist: Checklist::default(),
            duration_secs: 0,
            reflection: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn tone(&self) -> ToneClassification {
        classify(self.warmth, self.structure)
    }

    /// Apply a partial update in place. Status never moves backwards;
    /// timestamps are left to the store.
    pub fn apply(&mut self, patch: &ConversationPatch) {
        if let Some(status) = patch.status {
            self.status = self.status.advance(status);
        }
        if let Some(duration) = patch.duration_secs {
            self.duration_secs = duration;
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
        if let Some(checklist) = &patch.checklist {
            self.checklist = checklist.clone();
        }
        if let Some(reflection) = &patch.reflection {
            self.reflection = Some(reflection.clone());
        }
        if let Some(opener) = &patch.opener {
            self.opener = Some(opener.clone());
        }
    }

    /// Case-insensitive substring match against title or counterpart name.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.person_name.to_lowercase().contains(&needle)
    }
}

/// Partial update. Tone and descriptive fields are fixed after preparation
/// and are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversationPatch {
    pub status: Option<ConversationStatus>,
    #[serde(rename = "duration")]
    pub duration_secs: Option<u32>,
    pub notes: Option<Vec<Note>>,
    pub checklist: Option<Checklist>,
    pub reflection: Option<Reflection>,
    #[serde(rename = "starter")]
    pub opener: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
