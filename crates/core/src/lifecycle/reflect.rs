//! Reflection form.

use crate::conversation::{Conversation, ConversationPatch, ConversationStatus, Mood, Rating, Reflection};

/// Collects a [`Reflection`] for one conversation. Kept in memory until
/// saved.
#[derive(Debug, Clone)]
pub struct ReflectionForm {
    conversation: Conversation,
    reflection: Reflection,
}

impl ReflectionForm {
    /// Open the form, pre-filled from any reflection already on the record.
    pub fn new(conversation: Conversation) -> Self {
        let reflection = conversation.reflection.clone().unwrap_or_default();
        Self {
            conversation,
            reflection,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn reflection(&self) -> &Reflection {
        &self.reflection
    }

    pub fn set_mood(&mut self, mood: Option<Mood>) {
        self.reflection.mood = mood;
    }

    pub fn set_care_rating(&mut self, value: i64) {
        self.reflection.care_rating = Rating::new(value);
    }

    pub fn set_clear_rating(&mut self, value: i64) {
        self.reflection.clear_rating = Rating::new(value);
    }

    pub fn set_what_worked(&mut self, text: impl Into<String>) {
        self.reflection.what_worked = text.into();
    }

    pub fn set_what_to_improve(&mut self, text: impl Into<String>) {
        self.reflection.what_to_improve = text.into();
    }

    pub fn set_next_steps(&mut self, text: impl Into<String>) {
        self.reflection.next_steps = text.into();
    }

    /// Package the form as the final update. Marking completed again is
    /// harmless.
    pub fn finish(self) -> (Conversation, ConversationPatch) {
        let patch = ConversationPatch {
            status: Some(ConversationStatus::Completed),
            reflection: Some(self.reflection),
            ..Default::default()
        };
        (self.conversation, patch)
    }
}
