//! Conversation opener generation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::completion::{ChatMessage, CompletionResultExt, TextCompletion, TransientError};
use crate::conversation::ConversationDraft;
use crate::framework::CareAnswers;
use crate::tone::ToneLevel;
use crate::types::null_as_default;

/// Returned whenever the completion capability fails.
pub const OPENER_FALLBACK: &str = "I appreciate you taking the time to meet with me today. \
Before I share what I've noticed, I'd really like to understand how things have been going \
from your perspective. How are you feeling about things lately?";

pub const OPENER_SYSTEM_PROMPT: &str = "You are an expert communication coach helping educators \
prepare for difficult conversations. Generate warm, professional conversation openers that \
balance care with clarity.

The Clear & Care framework:
- CARE (Warmth): Connection, Acknowledge, Respect, Empathy
- CLEAR (Structure): Context, Listen First, Expectations, Agreements, Revisit

Generate openers that:
1. Start with genuine care and connection
2. Create psychological safety
3. Invite dialogue before making statements
4. Are appropriate for educational settings";

/// Input to opener generation. Also the `generate-starter` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenerContext {
    pub conversation_type: Option<String>,
    pub person_name: Option<String>,
    pub relationship: Option<String>,
    pub warmth: Option<ToneLevel>,
    pub structure: Option<ToneLevel>,
    #[serde(deserialize_with = "null_as_default")]
    pub care: CareAnswers,
}

impl OpenerContext {
    pub fn from_draft(draft: &ConversationDraft) -> Self {
        Self {
            conversation_type: draft.conversation_type.map(|t| t.id().to_string()),
            person_name: Some(draft.person_name.clone()),
            relationship: Some(draft.relationship.clone()),
            warmth: Some(draft.warmth),
            structure: Some(draft.structure),
            care: draft.care.clone(),
        }
    }

    /// Render the user-turn prompt, substituting a default for every blank field.
    pub fn user_prompt(&self) -> String {
        let warmth = self.warmth.unwrap_or_default().value();
        let structure = self.structure.unwrap_or_default().value();

        format!(
            "Generate a conversation opener for:

Type: {}
Person: {}
Relationship: {}
Warmth Level: {warmth}/100
Structure Level: {structure}/100

CARE Preparation:
- Connection: {}
- Acknowledge: {}
- Respect: {}
- Empathy: {}

Generate 2-3 sentences to open this conversation. Lead with care, create space for them \
to share. Respond with ONLY the opener.",
            or_default(self.conversation_type.as_deref(), "general"),
            or_default(self.person_name.as_deref(), "colleague"),
            or_default(self.relationship.as_deref(), "professional"),
            or_default(Some(&self.care.connection), "Build rapport"),
            or_default(Some(&self.care.acknowledge), "Validate experience"),
            or_default(Some(&self.care.respect), "Assume positive intent"),
            or_default(Some(&self.care.empathy), "Name emotions"),
        )
    }
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default,
    }
}

/// Drafts a short opening line for a prepared conversation.
#[derive(Clone)]
pub struct OpenerService {
    completion: Arc<dyn TextCompletion>,
}

impl OpenerService {
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self { completion }
    }

    /// Ask the completion capability for an opener, surfacing its error.
    pub async fn try_generate(&self, context: &OpenerContext) -> Result<String, TransientError> {
        let history = [ChatMessage::user(context.user_prompt())];
        let text = self
            .completion
            .complete(OPENER_SYSTEM_PROMPT, &history)
            .await?;
        Ok(text.trim().to_string())
    }

    /// Generate an opener, falling back to [`OPENER_FALLBACK`] on any failure.
    pub async fn generate(&self, context: &OpenerContext) -> String {
        self.try_generate(context).await.or_fallback(OPENER_FALLBACK)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
