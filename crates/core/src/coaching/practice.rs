//! Role-played practice dialogue.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::completion::{ChatMessage, CompletionResultExt, TextCompletion, TransientError};
use crate::framework::{persona_for, ScenarioPersona};

/// Returned whenever the completion capability fails.
pub const PRACTICE_FALLBACK: &str = "I appreciate you taking the time to talk with me about this.";

/// Speaker of a practice transcript entry. `System` entries frame the
/// scenario for the user and are never replayed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeRole {
    System,
    User,
    Assistant,
}

/// One entry of a practice transcript, as exchanged with the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeMessage {
    #[serde(default = "persona_role", deserialize_with = "lenient_role")]
    pub role: PracticeRole,
    #[serde(default)]
    pub content: String,
}

fn persona_role() -> PracticeRole {
    PracticeRole::Assistant
}

/// Any role other than `system` or `user`, including a missing one, is the
/// persona speaking.
fn lenient_role<'de, D>(deserializer: D) -> Result<PracticeRole, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        Some("system") => PracticeRole::System,
        Some("user") => PracticeRole::User,
        _ => PracticeRole::Assistant,
    })
}

impl PracticeMessage {
    pub fn new(role: PracticeRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Build the role-play system instruction for a persona.
pub fn persona_instruction(persona: &ScenarioPersona) -> String {
    format!(
        "You are role-playing as {name}, {role}.

Character details:
- Personality: {personality}
- Hidden context (don't reveal unless asked directly): {context}
- Initial stance: {stance}

Guidelines:
1. Stay in character throughout
2. Show realistic emotions (defensiveness, confusion, openness)
3. Gradually become more receptive if the educator shows good CARE and CLEAR skills
4. If they're too aggressive, become more defensive
5. If they're too passive, remain disengaged
6. Respond to genuine empathy with increased openness
7. Keep responses conversational (2-4 sentences)

Do NOT break character or give feedback.",
        name = persona.name,
        role = persona.role,
        personality = persona.personality,
        context = persona.hidden_context,
        stance = persona.stance,
    )
}

/// Replayable history: system entries dropped, user turns kept, everything
/// else sent as the persona's own turns, then the new user message.
pub fn replay_history(prior: &[PracticeMessage], new_user_message: &str) -> Vec<ChatMessage> {
    prior
        .iter()
        .filter(|m| m.role != PracticeRole::System)
        .map(|m| match m.role {
            PracticeRole::User => ChatMessage::user(m.content.clone()),
            _ => ChatMessage::assistant(m.content.clone()),
        })
        .chain(std::iter::once(ChatMessage::user(new_user_message)))
        .collect()
}

/// Produces the next in-character reply of a scenario persona.
#[derive(Clone)]
pub struct PracticeService {
    completion: Arc<dyn TextCompletion>,
}

impl PracticeService {
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self { completion }
    }

    /// Request the persona's reply, surfacing the completion error.
    pub async fn try_next_reply(
        &self,
        scenario_id: Option<i64>,
        prior: &[PracticeMessage],
        new_user_message: &str,
    ) -> Result<String, TransientError> {
        let persona = persona_for(scenario_id);
        let instruction = persona_instruction(persona);
        let history = replay_history(prior, new_user_message);

        tracing::debug!(
            persona = persona.name,
            turns = history.len(),
            "Requesting practice reply"
        );

        let text = self.completion.complete(&instruction, &history).await?;
        Ok(text.trim().to_string())
    }

    /// Request the persona's reply, falling back to [`PRACTICE_FALLBACK`].
    /// Unknown scenario ids use the default persona.
    pub async fn next_reply(
        &self,
        scenario_id: Option<i64>,
        prior: &[PracticeMessage],
        new_user_message: &str,
    ) -> String {
        self.try_next_reply(scenario_id, prior, new_user_message)
            .await
            .or_fallback(PRACTICE_FALLBACK)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
