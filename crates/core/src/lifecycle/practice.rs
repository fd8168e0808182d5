//! Practice session held in the Learn view.

use crate::coaching::{PracticeMessage, PracticeRole};
use crate::framework::Scenario;

/// A transcript with one scenario persona.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    scenario: &'static Scenario,
    transcript: Vec<PracticeMessage>,
    awaiting_reply: bool,
}

/// A user turn waiting on the persona's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub scenario_id: i64,
    /// Transcript before the new user turn.
    pub prior: Vec<PracticeMessage>,
    pub user_message: String,
}

impl PracticeSession {
    /// Start a session, seeding the transcript with the scenario framing.
    pub fn new(scenario: &'static Scenario) -> Self {
        Self {
            scenario,
            transcript: vec![PracticeMessage::new(PracticeRole::System, scenario.framing())],
            awaiting_reply: false,
        }
    }

    pub fn scenario(&self) -> &'static Scenario {
        self.scenario
    }

    pub fn transcript(&self) -> &[PracticeMessage] {
        &self.transcript
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Append the user's turn. Blank input is ignored.
    pub fn send(&mut self, text: &str) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let prior = self.transcript.clone();
        self.transcript
            .push(PracticeMessage::new(PracticeRole::User, text));
        self.awaiting_reply = true;
        Some(PendingReply {
            scenario_id: self.scenario.id,
            prior,
            user_message: text.to_string(),
        })
    }

    pub(crate) fn receive(&mut self, reply: String) {
        self.transcript
            .push(PracticeMessage::new(PracticeRole::Assistant, reply));
        self.awaiting_reply = false;
    }
}
