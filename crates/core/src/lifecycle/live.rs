//! Live capture: elapsed clock, notes, and the CARE/CLEAR checklist.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::{LifecycleController, ViewName};
use crate::conversation::{Checklist, Conversation, ConversationPatch, ConversationStatus, Note, NoteCategory};
use crate::framework::FrameworkLetter;

/// Elapsed time past which the long-session warning is raised.
pub const LONG_SESSION_SECS: u32 = 30 * 60;

/// Interval between clock ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Format seconds as `m:ss`.
pub fn format_elapsed(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// State of a conversation being held.
#[derive(Debug, Clone)]
pub struct LiveCapture {
    conversation: Conversation,
    elapsed_secs: u32,
    active: bool,
    notes: Vec<Note>,
    checklist: Checklist,
}

impl LiveCapture {
    /// Start capturing. The clock is running from the first tick.
    pub fn new(conversation: Conversation) -> Self {
        Self {
            notes: conversation.notes.clone(),
            checklist: conversation.checklist.clone(),
            elapsed_secs: conversation.duration_secs,
            conversation,
            active: true,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the clock by one second. Ignored while paused.
    pub fn tick(&mut self) -> bool {
        if self.active {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        self.active
    }

    pub fn pause(&mut self) {
        self.active = false;
    }

    pub fn resume(&mut self) {
        self.active = true;
    }

    pub fn long_session_warning(&self) -> bool {
        self.elapsed_secs > LONG_SESSION_SECS
    }

    /// Append a note stamped with the current elapsed time. Blank text is
    /// rejected.
    pub fn add_note(&mut self, text: &str, category: NoteCategory) -> Option<&Note> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.notes.push(Note::new(text, category, self.elapsed_secs));
        self.notes.last()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Flip one checklist letter, returning its new state.
    pub fn toggle_check(&mut self, letter: FrameworkLetter) -> bool {
        self.checklist.toggle(letter)
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn care_progress(&self) -> usize {
        self.checklist.care_progress()
    }

    pub fn clear_progress(&self) -> usize {
        self.checklist.clear_progress()
    }

    /// Package the session as a completion patch for the record.
    pub fn finish(self) -> (Conversation, ConversationPatch) {
        let patch = ConversationPatch {
            status: Some(ConversationStatus::Completed),
            duration_secs: Some(self.elapsed_secs),
            notes: Some(self.notes),
            checklist: Some(self.checklist),
            ..Default::default()
        };
        (self.conversation, patch)
    }
}

/// Tick the controller once per second until `cancel` fires or the
/// controller leaves live capture. Returns the number of ticks delivered.
pub async fn drive_clock(
    controller: Arc<Mutex<LifecycleController>>,
    cancel: CancellationToken,
) -> u32 {
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut delivered = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(delivered, "Live clock cancelled");
                break;
            }
            _ = interval.tick() => {
                let mut controller = controller.lock().await;
                if controller.view_name() != ViewName::Live {
                    tracing::debug!(delivered, "Live clock stopped, view changed");
                    break;
                }
                if controller.tick() {
                    delivered += 1;
                }
            }
        }
    }

    delivered
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
