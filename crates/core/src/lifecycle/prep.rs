//! Preparation wizard: Setup, CARE, CLEAR, Review.

use crate::conversation::ConversationDraft;
use crate::framework::{CareLetter, ClearLetter, ConversationType, FrameworkLetter};
use crate::tone::{ToneClassification, ToneLevel};

/// Ordered sub-steps of preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepStep {
    Setup,
    Care,
    Clear,
    Review,
}

impl PrepStep {
    pub fn next(self) -> Option<PrepStep> {
        match self {
            PrepStep::Setup => Some(PrepStep::Care),
            PrepStep::Care => Some(PrepStep::Clear),
            PrepStep::Clear => Some(PrepStep::Review),
            PrepStep::Review => None,
        }
    }

    pub fn prev(self) -> Option<PrepStep> {
        match self {
            PrepStep::Setup => None,
            PrepStep::Care => Some(PrepStep::Setup),
            PrepStep::Clear => Some(PrepStep::Care),
            PrepStep::Review => Some(PrepStep::Clear),
        }
    }
}

/// Outcome of moving forward in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepAdvance {
    Moved(PrepStep),
    /// Forward from Review: the draft is ready to be created.
    Submit,
}

/// Accumulates a [`ConversationDraft`] across the preparation sub-steps.
///
/// Nothing is validated. Tone levels are clamped on the way in.
#[derive(Debug, Clone)]
pub struct PrepWizard {
    draft: ConversationDraft,
    step: PrepStep,
    care_focus: usize,
    clear_focus: usize,
    generating: bool,
}

impl Default for PrepWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl PrepWizard {
    pub fn new() -> Self {
        Self {
            draft: ConversationDraft::default(),
            step: PrepStep::Setup,
            care_focus: 0,
            clear_focus: 0,
            generating: false,
        }
    }

    pub fn draft(&self) -> &ConversationDraft {
        &self.draft
    }

    pub fn into_draft(self) -> ConversationDraft {
        self.draft
    }

    pub fn step(&self) -> PrepStep {
        self.step
    }

    pub fn tone(&self) -> ToneClassification {
        self.draft.tone()
    }

    // -- setup fields ------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_person_name(&mut self, name: impl Into<String>) {
        self.draft.person_name = name.into();
    }

    pub fn set_conversation_type(&mut self, kind: Option<ConversationType>) {
        self.draft.conversation_type = kind;
    }

    pub fn set_relationship(&mut self, relationship: impl Into<String>) {
        self.draft.relationship = relationship.into();
    }

    pub fn set_warmth(&mut self, value: i64) {
        self.draft.warmth = ToneLevel::new(value);
    }

    pub fn set_structure(&mut self, value: i64) {
        self.draft.structure = ToneLevel::new(value);
    }

    pub fn set_care(&mut self, letter: CareLetter, answer: impl Into<String>) {
        *self.draft.care.get_mut(letter) = answer.into();
    }

    pub fn set_clear(&mut self, letter: ClearLetter, answer: impl Into<String>) {
        *self.draft.clear.get_mut(letter) = answer.into();
    }

    pub fn set_prep_notes(&mut self, notes: impl Into<String>) {
        self.draft.prep_notes = notes.into();
    }

    // -- letter focus ------------------------------------------------------

    /// Letter the user is answering, if the current step has letters.
    pub fn focused_letter(&self) -> Option<FrameworkLetter> {
        match self.step {
            PrepStep::Care => Some(FrameworkLetter::Care(CareLetter::ALL[self.care_focus])),
            PrepStep::Clear => Some(FrameworkLetter::Clear(ClearLetter::ALL[self.clear_focus])),
            _ => None,
        }
    }

    /// Move focus to the next letter of the current framework. Clamped.
    pub fn focus_next(&mut self) {
        match self.step {
            PrepStep::Care => self.care_focus = (self.care_focus + 1).min(CareLetter::ALL.len() - 1),
            PrepStep::Clear => {
                self.clear_focus = (self.clear_focus + 1).min(ClearLetter::ALL.len() - 1)
            }
            _ => {}
        }
    }

    pub fn focus_prev(&mut self) {
        match self.step {
            PrepStep::Care => self.care_focus = self.care_focus.saturating_sub(1),
            PrepStep::Clear => self.clear_focus = self.clear_focus.saturating_sub(1),
            _ => {}
        }
    }

    // -- navigation --------------------------------------------------------

    pub fn advance(&mut self) -> PrepAdvance {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                PrepAdvance::Moved(next)
            }
            None => PrepAdvance::Submit,
        }
    }

    /// Step back. Returns `false` at Setup.
    pub fn back(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    // -- opener ------------------------------------------------------------

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub(crate) fn mark_generating(&mut self) {
        self.generating = true;
    }

    /// Store a generated opener, overwriting any earlier one.
    pub(crate) fn set_opener(&mut self, opener: String) {
        self.draft.opener = Some(opener);
        self.generating = false;
    }

    pub fn opener(&self) -> Option<&str> {
        self.draft.opener.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::Quadrant;

    #[test]
    fn steps_walk_forward_then_submit() {
        let mut wizard = PrepWizard::new();
        assert_eq!(wizard.advance(), PrepAdvance::Moved(PrepStep::Care));
        assert_eq!(wizard.advance(), PrepAdvance::Moved(PrepStep::Clear));
        assert_eq!(wizard.advance(), PrepAdvance::Moved(PrepStep::Review));
        assert_eq!(wizard.advance(), PrepAdvance::Submit);
        assert_eq!(wizard.step(), PrepStep::Review);
    }

    #[test]
    fn back_stops_at_setup() {
        let mut wizard = PrepWizard::new();
        wizard.advance();
        assert!(wizard.back());
        assert!(!wizard.back());
        assert_eq!(wizard.step(), PrepStep::Setup);
    }

    #[test]
    fn tone_setters_clamp() {
        let mut wizard = PrepWizard::new();
        wizard.set_warmth(140);
        wizard.set_structure(-5);
        assert_eq!(wizard.draft().warmth.value(), 100);
        assert_eq!(wizard.draft().structure.value(), 0);
        assert_eq!(wizard.tone().quadrant, Quadrant::Enabling);
    }

    #[test]
    fn focus_is_per_framework_and_clamped() {
        let mut wizard = PrepWizard::new();
        assert_eq!(wizard.focused_letter(), None);

        wizard.advance();
        wizard.focus_prev();
        assert_eq!(
            wizard.focused_letter(),
            Some(FrameworkLetter::Care(CareLetter::Connection))
        );
        for _ in 0..10 {
            wizard.focus_next();
        }
        assert_eq!(
            wizard.focused_letter(),
            Some(FrameworkLetter::Care(CareLetter::Empathy))
        );

        wizard.advance();
        wizard.focus_next();
        assert_eq!(
            wizard.focused_letter(),
            Some(FrameworkLetter::Clear(ClearLetter::ListenFirst))
        );

        wizard.back();
        assert_eq!(
            wizard.focused_letter(),
            Some(FrameworkLetter::Care(CareLetter::Empathy))
        );
    }

    #[test]
    fn answers_land_in_their_letters() {
        let mut wizard = PrepWizard::new();
        wizard.set_care(CareLetter::Empathy, "Name the stress of the move");
        wizard.set_clear(ClearLetter::Revisit, "Check in on Friday");
        assert_eq!(wizard.draft().care.empathy, "Name the stress of the move");
        assert_eq!(wizard.draft().clear.revisit, "Check in on Friday");
        assert_eq!(wizard.draft().care.connection, "");
    }
}
