//! Conversation lifecycle controller.
//!
//! The controller owns the active [`View`], a tagged union in which each
//! variant carries only the state that view needs. The conversation's own
//! path is `Prep -> Live -> Reflect -> Archive`; the remaining views are free
//! navigation targets.
//!
//! Record-store failures never block a transition. The controller logs the
//! failure and continues with a memory-only record or an empty listing.
//!
//! Completion requests run outside the controller so the live clock is never
//! held up. A request is started with a [`Ticket`] and its result applied
//! with the same ticket; any view change in between invalidates the ticket
//! and the late result is dropped.

pub mod archive;
pub mod live;
pub mod practice;
pub mod prep;
pub mod reflect;

use std::sync::Arc;

use crate::coaching::{OpenerContext, OpenerService, PracticeService};
use crate::conversation::{Conversation, ConversationPatch};
use crate::error::CoreError;
use crate::framework::find_scenario;
use crate::store::RecordStore;
use crate::types::DbId;

pub use archive::{filter_conversations, ArchiveView};
pub use live::{drive_clock, format_elapsed, LiveCapture, LONG_SESSION_SECS};
pub use practice::{PendingReply, PracticeSession};
pub use prep::{PrepAdvance, PrepStep, PrepWizard};
pub use reflect::ReflectionForm;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Name of a view, without its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewName {
    Home,
    Landing,
    Prep,
    Live,
    Reflect,
    Archive,
    Learn,
    Team,
    Pricing,
}

impl ViewName {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewName::Home => "home",
            ViewName::Landing => "landing",
            ViewName::Prep => "prep",
            ViewName::Live => "live",
            ViewName::Reflect => "reflect",
            ViewName::Archive => "archive",
            ViewName::Learn => "learn",
            ViewName::Team => "team",
            ViewName::Pricing => "pricing",
        }
    }
}

/// Views reachable by free navigation. Live capture and reflection are only
/// entered through the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    Landing,
    Prep,
    Archive,
    Learn,
    Team,
    Pricing,
}

#[derive(Debug, Clone)]
pub enum View {
    Home,
    Landing,
    Prep(PrepWizard),
    Live(LiveCapture),
    Reflect(ReflectionForm),
    Archive(ArchiveView),
    Learn(Option<PracticeSession>),
    Team,
    Pricing,
}

impl View {
    pub fn name(&self) -> ViewName {
        match self {
            View::Home => ViewName::Home,
            View::Landing => ViewName::Landing,
            View::Prep(_) => ViewName::Prep,
            View::Live(_) => ViewName::Live,
            View::Reflect(_) => ViewName::Reflect,
            View::Archive(_) => ViewName::Archive,
            View::Learn(_) => ViewName::Learn,
            View::Team => ViewName::Team,
            View::Pricing => ViewName::Pricing,
        }
    }
}

/// Identifies the view instance a completion request was issued from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A started opener request.
#[derive(Debug, Clone)]
pub struct OpenerRequest {
    pub ticket: Ticket,
    pub context: OpenerContext,
}

/// A started practice reply request.
#[derive(Debug, Clone)]
pub struct PracticeRequest {
    pub ticket: Ticket,
    pub pending: PendingReply,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct LifecycleController {
    store: Arc<dyn RecordStore>,
    opener: OpenerService,
    practice: PracticeService,
    view: View,
    epoch: u64,
}

impl LifecycleController {
    pub fn new(store: Arc<dyn RecordStore>, opener: OpenerService, practice: PracticeService) -> Self {
        Self {
            store,
            opener,
            practice,
            view: View::Home,
            epoch: 0,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_name(&self) -> ViewName {
        self.view.name()
    }

    /// The conversation being held or reflected on, if any.
    pub fn current(&self) -> Option<&Conversation> {
        match &self.view {
            View::Live(live) => Some(live.conversation()),
            View::Reflect(form) => Some(form.conversation()),
            _ => None,
        }
    }

    fn set_view(&mut self, view: View) {
        tracing::debug!(from = self.view.name().as_str(), to = view.name().as_str(), "View change");
        self.view = view;
        self.epoch += 1;
    }

    fn wrong_view(&self, action: &str) -> CoreError {
        CoreError::Conflict(format!(
            "Cannot {action} from the '{}' view",
            self.view_name().as_str()
        ))
    }

    // -- navigation --------------------------------------------------------

    /// Navigate freely. `Prep` always starts a fresh draft and `Archive`
    /// reloads the listing.
    pub async fn navigate(&mut self, destination: Destination) {
        let view = match destination {
            Destination::Home => View::Home,
            Destination::Landing => View::Landing,
            Destination::Prep => View::Prep(PrepWizard::new()),
            Destination::Archive => View::Archive(self.load_archive().await),
            Destination::Learn => View::Learn(None),
            Destination::Team => View::Team,
            Destination::Pricing => View::Pricing,
        };
        self.set_view(view);
    }

    async fn load_archive(&self) -> ArchiveView {
        match self.store.list().await {
            Ok(conversations) => ArchiveView::new(conversations),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load archive, showing empty list");
                ArchiveView::default()
            }
        }
    }

    // -- preparation -------------------------------------------------------

    pub fn prep_mut(&mut self) -> Option<&mut PrepWizard> {
        match &mut self.view {
            View::Prep(wizard) => Some(wizard),
            _ => None,
        }
    }

    /// Move the wizard forward. From Review this submits the draft and
    /// enters live capture.
    pub async fn prep_advance(&mut self) -> Result<PrepAdvance, CoreError> {
        let outcome = match &mut self.view {
            View::Prep(wizard) => wizard.advance(),
            _ => return Err(self.wrong_view("advance preparation")),
        };
        if outcome == PrepAdvance::Submit {
            self.submit().await;
        }
        Ok(outcome)
    }

    pub fn prep_back(&mut self) -> Result<bool, CoreError> {
        match &mut self.view {
            View::Prep(wizard) => Ok(wizard.back()),
            _ => Err(self.wrong_view("step back")),
        }
    }

    async fn submit(&mut self) {
        let View::Prep(wizard) = std::mem::replace(&mut self.view, View::Home) else {
            return;
        };
        let draft = wizard.into_draft();

        let record = match self.store.create(&draft).await {
            Ok(record) => {
                tracing::info!(conversation_id = ?record.id, "Conversation prepared");
                record
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save prepared conversation, continuing in memory");
                Conversation::from_draft(draft)
            }
        };
        self.set_view(View::Live(LiveCapture::new(record)));
    }

    /// Start an opener request for the current wizard.
    pub fn begin_opener(&mut self) -> Result<OpenerRequest, CoreError> {
        let ticket = Ticket(self.epoch);
        match &mut self.view {
            View::Prep(wizard) => {
                wizard.mark_generating();
                Ok(OpenerRequest {
                    ticket,
                    context: OpenerContext::from_draft(wizard.draft()),
                })
            }
            _ => Err(self.wrong_view("generate an opener")),
        }
    }

    /// Apply an opener if its wizard is still active. Returns whether it
    /// was applied.
    pub fn apply_opener(&mut self, ticket: Ticket, opener: String) -> bool {
        if ticket.0 != self.epoch {
            tracing::debug!("Discarding stale opener");
            return false;
        }
        match &mut self.view {
            View::Prep(wizard) => {
                wizard.set_opener(opener);
                true
            }
            _ => false,
        }
    }

    /// Generate an opener and apply it in one call.
    pub async fn generate_opener(&mut self) -> Result<String, CoreError> {
        let request = self.begin_opener()?;
        let opener = self.opener.generate(&request.context).await;
        self.apply_opener(request.ticket, opener.clone());
        Ok(opener)
    }

    // -- live capture ------------------------------------------------------

    pub fn live_mut(&mut self) -> Option<&mut LiveCapture> {
        match &mut self.view {
            View::Live(live) => Some(live),
            _ => None,
        }
    }

    /// One clock second. Returns whether time accrued.
    pub fn tick(&mut self) -> bool {
        self.live_mut().is_some_and(|live| live.tick())
    }

    /// End the session: mark completed, record notes, checklist and duration,
    /// then move to reflection.
    pub async fn end_live(&mut self) -> Result<(), CoreError> {
        if self.view_name() != ViewName::Live {
            return Err(self.wrong_view("end live capture"));
        }
        let View::Live(live) = std::mem::replace(&mut self.view, View::Home) else {
            return Ok(());
        };
        let (conversation, patch) = live.finish();
        let conversation = self.persist(conversation, &patch).await;
        self.set_view(View::Reflect(ReflectionForm::new(conversation)));
        Ok(())
    }

    // -- reflection --------------------------------------------------------

    pub fn reflect_mut(&mut self) -> Option<&mut ReflectionForm> {
        match &mut self.view {
            View::Reflect(form) => Some(form),
            _ => None,
        }
    }

    /// Save the reflection and open the archive.
    pub async fn save_reflection(&mut self) -> Result<(), CoreError> {
        if self.view_name() != ViewName::Reflect {
            return Err(self.wrong_view("save a reflection"));
        }
        let View::Reflect(form) = std::mem::replace(&mut self.view, View::Home) else {
            return Ok(());
        };
        let (conversation, patch) = form.finish();
        self.persist(conversation, &patch).await;
        let archive = self.load_archive().await;
        self.set_view(View::Archive(archive));
        Ok(())
    }

    /// Apply `patch` through the store, or locally when the record has no id
    /// or the store fails.
    async fn persist(&self, mut conversation: Conversation, patch: &ConversationPatch) -> Conversation {
        if let Some(id) = conversation.id {
            match self.store.update(id, patch).await {
                Ok(updated) => return updated,
                Err(e) => {
                    tracing::warn!(conversation_id = id, error = %e, "Failed to update conversation, continuing in memory");
                }
            }
        }
        conversation.apply(patch);
        conversation
    }

    // -- archive -----------------------------------------------------------

    pub fn archive_mut(&mut self) -> Option<&mut ArchiveView> {
        match &mut self.view {
            View::Archive(archive) => Some(archive),
            _ => None,
        }
    }

    /// Reopen an archived conversation in the reflection form.
    pub fn select_archived(&mut self, id: DbId) -> Result<(), CoreError> {
        let View::Archive(archive) = &self.view else {
            return Err(self.wrong_view("select an archived conversation"));
        };
        let conversation = archive
            .find(id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Conversation",
                id,
            })?;
        self.set_view(View::Reflect(ReflectionForm::new(conversation)));
        Ok(())
    }

    // -- practice ----------------------------------------------------------

    pub fn practice(&self) -> Option<&PracticeSession> {
        match &self.view {
            View::Learn(session) => session.as_ref(),
            _ => None,
        }
    }

    /// Start a practice session for a catalog scenario.
    pub fn select_scenario(&mut self, scenario_id: i64) -> Result<(), CoreError> {
        if self.view_name() != ViewName::Learn {
            return Err(self.wrong_view("start a practice session"));
        }
        let scenario = find_scenario(scenario_id).ok_or(CoreError::NotFound {
            entity: "Scenario",
            id: scenario_id,
        })?;
        self.set_view(View::Learn(Some(PracticeSession::new(scenario))));
        Ok(())
    }

    /// Append a user turn. `Ok(None)` for blank input.
    pub fn begin_practice_turn(&mut self, text: &str) -> Result<Option<PracticeRequest>, CoreError> {
        let ticket = Ticket(self.epoch);
        match &mut self.view {
            View::Learn(Some(session)) => Ok(session
                .send(text)
                .map(|pending| PracticeRequest { ticket, pending })),
            _ => Err(self.wrong_view("send a practice message")),
        }
    }

    /// Apply a persona reply if its session is still active.
    pub fn apply_practice_reply(&mut self, ticket: Ticket, reply: String) -> bool {
        if ticket.0 != self.epoch {
            tracing::debug!("Discarding stale practice reply");
            return false;
        }
        match &mut self.view {
            View::Learn(Some(session)) => {
                session.receive(reply);
                true
            }
            _ => false,
        }
    }

    /// Send a user turn and wait for the reply in one call.
    pub async fn practice_exchange(&mut self, text: &str) -> Result<Option<String>, CoreError> {
        let Some(request) = self.begin_practice_turn(text)? else {
            return Ok(None);
        };
        let pending = &request.pending;
        let reply = self
            .practice
            .next_reply(Some(pending.scenario_id), &pending.prior, &pending.user_message)
            .await;
        self.apply_practice_reply(request.ticket, reply.clone());
        Ok(Some(reply))
    }
}
