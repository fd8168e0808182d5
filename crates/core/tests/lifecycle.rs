use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use clearcare_core::coaching::{OpenerService, PracticeService, OPENER_FALLBACK, PRACTICE_FALLBACK};
use clearcare_core::completion::{ChatMessage, TextCompletion, TransientError};
use clearcare_core::conversation::{
    Conversation, ConversationDraft, ConversationPatch, ConversationStatus, Mood, NoteCategory,
};
use clearcare_core::error::CoreError;
use clearcare_core::framework::{CareLetter, FrameworkLetter};
use clearcare_core::lifecycle::{
    drive_clock, Destination, LifecycleController, PrepAdvance, PrepStep, View, ViewName,
};
use clearcare_core::store::{MemoryStore, RecordStore, StoreError};
use clearcare_core::tone::Quadrant;
use clearcare_core::types::DbId;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

struct Canned(Result<String, TransientError>);

#[async_trait]
impl TextCompletion for Canned {
    async fn complete(&self, _: &str, _: &[ChatMessage]) -> Result<String, TransientError> {
        self.0.clone()
    }
}

/// Store whose every operation fails.
struct DownStore;

#[async_trait]
impl RecordStore for DownStore {
    async fn create(&self, _: &ConversationDraft) -> Result<Conversation, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn update(&self, _: DbId, _: &ConversationPatch) -> Result<Conversation, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn list(&self) -> Result<Vec<Conversation>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn get(&self, _: DbId) -> Result<Option<Conversation>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

/// Store that accepts new records but rejects every update.
#[derive(Default)]
struct ReadOnlyStore(MemoryStore);

#[async_trait]
impl RecordStore for ReadOnlyStore {
    async fn create(&self, draft: &ConversationDraft) -> Result<Conversation, StoreError> {
        self.0.create(draft).await
    }
    async fn update(&self, _: DbId, _: &ConversationPatch) -> Result<Conversation, StoreError> {
        Err(StoreError::Unavailable("write timeout".into()))
    }
    async fn list(&self) -> Result<Vec<Conversation>, StoreError> {
        self.0.list().await
    }
    async fn get(&self, id: DbId) -> Result<Option<Conversation>, StoreError> {
        self.0.get(id).await
    }
    async fn ping(&self) -> Result<(), StoreError> {
        self.0.ping().await
    }
}

fn controller_with(
    store: Arc<dyn RecordStore>,
    reply: Result<String, TransientError>,
) -> LifecycleController {
    let completion: Arc<dyn TextCompletion> = Arc::new(Canned(reply));
    LifecycleController::new(
        store,
        OpenerService::new(completion.clone()),
        PracticeService::new(completion),
    )
}

async fn walk_to_review(controller: &mut LifecycleController) {
    controller.navigate(Destination::Prep).await;
    for _ in 0..3 {
        controller.prep_advance().await.unwrap();
    }
    assert_eq!(controller.prep_mut().unwrap().step(), PrepStep::Review);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn prepare_hold_reflect_archive() {
    let store = Arc::new(MemoryStore::new());
    let mut controller = controller_with(store.clone(), Ok("Thanks for meeting with me.".into()));

    controller.navigate(Destination::Prep).await;
    let wizard = controller.prep_mut().unwrap();
    wizard.set_title("Grade Dispute");
    wizard.set_person_name("Mr. Thompson");
    wizard.set_warmth(80);
    wizard.set_structure(30);
    assert_eq!(wizard.tone().quadrant, Quadrant::Enabling);
    assert_eq!(wizard.tone().label, "Enabling");

    for _ in 0..3 {
        controller.prep_advance().await.unwrap();
    }
    let opener = controller.generate_opener().await.unwrap();
    assert_eq!(opener, "Thanks for meeting with me.");
    assert_eq!(controller.prep_mut().unwrap().opener(), Some(opener.as_str()));

    assert_eq!(controller.prep_advance().await.unwrap(), PrepAdvance::Submit);
    assert_eq!(controller.view_name(), ViewName::Live);
    let current = controller.current().unwrap();
    let id = current.id.expect("store assigns an id");
    assert_eq!(current.status, ConversationStatus::Prepared);

    for tick in 1..=10 {
        assert!(controller.tick());
        if tick == 4 {
            let live = controller.live_mut().unwrap();
            live.add_note("I just want what's fair for him", NoteCategory::Quote);
        }
    }
    controller.end_live().await.unwrap();

    assert_eq!(controller.view_name(), ViewName::Reflect);
    let current = controller.current().unwrap();
    assert_eq!(current.status, ConversationStatus::Completed);
    assert_eq!(current.duration_secs, 10);
    assert_eq!(current.notes.len(), 1);
    assert_eq!(current.notes[0].elapsed_secs, 4);

    let form = controller.reflect_mut().unwrap();
    form.set_mood(Some(Mood::Hopeful));
    form.set_care_rating(4);
    form.set_clear_rating(5);
    controller.save_reflection().await.unwrap();

    let View::Archive(archive) = controller.view() else {
        panic!("expected archive view");
    };
    let listed = archive.all();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, Some(id));
    assert_eq!(listed[0].status, ConversationStatus::Completed);
    let reflection = listed[0].reflection.as_ref().unwrap();
    assert_eq!(reflection.care_rating.value(), 4);
    assert_eq!(reflection.clear_rating.value(), 5);

    let stored = store.get(id).await.unwrap().unwrap();
    assert_eq!(stored.opener.as_deref(), Some("Thanks for meeting with me."));
}

#[tokio::test]
async fn archived_conversation_reopens_in_reflection() {
    let store = Arc::new(MemoryStore::new());
    let mut controller = controller_with(store.clone(), Ok("Hi.".into()));

    walk_to_review(&mut controller).await;
    controller.prep_advance().await.unwrap();
    controller.end_live().await.unwrap();
    controller.reflect_mut().unwrap().set_what_worked("Listening first");
    controller.save_reflection().await.unwrap();

    controller.select_archived(1).unwrap();
    assert_eq!(controller.view_name(), ViewName::Reflect);
    let form = controller.reflect_mut().unwrap();
    assert_eq!(form.reflection().what_worked, "Listening first");

    form.set_next_steps("Follow up next week");
    controller.save_reflection().await.unwrap();

    let stored = store.get(1).await.unwrap().unwrap();
    assert_eq!(stored.status, ConversationStatus::Completed);
    assert_eq!(stored.reflection.unwrap().next_steps, "Follow up next week");
}

#[tokio::test]
async fn selecting_unknown_archive_entry_is_not_found() {
    let mut controller = controller_with(Arc::new(MemoryStore::new()), Ok("Hi.".into()));
    controller.navigate(Destination::Archive).await;
    assert_matches!(
        controller.select_archived(99),
        Err(CoreError::NotFound { id: 99, .. })
    );
}

// ---------------------------------------------------------------------------
// Degraded paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_outage_never_blocks_the_lifecycle() {
    let mut controller = controller_with(Arc::new(DownStore), Ok("Hi.".into()));

    walk_to_review(&mut controller).await;
    controller.prep_advance().await.unwrap();
    assert_eq!(controller.view_name(), ViewName::Live);
    assert_eq!(controller.current().unwrap().id, None);

    controller.tick();
    controller.tick();
    controller.end_live().await.unwrap();
    let current = controller.current().unwrap();
    assert_eq!(current.status, ConversationStatus::Completed);
    assert_eq!(current.duration_secs, 2);

    controller.save_reflection().await.unwrap();
    let View::Archive(archive) = controller.view() else {
        panic!("expected archive view");
    };
    assert!(archive.all().is_empty());
}

#[tokio::test]
async fn failed_update_after_create_keeps_capture_in_memory() {
    let store = Arc::new(ReadOnlyStore::default());
    let mut controller = controller_with(store.clone(), Ok("Hi.".into()));

    walk_to_review(&mut controller).await;
    controller.prep_advance().await.unwrap();
    let id = controller.current().unwrap().id.expect("create succeeded");

    for _ in 0..3 {
        controller.tick();
    }
    controller
        .live_mut()
        .unwrap()
        .add_note("Wants weekly updates", NoteCategory::Action);
    controller.end_live().await.unwrap();

    assert_eq!(controller.view_name(), ViewName::Reflect);
    let current = controller.current().unwrap();
    assert_eq!(current.id, Some(id));
    assert_eq!(current.status, ConversationStatus::Completed);
    assert_eq!(current.duration_secs, 3);
    assert_eq!(current.notes.len(), 1);

    let stored = store.get(id).await.unwrap().unwrap();
    assert_eq!(stored.status, ConversationStatus::Prepared);
    assert_eq!(stored.duration_secs, 0);

    controller.reflect_mut().unwrap().set_what_worked("Staying calm");
    controller.save_reflection().await.unwrap();
    let View::Archive(archive) = controller.view() else {
        panic!("expected archive view");
    };
    assert_eq!(archive.all().len(), 1);
}

#[tokio::test]
async fn completion_outage_yields_fallbacks() {
    let mut controller = controller_with(
        Arc::new(MemoryStore::new()),
        Err(TransientError::Unavailable("timeout".into())),
    );

    walk_to_review(&mut controller).await;
    assert_eq!(controller.generate_opener().await.unwrap(), OPENER_FALLBACK);

    controller.navigate(Destination::Learn).await;
    controller.select_scenario(3).unwrap();
    let reply = controller.practice_exchange("Can we talk?").await.unwrap();
    assert_eq!(reply.as_deref(), Some(PRACTICE_FALLBACK));
}

// ---------------------------------------------------------------------------
// Stale results
// ---------------------------------------------------------------------------

#[tokio::test]
async fn opener_arriving_after_navigation_is_discarded() {
    let mut controller = controller_with(Arc::new(MemoryStore::new()), Ok("Hi.".into()));
    walk_to_review(&mut controller).await;

    let request = controller.begin_opener().unwrap();
    assert!(controller.prep_mut().unwrap().is_generating());

    controller.navigate(Destination::Prep).await;
    assert!(!controller.apply_opener(request.ticket, "Late opener".into()));
    assert_eq!(controller.prep_mut().unwrap().opener(), None);
    assert!(!controller.prep_mut().unwrap().is_generating());
}

#[tokio::test]
async fn practice_reply_from_abandoned_session_is_discarded() {
    let mut controller = controller_with(Arc::new(MemoryStore::new()), Ok("Hmm.".into()));
    controller.navigate(Destination::Learn).await;
    controller.select_scenario(1).unwrap();

    let request = controller.begin_practice_turn("Morning!").unwrap().unwrap();
    controller.select_scenario(2).unwrap();
    assert!(!controller.apply_practice_reply(request.ticket, "Late reply".into()));
    assert_eq!(controller.practice().unwrap().transcript().len(), 1);
}

#[tokio::test]
async fn practice_exchange_appends_both_turns() {
    let mut controller = controller_with(Arc::new(MemoryStore::new()), Ok("Fine.".into()));
    controller.navigate(Destination::Learn).await;
    controller.select_scenario(5).unwrap();

    assert_eq!(controller.practice_exchange("   ").await.unwrap(), None);
    assert_eq!(
        controller.practice_exchange("How are you?").await.unwrap().as_deref(),
        Some("Fine.")
    );
    assert_eq!(controller.practice().unwrap().transcript().len(), 3);
}

#[tokio::test]
async fn lifecycle_actions_from_wrong_view_are_rejected() {
    let mut controller = controller_with(Arc::new(MemoryStore::new()), Ok("Hi.".into()));
    assert_matches!(controller.end_live().await, Err(CoreError::Conflict(_)));
    assert_matches!(controller.save_reflection().await, Err(CoreError::Conflict(_)));
    assert_matches!(controller.begin_opener(), Err(CoreError::Conflict(_)));
    assert!(!controller.tick());
}

#[tokio::test]
async fn checklist_survives_to_the_record() {
    let store = Arc::new(MemoryStore::new());
    let mut controller = controller_with(store.clone(), Ok("Hi.".into()));
    walk_to_review(&mut controller).await;
    controller.prep_advance().await.unwrap();

    controller
        .live_mut()
        .unwrap()
        .toggle_check(FrameworkLetter::Care(CareLetter::Empathy));
    controller.end_live().await.unwrap();

    let stored = store.get(1).await.unwrap().unwrap();
    assert!(stored.checklist.care.empathy);
    assert_eq!(stored.checklist.care_progress(), 1);
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn clock_driver_ticks_until_cancelled() {
    let mut controller = controller_with(Arc::new(MemoryStore::new()), Ok("Hi.".into()));
    walk_to_review(&mut controller).await;
    controller.prep_advance().await.unwrap();

    let controller = Arc::new(Mutex::new(controller));
    let cancel = CancellationToken::new();
    let driver = tokio::spawn(drive_clock(controller.clone(), cancel.clone()));

    tokio::time::sleep(Duration::from_millis(3500)).await;
    controller.lock().await.live_mut().unwrap().pause();
    tokio::time::sleep(Duration::from_secs(2)).await;
    controller.lock().await.live_mut().unwrap().resume();
    tokio::time::sleep(Duration::from_secs(2)).await;
    cancel.cancel();

    assert_eq!(driver.await.unwrap(), 5);
    assert_eq!(controller.lock().await.live_mut().unwrap().elapsed_secs(), 5);
}

#[tokio::test(start_paused = true)]
async fn clock_driver_stops_when_live_capture_ends() {
    let mut controller = controller_with(Arc::new(MemoryStore::new()), Ok("Hi.".into()));
    walk_to_review(&mut controller).await;
    controller.prep_advance().await.unwrap();

    let controller = Arc::new(Mutex::new(controller));
    let driver = tokio::spawn(drive_clock(controller.clone(), CancellationToken::new()));

    tokio::time::sleep(Duration::from_millis(2500)).await;
    controller.lock().await.end_live().await.unwrap();

    assert_eq!(driver.await.unwrap(), 2);
    assert_eq!(controller.lock().await.current().unwrap().duration_secs, 2);
}
