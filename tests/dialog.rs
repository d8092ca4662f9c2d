mod common;

use chrono::TimeDelta;
use common::{text_of, Harness, ScriptedSource, SEARCH_INPUT};
use jokebox::app::{DialogPhase, Key, JOKE_ADDED_MESSAGE};
use jokebox::domain::{DraftField, JokeContent, JokeKind};
use jokebox::infrastructure::{DialogElement, FocusHost, FocusTarget, Location};
use jokebox::storage::{KeyValueStore, MemoryStore, LOCAL_JOKES_KEY};
use std::sync::Arc;
use std::time::Duration;

const VALID_TEXT: &str = "This is a valid joke with enough characters";

async fn started() -> Harness {
    Harness::new(Arc::new(ScriptedSource::default())).started().await
}

fn focused(harness: &Harness) -> Option<FocusTarget> {
    harness.document.active()
}

#[tokio::test(start_paused = true)]
async fn submitting_a_joke_closes_dialog_and_shows_it_first() {
    let mut harness = started().await;

    harness.controller.open_dialog();
    assert_eq!(harness.controller.state().dialog.phase(), DialogPhase::Open);
    assert_eq!(harness.controller.view().location, "/?addJoke=true");
    assert_eq!(focused(&harness), Some(FocusTarget::Dialog(DialogElement::TextInput)));

    harness
        .controller
        .update_draft(DraftField::Text, &format!("  {VALID_TEXT}  "));
    assert!(harness.controller.view().dialog.unwrap().can_submit);

    let submitted_at = tokio::time::Instant::now();
    harness.controller.submit();
    assert!(harness.controller.view().dialog.unwrap().submitting);

    harness.controller.step().await;
    assert!(submitted_at.elapsed() >= Duration::from_millis(300));

    let view = harness.controller.view();
    assert!(view.dialog.is_none());
    assert_eq!(view.location, "/");
    assert_eq!(view.notification.as_ref().unwrap().message, JOKE_ADDED_MESSAGE);

    let local = harness.controller.local_jokes();
    assert_eq!(local.len(), 1);
    assert_eq!(text_of(&local[0]), VALID_TEXT);
    assert!(local[0].is_local());
    assert_eq!(view.items[0], local[0]);
    assert_eq!(focused(&harness), Some(FocusTarget::Page(SEARCH_INPUT)));

    let stored = harness.backend.get(LOCAL_JOKES_KEY).unwrap().unwrap();
    assert!(stored.contains(VALID_TEXT));

    harness.controller.step().await;
    assert!(harness.controller.view().notification.is_none());
    assert!(submitted_at.elapsed() >= Duration::from_millis(3300));
}

#[tokio::test(start_paused = true)]
async fn two_part_submission_is_trimmed() {
    let mut harness = started().await;

    harness.controller.open_dialog();
    harness.controller.select_kind(JokeKind::TwoPart);

    harness.controller.update_draft(DraftField::Setup, "  Knock knock  ");
    harness.controller.update_draft(DraftField::Delivery, " Who is there? ");
    harness.controller.submit();
    harness.controller.step().await;

    let local = harness.controller.local_jokes();
    assert_eq!(
        local[0].content,
        JokeContent::TwoPart {
            setup: "Knock knock".into(),
            delivery: "Who is there?".into(),
        }
    );
}

#[tokio::test]
async fn invalid_draft_is_rejected_without_writing() {
    let mut harness = started().await;

    harness.controller.open_dialog();
    harness.controller.update_draft(DraftField::Text, "too short");
    harness.controller.submit();

    let view = harness.controller.view();
    let dialog = view.dialog.unwrap();
    assert!(!dialog.submitting);
    assert!(!dialog.can_submit);
    assert!(dialog.validation_error.is_some());
    assert!(harness.controller.local_jokes().is_empty());
    assert_eq!(harness.backend.get(LOCAL_JOKES_KEY).unwrap(), None);

    harness.controller.update_draft(DraftField::Text, VALID_TEXT);
    assert!(harness.controller.view().dialog.unwrap().validation_error.is_none());
}

#[tokio::test]
async fn escape_closes_and_restores_focus() {
    let mut harness = started().await;

    harness.controller.open_dialog();
    assert!(harness.controller.press_key(Key::Escape));

    assert_eq!(harness.controller.state().dialog.phase(), DialogPhase::Closed);
    assert_eq!(focused(&harness), Some(FocusTarget::Page(SEARCH_INPUT)));
    assert_eq!(harness.controller.view().location, "/");

    assert!(!harness.controller.press_key(Key::Escape));
}

#[tokio::test]
async fn closing_after_trigger_removed_leaves_focus_alone() {
    let mut harness = started().await;

    harness.controller.open_dialog();
    harness.document.detach(SEARCH_INPUT);
    harness.controller.close_dialog();

    assert_eq!(harness.controller.state().dialog.phase(), DialogPhase::Closed);
    assert_ne!(focused(&harness), Some(FocusTarget::Page(SEARCH_INPUT)));
}

#[tokio::test]
async fn opening_with_nothing_focused_restores_nothing() {
    let mut harness = started().await;

    harness.document.blur();
    harness.controller.open_dialog();
    harness
        .document
        .focus(FocusTarget::Dialog(DialogElement::CancelButton));
    harness.controller.close_dialog();

    assert_eq!(harness.controller.state().dialog.phase(), DialogPhase::Closed);
    assert_eq!(focused(&harness), Some(FocusTarget::Dialog(DialogElement::CancelButton)));
}

#[tokio::test]
async fn tab_wraps_inside_dialog() {
    let mut harness = started().await;
    harness.controller.open_dialog();

    assert!(!harness.controller.press_key(Key::Tab { shift: false }));

    harness
        .document
        .focus(FocusTarget::Dialog(DialogElement::CancelButton));
    assert!(harness.controller.press_key(Key::Tab { shift: false }));
    assert_eq!(focused(&harness), Some(FocusTarget::Dialog(DialogElement::CloseButton)));

    assert!(harness.controller.press_key(Key::Tab { shift: true }));
    assert_eq!(focused(&harness), Some(FocusTarget::Dialog(DialogElement::CancelButton)));

    harness.controller.update_draft(DraftField::Text, VALID_TEXT);
    assert!(!harness.controller.press_key(Key::Tab { shift: false }));
}

#[tokio::test]
async fn backdrop_closes_only_on_direct_hit() {
    let mut harness = started().await;
    harness.controller.open_dialog();

    harness.controller.backdrop_click(false);
    assert_eq!(harness.controller.state().dialog.phase(), DialogPhase::Open);

    harness.controller.backdrop_click(true);
    assert_eq!(harness.controller.state().dialog.phase(), DialogPhase::Closed);
}

#[tokio::test]
async fn dialog_follows_history() {
    let mut harness = started().await;

    harness.controller.navigate_to(Location::parse("/?addJoke=true"));
    assert_eq!(harness.controller.state().dialog.phase(), DialogPhase::Open);
    assert_eq!(focused(&harness), Some(FocusTarget::Dialog(DialogElement::TextInput)));

    assert!(harness.controller.navigate_back());
    assert_eq!(harness.controller.state().dialog.phase(), DialogPhase::Closed);
    assert_eq!(focused(&harness), Some(FocusTarget::Page(SEARCH_INPUT)));

    assert!(harness.controller.navigate_forward());
    assert_eq!(harness.controller.state().dialog.phase(), DialogPhase::Open);
    assert!(!harness.controller.navigate_forward());

    harness.controller.navigate_to(Location::parse("/?addJoke=false"));
    assert_eq!(harness.controller.state().dialog.phase(), DialogPhase::Closed);
}

#[tokio::test]
async fn in_app_open_is_undone_by_back() {
    let mut harness = started().await;

    harness.controller.open_dialog();
    harness.controller.update_draft(DraftField::Text, "half written");
    assert!(harness.controller.navigate_back());

    let view = harness.controller.view();
    assert!(view.dialog.is_none());
    assert_eq!(view.location, "/");

    assert!(harness.controller.navigate_forward());
    let dialog = harness.controller.view().dialog.unwrap();
    assert_eq!(dialog.draft.text, "");
}

#[tokio::test]
async fn deep_link_opens_dialog_on_start() {
    let harness = Harness::with_backend(
        Arc::new(ScriptedSource::default()),
        MemoryStore::default(),
        Location::parse("/?addJoke=true"),
    )
    .started()
    .await;

    let view = harness.controller.view();
    assert!(view.dialog.is_some());
    assert_eq!(view.location, "/?addJoke=true");
    assert_eq!(focused(&harness), Some(FocusTarget::Dialog(DialogElement::TextInput)));
}

#[tokio::test(start_paused = true)]
async fn closing_during_latency_abandons_write() {
    let mut harness = started().await;

    harness.controller.open_dialog();
    harness.controller.update_draft(DraftField::Text, VALID_TEXT);
    harness.controller.submit();
    harness.controller.close_dialog();
    harness.controller.step().await;

    assert!(harness.controller.local_jokes().is_empty());
    assert!(harness.controller.view().notification.is_none());
}

#[tokio::test(start_paused = true)]
async fn failed_write_still_adds_in_memory() {
    let mut harness = started().await;
    harness.backend.set_fail_writes(true);

    harness.controller.open_dialog();
    harness.controller.update_draft(DraftField::Text, VALID_TEXT);
    harness.controller.submit();
    harness.controller.step().await;

    assert_eq!(harness.controller.local_jokes().len(), 1);
    assert!(harness.controller.view().dialog.is_none());
    assert_eq!(harness.backend.get(LOCAL_JOKES_KEY).unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn new_notification_replaces_and_restarts_timer() {
    let mut harness = started().await;

    harness.controller.notify("first", TimeDelta::milliseconds(3000));
    tokio::time::advance(Duration::from_secs(2)).await;
    harness.controller.notify("second", TimeDelta::milliseconds(3000));
    let replaced_at = tokio::time::Instant::now();
    assert_eq!(harness.controller.view().notification.unwrap().message, "second");

    harness.controller.step().await;
    assert!(harness.controller.view().notification.is_none());
    assert!(replaced_at.elapsed() >= Duration::from_secs(3));
}

#[tokio::test]
async fn persistent_notification_dismisses_manually() {
    let mut harness = started().await;

    harness.controller.notify("sticky", TimeDelta::zero());
    assert!(harness.controller.view().notification.is_some());

    harness.controller.dismiss_notification();
    harness.controller.dismiss_notification();
    assert!(harness.controller.view().notification.is_none());
}

#[tokio::test(start_paused = true)]
async fn removing_local_joke_updates_view() {
    let mut harness = started().await;

    harness.controller.open_dialog();
    harness.controller.update_draft(DraftField::Text, VALID_TEXT);
    harness.controller.submit();
    harness.controller.step().await;

    let id = harness.controller.local_jokes()[0].id;
    assert!(harness.controller.remove_local_joke(id));
    assert!(!harness.controller.remove_local_joke(id));

    let view = harness.controller.view();
    assert!(view.items.iter().all(|joke| joke.id != id));
    assert!(harness.controller.local_jokes().is_empty());
}
