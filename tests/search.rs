mod common;

use common::{remote, GatedSource, Harness, ScriptedSource};
use jokebox::app::SearchStatus;
use jokebox::domain::{Joke, JokeContent};
use jokebox::gateway::{ApiResponse, FetchError, Language};
use jokebox::infrastructure::Location;
use jokebox::storage::{MemoryStore, LOCAL_JOKES_KEY};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn initial_load_lists_local_jokes_before_remote() {
    let local = vec![Joke::local(5, JokeContent::Single { text: "my very own joke".into() })];
    let backend = MemoryStore::with_entry(LOCAL_JOKES_KEY, &serde_json::to_string(&local).unwrap());
    let source = Arc::new(ScriptedSource::default());
    source.push(Ok(vec![remote(1, "remote one"), remote(2, "remote two")]));

    let harness = Harness::with_backend(source.clone(), backend, Location::default())
        .started()
        .await;

    let view = harness.controller.view();
    let ids: Vec<u64> = view.items.iter().map(|joke| joke.id).collect();
    assert_eq!(ids, vec![5, 1, 2]);
    assert_eq!(view.status, SearchStatus::Success);
    assert!(!view.initial_load);
    assert!(view.empty_state.is_none());

    let requests = source.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].contains, None);
    assert_eq!(requests[0].language, Language::En);
}

#[tokio::test]
async fn view_is_loading_before_first_response() {
    let source = Arc::new(GatedSource::default());
    let _gate = source.gate("");
    let mut harness = Harness::new(source.clone());

    harness.controller.start();

    let view = harness.controller.view();
    assert_eq!(view.status, SearchStatus::Loading);
    assert!(view.initial_load);
    assert!(view.items.is_empty());
}

#[tokio::test(start_paused = true)]
async fn keystrokes_collapse_into_one_trimmed_search() {
    let source = Arc::new(ScriptedSource::default());
    let mut harness = Harness::new(source.clone()).started().await;
    let typed_at = tokio::time::Instant::now();

    for raw in ["p", "pro", "progr", "  programming  "] {
        harness.controller.input_query(raw);
    }

    harness.controller.step().await;
    assert!(typed_at.elapsed() >= Duration::from_millis(500));
    assert_eq!(harness.controller.view().status, SearchStatus::Loading);

    harness.controller.step().await;
    let requests = source.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].contains.as_deref(), Some("programming"));
}

#[tokio::test(start_paused = true)]
async fn unchanged_debounced_query_is_not_refetched() {
    let source = Arc::new(ScriptedSource::default());
    let mut harness = Harness::new(source.clone()).started().await;

    harness.controller.input_query("cats");
    harness.controller.step().await;
    harness.controller.step().await;
    assert_eq!(source.requests().len(), 2);

    harness.controller.input_query("cats ");
    harness.controller.step().await;
    assert_eq!(source.requests().len(), 2);
    assert_eq!(harness.controller.view().status, SearchStatus::Success);
}

#[tokio::test]
async fn only_the_latest_search_lands() {
    let source = Arc::new(GatedSource::default());
    let mut harness = Harness::new(source.clone()).started().await;

    let first = source.gate("q1");
    let second = source.gate("q2");
    harness.controller.search("q1");
    harness.controller.search("q2");

    let _ = first.send(Ok(vec![remote(1, "stale")]));
    second.send(Ok(vec![remote(2, "fresh")])).unwrap();
    harness.controller.step().await;
    tokio::task::yield_now().await;
    harness.controller.drain();

    let view = harness.controller.view();
    assert_eq!(view.status, SearchStatus::Success);
    assert_eq!(view.items, vec![remote(2, "fresh")]);
    assert_eq!(view.query, "q2");
}

#[tokio::test]
async fn no_match_shows_mapped_message_and_retry_recovers() {
    let source = Arc::new(ScriptedSource::default());
    let mut harness = Harness::new(source.clone()).started().await;

    let body: ApiResponse = serde_json::from_str(
        r#"{"error":true,"internalError":false,"code":106,"message":"No matching joke found","causedBy":["No jokes were found that match your provided filter(s)."]}"#,
    )
    .unwrap();
    source.push(body.into_outcome());
    harness.controller.search("zzzzqqq");
    harness.controller.step().await;

    let view = harness.controller.view();
    assert_eq!(view.status, SearchStatus::Error);
    assert_eq!(view.error_message, Some(FetchError::NotFound.user_message()));
    assert!(view.items.is_empty());
    assert!(view.empty_state.is_none());

    source.push(Ok(vec![remote(3, "found it")]));
    harness.controller.retry();
    assert_eq!(harness.controller.view().status, SearchStatus::Loading);
    harness.controller.step().await;

    let view = harness.controller.view();
    assert_eq!(view.status, SearchStatus::Success);
    assert_eq!(view.error_message, None);
    assert_eq!(view.items, vec![remote(3, "found it")]);
    assert_eq!(source.requests().last().unwrap().contains.as_deref(), Some("zzzzqqq"));
}

#[tokio::test]
async fn empty_success_offers_empty_state() {
    let source = Arc::new(ScriptedSource::default());
    let mut harness = Harness::new(source.clone()).started().await;

    harness.controller.search("nothing matches this");
    harness.controller.step().await;

    let view = harness.controller.view();
    assert_eq!(view.status, SearchStatus::Success);
    assert_eq!(view.empty_state.unwrap().message, "No jokes found");
}

#[tokio::test]
async fn non_blank_search_hides_local_jokes() {
    let local = vec![Joke::local(5, JokeContent::Single { text: "my very own joke".into() })];
    let backend = MemoryStore::with_entry(LOCAL_JOKES_KEY, &serde_json::to_string(&local).unwrap());
    let source = Arc::new(ScriptedSource::default());
    let mut harness = Harness::with_backend(source.clone(), backend, Location::default())
        .started()
        .await;

    source.push(Ok(vec![remote(9, "only remote")]));
    harness.controller.search("remote");
    harness.controller.step().await;
    assert_eq!(harness.controller.view().items, vec![remote(9, "only remote")]);

    harness.controller.search("");
    harness.controller.step().await;
    let ids: Vec<u64> = harness.controller.view().items.iter().map(|joke| joke.id).collect();
    assert_eq!(ids, vec![5]);
}

#[tokio::test]
async fn language_change_fetches_immediately() {
    let source = Arc::new(ScriptedSource::default());
    let mut harness = Harness::new(source.clone()).started().await;

    harness.controller.set_language(Language::Fr);
    assert_eq!(harness.controller.view().status, SearchStatus::Loading);
    harness.controller.step().await;

    let requests = source.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].language, Language::Fr);

    harness.controller.set_language(Language::Fr);
    assert_eq!(harness.controller.view().status, SearchStatus::Success);
}

#[tokio::test]
async fn teardown_ignores_late_results() {
    let source = Arc::new(GatedSource::default());
    let mut harness = Harness::new(source.clone()).started().await;

    let gate = source.gate("late");
    harness.controller.search("late");
    harness.controller.teardown();

    let _ = gate.send(Ok(vec![remote(4, "too late")]));
    tokio::task::yield_now().await;
    harness.controller.drain();

    let view = harness.controller.view();
    assert_eq!(view.status, SearchStatus::Loading);
    assert!(view.items.is_empty());
}
