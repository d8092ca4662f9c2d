//! Shared fakes for controller integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use jokebox::app::{AppState, Timings};
use jokebox::domain::{Joke, JokeContent};
use jokebox::gateway::{FetchOutcome, JokeSource, Language, SearchRequest};
use jokebox::infrastructure::{ElementId, FocusHost, FocusTarget, Location, MemoryHistory, VirtualDocument};
use jokebox::storage::{LocalJokeStore, MemoryStore};
use jokebox::Controller;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Page element that has focus when a test starts.
pub const SEARCH_INPUT: ElementId = ElementId(1);

/// Answers searches from a queue; an empty queue answers with no jokes.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<FetchOutcome>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl ScriptedSource {
    pub fn push(&self, outcome: FetchOutcome) {
        self.responses.lock().unwrap().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl JokeSource for ScriptedSource {
    async fn search(&self, request: &SearchRequest) -> FetchOutcome {
        self.requests.lock().unwrap().push(request.clone());
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(vec![]))
    }
}

/// Holds each search until the test releases the gate registered for its
/// query. Searches without a gate answer with no jokes.
#[derive(Default)]
pub struct GatedSource {
    gates: Mutex<HashMap<Option<String>, oneshot::Receiver<FetchOutcome>>>,
}

impl GatedSource {
    pub fn gate(&self, query: &str) -> oneshot::Sender<FetchOutcome> {
        let (tx, rx) = oneshot::channel();
        let key = SearchRequest::new(query, Language::En).contains;
        self.gates.lock().unwrap().insert(key, rx);
        tx
    }
}

#[async_trait]
impl JokeSource for GatedSource {
    async fn search(&self, request: &SearchRequest) -> FetchOutcome {
        let gate = self.gates.lock().unwrap().remove(&request.contains);
        match gate {
            Some(rx) => rx.await.unwrap_or(Ok(vec![])),
            None => Ok(vec![]),
        }
    }
}

pub fn remote(id: u64, text: &str) -> Joke {
    Joke {
        category: "Programming".to_string(),
        ..Joke::local(id, JokeContent::Single { text: text.to_string() })
    }
}

pub fn text_of(joke: &Joke) -> &str {
    match &joke.content {
        JokeContent::Single { text } => text,
        JokeContent::TwoPart { setup, .. } => setup,
    }
}

pub struct Harness {
    pub controller: Controller,
    pub document: VirtualDocument,
    pub backend: MemoryStore,
}

impl Harness {
    /// Controller over `source` and an empty in-memory store, not yet started.
    pub fn new(source: Arc<dyn JokeSource>) -> Self {
        Self::with_backend(source, MemoryStore::default(), Location::default())
    }

    pub fn with_backend(source: Arc<dyn JokeSource>, backend: MemoryStore, location: Location) -> Self {
        let mut document = VirtualDocument::default();
        document.attach(SEARCH_INPUT);
        document.focus(FocusTarget::Page(SEARCH_INPUT));

        let controller = Controller::new(
            AppState::new(Language::En, Timings::default()),
            LocalJokeStore::open(Box::new(backend.clone())),
            source,
            Box::new(document.clone()),
            Box::new(MemoryHistory::new(location)),
        );

        Self {
            controller,
            document,
            backend,
        }
    }

    /// Starts the controller and waits for the initial search to land.
    pub async fn started(mut self) -> Self {
        self.controller.start();
        self.controller.step().await;
        self
    }
}
