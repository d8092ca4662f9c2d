//! Effect execution for the jokebox controller.
//!
//! [`Controller`] owns the application state together with everything that
//! performs side effects: the local joke store, the remote joke source, and the
//! focus and navigation capabilities of the host. Commands from presentation are
//! turned into [`Event`]s and run through [`handle_event`]; the returned
//! [`Action`]s are executed here. Synchronous actions (store writes,
//! navigation, focus moves) feed their results straight back into the event
//! queue. Asynchronous ones (fetches, timers) run as tokio tasks and post their
//! result event on an unbounded channel that [`Controller::step`] drains.
//!
//! Every asynchronous task belongs to a single slot. Starting a new task in a
//! slot aborts the previous one, so a superseded fetch or timer normally never
//! reports back. The handler's id checks still cover a result that was
//! already queued when its task was replaced.

use crate::app::{handle_event, Action, AppState, Event, Key};
use crate::domain::{DraftField, JokeKind};
use crate::gateway::{JokeSource, Language};
use crate::infrastructure::{FocusHost, FocusTarget, Location, NavigationHost};
use crate::storage::{LocalJokeStore, LocalJokes};
use crate::ui::ViewModel;
use chrono::TimeDelta;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;

/// Pending task per concern. At most one task runs per slot.
#[derive(Debug, Default)]
struct TaskSlots {
    fetch: Option<AbortHandle>,
    debounce: Option<AbortHandle>,
    submit: Option<AbortHandle>,
    dismiss: Option<AbortHandle>,
}

impl TaskSlots {
    fn replace(slot: &mut Option<AbortHandle>, handle: AbortHandle) {
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    fn cancel(slot: &mut Option<AbortHandle>) {
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }

    fn abort_all(&mut self) {
        Self::cancel(&mut self.fetch);
        Self::cancel(&mut self.debounce);
        Self::cancel(&mut self.submit);
        Self::cancel(&mut self.dismiss);
    }
}

/// Headless search-and-submission controller.
///
/// Must be created and driven inside a tokio runtime. Presentation calls the
/// command methods, awaits [`step`](Self::step) (or [`run`](Self::run)) to let
/// task results in, and reads state through [`view`](Self::view) or
/// [`subscribe`](Self::subscribe).
///
/// # Examples
///
/// ```no_run
/// use jokebox::app::{AppState, Timings};
/// use jokebox::gateway::{HttpJokeSource, Language, DEFAULT_BASE_URL};
/// use jokebox::infrastructure::{MemoryHistory, VirtualDocument};
/// use jokebox::runtime::Controller;
/// use jokebox::storage::{LocalJokeStore, MemoryStore};
/// use std::sync::Arc;
///
/// # async fn demo() -> jokebox::Result<()> {
/// let mut controller = Controller::new(
///     AppState::new(Language::En, Timings::default()),
///     LocalJokeStore::open(Box::new(MemoryStore::default())),
///     Arc::new(HttpJokeSource::new(DEFAULT_BASE_URL, None)?),
///     Box::new(VirtualDocument::default()),
///     Box::new(MemoryHistory::default()),
/// );
/// controller.start();
/// controller.step().await;
/// println!("{} jokes", controller.view().items.len());
/// # Ok(())
/// # }
/// ```
pub struct Controller {
    state: AppState,
    store: LocalJokeStore,
    source: Arc<dyn JokeSource>,
    focus: Box<dyn FocusHost>,
    navigation: Box<dyn NavigationHost>,

    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    local_jokes: watch::Receiver<LocalJokes>,
    view: watch::Sender<ViewModel>,
    tasks: TaskSlots,
}

impl Controller {
    #[must_use]
    pub fn new(
        state: AppState,
        store: LocalJokeStore,
        source: Arc<dyn JokeSource>,
        focus: Box<dyn FocusHost>,
        navigation: Box<dyn NavigationHost>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let local_jokes = store.subscribe();
        let initial = state.compute_viewmodel(&local_jokes.borrow());
        let (view, _) = watch::channel(initial);

        Self {
            state,
            store,
            source,
            focus,
            navigation,
            events_tx,
            events_rx,
            local_jokes,
            view,
            tasks: TaskSlots::default(),
        }
    }

    /// Syncs the dialog with the current location and issues the initial
    /// unfiltered search.
    pub fn start(&mut self) {
        tracing::info!(location = %self.navigation.current(), "controller starting");
        self.sync_location(self.navigation.current());
        self.dispatch(Event::Search {
            query: String::new(),
        });
    }

    /// Waits for the next task result and processes it.
    pub async fn step(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.dispatch(event);
        }
    }

    /// Processes task results until the controller is torn down.
    pub async fn run(&mut self) {
        while !self.state.search.is_torn_down() {
            self.step().await;
        }
    }

    /// Processes task results that are already queued, without waiting.
    pub fn drain(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
        }
    }

    #[must_use]
    pub fn view(&self) -> ViewModel {
        self.view.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.view.subscribe()
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn local_jokes(&self) -> LocalJokes {
        self.store.list()
    }

    pub fn search(&mut self, query: &str) {
        self.dispatch(Event::Search {
            query: query.to_string(),
        });
    }

    /// Keystroke-driven query text; searched after the quiet period.
    pub fn input_query(&mut self, raw: &str) {
        self.dispatch(Event::QueryInput { raw: raw.to_string() });
    }

    pub fn retry(&mut self) {
        self.dispatch(Event::Retry);
    }

    pub fn set_language(&mut self, language: Language) {
        self.dispatch(Event::LanguageChanged { language });
    }

    pub fn open_dialog(&mut self) {
        self.dispatch(Event::OpenDialog);
    }

    pub fn close_dialog(&mut self) {
        self.dispatch(Event::CloseDialog);
    }

    pub fn select_kind(&mut self, kind: JokeKind) {
        self.dispatch(Event::SelectKind { kind });
    }

    pub fn update_draft(&mut self, field: DraftField, value: &str) {
        self.dispatch(Event::UpdateDraft {
            field,
            value: value.to_string(),
        });
    }

    pub fn submit(&mut self) {
        self.dispatch(Event::Submit);
    }

    /// Offers a key press to the dialog. Returns true when the controller
    /// handled it and the host should suppress its default behaviour.
    pub fn press_key(&mut self, key: Key) -> bool {
        let focused = self.focus.active();
        self.dispatch(Event::Key { key, focused })
    }

    pub fn backdrop_click(&mut self, on_backdrop: bool) {
        self.dispatch(Event::BackdropClick { on_backdrop });
    }

    /// Navigates to an externally supplied location, such as a deep link.
    pub fn navigate_to(&mut self, location: Location) {
        self.navigation.push(location.clone());
        self.sync_location(location);
    }

    /// History back. Returns false at the start of history.
    pub fn navigate_back(&mut self) -> bool {
        let Some(location) = self.navigation.back() else {
            return false;
        };
        self.sync_location(location);
        true
    }

    /// History forward. Returns false at the end of history.
    pub fn navigate_forward(&mut self) -> bool {
        let Some(location) = self.navigation.forward() else {
            return false;
        };
        self.sync_location(location);
        true
    }

    /// Shows a notification; a non-positive `duration` never auto-dismisses.
    pub fn notify(&mut self, message: &str, duration: TimeDelta) {
        self.dispatch(Event::ShowNotification {
            message: message.to_string(),
            duration,
        });
    }

    pub fn dismiss_notification(&mut self) {
        self.dispatch(Event::DismissNotification);
    }

    /// Removes a locally authored joke. Returns false if no joke had `id`.
    pub fn remove_local_joke(&mut self, id: u64) -> bool {
        let removed = self.store.remove(id);
        self.process(VecDeque::new());
        removed
    }

    /// Stops honoring task results and aborts everything pending.
    pub fn teardown(&mut self) {
        self.dispatch(Event::Teardown);
    }

    fn sync_location(&mut self, location: Location) {
        let focused = self.focus.active();
        self.dispatch(Event::LocationChanged { location, focused });
    }

    /// Runs `event` and every event its actions produce synchronously.
    ///
    /// Returns true when `event` itself produced at least one action.
    fn dispatch(&mut self, event: Event) -> bool {
        self.process(VecDeque::from([event]))
    }

    /// Drains `queue`, turning store changes into `LocalJokesChanged` after
    /// each event. The store is also polled once up front, so mutations made
    /// outside event handling are picked up the same way.
    fn process(&mut self, mut queue: VecDeque<Event>) -> bool {
        self.poll_local_jokes(&mut queue);
        let mut handled: Option<bool> = None;
        let mut changed = false;

        while let Some(event) = queue.pop_front() {
            match handle_event(&mut self.state, &event) {
                Ok((should_publish, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_publish,
                        "event handled successfully"
                    );
                    if handled.is_none() {
                        handled = Some(!actions.is_empty());
                    }
                    changed |= should_publish;
                    for action in actions {
                        self.execute_action(action, &mut queue);
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "error handling event");
                    if handled.is_none() {
                        handled = Some(false);
                    }
                }
            }

            self.poll_local_jokes(&mut queue);
        }

        if changed {
            self.publish();
        }
        handled.unwrap_or(false)
    }

    fn poll_local_jokes(&mut self, queue: &mut VecDeque<Event>) {
        if self.local_jokes.has_changed().unwrap_or(false) {
            self.local_jokes.mark_unchanged();
            queue.push_back(Event::LocalJokesChanged);
        }
    }

    fn publish(&self) {
        let viewmodel = self.state.compute_viewmodel(&self.local_jokes.borrow());
        self.view.send_replace(viewmodel);
    }

    #[tracing::instrument(level = "debug", skip(self, queue))]
    fn execute_action(&mut self, action: Action, queue: &mut VecDeque<Event>) {
        match action {
            Action::Fetch { request_id, request } => {
                let source = Arc::clone(&self.source);
                let handle = self.spawn_event(async move {
                    let outcome = source.search(&request).await;
                    Event::SearchCompleted { request_id, outcome }
                });
                TaskSlots::replace(&mut self.tasks.fetch, handle);
            }
            Action::ScheduleDebounce { generation, after } => {
                let handle = self.spawn_event(async move {
                    tokio::time::sleep(after).await;
                    Event::DebounceElapsed { generation }
                });
                TaskSlots::replace(&mut self.tasks.debounce, handle);
            }
            Action::ScheduleSubmit { submission, after } => {
                let handle = self.spawn_event(async move {
                    tokio::time::sleep(after).await;
                    Event::SubmitDelayElapsed { submission }
                });
                TaskSlots::replace(&mut self.tasks.submit, handle);
            }
            Action::PersistDraft { submission, draft } => {
                let event = match self.store.add(&draft) {
                    Ok(joke) => Event::SubmitSucceeded { submission, joke },
                    Err(e) => Event::SubmitFailed {
                        submission,
                        message: e.to_string(),
                    },
                };
                queue.push_back(event);
            }
            Action::ScheduleDismiss { id, after } => {
                let handle = self.spawn_event(async move {
                    tokio::time::sleep(after).await;
                    Event::NotificationExpired { id }
                });
                TaskSlots::replace(&mut self.tasks.dismiss, handle);
            }
            Action::CancelDismiss => TaskSlots::cancel(&mut self.tasks.dismiss),
            Action::Navigate { dialog_open } => {
                let current = self.navigation.current();
                if current.dialog_requested() != dialog_open {
                    self.navigation.push(current.with_dialog(dialog_open));
                }
                queue.push_back(Event::LocationChanged {
                    location: self.navigation.current(),
                    focused: self.focus.active(),
                });
            }
            Action::Focus(target) => self.focus.focus(target),
            Action::RestoreFocus(element) => {
                if self.focus.is_attached(element) {
                    self.focus.focus(FocusTarget::Page(element));
                } else {
                    tracing::debug!(element = element.0, "captured element detached, leaving focus");
                }
            }
            Action::CancelAll => self.tasks.abort_all(),
        }
    }

    fn spawn_event<F>(&self, task: F) -> AbortHandle
    where
        F: Future<Output = Event> + Send + 'static,
    {
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let event = task.await;
            if events.send(event).is_err() {
                tracing::trace!("controller dropped, discarding task result");
            }
        })
        .abort_handle()
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.tasks.abort_all();
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("store", &self.store)
            .field("tasks", &self.tasks)
            .finish_non_exhaustive()
    }
}
