//! Application controller.
//!
//! [`State`] holds the collection, the selection and the mode, and only
//! [`reduce`] changes it. [`App`] wraps the state with everything the
//! terminal session needs (navigation bar, open editor, HTTP client, status
//! line) and turns user intent into HTTP requests whose results come back as
//! [`AppEvent`]s.

use std::borrow::Cow;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::action_bar::{self, ActionTag};
use crate::api::{ApiError, ArticleClient};
use crate::editor::{Editor, EditorOutcome};
use crate::keybindings::KeybindingRegistry;
use crate::model::{Article, ArticleId, Mode};
use crate::nav::{NavBar, NavIntent};
use crate::util::catch_task_panic;

// ============================================================================
// State and Reducer
// ============================================================================

/// Everything the screen is derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub collection: Vec<Article>,
    pub selected: Option<ArticleId>,
    pub mode: Mode,
}

impl State {
    /// The selected article, if it is still in the collection.
    pub fn current(&self) -> Option<&Article> {
        let id = self.selected?;
        self.collection.iter().find(|a| a.id == Some(id))
    }

    fn contains(&self, id: ArticleId) -> bool {
        self.collection.iter().any(|a| a.id == Some(id))
    }
}

/// State transitions. Server-backed ones are only dispatched after the
/// server confirmed the change.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the collection. The selection survives only if its id is
    /// still present.
    CollectionLoaded(Vec<Article>),
    /// Select an article by id, or clear the selection.
    Select(Option<ArticleId>),
    BeginAdd,
    /// Ignored when nothing is selected.
    BeginEdit,
    EditorCancelled,
    ArticleCreated(Article),
    ArticleUpdated(Article),
    ArticleDeleted(ArticleId),
}

pub fn reduce(mut state: State, action: Action) -> State {
    match action {
        Action::CollectionLoaded(collection) => {
            state.collection = collection;
            if state.selected.is_some_and(|id| !state.contains(id)) {
                state.selected = None;
            }
        }
        Action::Select(None) => state.selected = None,
        Action::Select(Some(id)) => {
            if state.contains(id) {
                state.selected = Some(id);
            } else {
                tracing::debug!(id, "Ignoring selection of unknown article");
            }
        }
        Action::BeginAdd => state.mode = Mode::Add,
        Action::BeginEdit => {
            if state.current().is_some() {
                state.mode = Mode::Edit;
            }
        }
        Action::EditorCancelled => state.mode = Mode::View,
        Action::ArticleCreated(article) => {
            state.selected = article.id;
            state.collection.push(article);
            state.mode = Mode::View;
        }
        Action::ArticleUpdated(article) => {
            if let Some(slot) = state
                .collection
                .iter_mut()
                .find(|a| a.id.is_some() && a.id == article.id)
            {
                state.selected = article.id;
                *slot = article;
            } else {
                tracing::warn!(id = ?article.id, "Updated article is not in the collection");
            }
            state.mode = Mode::View;
        }
        Action::ArticleDeleted(id) => {
            state.collection.retain(|a| a.id != Some(id));
            if state.selected == Some(id) {
                state.selected = None;
            }
            state.mode = Mode::View;
        }
    }
    state
}

// ============================================================================
// Requests and Events
// ============================================================================

/// One HTTP operation against the article API.
#[derive(Debug, Clone)]
pub enum Request {
    FetchAll,
    Create(Article),
    Update { id: ArticleId, article: Article },
    Delete { id: ArticleId },
}

impl Request {
    /// Task name used in logs and panic reports.
    pub fn task_name(&self) -> &'static str {
        match self {
            Self::FetchAll => "fetch_articles",
            Self::Create(_) => "create_article",
            Self::Update { .. } => "update_article",
            Self::Delete { .. } => "delete_article",
        }
    }

    fn progress_label(&self) -> &'static str {
        match self {
            Self::FetchAll => "Loading articles...",
            Self::Create(_) | Self::Update { .. } => "Saving...",
            Self::Delete { .. } => "Deleting...",
        }
    }

    /// Perform the request and wrap the outcome as an event.
    pub async fn run(self, client: &ArticleClient) -> AppEvent {
        match self {
            Self::FetchAll => AppEvent::CollectionLoaded(client.list().await),
            Self::Create(article) => AppEvent::Created(client.create(&article).await),
            Self::Update { id, article } => AppEvent::Updated {
                id,
                result: client.update(id, &article).await,
            },
            Self::Delete { id } => AppEvent::Deleted {
                id,
                result: client.delete(id).await,
            },
        }
    }
}

/// Events from background request tasks.
#[derive(Debug)]
pub enum AppEvent {
    CollectionLoaded(Result<Vec<Article>, ApiError>),
    Created(Result<Article, ApiError>),
    Updated {
        id: ArticleId,
        result: Result<Article, ApiError>,
    },
    Deleted {
        id: ArticleId,
        result: Result<(), ApiError>,
    },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Confirmation
// ============================================================================

/// Destructive action waiting for a y/n answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteArticle { id: ArticleId, title: String },
}

// ============================================================================
// Application
// ============================================================================

pub struct App {
    pub state: State,
    pub nav: NavBar,
    /// Present while mode is Add or Edit.
    pub editor: Option<Editor>,
    client: ArticleClient,

    pub keybindings: KeybindingRegistry,
    pub confirm_delete: bool,

    /// Outstanding request, if any. Only one runs at a time.
    pub in_flight: Option<&'static str>,
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub pending_confirm: Option<ConfirmAction>,
    pub show_help: bool,
    /// Skip rendering frames when nothing changed
    pub needs_redraw: bool,
}

impl App {
    pub fn new(client: ArticleClient) -> Self {
        Self {
            state: State::default(),
            nav: NavBar::new(),
            editor: None,
            client,
            keybindings: KeybindingRegistry::new(),
            confirm_delete: false,
            in_flight: None,
            status_message: None,
            pending_confirm: None,
            show_help: false,
            needs_redraw: true,
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn current(&self) -> Option<&Article> {
        self.state.current()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Set status message (auto-expires after 3 seconds).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear the status message once it is 3 seconds old.
    /// Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Run `action` through the reducer and resync the navigation bar.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "Dispatching");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        self.nav
            .current_changed(&self.state.collection, self.state.current());
        self.nav.clamp(&self.state.collection);
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------------

    /// Spawn `request` unless another one is still running.
    ///
    /// Returns false (and leaves a status message) when rejected.
    pub fn start_request(&mut self, request: Request, event_tx: &mpsc::Sender<AppEvent>) -> bool {
        if let Some(running) = self.in_flight {
            tracing::debug!(running, rejected = request.task_name(), "Request already in flight");
            self.set_status("Please wait for the current request to finish");
            return false;
        }

        let task = request.task_name();
        self.in_flight = Some(task);
        self.set_status(request.progress_label());

        let client = self.client.clone();
        let tx = event_tx.clone();
        tracing::debug!(task, "Spawning request task");

        tokio::spawn(async move {
            let event = match catch_task_panic(request.run(&client)).await {
                Ok(event) => event,
                Err(error) => {
                    tracing::error!(task, error = %error, "Request task panicked");
                    AppEvent::TaskPanicked { task, error }
                }
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(
                    task,
                    error = %e,
                    "Failed to send request result (receiver dropped)"
                );
            }
        });
        true
    }

    /// Fetch the collection (startup and manual refresh).
    pub fn load(&mut self, event_tx: &mpsc::Sender<AppEvent>) -> bool {
        if self.state.mode.is_editing() {
            self.set_status("Finish editing before reloading");
            return false;
        }
        self.start_request(Request::FetchAll, event_tx)
    }

    // ------------------------------------------------------------------------
    // Component intents
    // ------------------------------------------------------------------------

    pub fn on_nav_intent(&mut self, intent: NavIntent) {
        match intent {
            NavIntent::Select(id) => self.dispatch(Action::Select(id)),
        }
    }

    /// Activate an action bar control. Hidden controls do nothing.
    pub fn on_action_bar(&mut self, tag: ActionTag, event_tx: &mpsc::Sender<AppEvent>) {
        let allow_edit = self.state.current().is_some();
        let mut fired = None;
        action_bar::click(allow_edit, tag, |literal| fired = Some(literal));
        if let Some(literal) = fired {
            self.handle_action(literal, event_tx);
        }
    }

    /// Handle an action bar tag: `"add"`, `"edit"` or `"delete"`.
    pub fn handle_action(&mut self, tag: &str, event_tx: &mpsc::Sender<AppEvent>) {
        if self.is_busy() {
            self.set_status("Please wait for the current request to finish");
            return;
        }
        if self.state.mode.is_editing() {
            tracing::debug!(tag, "Action bar ignored while editing");
            return;
        }

        match ActionTag::from_tag(tag) {
            Some(ActionTag::Add) => {
                self.dispatch(Action::BeginAdd);
                self.editor = Some(Editor::new(None));
            }
            Some(ActionTag::Edit) => {
                let Some(current) = self.state.current().cloned() else {
                    tracing::debug!("Edit requested with nothing selected");
                    return;
                };
                self.dispatch(Action::BeginEdit);
                self.editor = Some(Editor::new(Some(&current)));
            }
            Some(ActionTag::Delete) => {
                let Some(current) = self.state.current() else {
                    tracing::debug!("Delete requested with nothing selected");
                    return;
                };
                let Some(id) = current.id else {
                    return;
                };
                if self.confirm_delete {
                    self.pending_confirm = Some(ConfirmAction::DeleteArticle {
                        id,
                        title: current.title.clone(),
                    });
                    self.needs_redraw = true;
                } else {
                    self.start_request(Request::Delete { id }, event_tx);
                }
            }
            None => tracing::warn!(tag, "Unknown action tag"),
        }
    }

    /// Answer the pending confirmation prompt.
    pub fn resolve_confirm(&mut self, accepted: bool, event_tx: &mpsc::Sender<AppEvent>) {
        let Some(pending) = self.pending_confirm.take() else {
            return;
        };
        self.needs_redraw = true;
        match pending {
            ConfirmAction::DeleteArticle { id, .. } if accepted => {
                self.start_request(Request::Delete { id }, event_tx);
            }
            ConfirmAction::DeleteArticle { .. } => self.set_status("Delete cancelled"),
        }
    }

    /// Validate and submit the open editor.
    pub fn submit_editor(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        let Some(editor) = &self.editor else {
            return;
        };
        match editor.save() {
            Ok(outcome) => self.on_editor_complete(outcome, event_tx),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Abandon the open editor.
    pub fn cancel_editor(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        if let Some(editor) = &self.editor {
            let outcome = editor.cancel();
            self.on_editor_complete(outcome, event_tx);
        }
    }

    /// Act on an editor completion.
    ///
    /// Cancel closes the editor without any request. Save issues POST (Add)
    /// or PUT (Edit); the editor stays open until the server answers so a
    /// failed save can be retried.
    pub fn on_editor_complete(
        &mut self,
        outcome: EditorOutcome,
        event_tx: &mpsc::Sender<AppEvent>,
    ) {
        if self.is_busy() {
            self.set_status("Please wait for the current request to finish");
            return;
        }

        let Some(article) = outcome.into_article() else {
            self.editor = None;
            self.dispatch(Action::EditorCancelled);
            return;
        };

        match self.state.mode {
            Mode::Add => {
                self.start_request(Request::Create(article), event_tx);
            }
            Mode::Edit => {
                let Some(current) = self.state.current() else {
                    tracing::warn!("Edit saved but the selected article is gone");
                    self.set_status("The article being edited no longer exists");
                    return;
                };
                let Some(id) = current.id else {
                    return;
                };
                let mut payload = current.clone();
                payload.title = article.title;
                payload.extract = article.extract;
                payload.edited = article.edited;
                self.start_request(Request::Update { id, article: payload }, event_tx);
            }
            Mode::View => tracing::warn!("Editor completed outside of add/edit mode"),
        }
    }

    // ------------------------------------------------------------------------
    // Background results
    // ------------------------------------------------------------------------

    /// Apply the result of a finished request.
    pub fn handle_event(&mut self, event: AppEvent) {
        self.in_flight = None;
        self.needs_redraw = true;

        match event {
            AppEvent::CollectionLoaded(Ok(articles)) => {
                let count = articles.len();
                self.dispatch(Action::CollectionLoaded(articles));
                self.set_status(format!("Loaded {} articles", count));
            }
            AppEvent::CollectionLoaded(Err(e)) => {
                tracing::error!(error = %e, "Failed to load articles");
                self.set_status(format!("Failed to load articles: {}", e.summary()));
            }
            AppEvent::Created(Ok(article)) => {
                self.editor = None;
                self.dispatch(Action::ArticleCreated(article));
                self.set_status("Article created");
            }
            AppEvent::Created(Err(e)) => {
                tracing::error!(error = %e, "Failed to create article");
                self.set_status(format!("Save failed: {}", e.summary()));
            }
            AppEvent::Updated { result: Ok(article), .. } => {
                self.editor = None;
                self.dispatch(Action::ArticleUpdated(article));
                self.set_status("Article saved");
            }
            AppEvent::Updated { id, result: Err(e) } => {
                tracing::error!(id, error = %e, "Failed to update article");
                self.set_status(format!("Save failed: {}", e.summary()));
            }
            AppEvent::Deleted { id, result: Ok(()) } => {
                self.dispatch(Action::ArticleDeleted(id));
                self.set_status("Article deleted");
            }
            AppEvent::Deleted { id, result: Err(e) } => {
                tracing::error!(id, error = %e, "Failed to delete article");
                self.set_status(format!("Delete failed: {}", e.summary()));
            }
            AppEvent::TaskPanicked { task, error } => {
                self.set_status(format!("Internal error in {}: {}", task, error));
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
