//! Event loop driving a [`Session`] from UI input.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use super::debounce::{Debouncer, Settled};
use super::source::{ClientError, MediaSource};
use super::state::{Applied, PageRequest, Selection, Session};
use crate::giphy::MediaItem;

/// Input from whatever renders the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The search box now contains this text.
    Input(String),
    /// The scroll sentinel below the last item entered the viewport.
    SentinelVisible,
    /// The clear button was pressed.
    ClearSearch,
    /// An item in the grid was picked for the detail panel.
    Select(usize),
    /// The detail panel was closed.
    CloseDetails,
}

/// Snapshot published after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    /// Current contents of the search box.
    pub input: String,
    pub session: Session,
    pub selected: Option<MediaItem>,
}

struct Completion {
    request: PageRequest,
    result: Result<Vec<MediaItem>, ClientError>,
}

/// Owns the session and applies UI events, debounced queries and fetch
/// completions to it, one at a time.
///
/// Fetches run as separate tasks, so their completions may arrive in any
/// order; completions from an abandoned session are discarded.
pub struct SessionController<S: MediaSource> {
    source: Arc<S>,
    session: Session,
    selection: Selection,
    input: String,
    /// Raw query text the current session was started with.
    active_query: String,
    debouncer: Debouncer<String>,
    settled_rx: mpsc::UnboundedReceiver<Settled<String>>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    view_tx: watch::Sender<SessionView>,
}

impl<S: MediaSource> SessionController<S> {
    /// Create a controller fetching from `source`, settling search input
    /// after `debounce` without keystrokes.
    #[must_use]
    pub fn new(source: S, debounce: Duration) -> Self {
        let (debouncer, settled_rx) = Debouncer::new(debounce);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (view_tx, _) = watch::channel(SessionView::default());

        Self {
            source: Arc::new(source),
            session: Session::new(),
            selection: Selection::default(),
            input: String::new(),
            active_query: String::new(),
            debouncer,
            settled_rx,
            completions_tx,
            completions_rx,
            view_tx,
        }
    }

    /// Receive a snapshot after every transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view_tx.subscribe()
    }

    /// Load the trending feed, then process events until `events` closes.
    ///
    /// Returns the final snapshot.
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) -> SessionView {
        let request = self.session.begin("");
        self.spawn_fetch(request);
        self.publish();

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                Some(settled) = self.settled_rx.recv() => self.handle_settled(&settled),
                Some(completion) = self.completions_rx.recv() => self.handle_completion(completion),
            }
            self.publish();
        }

        self.debouncer.cancel();
        self.view()
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Input(text) => {
                self.input.clone_from(&text);
                self.debouncer.schedule(text);
            }
            UiEvent::SentinelVisible => {
                if let Some(request) = self.session.next_page() {
                    self.spawn_fetch(request);
                }
            }
            UiEvent::ClearSearch => {
                self.debouncer.cancel();
                self.input.clear();
                self.active_query.clear();
                let request = self.session.clear();
                self.spawn_fetch(request);
            }
            UiEvent::Select(index) => {
                if let Some(item) = self.session.items().get(index) {
                    self.selection.select(item.clone());
                }
            }
            UiEvent::CloseDetails => self.selection.clear(),
        }
    }

    fn handle_settled(&mut self, settled: &Settled<String>) {
        if !self.debouncer.is_current(settled) {
            return;
        }
        self.debouncer.accept(settled);

        if settled.value == self.active_query {
            return;
        }
        self.active_query.clone_from(&settled.value);

        let request = self.session.begin(&settled.value);
        self.spawn_fetch(request);
    }

    fn handle_completion(&mut self, completion: Completion) {
        let Completion { request, result } = completion;

        let applied = match result {
            Ok(page) => self.session.apply_page(&request, page),
            Err(e) => {
                if request.generation == self.session.generation() {
                    warn!(error = %e, offset = request.offset, "Error fetching GIFs");
                }
                self.session.apply_failure(&request)
            }
        };

        if applied == Applied::Stale {
            debug!(
                generation = request.generation,
                offset = request.offset,
                "Dropped response for abandoned session"
            );
        }
    }

    fn spawn_fetch(&self, request: PageRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(&request).await;
            // The controller has stopped if the receiver is gone.
            let _ = tx.send(Completion { request, result });
        });
    }

    fn view(&self) -> SessionView {
        SessionView {
            input: self.input.clone(),
            session: self.session.clone(),
            selected: self.selection.current().cloned(),
        }
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }
}
