//! Tokio runtime for [`SearchMachine`].
//!
//! Debounce timers and requests run as spawned tasks that report back over
//! a channel; [`PredictiveSearch::step`] feeds the next report into the
//! machine. Each request gets its own [`CancellationToken`], cancelled as
//! soon as the machine supersedes it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use turbo_data::{CatalogApi, ProductQuery};

use super::machine::{
    RequestId, SearchEffect, SearchEvent, SearchKey, SearchMachine, SearchSession,
};
use super::navigation::Navigation;
use crate::config::SearchConfig;
use crate::error::DiscoveryError;

/// What the host UI has to do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Navigate(Navigation),
    ReleaseFocus,
}

pub struct PredictiveSearch<A: CatalogApi + ?Sized + 'static> {
    api: Arc<A>,
    machine: SearchMachine,
    tx: mpsc::UnboundedSender<SearchEvent>,
    rx: mpsc::UnboundedReceiver<SearchEvent>,
    debounce: Option<JoinHandle<()>>,
    requests: HashMap<RequestId, CancellationToken>,
}

impl<A: CatalogApi + ?Sized + 'static> PredictiveSearch<A> {
    pub fn new(api: Arc<A>, config: SearchConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            machine: SearchMachine::new(config),
            tx,
            rx,
            debounce: None,
            requests: HashMap::new(),
        }
    }

    pub fn session(&self) -> &SearchSession {
        self.machine.session()
    }

    /// The input text changed.
    pub fn input(&mut self, text: impl Into<String>) {
        self.dispatch(SearchEvent::Input(text.into()));
    }

    pub fn key(&mut self, key: SearchKey) -> Vec<UiAction> {
        self.dispatch(SearchEvent::Key(key))
    }

    /// The input lost focus.
    pub fn close(&mut self) {
        self.dispatch(SearchEvent::Close);
    }

    /// Wait for the next timer or response and apply it.
    pub async fn step(&mut self) -> Vec<UiAction> {
        match self.rx.recv().await {
            Some(event) => self.dispatch(event),
            None => Vec::new(),
        }
    }

    /// Step until no timer or request is outstanding.
    pub async fn settle(&mut self) {
        while self.session().is_pending() {
            self.step().await;
        }
    }

    fn dispatch(&mut self, event: SearchEvent) -> Vec<UiAction> {
        if let SearchEvent::ResponseReceived { id, .. } = &event {
            self.requests.remove(id);
        }

        let mut actions = Vec::new();
        for effect in self.machine.handle(event) {
            match effect {
                SearchEffect::StartDebounce { ticket, delay } => {
                    self.abort_debounce();
                    let tx = self.tx.clone();
                    self.debounce = Some(tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(SearchEvent::DebounceElapsed { ticket });
                    }));
                }
                SearchEffect::CancelDebounce => self.abort_debounce(),
                SearchEffect::CancelRequest(id) => {
                    if let Some(token) = self.requests.remove(&id) {
                        token.cancel();
                    }
                }
                SearchEffect::IssueRequest { id, query } => self.spawn_request(id, query),
                SearchEffect::Navigate(target) => actions.push(UiAction::Navigate(target)),
                SearchEffect::ReleaseFocus => actions.push(UiAction::ReleaseFocus),
            }
        }
        actions
    }

    fn spawn_request(&mut self, id: RequestId, query: ProductQuery) {
        let token = CancellationToken::new();
        self.requests.insert(id, token.clone());

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => Err(DiscoveryError::Cancelled),
                result = api.products(&query) => result.map_err(DiscoveryError::from),
            };
            if matches!(outcome, Err(DiscoveryError::Cancelled)) {
                debug!(request = id.0, "search request cancelled");
            }
            let _ = tx.send(SearchEvent::ResponseReceived { id, outcome });
        });
    }

    fn abort_debounce(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
    }
}

impl<A: CatalogApi + ?Sized + 'static> Drop for PredictiveSearch<A> {
    fn drop(&mut self) {
        self.abort_debounce();
        for token in self.requests.values() {
            token.cancel();
        }
    }
}
