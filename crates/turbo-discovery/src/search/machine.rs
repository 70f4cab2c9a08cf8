//! Predictive search as a pure reducer.
//!
//! [`SearchMachine::handle`] takes one [`SearchEvent`] and returns the
//! [`SearchEffect`]s the runtime must perform (start/cancel the debounce
//! timer, issue/cancel a request, navigate). Nothing here sleeps or does
//! I/O, so the debounce and last-issued-wins rules are testable directly.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};
use turbo_catalog::{Product, ProductPage};
use turbo_data::ProductQuery;

use super::navigation::Navigation;
use super::suggest::{build_suggestions, Suggestion};
use crate::config::SearchConfig;
use crate::error::DiscoveryError;

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    Debouncing,
    AwaitingResponse,
    Displaying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Up,
    Down,
    Enter,
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The input text changed.
    Input(String),
    /// The debounce timer started with `ticket` fired.
    DebounceElapsed { ticket: u64 },
    /// A request finished (or was cancelled).
    ResponseReceived {
        id: RequestId,
        outcome: Result<ProductPage, DiscoveryError>,
    },
    Key(SearchKey),
    /// The dropdown lost focus.
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEffect {
    /// (Re)start the debounce timer, replacing any running one.
    StartDebounce { ticket: u64, delay: Duration },
    CancelDebounce,
    CancelRequest(RequestId),
    IssueRequest { id: RequestId, query: ProductQuery },
    Navigate(Navigation),
    ReleaseFocus,
}

/// Everything the dropdown renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSession {
    pub query: String,
    pub phase: SearchPhase,
    pub suggestions: Vec<Suggestion>,
    pub products: Vec<Product>,
    /// Index into suggestions followed by products.
    pub cursor: Option<usize>,
    pub open: bool,
    /// The outstanding request and the query text it carries.
    #[serde(skip)]
    pub in_flight: Option<(RequestId, String)>,
    /// Set when the last response was a failure.
    pub error: Option<String>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            query: String::new(),
            phase: SearchPhase::Idle,
            suggestions: Vec::new(),
            products: Vec::new(),
            cursor: None,
            open: false,
            in_flight: None,
            error: None,
        }
    }
}

impl SearchSession {
    pub fn row_count(&self) -> usize {
        self.suggestions.len() + self.products.len()
    }

    /// A timer or request is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(
            self.phase,
            SearchPhase::Debouncing | SearchPhase::AwaitingResponse
        )
    }

    /// Navigation for the row at `index`.
    pub fn row_target(&self, index: usize) -> Option<Navigation> {
        if let Some(suggestion) = self.suggestions.get(index) {
            return Some(suggestion.navigation());
        }
        self.products
            .get(index - self.suggestions.len())
            .map(|product| {
                let slug = if product.slug.is_empty() {
                    product.id.to_string()
                } else {
                    product.slug.clone()
                };
                Navigation::Product(slug)
            })
    }
}

#[derive(Debug, Clone)]
pub struct SearchMachine {
    config: SearchConfig,
    session: SearchSession,
    ticket: u64,
    next_request: u64,
}

impl SearchMachine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            session: SearchSession::default(),
            ticket: 0,
            next_request: 0,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn handle(&mut self, event: SearchEvent) -> Vec<SearchEffect> {
        match event {
            SearchEvent::Input(text) => self.on_input(text),
            SearchEvent::DebounceElapsed { ticket } => self.on_debounce(ticket),
            SearchEvent::ResponseReceived { id, outcome } => self.on_response(id, outcome),
            SearchEvent::Key(key) => self.on_key(key),
            SearchEvent::Close => self.close(false),
        }
    }

    fn on_input(&mut self, text: String) -> Vec<SearchEffect> {
        self.session.query = text;
        self.session.cursor = None;

        if self.session.query.trim().chars().count() < self.config.min_query_len {
            let mut effects = vec![SearchEffect::CancelDebounce];
            effects.extend(self.cancel_in_flight());
            self.session.suggestions.clear();
            self.session.products.clear();
            self.session.error = None;
            self.session.open = false;
            self.session.phase = SearchPhase::Idle;
            return effects;
        }

        self.ticket += 1;
        self.session.phase = SearchPhase::Debouncing;
        debug!(ticket = self.ticket, query = %self.session.query, "debounce started");
        vec![SearchEffect::StartDebounce {
            ticket: self.ticket,
            delay: self.config.debounce(),
        }]
    }

    fn on_debounce(&mut self, ticket: u64) -> Vec<SearchEffect> {
        if ticket != self.ticket || self.session.phase != SearchPhase::Debouncing {
            return Vec::new();
        }

        let mut effects: Vec<SearchEffect> = self.cancel_in_flight().into_iter().collect();
        self.next_request += 1;
        let id = RequestId(self.next_request);
        let text = self.session.query.trim().to_string();
        let query = ProductQuery::search(&text, self.config.request_limit);

        debug!(request = id.0, query = %text, "issuing predictive search");
        self.session.in_flight = Some((id, text));
        self.session.phase = SearchPhase::AwaitingResponse;
        effects.push(SearchEffect::IssueRequest { id, query });
        effects
    }

    fn on_response(
        &mut self,
        id: RequestId,
        outcome: Result<ProductPage, DiscoveryError>,
    ) -> Vec<SearchEffect> {
        let query = match self.session.in_flight.take() {
            Some((current, query)) if current == id => query,
            other => {
                self.session.in_flight = other;
                debug!(request = id.0, "discarding stale search response");
                return Vec::new();
            }
        };

        match outcome {
            Ok(page) => {
                self.session.suggestions =
                    build_suggestions(&query, &page, self.config.max_suggestions);
                self.session.products = page
                    .products
                    .into_iter()
                    .take(self.config.max_products)
                    .collect();
                self.session.error = None;
            }
            Err(DiscoveryError::Cancelled) => {
                if self.session.phase == SearchPhase::AwaitingResponse {
                    self.session.phase = SearchPhase::Idle;
                }
                return Vec::new();
            }
            Err(err) => {
                warn!(error = %err, query = %query, "predictive search failed, falling back to query");
                self.session.suggestions = vec![Suggestion::keyword(query, None)];
                self.session.products.clear();
                self.session.error = Some(err.to_string());
            }
        }

        self.session.cursor = None;
        self.session.open = true;
        // A newer keystroke may already be debouncing; leave that running.
        if self.session.phase == SearchPhase::AwaitingResponse {
            self.session.phase = SearchPhase::Displaying;
        }
        Vec::new()
    }

    fn on_key(&mut self, key: SearchKey) -> Vec<SearchEffect> {
        let rows = self.session.row_count();
        match key {
            SearchKey::Down if self.session.open && rows > 0 => {
                self.session.cursor = Some(match self.session.cursor {
                    None => 0,
                    Some(i) => (i + 1).min(rows - 1),
                });
                Vec::new()
            }
            SearchKey::Up if self.session.open => {
                self.session.cursor = match self.session.cursor {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
                Vec::new()
            }
            SearchKey::Enter => {
                let target = match self.session.cursor.filter(|_| self.session.open) {
                    Some(index) => self.session.row_target(index),
                    None => {
                        let query = self.session.query.trim();
                        (!query.is_empty()).then(|| Navigation::FullSearch(query.to_string()))
                    }
                };
                let Some(target) = target else {
                    return Vec::new();
                };
                let mut effects = self.close(false);
                effects.push(SearchEffect::Navigate(target));
                effects
            }
            SearchKey::Escape => self.close(true),
            SearchKey::Up | SearchKey::Down => Vec::new(),
        }
    }

    fn close(&mut self, release_focus: bool) -> Vec<SearchEffect> {
        let mut effects = vec![SearchEffect::CancelDebounce];
        effects.extend(self.cancel_in_flight());
        self.session.open = false;
        self.session.cursor = None;
        self.session.phase = SearchPhase::Idle;
        if release_focus {
            effects.push(SearchEffect::ReleaseFocus);
        }
        effects
    }

    fn cancel_in_flight(&mut self) -> Option<SearchEffect> {
        self.session.in_flight.take().map(|(id, _)| {
            debug!(request = id.0, "cancelling in-flight search");
            SearchEffect::CancelRequest(id)
        })
    }
}
