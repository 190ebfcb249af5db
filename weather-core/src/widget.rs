//! Search box state and the single "current weather" slot it feeds.
//!
//! A search is split into [`WidgetState::begin_search`], which hands out a
//! [`SearchTicket`], and [`WidgetState::settle`], which applies the outcome.
//! Tickets are numbered; only the most recent one may touch the displayed
//! state, so a slow response for an earlier search can never overwrite a
//! newer result.

use tracing::{debug, info};

use crate::{
    error::LookupError,
    model::{CityQuery, WeatherSnapshot},
    provider::{WeatherProvider, fetch_snapshot},
};

/// Key events the search box reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
}

/// Handle for one in-flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    id: u64,
    city: CityQuery,
}

impl SearchTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn city(&self) -> &CityQuery {
        &self.city
    }
}

#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    input: String,
    snapshot: Option<WeatherSnapshot>,
    error: Option<LookupError>,
    loading: bool,
    issued: u64,
    pending: Option<u64>,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&LookupError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Apply a key press. Returns `true` when it should trigger a search.
    pub fn key_pressed(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) => {
                self.input.push(c);
                false
            }
            Key::Backspace => {
                self.input.pop();
                false
            }
            Key::Enter => true,
        }
    }

    /// Validate `raw` and open a new search.
    ///
    /// Blank input records [`LookupError::EmptyInput`] and returns `None`;
    /// nothing else changes. Otherwise the error is cleared, loading is set and
    /// any earlier outstanding ticket becomes stale.
    pub fn begin_search(&mut self, raw: &str) -> Option<SearchTicket> {
        let city = match CityQuery::parse(raw) {
            Ok(city) => city,
            Err(err) => {
                self.error = Some(err);
                return None;
            }
        };

        self.issued += 1;
        if let Some(previous) = self.pending.replace(self.issued) {
            debug!(previous, superseded_by = self.issued, "search superseded");
        }
        self.loading = true;
        self.error = None;

        Some(SearchTicket {
            id: self.issued,
            city,
        })
    }

    /// Apply the outcome of `ticket`. Returns `false` if the ticket was
    /// superseded and the outcome was dropped.
    ///
    /// A failure keeps the previous snapshot on screen under the error.
    pub fn settle(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<WeatherSnapshot, LookupError>,
    ) -> bool {
        if self.pending != Some(ticket.id) {
            debug!(ticket = ticket.id, city = %ticket.city, "discarding stale search result");
            return false;
        }

        self.pending = None;
        self.loading = false;

        match outcome {
            Ok(snapshot) => {
                info!(city = %snapshot.city, temperature = snapshot.temperature, "weather updated");
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            Err(err) => {
                info!(city = %ticket.city, error = %err, "search failed");
                self.error = Some(err);
            }
        }

        true
    }
}

/// Search box wired to a provider.
#[derive(Debug)]
pub struct WeatherWidget<P> {
    provider: P,
    state: WidgetState,
}

impl<P: WeatherProvider> WeatherWidget<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: WidgetState::new(),
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs the request for an issued ticket without touching state.
    pub async fn fetch(&self, ticket: &SearchTicket) -> Result<WeatherSnapshot, LookupError> {
        fetch_snapshot(&self.provider, ticket.city()).await
    }

    /// Validate, fetch, and store the outcome.
    pub async fn search(&mut self, raw: &str) {
        let Some(ticket) = self.state.begin_search(raw) else {
            return;
        };
        let outcome = self.fetch(&ticket).await;
        self.state.settle(ticket, outcome);
    }

    /// Search for whatever is currently typed in the box.
    pub async fn submit(&mut self) {
        let input = self.state.input.clone();
        self.search(&input).await;
    }

    pub async fn key_pressed(&mut self, key: Key) {
        if self.state.key_pressed(key) {
            self.submit().await;
        }
    }

    /// The one automatic search performed at startup.
    pub async fn startup(&mut self, default_city: &str) {
        self.search(default_city).await;
    }
}
