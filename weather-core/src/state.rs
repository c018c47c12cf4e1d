//! The widget's state holder.
//!
//! All transitions go through [`Widget::submit`] and [`Widget::complete`].
//! Each submission gets a new generation; a completion carrying an older
//! generation belongs to a superseded lookup and is dropped.

use crate::{Query, Scene, Theme, WeatherDetails, WeatherError, WeatherProvider, WeatherResult};

/// Mutually exclusive view states.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Error(WeatherError),
    Success(WeatherResult),
}

/// Handed out by a valid submission; carry it to the fetch and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: Query,
}

#[derive(Debug, Default)]
pub struct Widget {
    query: String,
    state: UiState,
    theme: Theme,
    scene: Scene,
    generation: u64,
}

impl Widget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn backspace(&mut self) {
        self.query.pop();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    /// Start a lookup for the current query.
    ///
    /// A blank query moves straight to the empty-query error without passing
    /// through loading and yields no ticket.
    pub fn submit(&mut self) -> Option<FetchTicket> {
        let query = match Query::parse(&self.query) {
            Ok(query) => query,
            Err(err) => {
                tracing::debug!("Rejected blank query");
                self.state = UiState::Error(err);
                return None;
            }
        };

        self.generation += 1;
        self.state = UiState::Loading;
        self.theme = Theme::None;
        self.scene = Scene::empty();

        tracing::debug!(generation = self.generation, city = %query, "Lookup submitted");

        Some(FetchTicket {
            generation: self.generation,
            query,
        })
    }

    /// Apply a finished lookup. Returns `false` when it was stale and ignored.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<WeatherResult, WeatherError>,
    ) -> bool {
        if generation != self.generation || !self.is_loading() {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale lookup result"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                self.theme = Theme::classify(&result.condition);
                self.scene = Scene::random(self.theme);
                self.state = UiState::Success(result);
            }
            Err(err) => {
                self.theme = Theme::None;
                self.scene = Scene::empty();
                self.state = UiState::Error(err);
            }
        }

        true
    }

    /// Submit and wait for the outcome in one go, for callers without an
    /// event loop. A blank query makes no request.
    pub async fn lookup(&mut self, provider: &dyn WeatherProvider) {
        if let Some(ticket) = self.submit() {
            let outcome = provider.current(&ticket.query).await;
            self.complete(ticket.generation, outcome);
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, UiState::Loading)
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            UiState::Error(err) => Some(err.to_string()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        match &self.state {
            UiState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<WeatherDetails> {
        self.result().map(WeatherDetails::from)
    }
}
