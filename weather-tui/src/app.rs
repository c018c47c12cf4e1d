//! Terminal setup and the event loop.
//!
//! The loop task owns the [`Widget`]. Lookups run on spawned tasks and report
//! back over a channel tagged with their generation, so a superseded lookup
//! finishing late changes nothing.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use weather_core::{FetchTicket, WeatherError, WeatherProvider, WeatherResult, Widget};

use crate::input::{self, Action};
use crate::view::{self, Timing};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

type Completion = (u64, Result<WeatherResult, WeatherError>);

pub struct App {
    widget: Widget,
    provider: Arc<dyn WeatherProvider>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    started: Instant,
    scene_started: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let now = Instant::now();

        Self {
            widget: Widget::new(),
            provider,
            completions_tx,
            completions_rx,
            started: now,
            scene_started: now,
            should_quit: false,
        }
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn timing(&self) -> Timing {
        Timing {
            tick: self.started.elapsed(),
            scene: self.scene_started.elapsed(),
        }
    }

    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Insert(c) => self.widget.push_char(c),
            Action::Backspace => self.widget.backspace(),
            Action::Clear => self.widget.clear_query(),
            Action::Submit => {
                if let Some(ticket) = self.widget.submit() {
                    self.spawn_fetch(ticket);
                }
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Seed the query box and look it up right away.
    pub fn submit_city(&mut self, city: String) {
        self.widget.set_query(city);
        self.handle(Action::Submit);
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let provider = Arc::clone(&self.provider);
        let tx = self.completions_tx.clone();

        tokio::spawn(async move {
            let outcome = provider.current(&ticket.query).await;
            // The receiver only goes away when the app is shutting down.
            let _ = tx.send((ticket.generation, outcome));
        });
    }

    /// Apply every lookup that finished since the last call.
    pub fn drain_completions(&mut self) {
        while let Ok((generation, outcome)) = self.completions_rx.try_recv() {
            if self.widget.complete(generation, outcome) {
                self.scene_started = Instant::now();
            }
        }
    }
}

/// Run the widget until the user quits, restoring the terminal afterwards.
pub async fn run(provider: Box<dyn WeatherProvider>, city: Option<String>) -> Result<()> {
    let mut app = App::new(Arc::from(provider));
    if let Some(city) = city {
        app.submit_city(city);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Widget started");
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = ?err, "Widget loop failed");
    }
    tracing::info!("Widget stopped");

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        let timing = app.timing();
        terminal.draw(|f| view::render(f, app.widget(), timing))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = input::action_for(key) {
                    app.handle(action);
                }
            }
        }

        app.drain_completions();

        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;
    use weather_core::{Query, Theme, UiState};

    fn result(name: &str, condition: &str) -> WeatherResult {
        WeatherResult {
            name: name.into(),
            country: "GB".into(),
            condition: condition.into(),
            description: condition.to_lowercase(),
            temperature_c: 15.4,
            feels_like_c: 14.8,
            humidity_pct: 80,
            wind_speed_mps: 3.2,
            pressure_hpa: 1012,
        }
    }

    /// Answers "Slow" only once released; everything else immediately.
    #[derive(Debug, Default)]
    struct StubProvider {
        calls: AtomicUsize,
        release: Notify,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current(&self, query: &Query) -> Result<WeatherResult, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match query.as_str() {
                "Slow" => {
                    self.release.notified().await;
                    Ok(result("Slow", "Clear"))
                }
                "Nowhere" => Err(WeatherError::NotFound),
                city => Ok(result(city, "Rain")),
            }
        }
    }

    async fn settle(app: &mut App) {
        for _ in 0..200 {
            app.drain_completions();
            if !app.widget().is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("lookup never settled");
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(Action::Insert(c));
        }
    }

    #[tokio::test]
    async fn typing_and_submitting_fetches_once() {
        let provider = Arc::new(StubProvider::default());
        let mut app = App::new(provider.clone());

        type_text(&mut app, "London");
        app.handle(Action::Submit);
        assert!(app.widget().is_loading());

        settle(&mut app).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.widget().theme(), Theme::Rain);
        assert_eq!(app.widget().result().map(|r| r.name.as_str()), Some("London"));
    }

    #[tokio::test]
    async fn blank_submit_makes_no_call() {
        let provider = Arc::new(StubProvider::default());
        let mut app = App::new(provider.clone());

        type_text(&mut app, "   ");
        app.handle(Action::Submit);

        tokio::time::sleep(Duration::from_millis(20)).await;
        app.drain_completions();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(app.widget().state(), &UiState::Error(WeatherError::EmptyQuery));
    }

    #[tokio::test]
    async fn failed_lookup_shows_error() {
        let provider = Arc::new(StubProvider::default());
        let mut app = App::new(provider);

        app.submit_city("Nowhere".into());
        settle(&mut app).await;

        assert_eq!(
            app.widget().error_message().as_deref(),
            Some("City not found. Please check the city name.")
        );
    }

    #[tokio::test]
    async fn newer_lookup_wins_over_a_slow_one() {
        let provider = Arc::new(StubProvider::default());
        let mut app = App::new(provider.clone());

        app.submit_city("Slow".into());
        app.handle(Action::Clear);
        app.submit_city("Paris".into());
        settle(&mut app).await;
        assert_eq!(app.widget().result().map(|r| r.name.as_str()), Some("Paris"));

        provider.release.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;
        app.drain_completions();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(app.widget().result().map(|r| r.name.as_str()), Some("Paris"));
    }

    #[tokio::test]
    async fn quit_action_stops_the_loop() {
        let mut app = App::new(Arc::new(StubProvider::default()));
        assert!(!app.should_quit());
        app.handle(Action::Quit);
        assert!(app.should_quit());
    }
}
