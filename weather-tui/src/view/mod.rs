//! View module - UI rendering
//!
//! Pure projection of the widget state onto a frame. Nothing here feeds back
//! into state.
//!
//! - `panel`: search box and the idle/loading/error/success panels
//! - `scene`: the themed animation layer behind the panel

mod panel;
mod scene;

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Padding},
};
use weather_core::{Theme, Widget};

/// Animation clocks for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timing {
    /// Since the widget opened; drives the spinner.
    pub tick: Duration,
    /// Since the current scene appeared.
    pub scene: Duration,
}

pub(crate) fn card_background(theme: Theme) -> Color {
    match theme {
        Theme::Rain => Color::Rgb(28, 44, 72),
        Theme::Storm => Color::Rgb(24, 22, 40),
        Theme::Snow => Color::Rgb(58, 70, 92),
        Theme::Haze => Color::Rgb(66, 66, 66),
        Theme::Cloudy => Color::Rgb(50, 60, 76),
        Theme::Sunny => Color::Rgb(92, 64, 18),
        Theme::None => Color::Reset,
    }
}

pub fn render(frame: &mut Frame, widget: &Widget, timing: Timing) {
    let theme = widget.theme();

    let card = Block::default()
        .borders(Borders::ALL)
        .title(" Weather ")
        .title_bottom(" Enter search · Esc clear · Ctrl+C quit ")
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(card_background(theme)));
    let inner = card.inner(frame.area());
    frame.render_widget(card, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(0),    // Panel + animation
        ])
        .split(inner);

    panel::render_search_box(frame, chunks[0], widget.query());

    scene::render_scene(frame.buffer_mut(), chunks[1], widget.scene(), timing.scene);
    panel::render_body(frame, chunks[1], widget, timing.tick);
}
