//! Search box and body panels

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};
use weather_core::{UiState, WeatherDetails, Widget};

const PLACEHOLDER: &str = "Enter city name...";
const IDLE_ICON: &str = "🌍";
const IDLE_TEXT: &str = "Search for a city to get weather information";
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAME: Duration = Duration::from_millis(80);

pub fn render_search_box(frame: &mut Frame, area: Rect, query: &str) {
    let text = if query.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(query)
    };

    let search = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(search, area);

    // border + padding on the left; wide glyphs take two columns
    let cursor_x = area.x + 2 + Line::from(query).width() as u16;
    if cursor_x < area.right().saturating_sub(1) {
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

pub fn render_body(frame: &mut Frame, area: Rect, widget: &Widget, tick: Duration) {
    match widget.state() {
        UiState::Idle => render_idle(frame, area),
        UiState::Loading => render_loading(frame, area, tick),
        UiState::Error(err) => render_error(frame, area, &err.to_string()),
        UiState::Success(result) => render_details(frame, area, &WeatherDetails::from(result)),
    }
}

/// Vertically centered slice of `area`, `height` rows tall.
fn centered(area: Rect, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    middle
}

fn render_idle(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(IDLE_ICON),
        Line::from(""),
        Line::from(Span::styled(IDLE_TEXT, Style::default().fg(Color::Gray))),
    ];
    let height = lines.len() as u16;

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered(area, height),
    );
}

fn spinner_frame(tick: Duration) -> &'static str {
    let index = (tick.as_millis() / SPINNER_FRAME.as_millis()) as usize % SPINNER.len();
    SPINNER[index]
}

fn render_loading(frame: &mut Frame, area: Rect, tick: Duration) {
    let line = Line::from(vec![
        Span::styled(spinner_frame(tick), Style::default().fg(Color::Cyan)),
        Span::raw(" Fetching weather..."),
    ]);

    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        centered(area, 1),
    );
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let width = (message.chars().count() as u16 + 4).max(20).min(area.width);
    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(centered(area, 3));

    let panel = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(panel, column);
}

fn detail<'a>(icon: &'a str, label: &'a str, value: &'a str) -> Vec<Span<'a>> {
    vec![
        Span::raw(icon),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ]
}

fn render_details(frame: &mut Frame, area: Rect, details: &WeatherDetails) {
    let temperature = format!("{}°C", details.temperature);
    let feels_like = format!("{}°C", details.feels_like);

    let mut humidity_and_wind = detail("💧", "Humidity", &details.humidity);
    humidity_and_wind.push(Span::raw("    "));
    humidity_and_wind.extend(detail("💨", "Wind Speed", &details.wind_speed));

    let mut feels_and_pressure = detail("🌡", "Feels Like", &feels_like);
    feels_and_pressure.push(Span::raw("    "));
    feels_and_pressure.extend(detail("📊", "Pressure", &details.pressure));

    let lines = vec![
        Line::from(Span::styled(
            details.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            details.country.as_str(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(details.glyph),
        Line::from(Span::styled(
            temperature.as_str(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(details.description.as_str()),
        Line::from(""),
        Line::from(humidity_and_wind),
        Line::from(feels_and_pressure),
    ];
    let height = lines.len() as u16;

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered(area, height),
    );
}
