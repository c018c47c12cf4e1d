//! Themed animation layer

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};
use weather_core::{Particle, ParticleKind, Scene};

const RAY_LENGTH: i32 = 3;

/// Cell for a `(left, top)` percentage, if it lands inside `area`.
fn cell_at(area: Rect, left: f32, top: f32) -> Option<(i32, i32)> {
    if !(0.0..100.0).contains(&left) || !(0.0..100.0).contains(&top) {
        return None;
    }
    let x = area.x as i32 + (left / 100.0 * area.width as f32) as i32;
    let y = area.y as i32 + (top / 100.0 * area.height as f32) as i32;
    Some((x, y))
}

fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    let inside = x >= area.left() as i32
        && x < area.right() as i32
        && y >= area.top() as i32
        && y < area.bottom() as i32;
    if !inside {
        return;
    }
    if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
        cell.set_symbol(symbol).set_style(style);
    }
}

/// Line-drawing character for a ray pointing at `degrees` (clockwise, y down).
fn ray_symbol(degrees: f32) -> &'static str {
    match (degrees.rem_euclid(180.0) / 45.0).round() as i32 % 4 {
        0 => "─",
        1 => "\\",
        2 => "│",
        _ => "/",
    }
}

fn render_particle(buf: &mut Buffer, area: Rect, particle: &Particle, elapsed: Duration) {
    let Some((left, top)) = particle.position_at(elapsed) else {
        return;
    };

    match particle.kind {
        ParticleKind::RainDrop => {
            if let Some((x, y)) = cell_at(area, left, top) {
                put(buf, area, x, y, "╎", Style::default().fg(Color::LightBlue));
            }
        }
        ParticleKind::Snowflake => {
            if let Some((x, y)) = cell_at(area, left, top) {
                put(buf, area, x, y, "*", Style::default().fg(Color::White));
            }
        }
        ParticleKind::HazeParticle => {
            if let Some((x, y)) = cell_at(area, left, top) {
                put(buf, area, x, y, "░", Style::default().fg(Color::Gray));
            }
        }
        ParticleKind::Lightning => {
            if let Some((x, y)) = cell_at(area, left, top) {
                let style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
                for (i, bolt) in ["╲", "╱", "╲"].into_iter().enumerate() {
                    let i = i as i32;
                    put(buf, area, x + (i % 2), y + i, bolt, style);
                }
            }
        }
        ParticleKind::Cloud => {
            // clouds start partly off the left edge, so clip per cell
            let x = area.x as i32 + (left / 100.0 * area.width as f32) as i32;
            let y = area.y as i32 + (top / 100.0 * area.height as f32) as i32;
            let style = Style::default().fg(Color::Gray);
            for (i, ch) in ".-~~~-.".chars().enumerate() {
                put(buf, area, x + i as i32, y, ch.encode_utf8(&mut [0; 4]), style);
            }
        }
        ParticleKind::Sun => {
            if let Some((x, y)) = cell_at(area, left, top) {
                let style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
                put(buf, area, x, y, "●", style);
            }
        }
        ParticleKind::SunRay => {
            if let Some((x, y)) = cell_at(area, left, top) {
                let radians = particle.rotation.to_radians();
                let symbol = ray_symbol(particle.rotation);
                let style = Style::default().fg(Color::Yellow);
                for step in 2..=RAY_LENGTH + 1 {
                    // cells are about twice as tall as wide
                    let dx = (radians.cos() * step as f32 * 2.0).round() as i32;
                    let dy = (radians.sin() * step as f32).round() as i32;
                    put(buf, area, x + dx, y + dy, symbol, style);
                }
            }
        }
    }
}

pub fn render_scene(buf: &mut Buffer, area: Rect, scene: &Scene, elapsed: Duration) {
    for particle in scene.particles() {
        render_particle(buf, area, particle, elapsed);
    }
}
