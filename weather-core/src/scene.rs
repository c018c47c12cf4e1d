//! Decorative animation layer drawn behind the detail panel.
//!
//! Positions are percentages of the card, so the same scene fits any
//! terminal size. Timing is in seconds.

use rand::Rng;
use std::f32::consts::TAU;
use std::time::Duration;

use crate::Theme;

pub const RAIN_DROPS: usize = 50;
pub const LIGHTNING_FLASHES: usize = 20;
pub const SNOWFLAKES: usize = 50;
pub const HAZE_PARTICLES: usize = 25;
pub const CLOUDS: usize = 8;
pub const SUN_RAYS: usize = 6;

const LIGHTNING_PERIOD: f32 = 3.0;
const CLOUD_DRIFT: f32 = 20.0;
/// Share of a lightning period during which the flash is lit.
const FLASH_WINDOW: f32 = 0.1;
const SUN_LEFT: f32 = 80.0;
const SUN_TOP: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    RainDrop,
    Lightning,
    Snowflake,
    HazeParticle,
    Cloud,
    Sun,
    SunRay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub left: f32,
    pub top: f32,
    pub delay: f32,
    pub duration: f32,
    /// Degrees; only sun rays are rotated.
    pub rotation: f32,
}

impl Particle {
    fn new(kind: ParticleKind, left: f32, top: f32, delay: f32, duration: f32) -> Self {
        Self {
            kind,
            left,
            top,
            delay,
            duration,
            rotation: 0.0,
        }
    }

    /// Fraction of the current cycle in `[0, 1)`, or `None` before the delay ran out.
    fn phase(&self, elapsed: Duration) -> Option<f32> {
        let t = elapsed.as_secs_f32() - self.delay;
        if t < 0.0 || self.duration <= 0.0 {
            return None;
        }
        Some((t / self.duration).fract())
    }

    /// Where the particle sits at `elapsed`, as `(left, top)` percentages.
    /// `None` while a lightning flash is dark.
    pub fn position_at(&self, elapsed: Duration) -> Option<(f32, f32)> {
        let phase = self.phase(elapsed);

        match self.kind {
            ParticleKind::RainDrop => {
                let p = phase.unwrap_or(0.0);
                Some((self.left, (self.top + p * 100.0) % 100.0))
            }
            ParticleKind::Snowflake => {
                let p = phase.unwrap_or(0.0);
                let sway = 2.0 * (p * TAU).sin();
                Some(((self.left + sway).clamp(0.0, 99.9), (self.top + p * 100.0) % 100.0))
            }
            ParticleKind::HazeParticle => {
                let p = phase.unwrap_or(0.0);
                Some(((self.left + p * 20.0) % 100.0, self.top))
            }
            ParticleKind::Lightning => match phase {
                Some(p) if p < FLASH_WINDOW => Some((self.left, self.top)),
                _ => None,
            },
            ParticleKind::Cloud => {
                let p = phase.unwrap_or(0.0);
                // drift across, re-entering from just off the left edge
                let x = (self.left + 10.0 + p * 120.0) % 120.0 - 10.0;
                Some((x, self.top))
            }
            ParticleKind::Sun | ParticleKind::SunRay => Some((self.left, self.top)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    theme: Theme,
    particles: Vec<Particle>,
}

impl Scene {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scene for `theme` using the thread-local generator.
    pub fn random(theme: Theme) -> Self {
        Self::generate(theme, &mut rand::thread_rng())
    }

    pub fn generate<R: Rng + ?Sized>(theme: Theme, rng: &mut R) -> Self {
        let particles = match theme {
            Theme::Rain => (0..RAIN_DROPS)
                .map(|_| {
                    Particle::new(
                        ParticleKind::RainDrop,
                        rng.gen_range(0.0..100.0),
                        rng.gen_range(0.0..100.0),
                        rng.gen_range(0.0..2.0),
                        rng.gen_range(0.5..1.0),
                    )
                })
                .collect(),
            Theme::Storm => (0..LIGHTNING_FLASHES)
                .map(|_| {
                    Particle::new(
                        ParticleKind::Lightning,
                        rng.gen_range(0.0..100.0),
                        0.0,
                        rng.gen_range(0.0..3.0),
                        LIGHTNING_PERIOD,
                    )
                })
                .collect(),
            Theme::Snow => (0..SNOWFLAKES)
                .map(|_| {
                    Particle::new(
                        ParticleKind::Snowflake,
                        rng.gen_range(0.0..100.0),
                        rng.gen_range(0.0..100.0),
                        rng.gen_range(0.0..5.0),
                        rng.gen_range(3.0..7.0),
                    )
                })
                .collect(),
            Theme::Haze => (0..HAZE_PARTICLES)
                .map(|_| {
                    Particle::new(
                        ParticleKind::HazeParticle,
                        rng.gen_range(0.0..100.0),
                        rng.gen_range(0.0..100.0),
                        rng.gen_range(0.0..4.0),
                        rng.gen_range(4.0..7.0),
                    )
                })
                .collect(),
            Theme::Cloudy => (0..CLOUDS)
                .map(|i| {
                    Particle::new(
                        ParticleKind::Cloud,
                        i as f32 * 25.0 - 10.0,
                        rng.gen_range(5.0..35.0),
                        i as f32 * 2.0,
                        CLOUD_DRIFT,
                    )
                })
                .collect(),
            Theme::Sunny => {
                let mut particles = vec![Particle::new(ParticleKind::Sun, SUN_LEFT, SUN_TOP, 0.0, 0.0)];
                particles.extend((0..SUN_RAYS).map(|i| Particle {
                    rotation: i as f32 * 60.0,
                    ..Particle::new(ParticleKind::SunRay, SUN_LEFT, SUN_TOP, 0.0, 0.0)
                }));
                particles
            }
            Theme::None => Vec::new(),
        };

        Self { theme, particles }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
