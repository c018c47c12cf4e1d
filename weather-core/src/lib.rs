//! Core library for the `weather` lookup widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The provider seam and the OpenWeather client
//! - Condition classification (theme, icon) and the detail projection
//! - The widget state holder and its animation scene
//!
//! It is used by `weather-tui`, but holds no terminal code and can back other front ends.

pub mod config;
pub mod display;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;
pub mod scene;
pub mod state;
pub mod theme;

pub use config::Config;
pub use display::WeatherDetails;
pub use error::WeatherError;
pub use model::{Query, WeatherResult};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use scene::{Particle, ParticleKind, Scene};
pub use state::{FetchTicket, UiState, Widget};
pub use theme::Theme;
