use crate::{
    Config, Query, WeatherError, WeatherResult, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city. Issues exactly one request.
    async fn current(&self, query: &Query) -> Result<WeatherResult, WeatherError>;
}

/// Construct the OpenWeather provider from resolved configuration.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = match config.endpoint() {
        Some(endpoint) => OpenWeatherProvider::with_endpoint(api_key, endpoint),
        None => OpenWeatherProvider::new(api_key),
    };

    Ok(Box::new(provider))
}
