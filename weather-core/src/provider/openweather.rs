use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;

use crate::{Query, WeatherError, WeatherResult};

use super::WeatherProvider;

pub const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, CURRENT_WEATHER_URL)
    }

    pub fn with_endpoint(api_key: String, endpoint: impl Into<String>) -> Self {
        Self {
            api_key,
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }
}

// The key stays out of debug output and therefore out of the logs.
impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl From<OwCurrentResponse> for WeatherResult {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition, description) = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        WeatherResult {
            name: parsed.name,
            country: parsed.sys.country,
            condition,
            description,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[tracing::instrument(skip(self, query), fields(city = %query))]
    async fn current(&self, query: &Query) -> Result<WeatherResult, WeatherError> {
        let started = Instant::now();

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            // the URL carries the key
            .map_err(reqwest::Error::without_url)
            .inspect_err(|e| tracing::warn!(error = %e, "OpenWeather request could not be sent"))?;

        let status = res.status();
        tracing::debug!(%status, elapsed_ms = started.elapsed().as_millis() as u64, "OpenWeather responded");

        if !status.is_success() {
            let err = WeatherError::from_status(status);
            tracing::info!(%status, error = %err, "OpenWeather lookup failed");
            return Err(err);
        }

        let body = res.text().await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .inspect_err(|e| tracing::warn!(error = %e, "Malformed OpenWeather response"))?;

        let result = WeatherResult::from(parsed);
        tracing::info!(
            name = %result.name,
            condition = %result.condition,
            "OpenWeather lookup succeeded"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn london_body() -> serde_json::Value {
        serde_json::json!({
            "name": "London",
            "sys": { "country": "GB" },
            "weather": [{ "main": "Rain", "description": "light rain" }],
            "main": { "temp": 15.4, "feels_like": 14.8, "humidity": 80, "pressure": 1012 },
            "wind": { "speed": 3.2 }
        })
    }

    fn provider_for(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::with_endpoint("TEST_KEY".into(), format!("{}/weather", server.uri()))
    }

    #[tokio::test]
    async fn sends_city_key_and_metric_units() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "TEST_KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let result = provider
            .current(&Query::parse("London").unwrap())
            .await
            .expect("lookup should succeed");

        assert_eq!(result.name, "London");
        assert_eq!(result.country, "GB");
        assert_eq!(result.condition, "Rain");
        assert_eq!(result.description, "light rain");
        assert_eq!(result.temperature_c, 15.4);
        assert_eq!(result.feels_like_c, 14.8);
        assert_eq!(result.humidity_pct, 80);
        assert_eq!(result.pressure_hpa, 1012);
        assert_eq!(result.wind_speed_mps, 3.2);
    }

    #[tokio::test]
    async fn not_found_maps_to_city_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"cod":"404"}"#))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .current(&Query::parse("Atlantis").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::NotFound);
    }

    #[tokio::test]
    async fn unauthorized_maps_to_invalid_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .current(&Query::parse("London").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::Unauthorized);
    }

    #[tokio::test]
    async fn server_errors_use_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .current(&Query::parse("London").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::Http(503));
        assert_eq!(err.to_string(), "Failed to fetch weather data.");
    }

    #[tokio::test]
    async fn malformed_json_is_a_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .current(&Query::parse("London").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Transport(_)), "got {err:?}");
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_failure_without_the_key() {
        // Reserve a port, then close it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let provider = OpenWeatherProvider::with_endpoint(
            "SUPERSECRET".into(),
            format!("http://127.0.0.1:{port}/weather"),
        );
        let err = provider
            .current(&Query::parse("London").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Transport(_)), "got {err:?}");
        assert!(!err.to_string().contains("SUPERSECRET"), "key leaked: {err}");
        assert!(!err.to_string().contains("appid"), "query leaked: {err}");
    }

    #[test]
    fn empty_weather_list_falls_back_to_unknown() {
        let mut body = london_body();
        body["weather"] = serde_json::json!([]);
        let parsed: OwCurrentResponse = serde_json::from_value(body).unwrap();

        let result = WeatherResult::from(parsed);
        assert_eq!(result.condition, "Unknown");
        assert_eq!(result.description, "");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let provider = OpenWeatherProvider::new("SECRET".into());
        let dbg = format!("{provider:?}");
        assert!(!dbg.contains("SECRET"));
        assert!(dbg.contains(CURRENT_WEATHER_URL));
    }
}
