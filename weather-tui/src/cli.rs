use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{Config, UiState, WeatherDetails, Widget, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive widget (default).
    Tui {
        /// Look this city up as soon as the widget opens.
        #[arg(long)]
        city: Option<String>,
    },

    /// Store the OpenWeather API key.
    Configure,

    /// Print current weather for a city and exit.
    Show {
        /// City name.
        city: String,

        /// Print the raw result as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Tui { city: None }) {
            Command::Tui { city } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                crate::app::run(provider, city).await
            }
            Command::Configure => configure(),
            Command::Show { city, json } => show(&city, json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;

    tracing::info!(path = %path.display(), "Configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(city: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mut widget = Widget::new();
    widget.set_query(city);
    widget.lookup(provider.as_ref()).await;

    match widget.state() {
        UiState::Success(result) if json => {
            println!("{}", serde_json::to_string_pretty(result)?);
            Ok(())
        }
        UiState::Success(result) => {
            print!("{}", format_report(&WeatherDetails::from(result)));
            Ok(())
        }
        UiState::Error(err) => Err(anyhow::anyhow!("{err}")),
        // lookup always settles
        UiState::Idle | UiState::Loading => Ok(()),
    }
}

fn format_report(details: &WeatherDetails) -> String {
    format!(
        "{name}, {country}\n\
         {glyph}  {temp}°C  {description}\n\
         Humidity    {humidity}\n\
         Wind Speed  {wind}\n\
         Feels Like  {feels}°C\n\
         Pressure    {pressure}\n",
        name = details.name,
        country = details.country,
        glyph = details.glyph,
        temp = details.temperature,
        description = details.description,
        humidity = details.humidity,
        wind = details.wind_speed,
        feels = details.feels_like,
        pressure = details.pressure,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use weather_core::WeatherResult;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_widget() {
        let cli = Cli::try_parse_from(["weather"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_takes_city_and_json_flag() {
        let cli = Cli::try_parse_from(["weather", "show", "New York", "--json"]).unwrap();
        match cli.command {
            Some(Command::Show { city, json }) => {
                assert_eq!(city, "New York");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn report_lists_every_field() {
        let details = WeatherDetails::from(&WeatherResult {
            name: "London".into(),
            country: "GB".into(),
            condition: "Rain".into(),
            description: "light rain".into(),
            temperature_c: 15.4,
            feels_like_c: 14.8,
            humidity_pct: 80,
            wind_speed_mps: 3.2,
            pressure_hpa: 1012,
        });

        let report = format_report(&details);
        assert!(report.starts_with("London, GB\n"));
        assert!(report.contains("15°C  light rain"));
        assert!(report.contains("Humidity    80%"));
        assert!(report.contains("Wind Speed  3.2 m/s"));
        assert!(report.contains("Feels Like  15°C"));
        assert!(report.contains("Pressure    1012 hPa"));
    }
}
