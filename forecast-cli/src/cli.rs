use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use forecast_core::{Config, Coordinates, OpenWeatherResolver, WeatherError};
use inquire::{Password, PasswordDisplayMode};
use serde::Serialize;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Current weather and forecasts from OpenWeather")]
pub struct Cli {
    /// Print the raw records as JSON instead of a text summary.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure {
        /// Key to store; prompts when omitted.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// List locations matching a city name.
    Locate {
        /// City name, e.g. "São Paulo".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Show weather for a latitude/longitude pair.
    Coords {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Show weather for the best match of a city name.
    City {
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key } => configure(api_key),
            Command::Locate { city } => {
                let city = city.join(" ");
                let candidates = resolver()?.location_by_name(&city).await?;

                if self.json {
                    print_json(&candidates)
                } else {
                    print!("{}", render::locations(&city, &candidates));
                    Ok(())
                }
            }
            Command::Coords { lat, lon } => {
                let snapshot = resolver()?.weather_by_coords(lat, lon).await?;

                if self.json {
                    print_json(&snapshot)
                } else {
                    let title = Coordinates::new(lat, lon).to_string();
                    print!("{}", render::snapshot(&title, &snapshot, &Local));
                    Ok(())
                }
            }
            Command::City { city } => {
                let city = city.join(" ");
                let snapshot = resolver()?
                    .weather_by_city(&city)
                    .await
                    .map_err(|err| city_error(err, &city))?;

                if self.json {
                    print_json(&snapshot)
                } else {
                    print!("{}", render::snapshot(&city, &snapshot, &Local));
                    Ok(())
                }
            }
        }
    }
}

fn resolver() -> anyhow::Result<OpenWeatherResolver> {
    let config = Config::load()?;
    tracing::debug!(
        geocoding = %config.endpoints.geocoding,
        weather = %config.endpoints.weather,
        "Loaded configuration"
    );
    OpenWeatherResolver::from_config(&config)
}

/// Adds a lookup hint when the city had no geocoding match.
fn city_error(err: WeatherError, city: &str) -> anyhow::Error {
    if err.is_not_found() {
        anyhow::Error::new(err).context(format!(
            "No location matches \"{city}\".\n\
             Hint: check the spelling or try `forecast locate {city}`."
        ))
    } else {
        err.into()
    }
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = match api_key {
        Some(key) => key,
        None => Password::new("OpenWeather API key:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };

    config.set_api_key(api_key);
    config.api_key()?;

    let path = config.save()?;
    tracing::debug!(path = %path.display(), "Saved configuration");
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn multi_word_city_is_collected() {
        let cli = Cli::try_parse_from(["forecast", "city", "São", "Paulo"]).unwrap();
        match cli.command {
            Command::City { city } => assert_eq!(city.join(" "), "São Paulo"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn coords_accept_negative_numbers() {
        let cli = Cli::try_parse_from(["forecast", "coords", "-33.87", "151.21", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Coords { lat, lon } => {
                assert_eq!(lat, -33.87);
                assert_eq!(lon, 151.21);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn not_found_gets_locate_hint() {
        let err = city_error(WeatherError::NotFound { city: "Atlantis".into() }, "Atlantis");

        let msg = format!("{err:#}");
        assert!(msg.contains("forecast locate Atlantis"), "{msg}");
        assert!(err.downcast_ref::<WeatherError>().is_some_and(WeatherError::is_not_found));
    }

    #[test]
    fn other_errors_pass_through_without_hint() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = city_error(WeatherError::Decode { what: "weather", source }, "Oslo");

        assert!(!format!("{err:#}").contains("Hint"));
        assert!(err.to_string().starts_with("Failed to parse OpenWeather weather JSON"));
    }

    #[test]
    fn locate_requires_a_city() {
        assert!(Cli::try_parse_from(["forecast", "locate"]).is_err());
    }
}
