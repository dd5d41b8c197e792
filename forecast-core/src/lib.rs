//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather geocoding and One Call client
//! - City-name to weather resolution on top of the two lookups
//! - Shared domain models (locations, weather snapshots)
//!
//! It is used by `forecast-cli`, but can also back other front-ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod resolver;

pub use config::{Config, Endpoints};
pub use error::WeatherError;
pub use model::{
    Coordinates, CurrentConditions, DailyForecast, DailyTemperature, HourlyForecast,
    LocationCandidate, WeatherCondition, WeatherSnapshot,
};
pub use provider::{Geocoder, WeatherFetcher, openweather::OpenWeatherClient};
pub use resolver::CityWeatherResolver;

/// Resolver wired to a single OpenWeather client for both lookups.
pub type OpenWeatherResolver = CityWeatherResolver<OpenWeatherClient, OpenWeatherClient>;

impl OpenWeatherResolver {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = OpenWeatherClient::from_config(config)?;
        Ok(CityWeatherResolver::new(client.clone(), client))
    }
}
