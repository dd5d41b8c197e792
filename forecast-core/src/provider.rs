use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    model::{LocationCandidate, WeatherSnapshot},
};

pub mod openweather;

/// Resolves a free-text place name to candidate locations.
///
/// Candidates come back in provider order (relevance-ranked). An empty
/// vector means "no matches" and is not an error at this layer.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, city_name: &str) -> Result<Vec<LocationCandidate>>;
}

/// Fetches current conditions plus hourly and daily forecasts.
///
/// Coordinates are forwarded as given; range checking is left to the provider.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot>;
}
