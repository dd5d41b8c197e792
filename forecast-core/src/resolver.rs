use crate::{
    error::{Result, WeatherError},
    model::{LocationCandidate, WeatherSnapshot},
    provider::{Geocoder, WeatherFetcher},
};

/// Resolves a city name to coordinates, then fetches weather for the
/// top-ranked match.
///
/// Also exposes the two leaf lookups so a front-end can drive everything
/// through one value.
#[derive(Debug, Clone)]
pub struct CityWeatherResolver<G, W> {
    geocoder: G,
    fetcher: W,
}

impl<G: Geocoder, W: WeatherFetcher> CityWeatherResolver<G, W> {
    pub fn new(geocoder: G, fetcher: W) -> Self {
        Self { geocoder, fetcher }
    }

    pub async fn location_by_name(&self, city_name: &str) -> Result<Vec<LocationCandidate>> {
        self.geocoder.resolve(city_name).await
    }

    pub async fn weather_by_coords(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot> {
        self.fetcher.fetch(lat, lon).await
    }

    /// Geocode `city_name` and fetch weather for the first candidate.
    ///
    /// Fails with [`WeatherError::NotFound`] when geocoding yields nothing.
    pub async fn weather_by_city(&self, city_name: &str) -> Result<WeatherSnapshot> {
        let candidates = self.geocoder.resolve(city_name).await?;

        let Some(first) = candidates.first() else {
            tracing::info!(city = city_name, "No geocoding match");
            return Err(WeatherError::NotFound {
                city: city_name.to_string(),
            });
        };

        tracing::debug!(
            city = city_name,
            matched = %first.display_name(),
            lat = first.lat,
            lon = first.lon,
            "Using first geocoding candidate"
        );

        self.fetcher.fetch(first.lat, first.lon).await
    }
}
