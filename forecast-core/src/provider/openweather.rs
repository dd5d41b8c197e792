use async_trait::async_trait;
use reqwest::{Client, Request};
use serde::de::DeserializeOwned;

use crate::{
    config::{Config, Endpoints},
    error::{Result, WeatherError},
    model::{LocationCandidate, WeatherSnapshot},
};

use super::{Geocoder, WeatherFetcher};

/// Maximum number of geocoding candidates requested per lookup.
const GEOCODING_LIMIT: &str = "5";
/// Celsius and metres per second.
const UNITS: &str = "metric";
/// Forecast sections the One Call endpoint should leave out.
const EXCLUDE: &str = "minutely,alerts";

/// Client for the OpenWeather geocoding and One Call endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    endpoints: Endpoints,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, endpoints: Endpoints) -> Self {
        Self {
            api_key,
            endpoints,
            http: Client::new(),
        }
    }

    /// Construct a client from config; fails when no API key is configured.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?;
        Ok(Self::new(api_key.to_owned(), config.endpoints.clone()))
    }

    fn geocoding_request(&self, city_name: &str) -> Result<Request> {
        self.http
            .get(&self.endpoints.geocoding)
            .query(&[
                ("q", city_name),
                ("limit", GEOCODING_LIMIT),
                ("appid", self.api_key.as_str()),
            ])
            .build()
            .map_err(|source| invalid_endpoint("geocoding", source))
    }

    fn weather_request(&self, lat: f64, lon: f64) -> Result<Request> {
        let lat = lat.to_string();
        let lon = lon.to_string();

        self.http
            .get(&self.endpoints.weather)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
                ("exclude", EXCLUDE),
            ])
            .build()
            .map_err(|source| invalid_endpoint("weather", source))
    }

    async fn get_json<T: DeserializeOwned>(&self, what: &'static str, request: Request) -> Result<T> {
        tracing::debug!(endpoint = %request.url().path(), "Sending OpenWeather {what} request");

        let res = self
            .http
            .execute(request)
            .await
            .map_err(|source| transport(what, source))?;

        let status = res.status();
        let body = res.text().await.map_err(|source| transport(what, source))?;

        if !status.is_success() {
            tracing::warn!(%status, "OpenWeather {what} request rejected");
            return Err(WeatherError::Api {
                what,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { what, source })
    }
}

#[async_trait]
impl Geocoder for OpenWeatherClient {
    async fn resolve(&self, city_name: &str) -> Result<Vec<LocationCandidate>> {
        let request = self.geocoding_request(city_name)?;
        let candidates: Vec<LocationCandidate> = self.get_json("geocoding", request).await?;

        tracing::debug!(city = city_name, count = candidates.len(), "Geocoding finished");
        Ok(candidates)
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot> {
        let request = self.weather_request(lat, lon)?;
        self.get_json("weather", request).await
    }
}

// The request URL carries `appid`; keep it out of error messages.
fn transport(what: &'static str, source: reqwest::Error) -> WeatherError {
    WeatherError::Transport {
        what,
        source: source.without_url(),
    }
}

fn invalid_endpoint(what: &'static str, source: reqwest::Error) -> WeatherError {
    WeatherError::InvalidEndpoint {
        what,
        source: source.without_url(),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
