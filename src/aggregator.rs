//! Upstream fetch-and-merge against the OpenWeather API.
//!
//! One combined fetch is: current weather (to resolve exact coordinates),
//! then forecast and air quality concurrently. Either concurrent fetch
//! failing fails the whole operation; nothing is retried.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{CombinedDocument, Config, WeatherError};

// ---

/// Where to fetch weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

/// Raw location query parameters as sent by the dashboard client.
#[derive(Debug, Default, Deserialize)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl LocationQuery {
    // ---
    /// Resolve the query into a [`Location`].
    ///
    /// A non-blank `city` wins. Otherwise both `lat` and `lon` must be present
    /// and parse as finite numbers.
    pub fn resolve(&self) -> Result<Location, WeatherError> {
        // ---
        if let Some(city) = non_blank(&self.city) {
            return Ok(Location::City(city.to_string()));
        }

        match (non_blank(&self.lat), non_blank(&self.lon)) {
            (Some(lat), Some(lon)) => {
                let lat = lat
                    .parse::<f64>()
                    .map_err(|e| WeatherError::Input(format!("invalid lat '{lat}': {e}")))?;
                let lon = lon
                    .parse::<f64>()
                    .map_err(|e| WeatherError::Input(format!("invalid lon '{lon}': {e}")))?;
                if !lat.is_finite() || !lon.is_finite() {
                    return Err(WeatherError::Input(format!(
                        "non-finite coordinates ({lat}, {lon})"
                    )));
                }
                Ok(Location::Coordinates { lat, lon })
            }
            _ => Err(WeatherError::Input("city or lat/lon missing".into())),
        }
    }

    /// True when the caller supplied no location parameter at all.
    pub fn is_empty(&self) -> bool {
        non_blank(&self.city).is_none()
            && non_blank(&self.lat).is_none()
            && non_blank(&self.lon).is_none()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// HTTP client for the three OpenWeather endpoints.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl Aggregator {
    // ---
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        // ---
        let mut builder = Client::builder();
        if config.upstream_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.upstream_timeout_secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// The configured credential, or [`WeatherError::Config`].
    pub fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key.as_deref().ok_or(WeatherError::Config)
    }

    /// Fetch current weather, forecast and air quality for `location`.
    pub async fn fetch_combined(
        &self,
        location: &Location,
    ) -> Result<CombinedDocument, WeatherError> {
        // ---
        let api_key = self.api_key()?;

        // Step 1: current weather, which also pins down the coordinates
        debug!("Fetching current weather for {:?}", location);

        let mut params: Vec<(&str, String)> = match location {
            Location::City(city) => vec![("q", city.clone())],
            Location::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        };
        params.push(("appid", api_key.to_string()));
        params.push(("units", "metric".to_string()));

        let weather = self.get_json("weather", &params).await?;
        let (lat, lon) = coordinates_of(&weather)?;

        // Step 2: forecast and air quality at the resolved coordinates
        debug!("Fetching forecast and air quality at ({}, {})", lat, lon);

        let lat = lat.to_string();
        let lon = lon.to_string();
        let forecast_params = [
            ("lat", lat.clone()),
            ("lon", lon.clone()),
            ("appid", api_key.to_string()),
            ("units", "metric".to_string()),
        ];
        let air_params = [
            ("lat", lat),
            ("lon", lon),
            ("appid", api_key.to_string()),
        ];

        let (forecast, air_quality) = tokio::try_join!(
            self.get_json("forecast", &forecast_params),
            self.get_json("air_pollution", &air_params),
        )?;

        let name = weather
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>");
        info!("Combined fetch complete for {}", name);

        Ok(CombinedDocument {
            weather,
            forecast,
            air_quality,
        })
    }

    async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Value, WeatherError> {
        // ---
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.client.get(&url).query(params).send().await?;
        let response = pass_through_failure(endpoint, response).await?;

        Ok(response.json::<Value>().await?)
    }
}

/// Turn a non-success response into [`WeatherError::Upstream`], keeping its body.
async fn pass_through_failure(endpoint: &str, response: Response) -> Result<Response, WeatherError> {
    // ---
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    debug!("Upstream /{} returned {}: {}", endpoint, status, body);

    Err(WeatherError::Upstream { status, body })
}

fn coordinates_of(weather: &Value) -> Result<(f64, f64), WeatherError> {
    // ---
    let coord = weather.get("coord");
    let lat = coord.and_then(|c| c.get("lat")).and_then(Value::as_f64);
    let lon = coord.and_then(|c| c.get("lon")).and_then(Value::as_f64);

    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok((lat, lon)),
        _ => Err(WeatherError::Unexpected(
            "current weather response has no coordinates".into(),
        )),
    }
}
