//! Upstream document shapes for the weather pipeline.
//!
//! The aggregator forwards the provider's JSON untouched inside a
//! [`CombinedDocument`]; the typed structs below are the subset of those
//! documents the presentation transform reads.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---

/// Combined document returned by `GET /weather`.
///
/// Each field holds the provider response verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedDocument {
    // ---
    pub weather: Value,
    pub forecast: Value,
    #[serde(rename = "airQuality")]
    pub air_quality: Value,
}

/// Typed view over a [`CombinedDocument`].
#[derive(Debug, Clone)]
pub struct Conditions {
    // ---
    pub weather: WeatherSample,
    pub forecast: ForecastSeries,
    pub air_quality: AirQualitySample,
}

impl CombinedDocument {
    // ---
    /// Decode the pass-through JSON into the typed shapes.
    pub fn conditions(&self) -> Result<Conditions, serde_json::Error> {
        // ---
        Ok(Conditions {
            weather: WeatherSample::deserialize(&self.weather)?,
            forecast: ForecastSeries::deserialize(&self.forecast)?,
            air_quality: AirQualitySample::deserialize(&self.air_quality)?,
        })
    }
}

/// Current conditions snapshot (`/weather` upstream endpoint).
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSample {
    // ---
    #[serde(default)]
    pub name: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    /// UTC offset of the location, in seconds on the wire.
    #[serde(rename = "timezone", deserialize_with = "offset_from_seconds")]
    pub offset: FixedOffset,
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    /// Visibility in meters.
    #[serde(default)]
    pub visibility: Option<u32>,
    pub wind: Wind,
    pub sys: SunTimes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    // ---
    /// Provider condition code (e.g. 500 = light rain, 800 = clear).
    pub id: u16,
    #[serde(default)]
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    // ---
    /// Temperature in °C.
    pub temp: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Pressure in hPa.
    pub pressure: f64,
}

/// Wind readings in m/s and degrees.
#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    // ---
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
    #[serde(default)]
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SunTimes {
    // ---
    #[serde(with = "chrono::serde::ts_seconds")]
    pub sunrise: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub sunset: DateTime<Utc>,
}

/// 5 day / 3 hour forecast (`/forecast` upstream endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastSeries {
    // ---
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    // ---
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    pub main: ForecastReadings,
    pub weather: Vec<Condition>,
    /// Probability of precipitation in [0, 1].
    #[serde(default)]
    pub pop: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastReadings {
    // ---
    pub temp: f64,
}

impl ForecastEntry {
    // ---
    /// Icon code of the first reported condition, or an empty string.
    pub fn icon(&self) -> &str {
        self.weather.first().map_or("", |c| c.icon.as_str())
    }
}

/// Air pollution response (`/air_pollution` upstream endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirQualitySample {
    // ---
    #[serde(default)]
    pub list: Vec<AirQualityEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityEntry {
    // ---
    pub main: AirQualityIndex,
    /// Pollutant concentrations, carried but not interpreted.
    #[serde(default)]
    pub components: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityIndex {
    // ---
    pub aqi: u8,
}

impl AirQualitySample {
    // ---
    /// AQI index of the first sample, if any.
    pub fn index(&self) -> Option<u8> {
        self.list.first().map(|entry| entry.main.aqi)
    }
}

fn offset_from_seconds<'de, D>(deserializer: D) -> Result<FixedOffset, D::Error>
where
    D: Deserializer<'de>,
{
    // ---
    let seconds = i32::deserialize(deserializer)?;
    FixedOffset::east_opt(seconds).ok_or_else(|| {
        serde::de::Error::custom(format!("UTC offset out of range: {seconds} seconds"))
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{TimeZone, Timelike};
    use serde_json::json;

    fn sample_weather() -> Value {
        json!({
            "coord": { "lat": 18.52, "lon": 73.86 },
            "weather": [{ "id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d" }],
            "main": { "temp": 27.4, "humidity": 58, "pressure": 1011 },
            "visibility": 10000,
            "wind": { "speed": 3.1, "deg": 270 },
            "dt": 1_760_600_000,
            "sys": { "sunrise": 1_760_575_800, "sunset": 1_760_618_400 },
            "timezone": 19800,
            "name": "Pune",
            "cod": 200
        })
    }

    #[test]
    fn test_weather_sample_decodes_provider_shape() {
        // ---
        let sample: WeatherSample = serde_json::from_value(sample_weather()).unwrap();

        assert_eq!(sample.name, "Pune");
        assert_eq!(sample.weather[0].id, 801);
        assert_eq!(sample.offset.local_minus_utc(), 19800);
        assert_eq!(sample.visibility, Some(10000));
        assert!(sample.wind.gust.is_none());
        assert_eq!(
            sample.sys.sunrise,
            Utc.timestamp_opt(1_760_575_800, 0).unwrap()
        );
    }

    #[test]
    fn test_offset_out_of_range_is_rejected() {
        // ---
        let mut raw = sample_weather();
        raw["timezone"] = json!(90_000);

        assert!(serde_json::from_value::<WeatherSample>(raw).is_err());
    }

    #[test]
    fn test_forecast_entry_icon_and_missing_pop() {
        // ---
        let entry: ForecastEntry = serde_json::from_value(json!({
            "dt": 1_760_605_200,
            "main": { "temp": 25.0 },
            "weather": [{ "id": 500, "icon": "10d" }]
        }))
        .unwrap();

        assert_eq!(entry.icon(), "10d");
        assert_eq!(entry.pop, 0.0);
        assert_eq!(entry.dt.hour(), 9);
    }

    #[test]
    fn test_combined_document_renames_air_quality() {
        // ---
        let doc = CombinedDocument {
            weather: sample_weather(),
            forecast: json!({ "list": [] }),
            air_quality: json!({ "list": [{ "main": { "aqi": 2 }, "components": {} }] }),
        };

        let encoded = serde_json::to_value(&doc).unwrap();
        assert!(encoded.get("airQuality").is_some());

        let conditions = doc.conditions().unwrap();
        assert_eq!(conditions.air_quality.index(), Some(2));
        assert!(conditions.forecast.list.is_empty());
    }
}
