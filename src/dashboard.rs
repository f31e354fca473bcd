//! Display-ready dashboard view assembled from a combined document.
//!
//! Building is all-or-nothing: any shape problem in the upstream documents
//! fails the whole view, so a caller never renders half a dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{CombinedDocument, Conditions};
use crate::transform::{
    daily_summaries, dew_point, hour_label, hourly_series, is_night, round_half_up, today_range,
    visibility_km, AqiLevel, AqiReading, HourlyPoint, SunArc, TemperatureRange, Theme,
    TransformError, VisibilityClass, WindReading,
};

// ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    // ---
    pub city: String,
    /// Observation date, e.g. `Fri Oct 16 2026`.
    pub date: String,
    pub temperature: i64,
    pub description: String,
    pub icon_url: String,
    pub today: Option<TemperatureRange>,
    pub wind: WindReading,
    pub sunrise: String,
    pub sunset: String,
    pub sun_arc: SunArc,
    pub is_night: bool,
    pub humidity: f64,
    /// Dew point in °C, `None` when it cannot be computed.
    pub dew_point: Option<f64>,
    pub visibility: Option<Visibility>,
    pub pressure: f64,
    pub aqi: AqiReading,
    pub daily: Vec<DailyCard>,
    pub hourly: Vec<HourlyPoint>,
    pub theme: Theme,
    pub theme_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visibility {
    // ---
    pub km: f64,
    pub class: VisibilityClass,
}

/// A daily summary with its rounded display temperatures and icon URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCard {
    // ---
    pub date: NaiveDate,
    pub weekday: String,
    pub max_temp: i64,
    pub min_temp: i64,
    pub icon_url: String,
}

impl Dashboard {
    // ---
    /// Derive the dashboard for `doc` as seen at `now`.
    pub fn build(
        doc: &CombinedDocument,
        icon_base: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, TransformError> {
        // ---
        let conditions = doc.conditions()?;
        Self::from_conditions(&conditions, icon_base, now)
    }

    pub fn from_conditions(
        conditions: &Conditions,
        icon_base: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, TransformError> {
        // ---
        let weather = &conditions.weather;
        let entries = &conditions.forecast.list;
        let offset = weather.offset;

        let condition = weather
            .weather
            .first()
            .ok_or(TransformError::MissingCondition)?;
        let aqi_index = conditions
            .air_quality
            .index()
            .ok_or(TransformError::MissingAirQuality)?;
        let aqi = AqiReading::from(AqiLevel::try_from(aqi_index)?);

        let sunrise = weather.sys.sunrise;
        let sunset = weather.sys.sunset;
        let night = is_night(now, sunrise, sunset);
        let theme = Theme::select(condition.id, night);

        let daily = daily_summaries(entries, offset)
            .into_iter()
            .map(|day| DailyCard {
                date: day.date,
                weekday: day.weekday,
                max_temp: round_half_up(day.max_temp),
                min_temp: round_half_up(day.min_temp),
                icon_url: format!("{}/{}.png", icon_base, day.icon),
            })
            .collect();

        Ok(Dashboard {
            city: weather.name.clone(),
            date: weather.dt.with_timezone(&offset).format("%a %b %d %Y").to_string(),
            temperature: round_half_up(weather.main.temp),
            description: condition.description.clone(),
            icon_url: format!("{}/{}@2x.png", icon_base, condition.icon),
            today: today_range(entries, offset, now),
            wind: WindReading::new(weather.wind.speed, weather.wind.gust, weather.wind.deg),
            sunrise: hour_label(sunrise, offset),
            sunset: hour_label(sunset, offset),
            sun_arc: SunArc::at(now, sunrise, sunset),
            is_night: night,
            humidity: weather.main.humidity,
            dew_point: dew_point(weather.main.temp, weather.main.humidity),
            visibility: weather.visibility.map(|meters| Visibility {
                km: visibility_km(meters),
                class: VisibilityClass::from_meters(meters),
            }),
            pressure: weather.main.pressure,
            aqi,
            daily,
            hourly: hourly_series(entries, offset),
            theme,
            theme_class: theme.css_class(),
        })
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    const ICONS: &str = "https://icons.test/wn";

    fn forecast() -> Value {
        // 2026-10-16 06:00 UTC onwards, 3-hour steps
        let start = 1_792_130_400_i64;
        let list: Vec<Value> = (0..12)
            .map(|i| {
                json!({
                    "dt": start + i * 10_800,
                    "main": { "temp": 20.0 + i as f64 },
                    "weather": [{ "id": 500, "icon": format!("{:02}d", i) }],
                    "pop": 0.25
                })
            })
            .collect();
        json!({ "list": list })
    }

    fn document(aqi: u8) -> CombinedDocument {
        CombinedDocument {
            weather: json!({
                "coord": { "lat": 51.51, "lon": -0.13 },
                "weather": [{ "id": 500, "description": "light rain", "icon": "10d" }],
                "main": { "temp": 25.0, "humidity": 60, "pressure": 1012 },
                "visibility": 8000,
                "wind": { "speed": 3.1, "deg": 200, "gust": 5.0 },
                "dt": 1_792_144_800,
                "sys": { "sunrise": 1_792_130_400, "sunset": 1_792_173_600 },
                "timezone": 0,
                "name": "London"
            }),
            forecast: forecast(),
            air_quality: json!({ "list": [{ "main": { "aqi": aqi }, "components": { "pm2_5": 4.1 } }] }),
        }
    }

    #[test]
    fn test_builds_full_view() {
        // ---
        // 2026-10-16 12:00 UTC, halfway between 06:00 sunrise and 18:00 sunset
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let view = Dashboard::build(&document(3), ICONS, now).unwrap();

        assert_eq!(view.city, "London");
        assert_eq!(view.date, "Fri Oct 16 2026");
        assert_eq!(view.temperature, 25);
        assert_eq!(view.icon_url, "https://icons.test/wn/10d@2x.png");
        assert_eq!(view.sun_arc.percentage, 50.0);
        assert!(!view.is_night);
        assert_eq!(view.theme, Theme::Rainy);
        assert_eq!(view.theme_class, "bg-rainy");
        assert_eq!(view.dew_point, Some(16.7));
        assert_eq!(view.visibility.as_ref().unwrap().class, VisibilityClass::Good);
        assert_eq!(view.aqi.description, "Moderate");
        assert_eq!(view.aqi.rotation, 90.0);
        assert_eq!(view.wind.gust_kmh, "18.0");
        assert_eq!(view.sunrise, "6 AM");
        assert_eq!(view.sunset, "6 PM");
    }

    #[test]
    fn test_forecast_derived_sections() {
        // ---
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let view = Dashboard::build(&document(1), ICONS, now).unwrap();

        // 06:00..=21:00 on the 16th, 00:00..=15:00 on the 17th
        assert_eq!(view.daily.len(), 2);
        assert_eq!(view.daily[0].max_temp, 25);
        assert_eq!(view.daily[0].min_temp, 20);
        assert_eq!(view.daily[0].icon_url, "https://icons.test/wn/03d.png");
        assert_eq!(view.hourly.len(), 8);
        assert_eq!(view.hourly[0].precipitation, 25);

        let today = view.today.unwrap();
        assert_eq!(today.max, 25.0);
        assert_eq!(today.min, 20.0);
    }

    #[test]
    fn test_night_overrides_theme() {
        // ---
        let late = Utc.with_ymd_and_hms(2026, 10, 16, 22, 0, 0).unwrap();
        let view = Dashboard::build(&document(2), ICONS, late).unwrap();

        assert!(view.is_night);
        assert_eq!(view.theme, Theme::Night);
        assert_eq!(view.sun_arc.rotation, 90.0);
    }

    #[test]
    fn test_out_of_range_aqi_fails_whole_view() {
        // ---
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let err = Dashboard::build(&document(7), ICONS, now).unwrap_err();
        assert!(matches!(err, TransformError::Aqi(_)));
    }

    #[test]
    fn test_missing_sections_fail() {
        // ---
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();

        let mut no_air = document(1);
        no_air.air_quality = json!({ "list": [] });
        assert!(matches!(
            Dashboard::build(&no_air, ICONS, now),
            Err(TransformError::MissingAirQuality)
        ));

        let mut no_condition = document(1);
        no_condition.weather["weather"] = json!([]);
        assert!(matches!(
            Dashboard::build(&no_condition, ICONS, now),
            Err(TransformError::MissingCondition)
        ));

        let mut garbled = document(1);
        garbled.forecast = json!({ "list": "nope" });
        assert!(matches!(
            Dashboard::build(&garbled, ICONS, now),
            Err(TransformError::Decode(_))
        ));
    }
}
