//! Scalar readings: dew point, visibility, air quality, wind.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ---

const MAGNUS_A: f64 = 17.27;
const MAGNUS_B: f64 = 237.7;

/// Dew point in °C by the Magnus approximation, rounded to one decimal.
///
/// Returns `None` when the formula does not produce a finite value
/// (e.g. zero humidity).
pub fn dew_point(temp_c: f64, humidity_pct: f64) -> Option<f64> {
    // ---
    let alpha = (MAGNUS_A * temp_c) / (MAGNUS_B + temp_c) + (humidity_pct / 100.0).ln();
    let dew = (MAGNUS_B * alpha) / (MAGNUS_A - alpha);

    dew.is_finite().then(|| (dew * 10.0).round() / 10.0)
}

pub fn kmh_from_ms(speed: f64) -> f64 {
    speed * 3.6
}

/// Visibility in km, rounded to one decimal.
pub fn visibility_km(meters: u32) -> f64 {
    (f64::from(meters) / 100.0).round() / 10.0
}

/// Visibility band. Each lower bound is exclusive: 8000 m is `Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VisibilityClass {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl VisibilityClass {
    pub fn from_meters(meters: u32) -> Self {
        match meters {
            m if m > 8000 => VisibilityClass::Excellent,
            m if m > 5000 => VisibilityClass::Good,
            m if m > 2000 => VisibilityClass::Moderate,
            _ => VisibilityClass::Poor,
        }
    }
}

impl fmt::Display for VisibilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VisibilityClass::Excellent => "Excellent",
            VisibilityClass::Good => "Good",
            VisibilityClass::Moderate => "Moderate",
            VisibilityClass::Poor => "Poor",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("AQI index {0} is outside 1..=5")]
pub struct AqiError(pub u8);

/// The provider's five-step air quality scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl TryFrom<u8> for AqiLevel {
    type Error = AqiError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            1 => Ok(AqiLevel::Good),
            2 => Ok(AqiLevel::Fair),
            3 => Ok(AqiLevel::Moderate),
            4 => Ok(AqiLevel::Poor),
            5 => Ok(AqiLevel::VeryPoor),
            other => Err(AqiError(other)),
        }
    }
}

impl AqiLevel {
    // ---
    pub fn index(self) -> u8 {
        self as u8 + 1
    }

    pub fn description(self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Fair => "Fair",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::Poor => "Poor",
            AqiLevel::VeryPoor => "Very Poor",
        }
    }

    /// CSS custom property holding the gauge colour.
    pub fn color(self) -> &'static str {
        match self {
            AqiLevel::Good => "var(--aqi-good)",
            AqiLevel::Fair => "var(--aqi-moderate)",
            AqiLevel::Moderate => "var(--aqi-unhealthy-sensitive)",
            AqiLevel::Poor => "var(--aqi-unhealthy)",
            AqiLevel::VeryPoor => "var(--aqi-very-unhealthy)",
        }
    }

    /// Gauge needle angle: 18° for index 1, then 36° per step.
    pub fn rotation(self) -> f64 {
        18.0 + 36.0 * f64::from(self.index() - 1)
    }
}

/// Everything the AQI gauge shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiReading {
    // ---
    pub index: u8,
    pub description: &'static str,
    pub color: &'static str,
    pub rotation: f64,
}

impl From<AqiLevel> for AqiReading {
    fn from(level: AqiLevel) -> Self {
        Self {
            index: level.index(),
            description: level.description(),
            color: level.color(),
            rotation: level.rotation(),
        }
    }
}

/// Wind readings formatted for display, in km/h.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindReading {
    // ---
    pub speed_kmh: String,
    /// `N/A` when the provider reports no gust.
    pub gust_kmh: String,
    pub direction_deg: f64,
}

impl WindReading {
    pub fn new(speed_ms: f64, gust_ms: Option<f64>, direction_deg: f64) -> Self {
        // ---
        let gust_kmh = match gust_ms {
            Some(gust) if gust > 0.0 => format!("{:.1}", kmh_from_ms(gust)),
            _ => "N/A".to_string(),
        };

        Self {
            speed_kmh: format!("{:.1}", kmh_from_ms(speed_ms)),
            gust_kmh,
            direction_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_dew_point_reference_value() {
        // ---
        let dew = dew_point(25.0, 60.0).unwrap();
        assert!((dew - 16.7).abs() < 0.1, "got {dew}");
    }

    #[test]
    fn test_dew_point_saturated_air_equals_temperature() {
        assert_eq!(dew_point(20.0, 100.0), Some(20.0));
    }

    #[test]
    fn test_dew_point_zero_humidity_is_unavailable() {
        assert_eq!(dew_point(20.0, 0.0), None);
    }

    #[test]
    fn test_visibility_boundaries() {
        // ---
        assert_eq!(VisibilityClass::from_meters(8001), VisibilityClass::Excellent);
        assert_eq!(VisibilityClass::from_meters(8000), VisibilityClass::Good);
        assert_eq!(VisibilityClass::from_meters(5000), VisibilityClass::Moderate);
        assert_eq!(VisibilityClass::from_meters(2001), VisibilityClass::Moderate);
        assert_eq!(VisibilityClass::from_meters(2000), VisibilityClass::Poor);
        assert_eq!(VisibilityClass::from_meters(0).to_string(), "Poor");
        assert_eq!(visibility_km(10_000), 10.0);
    }

    #[test]
    fn test_visibility_km_is_rounded_to_one_decimal() {
        // ---
        assert_eq!(visibility_km(8765), 8.8);
        assert_eq!(visibility_km(8749), 8.7);
        assert_eq!(visibility_km(450), 0.5);
        assert_eq!(visibility_km(0), 0.0);
    }

    #[test]
    fn test_aqi_scale() {
        // ---
        let moderate = AqiReading::from(AqiLevel::try_from(3u8).unwrap());
        assert_eq!(moderate.description, "Moderate");
        assert_eq!(moderate.rotation, 90.0);

        let rotations: Vec<f64> = (1..=5u8)
            .map(|i| AqiLevel::try_from(i).unwrap().rotation())
            .collect();
        assert_eq!(rotations, vec![18.0, 54.0, 90.0, 126.0, 162.0]);
        assert_eq!(AqiLevel::VeryPoor.description(), "Very Poor");
    }

    #[test]
    fn test_aqi_out_of_range_fails() {
        assert_eq!(AqiLevel::try_from(0u8), Err(AqiError(0)));
        assert_eq!(AqiLevel::try_from(6u8), Err(AqiError(6)));
    }

    #[test]
    fn test_wind_conversion_and_missing_gust() {
        // ---
        let wind = WindReading::new(3.1, None, 270.0);
        assert_eq!(wind.speed_kmh, "11.2");
        assert_eq!(wind.gust_kmh, "N/A");

        let gusty = WindReading::new(5.0, Some(8.5), 90.0);
        assert_eq!(gusty.speed_kmh, "18.0");
        assert_eq!(gusty.gust_kmh, "30.6");

        let calm_gust = WindReading::new(3.0, Some(0.0), 0.0);
        assert_eq!(calm_gust.gust_kmh, "N/A");
        assert_eq!(calm_gust.speed_kmh, "10.8");
    }
}
