//! Day/night detection and the sunrise-to-sunset arc.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---

/// Night is strictly before sunrise or strictly after sunset.
pub fn is_night(now: DateTime<Utc>, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> bool {
    now < sunrise || now > sunset
}

/// Position of the sun icon along a half-circle arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunArc {
    // ---
    /// Elapsed share of daylight, clamped to `[0, 100]`.
    pub percentage: f64,
    /// Icon rotation in degrees, `-90` at sunrise to `90` at sunset.
    pub rotation: f64,
}

impl SunArc {
    // ---
    /// Arc position for `now` between `sunrise` and `sunset`.
    ///
    /// Shifting all three instants by the location offset does not change
    /// their differences, so the computation runs on UTC instants directly.
    /// A non-positive daylight span yields 0%.
    pub fn at(now: DateTime<Utc>, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        // ---
        let daylight_ms = (sunset - sunrise).num_milliseconds();
        let elapsed_ms = (now - sunrise).num_milliseconds();

        let percentage = if daylight_ms <= 0 {
            0.0
        } else {
            (elapsed_ms as f64 / daylight_ms as f64 * 100.0).clamp(0.0, 100.0)
        };

        Self::from_percentage(percentage)
    }

    fn from_percentage(percentage: f64) -> Self {
        Self {
            percentage,
            rotation: -90.0 + percentage * 1.8,
        }
    }
}
