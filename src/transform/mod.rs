//! Presentation transform: pure functions from upstream documents to
//! display-ready values.
//!
//! Nothing here performs I/O or reads the clock; callers pass the current
//! instant in explicitly so every result is reproducible.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use thiserror::Error;

mod daily;
mod hourly;
mod metrics;
mod sun;
mod theme;
mod today;

pub use daily::{daily_summaries, DailySummary, MAX_DAYS};
pub use hourly::{hourly_series, HourlyPoint, HOURLY_POINTS};
pub use metrics::{
    dew_point, kmh_from_ms, visibility_km, AqiError, AqiLevel, AqiReading, VisibilityClass,
    WindReading,
};
pub use sun::{is_night, SunArc};
pub use theme::Theme;
pub use today::{today_range, TemperatureRange};

// ---

/// The upstream documents could not be turned into a dashboard.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("could not decode upstream document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("current weather has no condition entry")]
    MissingCondition,

    #[error("air quality response has no samples")]
    MissingAirQuality,

    #[error(transparent)]
    Aqi(#[from] AqiError),
}

/// Calendar date of `instant` at the location's offset.
pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Hour-of-day label on a 12-hour clock, e.g. `3 PM`.
pub fn hour_label(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%-I %p").to_string()
}

/// Round half towards positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
