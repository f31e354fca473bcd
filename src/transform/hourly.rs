//! Next-24-hours series for the hourly chart.

use chrono::FixedOffset;
use serde::Serialize;

use super::hour_label;
use crate::models::ForecastEntry;

// ---

/// Eight 3-hour steps, roughly one day.
pub const HOURLY_POINTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPoint {
    // ---
    /// Local hour label, e.g. `3 PM`.
    pub label: String,
    pub temperature: f64,
    /// Probability of precipitation as a whole percentage.
    pub precipitation: u8,
}

/// Chart points for the first [`HOURLY_POINTS`] forecast entries.
///
/// Entries are taken as-is, without filtering by date, so the result has
/// exactly `min(8, entries.len())` points.
pub fn hourly_series(entries: &[ForecastEntry], offset: FixedOffset) -> Vec<HourlyPoint> {
    // ---
    entries
        .iter()
        .take(HOURLY_POINTS)
        .map(|entry| HourlyPoint {
            label: hour_label(entry.dt, offset),
            temperature: entry.main.temp,
            precipitation: precipitation_pct(entry.pop),
        })
        .collect()
}

fn precipitation_pct(pop: f64) -> u8 {
    (pop * 100.0).round().clamp(0.0, 100.0) as u8
}
