//! High/low for the location's current calendar day.
//!
//! This is deliberately independent of [`super::daily_summaries`]: when the
//! forecast no longer contains any sample for today the range is absent,
//! even though the first daily card still exists.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use super::{local_date, round_half_up};
use crate::models::ForecastEntry;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureRange {
    // ---
    pub max: f64,
    pub min: f64,
}

impl fmt::Display for TemperatureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°/{}°", round_half_up(self.max), round_half_up(self.min))
    }
}

/// Range of forecast temperatures whose local date equals today's local date.
///
/// Returns `None` when no entry falls on today.
pub fn today_range(
    entries: &[ForecastEntry],
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> Option<TemperatureRange> {
    // ---
    let today = local_date(now, offset);

    entries
        .iter()
        .filter(|entry| local_date(entry.dt, offset) == today)
        .map(|entry| entry.main.temp)
        .fold(None, |range, temp| match range {
            None => Some(TemperatureRange { max: temp, min: temp }),
            Some(r) => Some(TemperatureRange {
                max: r.max.max(temp),
                min: r.min.min(temp),
            }),
        })
}
