//! Five-day summary cards from the 3-hour forecast.

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use super::local_date;
use crate::models::ForecastEntry;

// ---

pub const MAX_DAYS: usize = 5;

/// One forecast card: a calendar day's range and representative icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    // ---
    pub date: NaiveDate,
    /// Short weekday name, e.g. `Fri`.
    pub weekday: String,
    pub max_temp: f64,
    pub min_temp: f64,
    pub icon: String,
}

/// Temperatures and icons seen on one local date, in arrival order.
struct DayBucket<'a> {
    date: NaiveDate,
    entries: Vec<&'a ForecastEntry>,
}

/// Group `entries` by local date and summarize the first [`MAX_DAYS`] dates.
///
/// Dates keep the order in which they first appear. Within a date the
/// representative icon is the entry at `count / 2`, in the order received.
pub fn daily_summaries(entries: &[ForecastEntry], offset: FixedOffset) -> Vec<DailySummary> {
    // ---
    let mut buckets: Vec<DayBucket<'_>> = Vec::new();

    for entry in entries {
        let date = local_date(entry.dt, offset);
        match buckets.iter().position(|b| b.date == date) {
            Some(i) => buckets[i].entries.push(entry),
            None => buckets.push(DayBucket {
                date,
                entries: vec![entry],
            }),
        }
    }

    buckets
        .into_iter()
        .take(MAX_DAYS)
        .map(DayBucket::summarize)
        .collect()
}

impl DayBucket<'_> {
    // ---
    fn summarize(self) -> DailySummary {
        // ---
        let temps = self.entries.iter().map(|e| e.main.temp);
        let max_temp = temps.clone().fold(f64::NEG_INFINITY, f64::max);
        let min_temp = temps.fold(f64::INFINITY, f64::min);
        let icon = self.entries[self.entries.len() / 2].icon().to_string();

        DailySummary {
            date: self.date,
            weekday: self.date.format("%a").to_string(),
            max_temp,
            min_temp,
            icon,
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::{Condition, ForecastReadings};
    use chrono::{TimeZone, Utc};

    fn entry(day: u32, hour: u32, temp: f64, icon: &str) -> ForecastEntry {
        ForecastEntry {
            dt: Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap(),
            main: ForecastReadings { temp },
            weather: vec![Condition {
                id: 800,
                description: String::new(),
                icon: icon.to_string(),
            }],
            pop: 0.0,
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_groups_by_date_with_min_max_and_middle_icon() {
        // ---
        let entries = vec![
            entry(16, 12, 24.0, "01d"),
            entry(16, 15, 27.5, "02d"),
            entry(16, 18, 21.0, "03n"),
            entry(17, 0, 18.0, "04n"),
            entry(17, 3, 16.5, "10n"),
        ];

        let days = daily_summaries(&entries, utc());

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(days[0].weekday, "Fri");
        assert_eq!(days[0].max_temp, 27.5);
        assert_eq!(days[0].min_temp, 21.0);
        assert_eq!(days[0].icon, "02d");
        // two entries: index 1
        assert_eq!(days[1].icon, "10n");
        assert_eq!(days[1].min_temp, 16.5);
    }

    #[test]
    fn test_caps_at_five_days_in_first_seen_order() {
        // ---
        let entries: Vec<_> = (16..=22)
            .flat_map(|day| [entry(day, 6, 10.0 + day as f64, "01d"), entry(day, 18, 5.0, "01n")])
            .collect();

        let days = daily_summaries(&entries, utc());

        assert_eq!(days.len(), MAX_DAYS);
        let dates: Vec<u32> = days.iter().map(|d| chrono::Datelike::day(&d.date)).collect();
        assert_eq!(dates, vec![16, 17, 18, 19, 20]);
        for day in &days {
            assert!(day.max_temp >= day.min_temp);
        }
    }

    #[test]
    fn test_offset_moves_entries_to_next_day() {
        // ---
        let entries = vec![entry(16, 12, 20.0, "01d"), entry(16, 21, 15.0, "01n")];
        let ist = FixedOffset::east_opt(19_800).unwrap();

        let days = daily_summaries(&entries, ist);

        assert_eq!(days.len(), 2);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert_eq!(days[1].max_temp, 15.0);
    }

    #[test]
    fn test_empty_series_yields_no_cards() {
        assert!(daily_summaries(&[], utc()).is_empty());
    }
}
