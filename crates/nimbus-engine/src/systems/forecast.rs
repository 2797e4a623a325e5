//! Multi-day forecast strip: one representative entry per calendar day.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};

use super::icons::icon_class;

/// Local hour whose entry represents its day when present.
pub const PREFERRED_HOUR: u32 = 12;

/// One timestamped forecast period from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition: String,
}

/// Pick one entry per local calendar day, oldest day first, at most `days` days.
///
/// The entry at local hour 12 wins for its day; a day without one keeps its
/// first entry in input order.
pub fn daily_entries<'a>(
    entries: &'a [ForecastEntry],
    offset: &FixedOffset,
    days: usize,
) -> Vec<&'a ForecastEntry> {
    let mut by_day: BTreeMap<NaiveDate, &ForecastEntry> = BTreeMap::new();
    for entry in entries {
        let local = entry.time.with_timezone(offset);
        let day = local.date_naive();
        if local.hour() == PREFERRED_HOUR || !by_day.contains_key(&day) {
            by_day.insert(day, entry);
        }
    }
    by_day.into_values().take(days).collect()
}

/// Display-ready forecast card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    /// Short weekday, e.g. "Tue".
    pub weekday: String,
    /// e.g. "Mar 5".
    pub date: String,
    pub high_c: i32,
    pub low_c: i32,
    pub condition: String,
    pub icon: &'static str,
}

impl ForecastCard {
    pub fn from_entry(entry: &ForecastEntry, offset: &FixedOffset) -> Self {
        let local = entry.time.with_timezone(offset);
        Self {
            weekday: local.format("%a").to_string(),
            date: local.format("%b %-d").to_string(),
            high_c: entry.temp_max_c.round() as i32,
            low_c: entry.temp_min_c.round() as i32,
            condition: entry.condition.clone(),
            icon: icon_class(&entry.condition),
        }
    }

    /// "Tue, Mar 5"
    pub fn date_label(&self) -> String {
        format!("{}, {}", self.weekday, self.date)
    }

    /// Rounded high with a degree sign, shown apart from the low.
    pub fn high_label(&self) -> String {
        format!("{}°", self.high_c)
    }

    pub fn low_label(&self) -> String {
        format!("{}°", self.low_c)
    }
}

/// Bucket `entries` and turn the chosen ones into cards.
pub fn forecast_cards(
    entries: &[ForecastEntry],
    offset: &FixedOffset,
    days: usize,
) -> Vec<ForecastCard> {
    daily_entries(entries, offset, days)
        .into_iter()
        .map(|entry| ForecastCard::from_entry(entry, offset))
        .collect()
}
