//! Text and icon formatting for the current-conditions panel.

use chrono::{DateTime, FixedOffset, Utc};

use super::provider::CurrentReport;
use crate::systems::icons::icon_class;

// Magnus coefficients.
const MAGNUS_A: f64 = 17.27;
const MAGNUS_B: f64 = 237.7;

/// Dew point in °C, rounded. `None` at 0 % humidity where the log diverges.
pub fn dew_point_c(temperature_c: f64, humidity_pct: u8) -> Option<i32> {
    if humidity_pct == 0 {
        return None;
    }
    let gamma =
        MAGNUS_A * temperature_c / (MAGNUS_B + temperature_c) + (humidity_pct as f64 / 100.0).ln();
    Some((MAGNUS_B * gamma / (MAGNUS_A - gamma)).round() as i32)
}

/// "Monday, Mar 4 • 02:05 PM"
pub fn date_line(now: &DateTime<FixedOffset>) -> String {
    now.format("%A, %b %-d • %I:%M %p").to_string()
}

/// 24-hour "HH:MM" in the viewer's offset.
pub fn clock_label(instant: &DateTime<Utc>, offset: &FixedOffset) -> String {
    instant.with_timezone(offset).format("%H:%M").to_string()
}

/// Everything the current-conditions panel shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub location: String,
    pub date_line: String,
    pub condition: String,
    pub icon: &'static str,
    /// Target of the count-up, not shown directly.
    pub temperature_c: i32,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub visibility: String,
    pub feels_like: String,
    pub dew_point: String,
}

impl CurrentView {
    pub fn new(report: &CurrentReport, now: &DateTime<FixedOffset>) -> Self {
        let s = &report.snapshot;
        let condition = s.condition().unwrap_or_default().to_string();
        Self {
            location: format!("{}, {}", report.name, report.country),
            date_line: date_line(now),
            icon: icon_class(&condition),
            condition,
            temperature_c: s.temperature_c.round() as i32,
            humidity: format!("{}%", s.humidity_pct),
            wind: format!("{} km/h", (s.wind_speed_mps * 3.6).round() as i64),
            pressure: format!("{} hPa", s.pressure_hpa),
            visibility: format!("{:.1} km", s.visibility_m as f64 / 1000.0),
            feels_like: format!("{}°C", s.feels_like_c.round() as i64),
            dew_point: dew_point_c(s.temperature_c, s.humidity_pct)
                .map_or_else(|| "--".to_string(), |d| format!("{d}°C")),
        }
    }
}
