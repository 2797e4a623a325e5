//! Approximate moon phase and day/night classification.
//!
//! Nothing here is physically accurate: the moon is a fixed-period cycle
//! anchored on one reference new moon, and night is either "outside the known
//! sunrise/sunset window" or a fixed clock-hour rule.

use chrono::{DateTime, FixedOffset, TimeZone, Timelike, Utc};

/// Mean synodic month in days.
pub const SYNODIC_PERIOD_DAYS: f64 = 29.53;

/// Local hour at which the fallback rule starts calling it day.
pub const FALLBACK_DAWN_HOUR: u32 = 6;
/// Local hour at which the fallback rule starts calling it night.
pub const FALLBACK_DUSK_HOUR: u32 = 18;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Reference new moon: 2000-01-06 00:00 UTC.
fn reference_new_moon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 6, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Sunrise and sunset for the current location. Either both are known or the
/// whole value is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl SunTimes {
    pub fn new(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        Self { sunrise, sunset }
    }

    /// Build from provider epoch seconds; `None` unless both are present and valid.
    pub fn from_epoch_secs(sunrise: Option<i64>, sunset: Option<i64>) -> Option<Self> {
        let sunrise = DateTime::from_timestamp(sunrise?, 0)?;
        let sunset = DateTime::from_timestamp(sunset?, 0)?;
        Some(Self { sunrise, sunset })
    }
}

/// Fraction of the lunar cycle at `date`, in [0, 1). 0 is new moon.
///
/// Dates before the reference epoch use the Euclidean remainder, so the raw
/// remainder is always non-negative and the cycle continues backwards
/// seamlessly.
pub fn moon_phase<Tz: TimeZone>(date: &DateTime<Tz>) -> f64 {
    let elapsed_ms = (date.timestamp_millis() - reference_new_moon().timestamp_millis()) as f64;
    let days = elapsed_ms / MS_PER_DAY;
    let phase = days.rem_euclid(SYNODIC_PERIOD_DAYS) / SYNODIC_PERIOD_DAYS;
    // rem_euclid may round up to exactly the divisor for tiny negative inputs.
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}

/// Whether `now` is night.
///
/// With known sun times night is strictly before sunrise or strictly after
/// sunset. Without them, night is local hour < 6 or >= 18.
pub fn is_night(now: &DateTime<FixedOffset>, sun_times: Option<&SunTimes>) -> bool {
    match sun_times {
        Some(sun) => {
            let now = now.with_timezone(&Utc);
            now < sun.sunrise || now > sun.sunset
        }
        None => {
            let hour = now.hour();
            hour < FALLBACK_DAWN_HOUR || hour >= FALLBACK_DUSK_HOUR
        }
    }
}
