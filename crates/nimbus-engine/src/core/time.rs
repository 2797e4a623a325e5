use chrono::{DateTime, FixedOffset, Local, Timelike};

/// Source of the current local wall-clock time.
///
/// Everything time-dependent (theme, sun arc, twinkle, overlay motion) reads
/// the clock exactly once per frame, so a fixed clock makes a frame reproducible.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The host's wall clock in the host's local offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant. Can be moved by hand.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: std::cell::Cell<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: std::cell::Cell::new(now),
        }
    }

    /// Move the clock forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + chrono::Duration::milliseconds(ms));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// Fractional local hour in [0, 24), e.g. 14:30 -> 14.5.
pub fn local_hour(now: &DateTime<FixedOffset>) -> f64 {
    now.hour() as f64 + now.minute() as f64 / 60.0 + now.second() as f64 / 3600.0
}

/// Milliseconds since the Unix epoch as a float, the time base of every
/// looping animation (twinkle, cloud drift, precipitation).
pub fn epoch_ms(now: &DateTime<FixedOffset>) -> f64 {
    now.timestamp_millis() as f64
}

#[cfg(test)]
pub(crate) fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).expect("valid RFC 3339 timestamp")
}
