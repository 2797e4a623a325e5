use std::cell::RefCell;
use std::rc::Rc;

use crate::api::types::Coordinates;
use crate::core::astronomy::SunTimes;

/// The most recent current-conditions payload, replaced wholesale on each
/// accepted fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Primary condition label ("Rain", "Clouds"). Never an empty string.
    condition: Option<String>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub visibility_m: u32,
    pub coordinates: Coordinates,
}

impl WeatherSnapshot {
    pub fn new(condition: impl Into<String>, coordinates: Coordinates) -> Self {
        let condition = condition.into();
        Self {
            condition: (!condition.trim().is_empty()).then_some(condition),
            temperature_c: 0.0,
            feels_like_c: 0.0,
            humidity_pct: 0,
            wind_speed_mps: 0.0,
            pressure_hpa: 0,
            visibility_m: 0,
            coordinates,
        }
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Case-insensitive substring match of the condition label.
    pub fn mentions(&self, keyword: &str) -> bool {
        condition_mentions(self.condition(), keyword)
    }
}

/// Case-insensitive keyword match used by every consumer of condition labels.
/// An absent label matches nothing.
pub fn condition_mentions(condition: Option<&str>, keyword: &str) -> bool {
    condition.is_some_and(|label| label.to_lowercase().contains(&keyword.to_lowercase()))
}

/// Identifies one issued fetch. Tickets are strictly increasing in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Process-wide holder of the latest accepted weather payload and sun times.
///
/// Starts out unknown. Fetch failures leave it untouched, so stale data keeps
/// driving the theme and sky until something newer is accepted.
#[derive(Debug, Default)]
pub struct WeatherSession {
    snapshot: Option<WeatherSnapshot>,
    sun_times: Option<SunTimes>,
    last_issued: u64,
    last_accepted: u64,
}

/// Shared handle: the fetch path writes, the animation frame reads.
/// Single-threaded host, so `Rc<RefCell<_>>`.
pub type SharedSession = Rc<RefCell<WeatherSession>>;

impl WeatherSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Issue a ticket for a fetch that is about to start.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.last_issued += 1;
        RequestTicket(self.last_issued)
    }

    /// Whether no newer request has been issued since `ticket`.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.last_issued
    }

    /// Replace snapshot and sun times together if `ticket` is newer than the
    /// last accepted one. Returns whether the update was taken.
    pub fn accept(
        &mut self,
        ticket: RequestTicket,
        snapshot: WeatherSnapshot,
        sun_times: Option<SunTimes>,
    ) -> bool {
        if ticket.0 <= self.last_accepted {
            log::debug!(
                "dropping stale weather result #{} (already at #{})",
                ticket.0,
                self.last_accepted
            );
            return false;
        }
        self.last_accepted = ticket.0;
        self.snapshot = Some(snapshot);
        self.sun_times = sun_times;
        true
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn sun_times(&self) -> Option<&SunTimes> {
        self.sun_times.as_ref()
    }

    /// Current condition label; `None` means "treat as clear".
    pub fn condition(&self) -> Option<&str> {
        self.snapshot.as_ref().and_then(|s| s.condition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn snapshot(label: &str) -> WeatherSnapshot {
        WeatherSnapshot::new(label, Coordinates::new(51.5, -0.12))
    }

    fn sun() -> SunTimes {
        SunTimes::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            DateTime::from_timestamp(1_700_030_000, 0).unwrap(),
        )
    }

    #[test]
    fn starts_unknown() {
        let session = WeatherSession::new();
        assert!(session.snapshot().is_none());
        assert!(session.sun_times().is_none());
        assert!(session.condition().is_none());
    }

    #[test]
    fn empty_label_is_absent() {
        assert_eq!(snapshot("  ").condition(), None);
        assert_eq!(snapshot("Rain").condition(), Some("Rain"));
    }

    #[test]
    fn mentions_is_case_insensitive_substring() {
        let s = snapshot("Light RAIN and Snow");
        assert!(s.mentions("rain"));
        assert!(s.mentions("SNOW"));
        assert!(!s.mentions("cloud"));
        assert!(!condition_mentions(None, "clear"));
    }

    #[test]
    fn accept_replaces_wholesale() {
        let mut session = WeatherSession::new();
        let first = session.begin_request();
        assert!(session.accept(first, snapshot("Clear"), Some(sun())));
        let second = session.begin_request();
        assert!(session.accept(second, snapshot("Rain"), None));
        assert_eq!(session.condition(), Some("Rain"));
        assert!(session.sun_times().is_none());
    }

    #[test]
    fn late_completion_of_older_request_is_dropped() {
        let mut session = WeatherSession::new();
        let older = session.begin_request();
        let newer = session.begin_request();
        assert!(session.accept(newer, snapshot("Snow"), Some(sun())));
        assert!(!session.accept(older, snapshot("Clear"), None));
        assert_eq!(session.condition(), Some("Snow"));
        assert!(session.sun_times().is_some());
    }

    #[test]
    fn older_request_still_lands_if_newer_never_completes() {
        let mut session = WeatherSession::new();
        let older = session.begin_request();
        let _newer = session.begin_request();
        assert!(session.accept(older, snapshot("Clouds"), None));
        assert!(!session.is_latest(older));
    }
}
