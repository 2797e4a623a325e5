//! Day/night/manual-dark theme policy.
//!
//! The theme is never cached: it is re-derived from the clock, the session and
//! the persisted manual flag every time it is asked for.

use std::cell::Cell;

use chrono::{DateTime, FixedOffset};

use crate::core::astronomy::{is_night, SunTimes};
use crate::core::session::condition_mentions;
use crate::error::DashboardError;

const DAY_BASE: f32 = 0.8;
const NIGHT_BASE: f32 = 0.2;
pub const MIN_BRIGHTNESS: f32 = 0.1;
pub const MAX_BRIGHTNESS: f32 = 0.95;
/// A daytime sky at or below this brightness is themed as night.
pub const DAY_THRESHOLD: f32 = 0.5;

/// Visual mode of the page chrome. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Day,
    Night,
    ManualDark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Day, Theme::Night, Theme::ManualDark];

    /// CSS class that represents this theme on the document body.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Day => "day-mode",
            Theme::Night => "night-mode",
            Theme::ManualDark => "dark",
        }
    }
}

/// Sky brightness score in [0.1, 0.95].
///
/// Starts from 0.8 by day or 0.2 by night and is nudged by the first matching
/// keyword group. A missing condition scores as clear.
pub fn brightness(night: bool, condition: Option<&str>) -> f32 {
    let condition = condition.or(Some("clear"));
    let mentions = |keyword: &str| condition_mentions(condition, keyword);

    let base = if night { NIGHT_BASE } else { DAY_BASE };
    let adjustment = if mentions("clear") || mentions("sunny") {
        if night { 0.05 } else { 0.15 }
    } else if mentions("cloud") {
        if night { -0.1 } else { -0.05 }
    } else if mentions("rain") || mentions("storm") {
        -0.15
    } else if mentions("snow") || mentions("fog") {
        if night { 0.0 } else { 0.1 }
    } else {
        0.0
    };
    (base + adjustment).clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS)
}

/// Pure theme decision. Manual dark always wins.
pub fn decide(
    now: &DateTime<FixedOffset>,
    sun_times: Option<&SunTimes>,
    condition: Option<&str>,
    manual_dark: bool,
) -> Theme {
    if manual_dark {
        return Theme::ManualDark;
    }
    let night = is_night(now, sun_times);
    if !night && brightness(night, condition) > DAY_THRESHOLD {
        Theme::Day
    } else {
        Theme::Night
    }
}

/// Persisted manual-dark flag.
pub trait PreferenceStore {
    /// Stored flag; anything unreadable counts as `false`.
    fn manual_dark(&self) -> bool;
    fn set_manual_dark(&self, enabled: bool) -> Result<(), DashboardError>;
}

/// In-memory store for tests and hosts without persistent storage.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    manual_dark: Cell<bool>,
}

impl MemoryPreferences {
    pub fn new(manual_dark: bool) -> Self {
        Self {
            manual_dark: Cell::new(manual_dark),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn manual_dark(&self) -> bool {
        self.manual_dark.get()
    }

    fn set_manual_dark(&self, enabled: bool) -> Result<(), DashboardError> {
        self.manual_dark.set(enabled);
        Ok(())
    }
}

/// Element that carries the theme class (the document body in the browser).
pub trait ThemeTarget {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

/// Applies theme decisions to a target, removing the other two classes first.
pub struct ThemeController<P: PreferenceStore, T: ThemeTarget> {
    prefs: P,
    target: T,
    applied: Cell<Option<Theme>>,
}

impl<P: PreferenceStore, T: ThemeTarget> ThemeController<P, T> {
    pub fn new(prefs: P, target: T) -> Self {
        Self {
            prefs,
            target,
            applied: Cell::new(None),
        }
    }

    pub fn manual_dark(&self) -> bool {
        self.prefs.manual_dark()
    }

    /// Last theme written to the target.
    pub fn applied(&self) -> Option<Theme> {
        self.applied.get()
    }

    /// Re-derive the theme and apply it.
    pub fn refresh(
        &self,
        now: &DateTime<FixedOffset>,
        sun_times: Option<&SunTimes>,
        condition: Option<&str>,
    ) -> Theme {
        let theme = decide(now, sun_times, condition, self.prefs.manual_dark());
        self.apply(theme);
        theme
    }

    /// Flip and persist the manual flag, then re-derive immediately.
    ///
    /// If the write fails the theme is still re-derived from whatever the
    /// store holds, and the error is returned.
    pub fn toggle(
        &self,
        now: &DateTime<FixedOffset>,
        sun_times: Option<&SunTimes>,
        condition: Option<&str>,
    ) -> Result<Theme, DashboardError> {
        let enabled = !self.prefs.manual_dark();
        let stored = self.prefs.set_manual_dark(enabled);
        let theme = self.refresh(now, sun_times, condition);
        log::info!("manual dark mode {}", if enabled { "on" } else { "off" });
        stored.map(|()| theme)
    }

    fn apply(&self, theme: Theme) {
        if self.applied.get() == Some(theme) {
            return;
        }
        for other in Theme::ALL {
            self.target.remove_class(other.css_class());
        }
        self.target.add_class(theme.css_class());
        self.applied.set(Some(theme));
        log::debug!("theme -> {}", theme.css_class());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::at;
    use chrono::Utc;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct ClassList(Rc<RefCell<BTreeSet<String>>>);

    impl ClassList {
        fn classes(&self) -> Vec<String> {
            self.0.borrow().iter().cloned().collect()
        }
    }

    impl ThemeTarget for ClassList {
        fn add_class(&self, class: &str) {
            self.0.borrow_mut().insert(class.to_string());
        }

        fn remove_class(&self, class: &str) {
            self.0.borrow_mut().remove(class);
        }
    }

    struct ReadOnlyPreferences;

    impl PreferenceStore for ReadOnlyPreferences {
        fn manual_dark(&self) -> bool {
            false
        }

        fn set_manual_dark(&self, _: bool) -> Result<(), DashboardError> {
            Err(DashboardError::Preference("quota exceeded".into()))
        }
    }

    fn sun() -> SunTimes {
        SunTimes::new(
            at("2024-06-01T06:00:00+00:00").with_timezone(&Utc),
            at("2024-06-01T19:00:00+00:00").with_timezone(&Utc),
        )
    }

    #[test]
    fn brightness_by_condition() {
        assert!((brightness(false, Some("Clear")) - 0.95).abs() < 1e-6);
        assert!((brightness(false, Some("Clouds")) - 0.75).abs() < 1e-6);
        assert!((brightness(false, Some("Rain")) - 0.65).abs() < 1e-6);
        assert!((brightness(false, Some("Snow")) - 0.9).abs() < 1e-6);
        assert!((brightness(true, Some("Clear")) - 0.25).abs() < 1e-6);
        assert!((brightness(true, Some("Thunderstorm")) - MIN_BRIGHTNESS).abs() < 1e-6);
    }

    #[test]
    fn missing_condition_scores_as_clear() {
        assert_eq!(brightness(false, None), brightness(false, Some("clear")));
    }

    #[test]
    fn brightness_stays_clamped() {
        for label in ["Clear", "Clouds", "Rain", "Snow", "Fog", "Stormy rain clouds", ""] {
            for night in [false, true] {
                let b = brightness(night, Some(label));
                assert!((MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&b), "{label}: {b}");
            }
        }
    }

    #[test]
    fn clear_afternoon_is_day() {
        let now = at("2024-06-01T14:00:00+00:00");
        assert_eq!(decide(&now, Some(&sun()), Some("Clear"), false), Theme::Day);
    }

    #[test]
    fn after_sunset_is_night() {
        let now = at("2024-06-01T19:30:00+00:00");
        assert_eq!(decide(&now, Some(&sun()), Some("Clear"), false), Theme::Night);
    }

    #[test]
    fn daytime_stays_day_under_heavy_weather() {
        let now = at("2024-06-01T14:00:00+00:00");
        // cloud is matched before rain: 0.8 - 0.05
        assert_eq!(decide(&now, Some(&sun()), Some("Rain clouds"), false), Theme::Day);
        assert!((brightness(false, Some("Rain clouds")) - 0.75).abs() < 1e-6);
        assert_eq!(
            decide(&now, Some(&sun()), Some("Thunderstorm with heavy rain and clouds"), false),
            Theme::Day
        );
    }

    #[test]
    fn manual_dark_wins_at_clear_noon() {
        let now = at("2024-06-01T12:00:00+00:00");
        assert_eq!(decide(&now, Some(&sun()), Some("Clear"), true), Theme::ManualDark);
        assert_eq!(decide(&now, None, None, true), Theme::ManualDark);
    }

    #[test]
    fn exactly_one_class_is_applied() {
        let target = ClassList::default();
        let controller = ThemeController::new(MemoryPreferences::new(false), target.clone());

        controller.refresh(&at("2024-06-01T12:00:00+00:00"), Some(&sun()), Some("Clear"));
        assert_eq!(target.classes(), vec!["day-mode"]);

        controller.refresh(&at("2024-06-01T23:00:00+00:00"), Some(&sun()), Some("Clear"));
        assert_eq!(target.classes(), vec!["night-mode"]);
    }

    #[test]
    fn toggle_persists_and_reapplies_immediately() {
        let target = ClassList::default();
        let controller = ThemeController::new(MemoryPreferences::new(false), target.clone());
        let noon = at("2024-06-01T12:00:00+00:00");

        controller.refresh(&noon, Some(&sun()), None);
        assert_eq!(controller.toggle(&noon, Some(&sun()), None).unwrap(), Theme::ManualDark);
        assert!(controller.manual_dark());
        assert_eq!(target.classes(), vec!["dark"]);

        assert_eq!(controller.toggle(&noon, Some(&sun()), None).unwrap(), Theme::Day);
        assert!(!controller.manual_dark());
        assert_eq!(target.classes(), vec!["day-mode"]);
    }

    #[test]
    fn failed_write_keeps_theme_consistent_with_store() {
        let target = ClassList::default();
        let controller = ThemeController::new(ReadOnlyPreferences, target.clone());
        let noon = at("2024-06-01T12:00:00+00:00");

        let err = controller.toggle(&noon, Some(&sun()), None).unwrap_err();
        assert!(matches!(err, DashboardError::Preference(_)));
        assert_eq!(controller.applied(), Some(Theme::Day));
        assert_eq!(target.classes(), vec!["day-mode"]);
    }
}
