//! Weather Icons classes for condition labels, shared by the current panel
//! and the forecast strip.

/// Keyword to icon class, first match wins.
const ICONS: &[(&str, &str)] = &[
    ("clear", "wi wi-day-sunny"),
    ("sunny", "wi wi-day-sunny"),
    ("cloud", "wi wi-cloudy"),
    ("rain", "wi wi-rain"),
    ("drizzle", "wi wi-sprinkle"),
    ("snow", "wi wi-snow"),
    ("thunder", "wi wi-thunderstorm"),
    ("storm", "wi wi-thunderstorm"),
    ("mist", "wi wi-fog"),
    ("fog", "wi wi-fog"),
    ("smoke", "wi wi-smoke"),
    ("haze", "wi wi-day-haze"),
    ("wind", "wi wi-strong-wind"),
];
const DEFAULT_ICON: &str = "wi wi-day-cloudy";

/// Weather Icons class for a condition label.
pub fn icon_class(condition: &str) -> &'static str {
    let label = condition.to_lowercase();
    ICONS
        .iter()
        .find(|(keyword, _)| label.contains(*keyword))
        .map_or(DEFAULT_ICON, |&(_, icon)| icon)
}
