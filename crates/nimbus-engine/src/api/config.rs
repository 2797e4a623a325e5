use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::extensions::easing::Easing;

/// Configuration for the dashboard, handed over by the host page as JSON.
/// Every field has a default so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// OpenWeather API key (`appid`).
    pub api_key: String,
    /// Provider base URL without a trailing slash.
    pub base_url: String,
    /// Provider unit system (default: "metric", temperatures in °C).
    pub units: String,
    /// DOM id of the sky canvas (default: "skyCanvas").
    pub canvas_id: String,
    /// Look up the visitor's position on load (default: true).
    pub locate_on_start: bool,
    /// Number of distinct calendar days in the forecast strip (default: 5).
    pub forecast_days: usize,
    /// Duration of the temperature count-up in milliseconds (default: 500).
    pub counter_duration_ms: f64,
    /// Easing curve of the temperature count-up (default: linear).
    pub counter_easing: Easing,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            units: "metric".to_string(),
            canvas_id: "skyCanvas".to_string(),
            locate_on_start: true,
            forecast_days: 5,
            counter_duration_ms: 500.0,
            counter_easing: Easing::Linear,
        }
    }
}

impl DashboardConfig {
    /// Parse a config from JSON. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, DashboardError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(DashboardError::Config)
    }

    /// Join `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_json_is_default() {
        let cfg = DashboardConfig::from_json("  ").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = DashboardConfig::from_json(r#"{"api_key":"KEY","forecast_days":3}"#).unwrap();
        assert_eq!(cfg.api_key, "KEY");
        assert_eq!(cfg.forecast_days, 3);
        assert_eq!(cfg.canvas_id, "skyCanvas");
        assert!(cfg.locate_on_start);
    }

    #[test]
    fn easing_parses_from_snake_case() {
        let cfg = DashboardConfig::from_json(r#"{"counter_easing":"quad_out"}"#).unwrap();
        assert_eq!(cfg.counter_easing, Easing::QuadOut);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = DashboardConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let cfg = DashboardConfig {
            base_url: "https://example.test/data/".into(),
            ..DashboardConfig::default()
        };
        assert_eq!(cfg.endpoint("weather"), "https://example.test/data/weather");
    }
}
