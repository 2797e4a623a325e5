use thiserror::Error;

/// Why a one-shot geolocation request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The host has no geolocation capability at all.
    #[error("geolocation unsupported")]
    Unsupported,
    /// The user refused the permission prompt.
    #[error("geolocation permission denied")]
    PermissionDenied,
    /// The position could not be determined (timeout, no fix).
    #[error("position unavailable")]
    Unavailable,
}

/// Everything that can go wrong between the user pressing "search" and pixels
/// changing. Every error is terminal for one request only.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The city input was empty after trimming. No request is issued.
    #[error("empty city query")]
    EmptyQuery,

    /// The provider answered 404 for the location.
    #[error("location not found")]
    NotFound,

    /// The provider answered with another non-success status.
    #[error("weather lookup failed with status {status}")]
    Lookup { status: u16 },

    /// The request never produced a response.
    #[error("network failure: {0}")]
    Network(String),

    /// The provider responded with a body we could not decode.
    #[error("malformed provider response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),

    /// The preference store refused a read or write.
    #[error("preference store failure: {0}")]
    Preference(String),

    #[error("invalid dashboard config: {0}")]
    Config(#[source] serde_json::Error),

    /// A host primitive (canvas, animation frame, DOM) was unavailable.
    #[error("host failure: {0}")]
    Host(String),
}

impl DashboardError {
    /// The message shown to the user in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::EmptyQuery => "Please enter a city name".to_string(),
            DashboardError::NotFound => "City not found".to_string(),
            DashboardError::Lookup { status } => {
                format!("Weather service returned an error (status {status})")
            }
            DashboardError::Network(_) | DashboardError::Parse(_) => {
                "Unable to fetch weather data".to_string()
            }
            DashboardError::Geolocation(GeolocationError::Unsupported) => {
                "Geolocation not supported in your browser".to_string()
            }
            DashboardError::Geolocation(_) => {
                "Unable to access your location. Please enable geolocation.".to_string()
            }
            DashboardError::Preference(_) => "Unable to save your theme preference".to_string(),
            DashboardError::Config(_) | DashboardError::Host(_) => {
                "Something went wrong loading the dashboard".to_string()
            }
        }
    }

    /// Lookup failures hide the current-weather and forecast panels; network and
    /// permission failures leave the panels as they were.
    pub fn hides_panels(&self) -> bool {
        matches!(self, DashboardError::NotFound | DashboardError::Lookup { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_lookup_failures_hide_panels() {
        assert!(DashboardError::NotFound.hides_panels());
        assert!(DashboardError::Lookup { status: 500 }.hides_panels());
        assert!(!DashboardError::Network("offline".into()).hides_panels());
        assert!(!DashboardError::Geolocation(GeolocationError::PermissionDenied).hides_panels());
        assert!(!DashboardError::EmptyQuery.hides_panels());
    }

    #[test]
    fn geolocation_messages_distinguish_unsupported() {
        let unsupported = DashboardError::from(GeolocationError::Unsupported);
        let denied = DashboardError::from(GeolocationError::PermissionDenied);
        assert!(unsupported.user_message().contains("not supported"));
        assert!(denied.user_message().contains("enable geolocation"));
    }

    #[test]
    fn geolocation_failure_is_the_source() {
        use std::error::Error as _;
        let err = DashboardError::from(GeolocationError::PermissionDenied);
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "geolocation permission denied");
        assert_eq!(err.to_string(), "geolocation failed: geolocation permission denied");
    }

    #[test]
    fn not_found_reads_like_a_lookup_error() {
        assert_eq!(DashboardError::NotFound.user_message(), "City not found");
    }
}
