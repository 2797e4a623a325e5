use async_trait::async_trait;

use crate::api::types::{Coordinates, LocationQuery};
use crate::core::astronomy::SunTimes;
use crate::core::session::WeatherSnapshot;
use crate::error::{DashboardError, GeolocationError};
use crate::systems::forecast::ForecastEntry;

/// Current conditions for one resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentReport {
    /// Location name as the provider resolved it.
    pub name: String,
    /// ISO country code.
    pub country: String,
    pub snapshot: WeatherSnapshot,
    pub sun_times: Option<SunTimes>,
}

/// Remote source of weather data.
///
/// Futures are not `Send`: the browser host runs everything on one thread.
#[async_trait(?Send)]
pub trait WeatherProvider {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentReport, DashboardError>;

    /// Three-hourly periods for the next few days, oldest first.
    async fn forecast(&self, at: Coordinates) -> Result<Vec<ForecastEntry>, DashboardError>;
}

/// One-shot position lookup.
#[async_trait(?Send)]
pub trait GeolocationProvider {
    /// Whether the host can locate at all. Checked before any UI feedback.
    fn is_supported(&self) -> bool {
        true
    }

    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}
