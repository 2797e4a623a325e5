use super::presentation::CurrentView;
use crate::systems::forecast::ForecastCard;

/// The page the dashboard writes into.
///
/// Methods take `&self`: the browser implementation only touches the DOM, and
/// in-memory doubles use interior mutability.
pub trait DashboardView {
    fn set_loading(&self, loading: bool);
    fn show_error(&self, message: &str);
    fn clear_error(&self);

    fn show_current(&self, current: &CurrentView);
    /// Update only the temperature readout (count-up frames).
    fn set_temperature(&self, celsius: i32);
    fn set_current_visible(&self, visible: bool);

    fn show_forecast(&self, cards: &[ForecastCard]);
    fn set_forecast_visible(&self, visible: bool);

    fn show_sun_times(&self, sunrise: &str, sunset: &str);
    /// Write the resolved location name back into the search box.
    fn set_city_query(&self, city: &str);
}
