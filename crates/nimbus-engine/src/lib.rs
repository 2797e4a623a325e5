pub mod api;
pub mod core;
pub mod dashboard;
pub mod error;
pub mod extensions;
pub mod renderer;
pub mod runtime;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::DashboardConfig;
pub use api::types::{Coordinates, LocationQuery, Viewport};
pub use crate::core::astronomy::{is_night, moon_phase, SunTimes};
pub use crate::core::session::{RequestTicket, SharedSession, WeatherSession, WeatherSnapshot};
pub use crate::core::time::{Clock, FixedClock, SystemClock};
pub use dashboard::{
    CurrentReport, CurrentView, Dashboard, DashboardView, GeolocationProvider, OpenWeatherClient,
    WeatherProvider,
};
pub use error::{DashboardError, GeolocationError};
pub use renderer::{Circle, RecordingSurface, Rgba, Surface};
pub use runtime::{AnimationDriver, FrameHandle, FrameReport, FrameScheduler, SkyApp};
pub use systems::{
    render_frame, BaseScene, ForecastCard, ForecastEntry, FrameInput, MemoryPreferences,
    PreferenceStore, SceneParameters, Theme, ThemeTarget,
};
