pub mod celestial;
pub mod forecast;
pub mod icons;
pub mod overlays;
pub mod scene;
pub mod stars;
pub mod theme;

pub use forecast::{forecast_cards, ForecastCard, ForecastEntry};
pub use icons::icon_class;
pub use overlays::Overlays;
pub use scene::{render_frame, BaseScene, FrameInput, SceneParameters};
pub use theme::{
    brightness, decide, MemoryPreferences, PreferenceStore, Theme, ThemeController, ThemeTarget,
};
