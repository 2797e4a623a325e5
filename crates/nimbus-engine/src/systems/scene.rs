//! One frame of the procedural sky.
//!
//! Frame order: flat base fill, base gradient, sun (day) or stars and moon
//! (night), then the cloud, rain and snow overlays. Nothing is carried from
//! one frame to the next; every parameter is derived from the frame inputs.

use chrono::{DateTime, FixedOffset};
use glam::Vec2;

use super::celestial::{draw_moon, draw_sun, moon_position, sun_position};
use super::overlays::{draw_clouds, draw_rain, draw_snow, Overlays};
use super::stars::draw_stars;
use crate::api::types::Viewport;
use crate::core::astronomy::{is_night, moon_phase, SunTimes};
use crate::core::time::{epoch_ms, local_hour};
use crate::renderer::traits::{Rgba, Surface};

const DAY_BASE: Rgba = Rgba::rgb(0x87, 0xCE, 0xEB);
const DAY_HORIZON: Rgba = Rgba::rgb(0xE0, 0xF6, 0xFF);
const NIGHT_BASE: Rgba = Rgba::rgb(0x0a, 0x14, 0x28);
const NIGHT_TOP: Rgba = Rgba::rgb(0x00, 0x1a, 0x4d);

/// The two mutually exclusive base scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseScene {
    Day,
    Night,
}

impl BaseScene {
    fn fill(self) -> Rgba {
        match self {
            BaseScene::Day => DAY_BASE,
            BaseScene::Night => NIGHT_BASE,
        }
    }

    /// Top and bottom stops of the sky gradient.
    fn gradient(self) -> (Rgba, Rgba) {
        match self {
            BaseScene::Day => (DAY_BASE, DAY_HORIZON),
            BaseScene::Night => (NIGHT_TOP, NIGHT_BASE),
        }
    }
}

/// Everything a frame needs from the outside world.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub now: DateTime<FixedOffset>,
    pub sun_times: Option<&'a SunTimes>,
    /// `None` renders as clear sky.
    pub condition: Option<&'a str>,
}

/// Per-frame derived parameters. Lives for exactly one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParameters {
    pub base: BaseScene,
    pub overlays: Overlays,
    pub moon_phase: f64,
    /// Sun center by day, moon center by night.
    pub celestial: Vec2,
    pub viewport: Viewport,
    /// Time base of every looping animation.
    pub time_ms: f64,
}

impl SceneParameters {
    pub fn derive(input: &FrameInput<'_>, viewport: Viewport) -> Self {
        let base = if is_night(&input.now, input.sun_times) {
            BaseScene::Night
        } else {
            BaseScene::Day
        };
        let celestial = match base {
            BaseScene::Day => sun_position(viewport, local_hour(&input.now)),
            BaseScene::Night => moon_position(viewport),
        };
        Self {
            base,
            overlays: Overlays::from_condition(input.condition),
            moon_phase: moon_phase(&input.now),
            celestial,
            viewport,
            time_ms: epoch_ms(&input.now),
        }
    }
}

/// Paint one frame onto `surface`.
///
/// The viewport is read from the surface on every call. A zero-area surface
/// is skipped and `None` returned; otherwise returns what was drawn.
pub fn render_frame(surface: &mut dyn Surface, input: &FrameInput<'_>) -> Option<SceneParameters> {
    let viewport = surface.size();
    if viewport.is_empty() {
        log::trace!("sky frame skipped: empty viewport");
        return None;
    }

    let params = SceneParameters::derive(input, viewport);
    let full = Vec2::new(viewport.width, viewport.height);

    surface.fill_rect(Vec2::ZERO, full, params.base.fill());
    let (top, bottom) = params.base.gradient();
    surface.fill_vertical_gradient(Vec2::ZERO, full, top, bottom);

    match params.base {
        BaseScene::Day => draw_sun(surface, params.celestial),
        BaseScene::Night => {
            draw_stars(surface, viewport, params.time_ms);
            draw_moon(surface, params.celestial, params.moon_phase);
        }
    }

    let night = params.base == BaseScene::Night;
    if params.overlays.cloudy {
        draw_clouds(surface, viewport, params.time_ms, night);
    }
    if params.overlays.rainy {
        draw_rain(surface, viewport, params.time_ms);
    }
    if params.overlays.snowy {
        draw_snow(surface, viewport, params.time_ms);
    }

    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::at;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};
    use crate::systems::overlays::{CLOUD_COUNT, RAIN_DROPS, SNOW_FLAKES};
    use crate::systems::stars::{STATIC_STARS, TWINKLING_STARS};
    use chrono::Utc;

    fn sun_times(sunrise: &str, sunset: &str) -> SunTimes {
        SunTimes::new(at(sunrise).with_timezone(&Utc), at(sunset).with_timezone(&Utc))
    }

    fn frame(surface: &mut RecordingSurface, input: &FrameInput<'_>) -> SceneParameters {
        render_frame(surface, input).expect("non-empty surface renders")
    }

    #[test]
    fn clear_afternoon_is_day_without_overlays() {
        let sun = sun_times("2024-06-01T06:00:00+02:00", "2024-06-01T19:00:00+02:00");
        let input = FrameInput {
            now: at("2024-06-01T14:00:00+02:00"),
            sun_times: Some(&sun),
            condition: Some("Clear"),
        };
        let mut s = RecordingSurface::new(800.0, 600.0);
        let params = frame(&mut s, &input);

        assert_eq!(params.base, BaseScene::Day);
        assert!(!params.overlays.any());
        // base, gradient, sun, glow
        assert_eq!(s.command_count(), 4);
        assert_eq!(s.lines().count(), 0);
        assert_eq!(s.circle_groups().count(), 0);
    }

    #[test]
    fn frame_starts_with_flat_fill_then_gradient() {
        let input = FrameInput {
            now: at("2024-06-01T23:00:00+00:00"),
            sun_times: None,
            condition: None,
        };
        let mut s = RecordingSurface::new(320.0, 240.0);
        frame(&mut s, &input);
        match (&s.commands[0], &s.commands[1]) {
            (
                DrawCommand::FillRect { size, color, .. },
                DrawCommand::Gradient { top, bottom, .. },
            ) => {
                assert_eq!(*size, Vec2::new(320.0, 240.0));
                assert_eq!(*color, NIGHT_BASE);
                assert_eq!((*top, *bottom), (NIGHT_TOP, NIGHT_BASE));
            }
            other => panic!("unexpected frame prefix: {other:?}"),
        }
    }

    #[test]
    fn night_draws_stars_then_moon() {
        let input = FrameInput {
            now: at("2024-06-01T02:00:00+00:00"),
            sun_times: None,
            condition: None,
        };
        let mut s = RecordingSurface::new(800.0, 600.0);
        let params = frame(&mut s, &input);
        assert_eq!(params.base, BaseScene::Night);
        assert_eq!(params.celestial, Vec2::new(680.0, 120.0));

        let stars = (STATIC_STARS + TWINKLING_STARS) as usize;
        assert!(s.filled_circles().count() >= stars + 1);
        assert!(matches!(
            s.commands.last(),
            Some(DrawCommand::StrokeCircle { .. })
        ));
    }

    #[test]
    fn identical_inputs_give_identical_frames() {
        let input = FrameInput {
            now: at("2024-01-15T21:30:00+01:00"),
            sun_times: None,
            condition: Some("Snow and broken clouds"),
        };
        let mut a = RecordingSurface::new(1024.0, 768.0);
        let mut b = RecordingSurface::new(1024.0, 768.0);
        frame(&mut a, &input);
        frame(&mut b, &input);
        assert_eq!(a.commands, b.commands);
    }

    #[test]
    fn rain_and_snow_without_clouds() {
        let input = FrameInput {
            now: at("2024-02-01T12:00:00+00:00"),
            sun_times: None,
            condition: Some("Light rain and snow"),
        };
        let mut s = RecordingSurface::new(800.0, 600.0);
        let params = frame(&mut s, &input);
        assert!(params.overlays.rainy && params.overlays.snowy);
        assert!(!params.overlays.cloudy);
        assert_eq!(s.circle_groups().count(), 0);
        assert_eq!(s.lines().count(), RAIN_DROPS as usize);
        // sun + glow + flakes
        assert_eq!(s.filled_circles().count(), 2 + SNOW_FLAKES as usize);
    }

    #[test]
    fn cloudy_rain_draws_both() {
        let input = FrameInput {
            now: at("2024-02-01T12:00:00+00:00"),
            sun_times: None,
            condition: Some("Rain with clouds"),
        };
        let mut s = RecordingSurface::new(800.0, 600.0);
        frame(&mut s, &input);
        assert_eq!(s.circle_groups().count(), CLOUD_COUNT as usize);
        assert_eq!(s.lines().count(), RAIN_DROPS as usize);
    }

    #[test]
    fn resize_takes_effect_on_next_frame() {
        let input = FrameInput {
            now: at("2024-02-01T12:00:00+00:00"),
            sun_times: None,
            condition: None,
        };
        let mut s = RecordingSurface::new(800.0, 600.0);
        frame(&mut s, &input);
        s.clear();
        s.resize(400.0, 900.0);
        let params = frame(&mut s, &input);
        assert_eq!(params.viewport, Viewport::new(400.0, 900.0));
        assert_eq!(params.celestial.x, 200.0);
    }

    #[test]
    fn empty_surface_is_a_no_op() {
        let input = FrameInput {
            now: at("2024-02-01T12:00:00+00:00"),
            sun_times: None,
            condition: None,
        };
        let mut s = RecordingSurface::new(0.0, 0.0);
        assert!(render_frame(&mut s, &input).is_none());
        assert_eq!(s.command_count(), 0);
    }
}
