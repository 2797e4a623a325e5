//! Weather overlays drawn on top of the base scene: drifting clouds, rain
//! streaks and snowflakes.
//!
//! Every element's position is `(per-index seed + time * speed) mod extent`,
//! so motion loops continuously without any state carried between frames.

use glam::Vec2;

use crate::api::types::Viewport;
use crate::core::session::condition_mentions;
use crate::renderer::traits::{Circle, Rgba, Surface};

pub const CLOUD_COUNT: u32 = 5;
pub const RAIN_DROPS: u32 = 100;
pub const SNOW_FLAKES: u32 = 100;

const CLOUD_SIZE: f32 = 60.0;
const CLOUD_SPACING: f64 = 300.0;
/// Pixels per millisecond.
const CLOUD_SPEED: f64 = 0.01;
/// Clouds travel this far past the right edge before re-entering on the left.
const CLOUD_MARGIN: f64 = 200.0;
const CLOUD_TOP: f32 = 100.0;
const CLOUD_BAND: f32 = 80.0;
const CLOUD_DAY: Rgba = Rgba::new(255, 255, 255, 0.7);
const CLOUD_NIGHT: Rgba = Rgba::new(100, 100, 120, 0.6);

const RAIN_SEED: f64 = 11111.0;
const RAIN_SPEED: Drift = Drift { x: 0.2, y: 0.3 };
const RAIN_LENGTH: f32 = 15.0;
const RAIN_SLANT: f32 = 5.0;
const RAIN_COLOR: Rgba = Rgba::new(200, 210, 220, 0.6);

const SNOW_SEED: f64 = 22222.0;
const SNOW_SPEED: Drift = Drift { x: 0.05, y: 0.08 };
const SNOW_COLOR: Rgba = Rgba::new(255, 255, 255, 0.8);

/// Horizontal and vertical speed in pixels per millisecond.
struct Drift {
    x: f64,
    y: f64,
}

/// Which overlays a condition label triggers. Not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlays {
    pub cloudy: bool,
    pub rainy: bool,
    pub snowy: bool,
}

impl Overlays {
    /// Case-insensitive substring match on "cloud", "rain" and "snow".
    pub fn from_condition(condition: Option<&str>) -> Self {
        Self {
            cloudy: condition_mentions(condition, "cloud"),
            rainy: condition_mentions(condition, "rain"),
            snowy: condition_mentions(condition, "snow"),
        }
    }

    pub fn any(&self) -> bool {
        self.cloudy || self.rainy || self.snowy
    }
}

/// Left edge of cloud `index` at `time_ms`.
pub fn cloud_x(index: u32, time_ms: f64, width: f32) -> f32 {
    let travel = index as f64 * CLOUD_SPACING + time_ms * CLOUD_SPEED;
    (travel.rem_euclid(width as f64 + CLOUD_MARGIN) - CLOUD_MARGIN / 2.0) as f32
}

/// The three puffs of one cloud, anchored at its left puff center.
pub fn cloud_puffs(anchor: Vec2, size: f32) -> [Circle; 3] {
    [
        Circle::new(anchor, size),
        Circle::new(anchor + Vec2::new(size * 0.8, -size * 0.3), size * 0.9),
        Circle::new(anchor + Vec2::new(size * 1.6, 0.0), size),
    ]
}

pub fn draw_clouds(surface: &mut dyn Surface, viewport: Viewport, time_ms: f64, night: bool) {
    let color = if night { CLOUD_NIGHT } else { CLOUD_DAY };
    for i in 0..CLOUD_COUNT {
        let anchor = Vec2::new(
            cloud_x(i, time_ms, viewport.width),
            CLOUD_TOP + i as f32 * CLOUD_BAND,
        );
        surface.fill_circles(&cloud_puffs(anchor, CLOUD_SIZE), color);
    }
}

/// Looping position of particle `index` for a seed multiplier pair.
fn looping_position(
    seed: f64,
    y_seed_factor: f64,
    speed: &Drift,
    time_ms: f64,
    viewport: Viewport,
) -> Vec2 {
    let x = (seed + time_ms * speed.x).rem_euclid(viewport.width as f64);
    let y = (seed * y_seed_factor + time_ms * speed.y).rem_euclid(viewport.height as f64);
    Vec2::new(x as f32, y as f32)
}

/// Top end of rain streak `index` at `time_ms`.
pub fn raindrop(index: u32, time_ms: f64, viewport: Viewport) -> Vec2 {
    looping_position(index as f64 * RAIN_SEED, 2.0, &RAIN_SPEED, time_ms, viewport)
}

pub fn draw_rain(surface: &mut dyn Surface, viewport: Viewport, time_ms: f64) {
    for i in 0..RAIN_DROPS {
        let top = raindrop(i, time_ms, viewport);
        let bottom = top + Vec2::new(-RAIN_SLANT, RAIN_LENGTH);
        surface.stroke_line(top, bottom, 1.0, RAIN_COLOR);
    }
}

/// Center and radius of snowflake `index` at `time_ms`.
pub fn snowflake(index: u32, time_ms: f64, viewport: Viewport) -> Circle {
    let seed = index as f64 * SNOW_SEED;
    let center = looping_position(seed, 3.0, &SNOW_SPEED, time_ms, viewport);
    // Radius in [1, 3.9], varying by index.
    let radius = (seed.rem_euclid(30.0) / 10.0 + 1.0) as f32;
    Circle::new(center, radius)
}

pub fn draw_snow(surface: &mut dyn Surface, viewport: Viewport, time_ms: f64) {
    for i in 0..SNOW_FLAKES {
        surface.fill_circle(snowflake(i, time_ms, viewport), SNOW_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::RecordingSurface;

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn gating_is_substring_and_case_insensitive() {
        let o = Overlays::from_condition(Some("Light rain and snow"));
        assert!(o.rainy && o.snowy && !o.cloudy);

        let o = Overlays::from_condition(Some("Rain with broken CLOUDS"));
        assert!(o.rainy && o.cloudy && !o.snowy);

        assert!(!Overlays::from_condition(Some("Clear")).any());
        assert!(!Overlays::from_condition(None).any());
    }

    #[test]
    fn clouds_wrap_back_to_the_left() {
        let period_ms = (VIEW.width as f64 + CLOUD_MARGIN) / CLOUD_SPEED;
        let a = cloud_x(2, 1_000.0, VIEW.width);
        let b = cloud_x(2, 1_000.0 + period_ms, VIEW.width);
        assert!((a - b).abs() < 1e-2);
        for t in [0.0, 12_345.0, 1.7e12] {
            let x = cloud_x(4, t, VIEW.width);
            assert!(x >= -100.0 && x <= VIEW.width + 100.0, "x={x}");
        }
    }

    #[test]
    fn clouds_sit_in_fixed_bands() {
        let mut s = RecordingSurface::new(VIEW.width, VIEW.height);
        draw_clouds(&mut s, VIEW, 5_000.0, false);
        let groups: Vec<_> = s.circle_groups().collect();
        assert_eq!(groups.len(), CLOUD_COUNT as usize);
        for (i, puffs) in groups.iter().enumerate() {
            assert_eq!(puffs.len(), 3);
            assert_eq!(puffs[0].center.y, 100.0 + i as f32 * 80.0);
        }
    }

    #[test]
    fn rain_streaks_are_slanted_and_inside_viewport() {
        let mut s = RecordingSurface::new(VIEW.width, VIEW.height);
        draw_rain(&mut s, VIEW, 1.7e12);
        assert_eq!(s.lines().count(), RAIN_DROPS as usize);
        for (from, to) in s.lines() {
            assert!(from.x >= 0.0 && from.x <= VIEW.width);
            assert!(from.y >= 0.0 && from.y <= VIEW.height);
            let d = *to - *from;
            assert!((d.x + 5.0).abs() < 1e-3 && (d.y - 15.0).abs() < 1e-3);
        }
    }

    #[test]
    fn rain_moves_faster_than_snow() {
        let rain_a = raindrop(1, 0.0, VIEW);
        let rain_b = raindrop(1, 100.0, VIEW);
        let snow_a = snowflake(1, 0.0, VIEW).center;
        let snow_b = snowflake(1, 100.0, VIEW).center;
        assert!((rain_b.y - rain_a.y).abs() > (snow_b.y - snow_a.y).abs());
    }

    #[test]
    fn flake_sizes_stay_small() {
        for i in 0..SNOW_FLAKES {
            let r = snowflake(i, 0.0, VIEW).radius;
            assert!((1.0..4.0).contains(&r), "radius {r}");
        }
    }
}
