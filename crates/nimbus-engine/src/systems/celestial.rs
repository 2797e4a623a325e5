//! Sun and moon placement and painting.

use std::f64::consts::PI;

use glam::Vec2;

use crate::api::types::Viewport;
use crate::renderer::traits::{Circle, Rgba, Surface};

pub const SUN_RADIUS: f32 = 60.0;
pub const SUN_GLOW_RADIUS: f32 = 120.0;
const SUN_COLOR: Rgba = Rgba::new(255, 200, 0, 0.9);
const SUN_GLOW_COLOR: Rgba = Rgba::new(255, 200, 0, 0.1);

/// Sun arc: horizon line at 80% of the height, peak 40% of the height above it.
const SUN_BASE_FRACTION: f64 = 0.8;
const SUN_AMPLITUDE_FRACTION: f64 = 0.4;

pub const MOON_RADIUS: f32 = 50.0;
const MOON_COLOR: Rgba = Rgba::rgb(0xf0, 0xf0, 0xf0);
/// Same as the top of the night gradient so the shadow reads as sky.
const MOON_SHADOW_COLOR: Rgba = Rgba::rgb(0x00, 0x1a, 0x4d);
const MOON_RING_COLOR: Rgba = Rgba::new(240, 240, 240, 0.3);
const MOON_RING_GAP: f32 = 10.0;
const MOON_RING_WIDTH: f32 = 2.0;

/// Sun center for a fractional local hour.
///
/// `y = base - sin((hour - 6) / 12 * PI) * amplitude`: bottom of the arc at 6
/// and 18, peak at noon. Hours outside [6, 18] put the sun below the horizon.
pub fn sun_position(viewport: Viewport, hour: f64) -> Vec2 {
    let height = viewport.height as f64;
    let lift = ((hour - 6.0) / 12.0 * PI).sin() * height * SUN_AMPLITUDE_FRACTION;
    Vec2::new(viewport.width * 0.5, (height * SUN_BASE_FRACTION - lift) as f32)
}

/// Moon center: fixed near the top-right corner.
pub fn moon_position(viewport: Viewport) -> Vec2 {
    Vec2::new(viewport.width * 0.85, viewport.height * 0.2)
}

/// Horizontal offset of the phase shadow disc, if one is drawn.
///
/// Only phases strictly inside (0.25, 0.75) get a shadow. Below 0.5 the
/// shadow sits to the right, above 0.5 to the left, at `4 * radius` per unit
/// of distance from 0.5. At exactly 0.5 it covers the disc.
pub fn moon_shadow_offset(phase: f64, radius: f32) -> Option<f32> {
    if phase <= 0.25 || phase >= 0.75 {
        return None;
    }
    let radius = radius as f64;
    let offset = if phase < 0.5 {
        (0.5 - phase) * 4.0 * radius
    } else {
        -(phase - 0.5) * 4.0 * radius
    };
    Some(offset as f32)
}

pub fn draw_sun(surface: &mut dyn Surface, center: Vec2) {
    surface.fill_circle(Circle::new(center, SUN_RADIUS), SUN_COLOR);
    surface.fill_circle(Circle::new(center, SUN_GLOW_RADIUS), SUN_GLOW_COLOR);
}

pub fn draw_moon(surface: &mut dyn Surface, center: Vec2, phase: f64) {
    surface.fill_circle(Circle::new(center, MOON_RADIUS), MOON_COLOR);

    if let Some(dx) = moon_shadow_offset(phase, MOON_RADIUS) {
        let shadow = Circle::new(center + Vec2::new(dx, 0.0), MOON_RADIUS);
        surface.fill_circle(shadow, MOON_SHADOW_COLOR);
    }

    // Glow ring is drawn at every phase.
    surface.stroke_circle(
        Circle::new(center, MOON_RADIUS + MOON_RING_GAP),
        MOON_RING_WIDTH,
        MOON_RING_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};

    const VIEW: Viewport = Viewport::new(1000.0, 800.0);

    #[test]
    fn sun_peaks_at_noon() {
        let noon = sun_position(VIEW, 12.0);
        assert_eq!(noon.x, 500.0);
        assert!((noon.y - (640.0 - 320.0)).abs() < 1e-3);
    }

    #[test]
    fn sun_touches_base_at_six_and_eighteen() {
        assert!((sun_position(VIEW, 6.0).y - 640.0).abs() < 1e-3);
        assert!((sun_position(VIEW, 18.0).y - 640.0).abs() < 1e-3);
    }

    #[test]
    fn sun_sinks_below_base_outside_daylight_hours() {
        assert!(sun_position(VIEW, 3.0).y > 640.0);
        assert!(sun_position(VIEW, 21.0).y > 640.0);
    }

    #[test]
    fn no_shadow_near_new_or_full_cycle_ends() {
        assert_eq!(moon_shadow_offset(0.0, 50.0), None);
        assert_eq!(moon_shadow_offset(0.25, 50.0), None);
        assert_eq!(moon_shadow_offset(0.75, 50.0), None);
        assert_eq!(moon_shadow_offset(0.9, 50.0), None);
    }

    #[test]
    fn shadow_side_and_size_follow_distance_from_half() {
        let right = moon_shadow_offset(0.3, 50.0).unwrap();
        let left = moon_shadow_offset(0.7, 50.0).unwrap();
        assert!((right - 40.0).abs() < 1e-3);
        assert!((left + 40.0).abs() < 1e-3);
        assert_eq!(moon_shadow_offset(0.5, 50.0), Some(0.0));
    }

    #[test]
    fn moon_always_has_glow_ring() {
        for phase in [0.1, 0.4, 0.6, 0.95] {
            let mut s = RecordingSurface::new(1000.0, 800.0);
            draw_moon(&mut s, moon_position(VIEW), phase);
            let rings = s
                .commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
                .count();
            assert_eq!(rings, 1, "phase {phase}");
        }
    }

    #[test]
    fn moon_draws_shadow_disc_only_mid_cycle() {
        let mut quiet = RecordingSurface::new(1000.0, 800.0);
        draw_moon(&mut quiet, moon_position(VIEW), 0.1);
        assert_eq!(quiet.filled_circles().count(), 1);

        let mut shaded = RecordingSurface::new(1000.0, 800.0);
        draw_moon(&mut shaded, moon_position(VIEW), 0.4);
        let discs: Vec<_> = shaded.filled_circles().collect();
        assert_eq!(discs.len(), 2);
        assert_eq!(*discs[1].1, MOON_SHADOW_COLOR);
    }
}
