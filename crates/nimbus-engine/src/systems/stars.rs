//! Night-sky star field.
//!
//! Star placement is a pure hash of the star's index, never of time or of a
//! mutable generator, so a star lands on the same viewport-relative spot in
//! every frame and after every resize. Only the twinkle alpha moves.

use glam::Vec2;

use crate::api::types::Viewport;
use crate::renderer::traits::{Circle, Rgba, Surface};

/// Dense population with fixed opacity.
pub const STATIC_STARS: u32 = 200;
/// Sparse population whose opacity oscillates.
pub const TWINKLING_STARS: u32 = 50;
/// Stars only occupy the upper part of the sky.
pub const SKY_FRACTION: f32 = 0.7;

const STATIC_SALT: u64 = 0x5EED_0000_3039;
const TWINKLE_SALT: u64 = 0x5EED_0001_81CD;
const STATIC_COLOR: Rgba = Rgba::new(255, 255, 255, 0.9);
const TWINKLE_RADIUS: f32 = 1.5;
/// Twinkle angular speed in radians per millisecond.
const TWINKLE_RATE: f64 = 0.003;

/// One xorshift64* round: the xorshift64 step of a seeded generator followed
/// by a multiply, applied statelessly.
#[inline]
fn mix(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

/// Pure 64-bit hash of a star index.
pub fn star_hash(index: u32, salt: u64) -> u64 {
    let seed = (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ salt;
    mix(mix(if seed == 0 { 1 } else { seed }))
}

/// Top 24 bits of `h` as a float in [0, 1).
#[inline]
fn unit(h: u64) -> f32 {
    (h >> 40) as f32 / (1u64 << 24) as f32
}

/// Viewport-relative position of a star in [0, 1) x [0, SKY_FRACTION).
fn relative_position(hash: u64) -> Vec2 {
    let x = unit(hash);
    let y = unit(mix(hash)) * SKY_FRACTION;
    Vec2::new(x, y)
}

/// Relative position and radius of static star `index`.
pub fn static_star(index: u32) -> (Vec2, f32) {
    let h = star_hash(index, STATIC_SALT);
    let radius = (mix(mix(h)) % 3) as f32 * 0.5 + 0.5;
    (relative_position(h), radius)
}

/// Relative position of twinkling star `index`.
pub fn twinkling_star(index: u32) -> Vec2 {
    relative_position(star_hash(index, TWINKLE_SALT))
}

/// Opacity of twinkling star `index` at `time_ms`, in [0, 0.5].
pub fn twinkle_alpha(index: u32, time_ms: f64) -> f32 {
    (((time_ms * TWINKLE_RATE + index as f64).sin() + 1.0) / 2.0 * 0.5) as f32
}

fn to_surface(relative: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(relative.x * viewport.width, relative.y * viewport.height)
}

/// Paint both star populations.
pub fn draw_stars(surface: &mut dyn Surface, viewport: Viewport, time_ms: f64) {
    for i in 0..STATIC_STARS {
        let (pos, radius) = static_star(i);
        surface.fill_circle(Circle::new(to_surface(pos, viewport), radius), STATIC_COLOR);
    }

    for i in 0..TWINKLING_STARS {
        let pos = to_surface(twinkling_star(i), viewport);
        let color = Rgba::new(255, 255, 255, twinkle_alpha(i, time_ms));
        surface.fill_circle(Circle::new(pos, TWINKLE_RADIUS), color);
    }
}
