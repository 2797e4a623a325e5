//! Drawing surface contract for the sky renderer.
//!
//! The engine never touches a real canvas. It issues a small set of 2D
//! primitives against this trait; the web bridge implements it over
//! `CanvasRenderingContext2d` and tests implement it with a recorder.

use glam::Vec2;

use crate::api::types::Viewport;

/// RGBA color: 8-bit channels plus a float alpha, like a CSS `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// CSS color string, e.g. `rgba(255, 200, 0, 0.9)`.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A circle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// A 2D raster surface sized to the viewport.
///
/// Coordinates are surface pixels with the origin at the top-left, y down.
pub trait Surface {
    /// Current surface size. Implementations must report the live size.
    fn size(&self) -> Viewport;

    /// Fill an axis-aligned rectangle with a flat color.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);

    /// Fill an axis-aligned rectangle with a top-to-bottom linear gradient.
    fn fill_vertical_gradient(&mut self, origin: Vec2, size: Vec2, top: Rgba, bottom: Rgba);

    /// Fill one disc.
    fn fill_circle(&mut self, circle: Circle, color: Rgba);

    /// Fill several discs as a single path, so overlaps are painted once.
    fn fill_circles(&mut self, circles: &[Circle], color: Rgba);

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, circle: Circle, width: f32, color: Rgba);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}
