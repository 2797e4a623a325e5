use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// How a current-conditions lookup identifies its location.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Position(Coordinates),
}

/// Size of the drawing surface in CSS pixels.
/// Re-read from the host every frame; never cached across a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero-area surface has nothing to draw onto.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_viewport() {
        assert!(Viewport::new(0.0, 600.0).is_empty());
        assert!(!Viewport::new(800.0, 600.0).is_empty());
    }
}
