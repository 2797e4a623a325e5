use glam::Vec2;

use super::traits::{Circle, Rgba, Surface};
use crate::api::types::Viewport;

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { origin: Vec2, size: Vec2, color: Rgba },
    Gradient { origin: Vec2, size: Vec2, top: Rgba, bottom: Rgba },
    FillCircle { circle: Circle, color: Rgba },
    FillCircles { circles: Vec<Circle>, color: Rgba },
    StrokeCircle { circle: Circle, width: f32, color: Rgba },
    Line { from: Vec2, to: Vec2, width: f32, color: Rgba },
}

/// In-memory surface that records every primitive instead of rasterizing.
/// Used for headless frames and for asserting what a frame contains.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Viewport::new(width, height),
            commands: Vec::with_capacity(512),
        }
    }

    /// Simulate a host resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Viewport::new(width, height);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// All filled single discs, in draw order.
    pub fn filled_circles(&self) -> impl Iterator<Item = (&Circle, &Rgba)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircle { circle, color } => Some((circle, color)),
            _ => None,
        })
    }

    /// All stroked segments, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = (&Vec2, &Vec2)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((from, to)),
            _ => None,
        })
    }

    /// All compound circle fills (cloud puffs), in draw order.
    pub fn circle_groups(&self) -> impl Iterator<Item = &[Circle]> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircles { circles, .. } => Some(circles.as_slice()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn fill_vertical_gradient(&mut self, origin: Vec2, size: Vec2, top: Rgba, bottom: Rgba) {
        self.commands.push(DrawCommand::Gradient {
            origin,
            size,
            top,
            bottom,
        });
    }

    fn fill_circle(&mut self, circle: Circle, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle { circle, color });
    }

    fn fill_circles(&mut self, circles: &[Circle], color: Rgba) {
        self.commands.push(DrawCommand::FillCircles {
            circles: circles.to_vec(),
            color,
        });
    }

    fn stroke_circle(&mut self, circle: Circle, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeCircle {
            circle,
            width,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut s = RecordingSurface::new(100.0, 50.0);
        s.fill_rect(Vec2::ZERO, Vec2::new(100.0, 50.0), Rgba::rgb(0, 0, 0));
        s.fill_circle(Circle::new(Vec2::new(5.0, 5.0), 2.0), Rgba::rgb(255, 255, 255));
        assert_eq!(s.command_count(), 2);
        assert!(matches!(s.commands[0], DrawCommand::FillRect { .. }));
        assert_eq!(s.filled_circles().count(), 1);
    }

    #[test]
    fn resize_is_visible_immediately() {
        let mut s = RecordingSurface::new(100.0, 50.0);
        s.resize(640.0, 480.0);
        assert_eq!(s.size(), Viewport::new(640.0, 480.0));
    }
}
