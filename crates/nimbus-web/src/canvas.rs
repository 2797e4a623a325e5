use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use nimbus_engine::{Circle, DashboardError, Rgba, Surface, Viewport};

use crate::host_err;

/// `Surface` over a 2D canvas context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up the canvas by element id and grab its 2D context.
    pub fn find(document: &Document, id: &str) -> Result<Self, DashboardError> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| host_err(format!("missing #{id} element")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| host_err(format!("#{id} is not a canvas")))?;

        let ctx = canvas
            .get_context("2d")
            .map_err(|_| host_err("getContext(\"2d\") threw"))?
            .ok_or_else(|| host_err("2D canvas not supported"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| host_err("unexpected 2D context type"))?;

        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the window's inner size.
    pub fn resize_to_window(&self, window: &Window) {
        let width = window.inner_width().ok().and_then(|v| v.as_f64());
        let height = window.inner_height().ok().and_then(|v| v.as_f64());
        if let (Some(width), Some(height)) = (width, height) {
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            log::debug!("canvas resized to {width}x{height}");
        }
    }

    fn trace_circle(&self, circle: Circle) {
        let (x, y) = (circle.center.x as f64, circle.center.y as f64);
        let r = circle.radius as f64;
        self.ctx.move_to(x + r, y);
        if self.ctx.arc(x, y, r, 0.0, TAU).is_err() {
            log::trace!("arc rejected (radius {r})");
        }
    }

    fn stroke(&self, width: f32, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Viewport {
        Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_vertical_gradient(&mut self, origin: Vec2, size: Vec2, top: Rgba, bottom: Rgba) {
        let (x, y) = (origin.x as f64, origin.y as f64);
        let gradient = self.ctx.create_linear_gradient(x, y, x, y + size.y as f64);
        let stops = gradient
            .add_color_stop(0.0, &top.to_css())
            .and_then(|()| gradient.add_color_stop(1.0, &bottom.to_css()));
        if stops.is_err() {
            log::warn!("invalid gradient stop color");
            return;
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(x, y, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, circle: Circle, color: Rgba) {
        self.fill_circles(&[circle], color);
    }

    fn fill_circles(&mut self, circles: &[Circle], color: Rgba) {
        self.ctx.begin_path();
        for &circle in circles {
            self.trace_circle(circle);
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, circle: Circle, width: f32, color: Rgba) {
        self.ctx.begin_path();
        self.trace_circle(circle);
        self.stroke(width, color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.stroke(width, color);
    }
}
