use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use nimbus_engine::{DashboardError, FrameHandle, FrameScheduler};

use crate::host_err;

/// `requestAnimationFrame` scheduler. The same callback is reused for every
/// request, so it is created once and kept alive here.
pub struct RafScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl RafScheduler {
    pub fn new(window: Window, on_frame: impl FnMut(f64) + 'static) -> Self {
        Self {
            window,
            callback: Closure::new(on_frame),
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self) -> Result<FrameHandle, DashboardError> {
        self.window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|_| host_err("requestAnimationFrame failed"))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if self.window.cancel_animation_frame(handle.0).is_err() {
            log::warn!("cancelAnimationFrame({}) failed", handle.0);
        }
    }
}
