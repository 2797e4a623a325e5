pub mod app;
pub mod driver;

pub use app::{FrameReport, SkyApp};
pub use driver::{AnimationDriver, FrameHandle, FrameScheduler};
