use crate::error::DashboardError;

/// Host handle of one pending refresh callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Display-refresh callback source (`requestAnimationFrame` in the browser).
///
/// `request_frame` arranges for the host to call back into
/// [`AnimationDriver::on_refresh`] once, at the next refresh.
pub trait FrameScheduler {
    fn request_frame(&self) -> Result<FrameHandle, DashboardError>;
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Self-rescheduling frame loop with an explicit stop.
///
/// Each refresh runs one bounded frame and then requests the next one. There
/// is at most one pending request at any time.
pub struct AnimationDriver<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameHandle>,
    running: bool,
    frames: u64,
}

impl<S: FrameScheduler> AnimationDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            running: false,
            frames: 0,
        }
    }

    pub fn start(&mut self) -> Result<(), DashboardError> {
        if self.running {
            return Ok(());
        }
        self.running = true;
        self.schedule()
    }

    /// Run `frame` for this refresh and request the next one.
    ///
    /// Returns `false` without running anything if the driver was stopped
    /// after the callback was queued.
    pub fn on_refresh(&mut self, frame: impl FnOnce()) -> Result<bool, DashboardError> {
        self.pending = None;
        if !self.running {
            log::trace!("late refresh after stop ignored");
            return Ok(false);
        }
        frame();
        self.frames += 1;
        self.schedule()?;
        Ok(true)
    }

    pub fn stop(&mut self) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        log::info!("animation stopped after {} frames", self.frames);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames run since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn schedule(&mut self) -> Result<(), DashboardError> {
        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.running = false;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct ManualScheduler {
        next: Cell<i32>,
        requested: RefCell<Vec<FrameHandle>>,
        cancelled: RefCell<Vec<FrameHandle>>,
        broken: bool,
    }

    impl FrameScheduler for ManualScheduler {
        fn request_frame(&self) -> Result<FrameHandle, DashboardError> {
            if self.broken {
                return Err(DashboardError::Host("no requestAnimationFrame".into()));
            }
            self.next.set(self.next.get() + 1);
            let handle = FrameHandle(self.next.get());
            self.requested.borrow_mut().push(handle);
            Ok(handle)
        }

        fn cancel_frame(&self, handle: FrameHandle) {
            self.cancelled.borrow_mut().push(handle);
        }
    }

    #[test]
    fn each_refresh_runs_one_frame_and_reschedules() {
        let mut driver = AnimationDriver::new(ManualScheduler::default());
        driver.start().unwrap();
        let ran = Cell::new(0);
        for _ in 0..3 {
            assert!(driver.on_refresh(|| ran.set(ran.get() + 1)).unwrap());
        }
        assert_eq!(ran.get(), 3);
        assert_eq!(driver.frames(), 3);
        assert_eq!(driver.scheduler.requested.borrow().len(), 4);
    }

    #[test]
    fn start_is_idempotent() {
        let mut driver = AnimationDriver::new(ManualScheduler::default());
        driver.start().unwrap();
        driver.start().unwrap();
        assert_eq!(driver.scheduler.requested.borrow().len(), 1);
    }

    #[test]
    fn stop_cancels_pending_and_ignores_late_callback() {
        let mut driver = AnimationDriver::new(ManualScheduler::default());
        driver.start().unwrap();
        driver.stop();
        assert_eq!(*driver.scheduler.cancelled.borrow(), vec![FrameHandle(1)]);

        let ran = Cell::new(false);
        assert!(!driver.on_refresh(|| ran.set(true)).unwrap());
        assert!(!ran.get());
        assert_eq!(driver.scheduler.requested.borrow().len(), 1);
    }

    #[test]
    fn can_restart_after_stop() {
        let mut driver = AnimationDriver::new(ManualScheduler::default());
        driver.start().unwrap();
        driver.stop();
        driver.start().unwrap();
        assert!(driver.is_running());
        assert!(driver.on_refresh(|| {}).unwrap());
    }

    #[test]
    fn scheduler_failure_stops_the_loop() {
        let mut driver = AnimationDriver::new(ManualScheduler {
            broken: true,
            ..ManualScheduler::default()
        });
        assert!(matches!(driver.start(), Err(DashboardError::Host(_))));
        assert!(!driver.is_running());
    }
}
