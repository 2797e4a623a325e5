// extensions/counter.rs
//
// Count-up animation for displayed numbers (the temperature readout).
// Driven by wall-clock milliseconds, advanced once per animation frame.
//
// Usage:
//   let counter = CountUp::new(12.0, 21.0, now_ms, 500.0, Easing::Linear);
//   let (shown, done) = counter.sample(now_ms);

use super::easing::{ease, Easing};

/// One running count-up from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    from: f32,
    to: f32,
    started_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl CountUp {
    pub fn new(from: f32, to: f32, started_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            started_ms,
            duration_ms,
            easing,
        }
    }

    /// Normalized progress [0, 1] at `now_ms`.
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// The rounded value to display at `now_ms`, and whether the count has finished.
    pub fn sample(&self, now_ms: f64) -> (i32, bool) {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return (self.to.round() as i32, true);
        }
        (ease(self.from, self.to, t, self.easing).round() as i32, false)
    }
}
