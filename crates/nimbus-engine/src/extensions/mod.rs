// extensions/mod.rs
//
// Value animation helpers, decoupled from the sky renderer.
// The dashboard opts in for its temperature readout.

pub mod counter;
pub mod easing;

pub use counter::CountUp;
pub use easing::{ease, Easing};
