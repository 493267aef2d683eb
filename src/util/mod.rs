//! Shared utilities: frame timing and easing curves.

pub mod easing;
pub mod frame_timing;
