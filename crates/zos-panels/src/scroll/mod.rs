//! Cooperative scroll animation over a frame scheduler

mod controller;
mod easing;
mod frames;

pub use controller::{ScrollController, ScrollOptions, DEFAULT_SCROLL_DURATION_MS};
pub use easing::{ease_in_cubic, ease_in_out, ease_out_cubic, linear, Easing};
pub use frames::{FrameScheduler, FrameToken, ManualFrames};
