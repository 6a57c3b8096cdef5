//! Input subsystem.
//!
//! Public API is platform-agnostic. `platform` translates window-system events
//! into `TouchEvent`s; a `TapRouter` on the input thread classifies them and
//! hands recognized taps to the render thread through a `TapQueue`.

mod gesture;
mod tap_queue;
mod types;

pub mod platform;

pub use gesture::{
    GestureConfig,
    GestureDetector,
    GestureListener,
    TapDetector,
    DEFAULT_LONG_PRESS_TIMEOUT,
    DEFAULT_TOUCH_SLOP,
};
pub use tap_queue::{TapQueue, TapRouter, TAP_QUEUE_CAPACITY};
pub use types::{TapEvent, TouchEvent, TouchPhase};
