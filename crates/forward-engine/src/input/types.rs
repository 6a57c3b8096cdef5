use std::fmt;
use std::time::Instant;

/// Touch phase discriminator.
///
/// Mirrors the platform's down/move/up/cancel action classes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Raw touch event in logical pixels.
///
/// Events for all pointers arrive in temporal order on the input thread.
/// `time` is the platform event time, not the time the event was routed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchEvent {
    /// Stable id of the pointer (finger) for the duration of its contact.
    pub pointer_id: u64,
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
    pub time: Instant,
}

impl TouchEvent {
    pub fn new(pointer_id: u64, phase: TouchPhase, x: f32, y: f32, time: Instant) -> Self {
        Self {
            pointer_id,
            phase,
            x,
            y,
            time,
        }
    }

    /// Squared distance to `other`, in logical pixels.
    pub fn distance_sq(&self, other: &TouchEvent) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A recognized single tap, handed from the input thread to the consumer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TapEvent {
    pub pointer_id: u64,
    pub x: f32,
    pub y: f32,
    /// Time of the finger-up that completed the tap.
    pub time: Instant,
}

impl From<&TouchEvent> for TapEvent {
    fn from(ev: &TouchEvent) -> Self {
        Self {
            pointer_id: ev.pointer_id,
            x: ev.x,
            y: ev.y,
            time: ev.time,
        }
    }
}

impl fmt::Display for TouchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
