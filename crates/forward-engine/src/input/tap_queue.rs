use std::sync::Arc;

use crossbeam::queue::ArrayQueue;

use super::gesture::{GestureConfig, GestureDetector, GestureListener, TapDetector};
use super::types::{TapEvent, TouchEvent};

/// Number of taps buffered between the input and render threads.
pub const TAP_QUEUE_CAPACITY: usize = 16;

/// Bounded, lock-free FIFO of recognized taps.
///
/// One producer (the input thread, through `submit`) and one consumer (the
/// render loop, through `poll`) may use it concurrently. Neither side blocks.
/// When the queue is full the newest tap is dropped; queued taps are never
/// evicted.
#[derive(Debug)]
pub struct TapQueue {
    taps: ArrayQueue<TapEvent>,
}

impl TapQueue {
    pub fn new() -> Self {
        Self::with_capacity(TAP_QUEUE_CAPACITY)
    }

    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            taps: ArrayQueue::new(capacity),
        }
    }

    /// Queues a tap if there is space. The tap is lost if the queue is full.
    ///
    /// Always reports success so the gesture layer is never made to fail.
    pub fn submit(&self, tap: TapEvent) -> bool {
        if let Err(dropped) = self.taps.push(tap) {
            log::trace!(
                "tap queue full ({}), dropping tap at ({}, {})",
                self.taps.capacity(),
                dropped.x,
                dropped.y
            );
        }
        true
    }

    /// Removes the oldest queued tap, if any.
    pub fn poll(&self) -> Option<TapEvent> {
        self.taps.pop()
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.taps.capacity()
    }
}

impl Default for TapQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener that turns single-tap-ups into queue entries and acknowledges
/// downs so the detector keeps receiving the stream.
struct QueueListener<'a> {
    queue: &'a TapQueue,
}

impl GestureListener for QueueListener<'_> {
    fn on_down(&mut self, _ev: &TouchEvent) -> bool {
        true
    }

    fn on_single_tap_up(&mut self, ev: &TouchEvent) -> bool {
        self.queue.submit(TapEvent::from(ev))
    }
}

/// Input-thread side of the tap hand-off.
///
/// Owns the gesture detector and feeds recognized taps into a shared
/// `TapQueue`. Hand `queue()` to the consumer thread.
pub struct TapRouter<D = TapDetector> {
    detector: D,
    queue: Arc<TapQueue>,
}

impl TapRouter<TapDetector> {
    pub fn new() -> Self {
        Self::with_detector(TapDetector::new(GestureConfig::default()))
    }
}

impl Default for TapRouter<TapDetector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: GestureDetector> TapRouter<D> {
    pub fn with_detector(detector: D) -> Self {
        Self::with_queue(detector, Arc::new(TapQueue::new()))
    }

    pub fn with_queue(detector: D, queue: Arc<TapQueue>) -> Self {
        Self { detector, queue }
    }

    /// Shared handle to the queue, for the consumer.
    pub fn queue(&self) -> Arc<TapQueue> {
        Arc::clone(&self.queue)
    }

    /// Routes one raw touch event through the gesture detector.
    ///
    /// Only single-tap-ups end up in the queue. Returns whether the detector
    /// consumed the event.
    pub fn route_touch_event(&mut self, ev: &TouchEvent) -> bool {
        let mut listener = QueueListener { queue: &self.queue };
        self.detector.on_touch_event(ev, &mut listener)
    }
}
