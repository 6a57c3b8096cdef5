use std::time::Duration;

use super::types::{TouchEvent, TouchPhase};

/// Movement in logical pixels after which a press becomes a scroll.
///
/// Matches the common platform touch slop (~8dp).
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Hold duration after which a press becomes a long-press.
pub const DEFAULT_LONG_PRESS_TIMEOUT: Duration = Duration::from_millis(500);

/// Maximum gap between a tap's up and the next down for a double-tap.
pub const DEFAULT_DOUBLE_TAP_TIMEOUT: Duration = Duration::from_millis(300);

/// Maximum distance in logical pixels between the two downs of a double-tap.
pub const DEFAULT_DOUBLE_TAP_SLOP: f32 = 100.0;

/// Downs closer than this to the previous up are treated as a bounce, not a
/// second tap.
const DOUBLE_TAP_MIN_TIME: Duration = Duration::from_millis(40);

/// Gesture classification thresholds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GestureConfig {
    pub touch_slop: f32,
    pub long_press_timeout: Duration,
    pub double_tap_timeout: Duration,
    pub double_tap_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            long_press_timeout: DEFAULT_LONG_PRESS_TIMEOUT,
            double_tap_timeout: DEFAULT_DOUBLE_TAP_TIMEOUT,
            double_tap_slop: DEFAULT_DOUBLE_TAP_SLOP,
        }
    }
}

/// Callbacks invoked by a `GestureDetector` for each classified gesture.
///
/// Every method has a default that ignores the gesture, so listeners only
/// override the categories they care about.
pub trait GestureListener {
    /// A pointer went down. Returning `true` acknowledges the touch stream.
    fn on_down(&mut self, _ev: &TouchEvent) -> bool {
        false
    }

    /// A pointer went up without moving past the slop or being held too long.
    /// Not called for the second tap of a double-tap.
    fn on_single_tap_up(&mut self, _ev: &TouchEvent) -> bool {
        false
    }

    /// A second down followed a tap closely enough in time and space.
    /// `first_down` is the down of the first tap.
    fn on_double_tap(&mut self, _first_down: &TouchEvent) -> bool {
        false
    }

    /// The pointer moved past the slop. `dx`/`dy` are the distance scrolled
    /// since the previous move, positive when moving towards the origin.
    fn on_scroll(&mut self, _down: &TouchEvent, _current: &TouchEvent, _dx: f32, _dy: f32) -> bool {
        false
    }

    /// The pointer was held in place past the long-press timeout.
    fn on_long_press(&mut self, _down: &TouchEvent) {}
}

/// Classifies raw touch events into gestures.
///
/// Implementations are driven from the input thread only.
pub trait GestureDetector {
    /// Feeds one raw event. Returns whether the event was consumed.
    fn on_touch_event(&mut self, ev: &TouchEvent, listener: &mut dyn GestureListener) -> bool;
}

#[derive(Debug, Copy, Clone)]
struct Press {
    down: TouchEvent,
    last: TouchEvent,
    /// Still eligible to become a single tap.
    armed: bool,
    double_tap: bool,
    scrolling: bool,
    long_pressed: bool,
}

/// A completed single tap, kept to recognize a following double-tap.
#[derive(Debug, Copy, Clone)]
struct LastTap {
    down: TouchEvent,
    up: TouchEvent,
}

/// Default single-pointer detector for taps, double-taps, scrolls and
/// long-presses.
///
/// There is no timer: a long-press is noticed on the first move or up event
/// that arrives after the timeout.
#[derive(Debug, Clone, Default)]
pub struct TapDetector {
    config: GestureConfig,
    press: Option<Press>,
    last_tap: Option<LastTap>,
}

impl TapDetector {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
            last_tap: None,
        }
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Forgets any in-flight press and the last tap.
    pub fn reset(&mut self) {
        self.press = None;
        self.last_tap = None;
    }

    fn held_too_long(&self, press: &Press, ev: &TouchEvent) -> bool {
        ev.time.saturating_duration_since(press.down.time) >= self.config.long_press_timeout
    }

    fn beyond_slop(&self, press: &Press, ev: &TouchEvent) -> bool {
        let slop = self.config.touch_slop;
        press.down.distance_sq(ev) > slop * slop
    }

    fn continues_tap(&self, last: &LastTap, down: &TouchEvent) -> bool {
        let gap = down.time.saturating_duration_since(last.up.time);
        let slop = self.config.double_tap_slop;
        (DOUBLE_TAP_MIN_TIME..=self.config.double_tap_timeout).contains(&gap)
            && last.down.distance_sq(down) <= slop * slop
    }

    fn handle_down(&mut self, ev: &TouchEvent, listener: &mut dyn GestureListener) -> bool {
        if let Some(press) = self.press.as_mut() {
            if press.down.pointer_id != ev.pointer_id {
                // Second finger: whatever this is, it is not a single tap.
                press.armed = false;
                self.last_tap = None;
                return false;
            }
        }

        let double_tap = self
            .last_tap
            .take()
            .filter(|last| self.continues_tap(last, ev));

        self.press = Some(Press {
            down: *ev,
            last: *ev,
            armed: double_tap.is_none(),
            double_tap: double_tap.is_some(),
            scrolling: false,
            long_pressed: false,
        });

        let mut handled = false;
        if let Some(last) = double_tap {
            handled |= listener.on_double_tap(&last.down);
        }
        handled |= listener.on_down(ev);
        handled
    }

    fn handle_move(&mut self, ev: &TouchEvent, listener: &mut dyn GestureListener) -> bool {
        let Some(mut press) = self.press else {
            return false;
        };
        if press.down.pointer_id != ev.pointer_id {
            return false;
        }

        let mut handled = false;

        if !press.scrolling && !press.long_pressed && !press.double_tap {
            if self.beyond_slop(&press, ev) {
                press.scrolling = true;
                press.armed = false;
            } else if press.armed && self.held_too_long(&press, ev) {
                press.long_pressed = true;
                press.armed = false;
                listener.on_long_press(&press.down);
                handled = true;
            }
        }

        if press.scrolling {
            let dx = press.last.x - ev.x;
            let dy = press.last.y - ev.y;
            handled = listener.on_scroll(&press.down, ev, dx, dy);
        }

        press.last = *ev;
        self.press = Some(press);
        handled
    }

    fn handle_up(&mut self, ev: &TouchEvent, listener: &mut dyn GestureListener) -> bool {
        let Some(press) = self.press else {
            return false;
        };
        if press.down.pointer_id != ev.pointer_id {
            return false;
        }
        self.press = None;

        // Double-tap second ups, scrolls and long-presses never become taps.
        if !press.armed || self.beyond_slop(&press, ev) {
            return false;
        }

        if self.held_too_long(&press, ev) {
            listener.on_long_press(&press.down);
            return false;
        }

        self.last_tap = Some(LastTap {
            down: press.down,
            up: *ev,
        });
        listener.on_single_tap_up(ev)
    }
}

impl GestureDetector for TapDetector {
    fn on_touch_event(&mut self, ev: &TouchEvent, listener: &mut dyn GestureListener) -> bool {
        match ev.phase {
            TouchPhase::Down => self.handle_down(ev, listener),
            TouchPhase::Move => self.handle_move(ev, listener),
            TouchPhase::Up => self.handle_up(ev, listener),
            TouchPhase::Cancel => {
                self.reset();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[derive(Default)]
    struct Recorder {
        downs: usize,
        taps: Vec<(f32, f32)>,
        double_taps: usize,
        scrolls: usize,
        long_presses: usize,
    }

    impl GestureListener for Recorder {
        fn on_down(&mut self, _ev: &TouchEvent) -> bool {
            self.downs += 1;
            true
        }

        fn on_single_tap_up(&mut self, ev: &TouchEvent) -> bool {
            self.taps.push((ev.x, ev.y));
            true
        }

        fn on_double_tap(&mut self, _first_down: &TouchEvent) -> bool {
            self.double_taps += 1;
            true
        }

        fn on_scroll(&mut self, _down: &TouchEvent, _current: &TouchEvent, _dx: f32, _dy: f32) -> bool {
            self.scrolls += 1;
            true
        }

        fn on_long_press(&mut self, _down: &TouchEvent) {
            self.long_presses += 1;
        }
    }

    struct Script {
        base: Instant,
        detector: TapDetector,
        rec: Recorder,
    }

    impl Script {
        fn new() -> Self {
            Self {
                base: Instant::now(),
                detector: TapDetector::default(),
                rec: Recorder::default(),
            }
        }

        fn feed(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32, ms: u64) -> bool {
            let ev = TouchEvent::new(id, phase, x, y, self.base + Duration::from_millis(ms));
            self.detector.on_touch_event(&ev, &mut self.rec)
        }

        fn tap(&mut self, x: f32, y: f32, down_ms: u64, up_ms: u64) {
            self.feed(0, TouchPhase::Down, x, y, down_ms);
            self.feed(0, TouchPhase::Up, x, y, up_ms);
        }
    }

    #[test]
    fn default_config_matches_constants() {
        let config = TapDetector::default().config();
        assert_eq!(config.touch_slop, DEFAULT_TOUCH_SLOP);
        assert_eq!(config.long_press_timeout, DEFAULT_LONG_PRESS_TIMEOUT);
        assert_eq!(config.double_tap_timeout, DEFAULT_DOUBLE_TAP_TIMEOUT);
        assert_eq!(config.double_tap_slop, DEFAULT_DOUBLE_TAP_SLOP);
    }

    // ── taps ──────────────────────────────────────────────────────────────

    #[test]
    fn down_up_in_place_is_a_tap() {
        let mut s = Script::new();
        assert!(s.feed(0, TouchPhase::Down, 10.0, 10.0, 0));
        assert!(s.feed(0, TouchPhase::Up, 10.0, 10.0, 80));
        assert_eq!(s.rec.downs, 1);
        assert_eq!(s.rec.taps, vec![(10.0, 10.0)]);
    }

    #[test]
    fn jitter_within_slop_is_still_a_tap() {
        let mut s = Script::new();
        s.feed(0, TouchPhase::Down, 10.0, 10.0, 0);
        s.feed(0, TouchPhase::Move, 13.0, 14.0, 30);
        s.feed(0, TouchPhase::Up, 12.0, 12.0, 60);
        assert_eq!(s.rec.taps.len(), 1);
        assert_eq!(s.rec.scrolls, 0);
    }

    #[test]
    fn up_without_down_is_ignored() {
        let mut s = Script::new();
        assert!(!s.feed(0, TouchPhase::Up, 1.0, 1.0, 0));
        assert!(s.rec.taps.is_empty());
    }

    #[test]
    fn slow_second_tap_is_a_new_single_tap() {
        let mut s = Script::new();
        s.tap(5.0, 5.0, 0, 40);
        s.tap(5.0, 5.0, 400, 440);
        assert_eq!(s.rec.taps.len(), 2);
        assert_eq!(s.rec.double_taps, 0);
    }

    #[test]
    fn distant_second_tap_is_a_new_single_tap() {
        let mut s = Script::new();
        s.tap(5.0, 5.0, 0, 40);
        s.tap(300.0, 5.0, 120, 160);
        assert_eq!(s.rec.taps.len(), 2);
        assert_eq!(s.rec.double_taps, 0);
    }

    // ── double-taps ───────────────────────────────────────────────────────

    #[test]
    fn quick_second_tap_is_a_double_tap() {
        let mut s = Script::new();
        s.tap(5.0, 5.0, 0, 40);
        assert!(s.feed(0, TouchPhase::Down, 6.0, 6.0, 120));
        assert!(!s.feed(0, TouchPhase::Up, 6.0, 6.0, 160));

        assert_eq!(s.rec.taps, vec![(5.0, 5.0)]);
        assert_eq!(s.rec.double_taps, 1);
        assert_eq!(s.rec.downs, 2);
    }

    #[test]
    fn third_quick_tap_starts_over() {
        let mut s = Script::new();
        s.tap(5.0, 5.0, 0, 40);
        s.tap(5.0, 5.0, 120, 160);
        s.tap(5.0, 5.0, 240, 280);
        assert_eq!(s.rec.taps.len(), 2);
        assert_eq!(s.rec.double_taps, 1);
    }

    #[test]
    fn bounce_shorter_than_min_gap_is_not_a_double_tap() {
        let mut s = Script::new();
        s.tap(5.0, 5.0, 0, 40);
        s.tap(5.0, 5.0, 50, 90);
        assert_eq!(s.rec.taps.len(), 2);
        assert_eq!(s.rec.double_taps, 0);
    }

    #[test]
    fn reset_forgets_last_tap() {
        let mut s = Script::new();
        s.tap(5.0, 5.0, 0, 40);
        s.detector.reset();
        s.tap(5.0, 5.0, 120, 160);
        assert_eq!(s.rec.taps.len(), 2);
        assert_eq!(s.rec.double_taps, 0);
    }

    // ── non-taps ──────────────────────────────────────────────────────────

    #[test]
    fn drag_is_a_scroll_not_a_tap() {
        let mut s = Script::new();
        s.feed(0, TouchPhase::Down, 0.0, 0.0, 0);
        assert!(s.feed(0, TouchPhase::Move, 20.0, 0.0, 20));
        s.feed(0, TouchPhase::Move, 40.0, 0.0, 40);
        assert!(!s.feed(0, TouchPhase::Up, 40.0, 0.0, 60));
        assert_eq!(s.rec.scrolls, 2);
        assert!(s.rec.taps.is_empty());
    }

    #[test]
    fn jump_between_last_move_and_up_is_not_a_tap() {
        let mut s = Script::new();
        s.feed(0, TouchPhase::Down, 0.0, 0.0, 0);
        s.feed(0, TouchPhase::Up, 50.0, 50.0, 30);
        assert!(s.rec.taps.is_empty());
    }

    #[test]
    fn hold_past_timeout_is_a_long_press() {
        let mut s = Script::new();
        s.feed(0, TouchPhase::Down, 5.0, 5.0, 0);
        assert!(s.feed(0, TouchPhase::Move, 5.0, 6.0, 600));
        assert!(!s.feed(0, TouchPhase::Up, 5.0, 6.0, 700));
        assert_eq!(s.rec.long_presses, 1);
        assert!(s.rec.taps.is_empty());
    }

    #[test]
    fn hold_without_moves_is_noticed_on_up() {
        let mut s = Script::new();
        s.feed(0, TouchPhase::Down, 5.0, 5.0, 0);
        assert!(!s.feed(0, TouchPhase::Up, 5.0, 5.0, 900));
        assert_eq!(s.rec.long_presses, 1);
        assert!(s.rec.taps.is_empty());
    }

    #[test]
    fn second_pointer_disarms_tap() {
        let mut s = Script::new();
        s.feed(0, TouchPhase::Down, 5.0, 5.0, 0);
        s.feed(1, TouchPhase::Down, 50.0, 50.0, 10);
        s.feed(1, TouchPhase::Up, 50.0, 50.0, 40);
        s.feed(0, TouchPhase::Up, 5.0, 5.0, 50);
        assert!(s.rec.taps.is_empty());
        assert_eq!(s.rec.downs, 1);
    }

    #[test]
    fn cancel_drops_pending_press() {
        let mut s = Script::new();
        s.feed(0, TouchPhase::Down, 5.0, 5.0, 0);
        assert!(!s.feed(0, TouchPhase::Cancel, 5.0, 5.0, 10));
        assert!(!s.feed(0, TouchPhase::Up, 5.0, 5.0, 20));
        assert!(s.rec.taps.is_empty());
    }

    #[test]
    fn default_listener_consumes_nothing() {
        struct Silent;
        impl GestureListener for Silent {}

        let base = Instant::now();
        let mut d = TapDetector::default();
        let down = TouchEvent::new(0, TouchPhase::Down, 0.0, 0.0, base);
        let up = TouchEvent::new(0, TouchPhase::Up, 0.0, 0.0, base + Duration::from_millis(10));
        assert!(!d.on_touch_event(&down, &mut Silent));
        assert!(!d.on_touch_event(&up, &mut Silent));
    }
}
