use std::time::Instant;

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, TouchPhase as WinitTouchPhase, WindowEvent};
use winit::window::Window;

use crate::input::{TouchEvent, TouchPhase};

/// Pointer id used for touches emulated from the left mouse button.
pub const MOUSE_POINTER_ID: u64 = u64::MAX;

/// Translates winit window events into engine `TouchEvent`s.
///
/// Real touch events are mapped directly. On desktop the left mouse button is
/// emulated as a single finger so taps can be produced without a touch screen.
/// winit does not carry event timestamps, so events are stamped on arrival.
#[derive(Debug, Default)]
pub struct TouchTranslator {
    /// Last cursor position in logical pixels.
    cursor: Option<(f32, f32)>,
    mouse_down: bool,
}

impl TouchTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` for events that are not touch or emulated touch input.
    pub fn translate(&mut self, window: &Window, event: &WindowEvent) -> Option<TouchEvent> {
        self.translate_scaled(window.scale_factor(), event, Instant::now())
    }

    /// Same as `translate` with an explicit scale factor and timestamp.
    pub fn translate_scaled(
        &mut self,
        scale_factor: f64,
        event: &WindowEvent,
        now: Instant,
    ) -> Option<TouchEvent> {
        match event {
            WindowEvent::Touch(touch) => {
                let (x, y) = to_logical_f32(scale_factor, touch.location);
                Some(TouchEvent::new(touch.id, map_phase(touch.phase), x, y, now))
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = to_logical_f32(scale_factor, *position);
                self.cursor = Some((x, y));
                self.mouse_down
                    .then(|| TouchEvent::new(MOUSE_POINTER_ID, TouchPhase::Move, x, y, now))
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                if !self.mouse_down {
                    return None;
                }
                self.mouse_down = false;
                Some(TouchEvent::new(MOUSE_POINTER_ID, TouchPhase::Cancel, 0.0, 0.0, now))
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                // No cursor position yet means the press did not start inside the surface.
                let (x, y) = self.cursor?;
                let phase = match state {
                    ElementState::Pressed => {
                        self.mouse_down = true;
                        TouchPhase::Down
                    }
                    ElementState::Released => {
                        if !self.mouse_down {
                            return None;
                        }
                        self.mouse_down = false;
                        TouchPhase::Up
                    }
                };
                Some(TouchEvent::new(MOUSE_POINTER_ID, phase, x, y, now))
            }

            WindowEvent::Focused(false) if self.mouse_down => {
                self.mouse_down = false;
                let (x, y) = self.cursor.unwrap_or((0.0, 0.0));
                Some(TouchEvent::new(MOUSE_POINTER_ID, TouchPhase::Cancel, x, y, now))
            }

            _ => None,
        }
    }
}

pub fn map_phase(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Down,
        WinitTouchPhase::Moved => TouchPhase::Move,
        WinitTouchPhase::Ended => TouchPhase::Up,
        WinitTouchPhase::Cancelled => TouchPhase::Cancel,
    }
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}
