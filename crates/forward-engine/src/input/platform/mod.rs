//! Platform event translation.

mod winit;

pub use self::winit::{map_phase, TouchTranslator, MOUSE_POINTER_ID};
