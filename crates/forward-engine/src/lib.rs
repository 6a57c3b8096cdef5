//! Forward engine crate.
//!
//! Small runtime helpers shared by the AR renderer:
//! - `input`: gesture recognition and the tap hand-off between input and render threads
//! - `assets`: read-only named text resources
//! - `shader`: shader compilation from assets and driver error checks

pub mod assets;
pub mod input;
pub mod shader;

pub mod logging;
