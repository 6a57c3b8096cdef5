//! Shader loading.
//!
//! Turns named source assets into compiled shader objects and provides a
//! call-site check for the driver's error queue. All calls belong on the
//! thread that owns the GPU context.

mod driver;
mod error;
mod loader;

pub use driver::{DriverErrorCode, ShaderDriver, ShaderHandle, ShaderKind, NO_ERROR};
pub use error::ShaderError;
pub use loader::{check_driver_errors, ShaderLoader};
