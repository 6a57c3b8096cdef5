use std::fmt;
use std::num::NonZeroU32;

/// Value returned by the driver's error query when no error is pending.
pub const NO_ERROR: u32 = glow::NO_ERROR;

/// Shader pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    /// GL enum for this stage.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderKind::Vertex => glow::VERTEX_SHADER,
            ShaderKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Driver-side shader object name. Never the invalid name 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderHandle(NonZeroU32);

impl ShaderHandle {
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// A code taken from the driver's error queue.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DriverErrorCode(pub u32);

impl DriverErrorCode {
    /// Symbolic GL name, when the code is a core GL error.
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            glow::INVALID_ENUM => "GL_INVALID_ENUM",
            glow::INVALID_VALUE => "GL_INVALID_VALUE",
            glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
            glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
            glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
            glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for DriverErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({:#06x})", name, self.0),
            None => write!(f, "{:#06x}", self.0),
        }
    }
}

/// The slice of a GL-style driver that shader loading needs.
///
/// Calls must come from the thread that owns the current GPU context.
pub trait ShaderDriver {
    /// Creates an empty shader object. Fails when the driver hands back the
    /// invalid name.
    fn create_shader(&self, kind: ShaderKind) -> Result<ShaderHandle, String>;

    fn shader_source(&self, shader: ShaderHandle, source: &str);

    fn compile_shader(&self, shader: ShaderHandle);

    /// Whether the last compile of `shader` succeeded.
    fn compile_status(&self, shader: ShaderHandle) -> bool;

    /// Compiler diagnostics for the last compile of `shader`.
    fn info_log(&self, shader: ShaderHandle) -> String;

    fn delete_shader(&self, shader: ShaderHandle);

    /// Pops one pending error code, or `NO_ERROR` when the queue is empty.
    fn get_error(&self) -> u32;
}

#[cfg(not(target_arch = "wasm32"))]
mod gl {
    use glow::HasContext;

    use super::{ShaderDriver, ShaderHandle, ShaderKind};

    fn native(shader: ShaderHandle) -> glow::NativeShader {
        glow::NativeShader(shader.0)
    }

    // SAFETY (all methods): the caller owns the context on this thread, and
    // every handle passed in was produced by `create_shader` on it.
    impl ShaderDriver for glow::Context {
        fn create_shader(&self, kind: ShaderKind) -> Result<ShaderHandle, String> {
            let shader = unsafe { HasContext::create_shader(self, kind.gl_enum())? };
            Ok(ShaderHandle(shader.0))
        }

        fn shader_source(&self, shader: ShaderHandle, source: &str) {
            unsafe { HasContext::shader_source(self, native(shader), source) }
        }

        fn compile_shader(&self, shader: ShaderHandle) {
            unsafe { HasContext::compile_shader(self, native(shader)) }
        }

        fn compile_status(&self, shader: ShaderHandle) -> bool {
            unsafe { self.get_shader_compile_status(native(shader)) }
        }

        fn info_log(&self, shader: ShaderHandle) -> String {
            unsafe { self.get_shader_info_log(native(shader)) }
        }

        fn delete_shader(&self, shader: ShaderHandle) {
            unsafe { HasContext::delete_shader(self, native(shader)) }
        }

        fn get_error(&self) -> u32 {
            unsafe { HasContext::get_error(self) }
        }
    }
}
