use std::io;

use thiserror::Error;

use super::driver::{DriverErrorCode, ShaderKind};

/// Errors raised while loading shaders or checking the driver.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// The source asset could not be opened or read. The driver was not touched.
    #[error("failed to read shader asset `{name}`")]
    AssetRead {
        name: String,
        #[source]
        source: io::Error,
    },

    /// The driver refused to create a shader object.
    #[error("error creating {kind} shader object: {reason}")]
    Create { kind: ShaderKind, reason: String },

    /// The source failed to compile. The shader object has been deleted.
    #[error("error compiling {kind} shader `{name}`: {log}")]
    Compile {
        kind: ShaderKind,
        name: String,
        log: String,
    },

    /// Errors were pending in the driver queue; `code` is the last one drained.
    #[error("{label}: glError {code}")]
    Driver { label: String, code: DriverErrorCode },
}
