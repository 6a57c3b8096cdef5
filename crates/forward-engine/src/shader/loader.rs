use crate::assets::{read_text, AssetSource};

use super::driver::{DriverErrorCode, ShaderDriver, ShaderHandle, ShaderKind, NO_ERROR};
use super::error::ShaderError;

/// Compiles shaders from assets against one driver context.
///
/// `tag` arguments become the `log` target of any diagnostics, so callers can
/// filter per subsystem (e.g. `RUST_LOG=plane_renderer=debug`).
pub struct ShaderLoader<'a, D: ShaderDriver + ?Sized> {
    driver: &'a D,
    assets: &'a dyn AssetSource,
}

impl<'a, D: ShaderDriver + ?Sized> ShaderLoader<'a, D> {
    pub fn new(driver: &'a D, assets: &'a dyn AssetSource) -> Self {
        Self { driver, assets }
    }

    /// Reads `asset` and compiles it as a `kind` shader.
    ///
    /// The asset is read before any driver call. On a failed compile the
    /// compiler log is reported under `tag` and the shader object is deleted.
    pub fn compile_shader_from_asset(
        &self,
        tag: &str,
        kind: ShaderKind,
        asset: &str,
    ) -> Result<ShaderHandle, ShaderError> {
        let source = read_text(self.assets, asset).map_err(|source| ShaderError::AssetRead {
            name: asset.to_owned(),
            source,
        })?;

        let shader = self
            .driver
            .create_shader(kind)
            .map_err(|reason| ShaderError::Create { kind, reason })?;
        let guard = ShaderGuard::new(self.driver, shader);

        self.driver.shader_source(shader, &source);
        self.driver.compile_shader(shader);

        if !self.driver.compile_status(shader) {
            let info = self.driver.info_log(shader);
            log::error!(target: tag, "Error compiling shader `{asset}`: {info}");
            return Err(ShaderError::Compile {
                kind,
                name: asset.to_owned(),
                log: info,
            });
        }

        log::debug!(target: tag, "compiled {kind} shader `{asset}` as {}", shader.get());
        Ok(guard.release())
    }

    /// See [`check_driver_errors`].
    pub fn check_driver_errors(&self, tag: &str, label: &str) -> Result<(), ShaderError> {
        check_driver_errors(self.driver, tag, label)
    }
}

/// Drains the driver's error queue and fails if anything was pending.
///
/// Each code is logged under `tag`, prefixed with `label`; the returned error
/// carries the last one. An empty queue is a silent success.
pub fn check_driver_errors<D: ShaderDriver + ?Sized>(
    driver: &D,
    tag: &str,
    label: &str,
) -> Result<(), ShaderError> {
    let mut last = None;

    loop {
        let code = driver.get_error();
        if code == NO_ERROR {
            break;
        }
        let code = DriverErrorCode(code);
        log::error!(target: tag, "{label}: glError {code}");
        last = Some(code);
    }

    match last {
        Some(code) => Err(ShaderError::Driver {
            label: label.to_owned(),
            code,
        }),
        None => Ok(()),
    }
}

/// Deletes the shader object on drop unless released.
struct ShaderGuard<'d, D: ShaderDriver + ?Sized> {
    driver: &'d D,
    shader: ShaderHandle,
    armed: bool,
}

impl<'d, D: ShaderDriver + ?Sized> ShaderGuard<'d, D> {
    fn new(driver: &'d D, shader: ShaderHandle) -> Self {
        Self {
            driver,
            shader,
            armed: true,
        }
    }

    fn release(mut self) -> ShaderHandle {
        self.armed = false;
        self.shader
    }
}

impl<D: ShaderDriver + ?Sized> Drop for ShaderGuard<'_, D> {
    fn drop(&mut self) {
        if self.armed {
            self.driver.delete_shader(self.shader);
        }
    }
}
