// src/error.rs
//
// Central error type. Construction failures (missing kernel source, WGSL
// validation, rejected resource descriptors) abort pipeline creation; per-frame
// failures are not retried, a lost surface is the only condition handled in place.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("shader source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("cyclic include chain at {path}")]
    CyclicInclude { path: PathBuf },

    /// WGSL validation diagnostics, surfaced verbatim.
    #[error("kernel compilation failed: {0}")]
    Compilation(String),

    #[error("resource creation failed: {0}")]
    ResourceCreation(String),

    #[error("no suitable GPU adapter")]
    NoAdapter,

    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

impl RenderError {
    pub fn resource<T: ToString>(msg: T) -> Self {
        RenderError::ResourceCreation(msg.to_string())
    }
}
