//! Per-frame render errors

use thiserror::Error;

/// Render error types
#[derive(Debug, Error)]
pub enum RenderError {
    /// Surface was lost or outdated (window resized, minimized, etc.)
    #[error("Surface lost")]
    SurfaceLost,
    /// GPU out of memory
    #[error("Out of memory")]
    OutOfMemory,
    /// Frame acquisition timed out
    #[error("Surface timeout")]
    Timeout,
    /// Other surface error
    #[error("Render error: {0}")]
    Other(String),
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

impl RenderError {
    /// Whether the frame loop must stop
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::OutOfMemory)
    }
}
