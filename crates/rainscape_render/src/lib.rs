//! Rendering for Rainscape
//!
//! This crate provides the wgpu-based two-pass renderer: a depth-only pass
//! from the light's point of view followed by the lit pass that samples it.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] - Fly camera with look-at view derivation
//! - [`shadow::ShadowPass`] - Off-screen depth target and light-space transform
//! - [`skybox`] - Day/night cubemap sources
//! - [`mesh::GpuMesh`] - Uploaded mesh with per-object uniforms
//! - [`renderer::SceneRenderer`] - Per-frame orchestration of both passes

pub mod camera;
pub mod context;
pub mod error;
pub mod mesh;
pub mod pipeline;
pub mod renderer;
pub mod shadow;
pub mod skybox;

pub use camera::{perspective_matrix, Camera, CameraError};
pub use context::{ContextError, RenderContext};
pub use error::RenderError;
pub use renderer::{FrameView, RendererSettings, SceneRenderer};
pub use shadow::{light_space_transform, ShadowPass, ShadowSettings};
pub use skybox::{CubeFaces, SkyboxError, SkyboxSource};
