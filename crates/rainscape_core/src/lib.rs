//! Core types for the Rainscape renderer
//!
//! This crate holds the GPU-independent state that the frame loop mutates
//! every frame:
//!
//! - [`LightState`] - Directional light orbiting the vertical axis
//! - [`SpotLight`] - Cone light parameters
//! - [`Toggles`] - Night and wireframe mode flags
//! - [`ParticleSystem`] - Fixed-capacity, camera-relative rain
//! - [`Transform`] - Per-object placement and the derived model/normal matrices
//! - [`MeshData`] / [`MeshSource`] - Procedural CPU-side meshes
//! - [`Scene`] - Loadable/saveable scene description

mod light;
mod toggles;
mod particles;
mod transform;
mod mesh;
mod shapes;
mod scene;

pub use light::{LightState, LightPalette, SpotLight, DEFAULT_LIGHT_DIRECTION};
pub use toggles::{Toggles, SkyboxKind};
pub use particles::{
    Particle, ParticleSystem, RainSettings, RainVertex, XorShift32,
    DEFAULT_CAPACITY, FLOOR_HEIGHT, SPAWN_HEIGHT, STREAK_LENGTH,
};
pub use transform::{Transform, normal_matrix};
pub use mesh::{MeshData, MeshVertex};
pub use shapes::MeshSource;
pub use scene::{Scene, SceneObject, CameraSpawn, SceneLoadError, SceneSaveError};

// Re-export glam so downstream crates agree on the math types
pub use glam;
