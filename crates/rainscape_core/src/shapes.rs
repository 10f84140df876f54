//! Serializable mesh sources
//!
//! Scenes reference meshes by shape parameters instead of file paths; the
//! geometry is generated on load.

use glam::Vec3;
use serde::{Serialize, Deserialize};

use crate::mesh::MeshData;

/// Procedural mesh description stored in scene files
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MeshSource {
    /// Cube centred on the origin
    Cube { size: f32 },
    /// Flat subdivided ground plane at y = 0
    Plane { size: f32, subdivisions: u32 },
    /// Box standing on y = 0 (a simple building)
    Pillar { width: f32, height: f32 },
}

impl MeshSource {
    /// Generate geometry with a uniform vertex colour
    pub fn build(&self, color: [f32; 3]) -> MeshData {
        match *self {
            MeshSource::Cube { size } => {
                let half = Vec3::splat(size * 0.5);
                MeshData::axis_box(-half, half, color)
            }
            MeshSource::Plane { size, subdivisions } => MeshData::grid(size, subdivisions, color),
            MeshSource::Pillar { width, height } => {
                let half = width * 0.5;
                MeshData::axis_box(
                    Vec3::new(-half, 0.0, -half),
                    Vec3::new(half, height, half),
                    color,
                )
            }
        }
    }
}
