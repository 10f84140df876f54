//! CPU-side mesh data ready for upload

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex layout shared by the shadow and lit pipelines
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// Indexed triangle list
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a quad given counter-clockwise corners (seen from the front)
    pub fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3, color: [f32; 3]) {
        let base = self.vertices.len() as u32;
        for corner in corners {
            self.vertices.push(MeshVertex {
                position: corner.to_array(),
                normal: normal.to_array(),
                color,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Axis-aligned box between `min` and `max`, faces pointing outward
    pub fn axis_box(min: Vec3, max: Vec3, color: [f32; 3]) -> Self {
        let mut mesh = Self::new();
        let center = (min + max) * 0.5;
        let half = (max - min) * 0.5;

        // (normal, u, v) with u x v = normal so each quad winds CCW from outside
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];

        for (normal, u, v) in faces {
            let face_center = center + normal * half;
            let du = u * half;
            let dv = v * half;
            mesh.push_quad(
                [
                    face_center - du - dv,
                    face_center + du - dv,
                    face_center + du + dv,
                    face_center - du + dv,
                ],
                normal,
                color,
            );
        }

        mesh
    }

    /// Flat grid in the XZ plane centred on the origin, facing +Y
    pub fn grid(size: f32, subdivisions: u32, color: [f32; 3]) -> Self {
        let cells = subdivisions.max(1);
        let step = size / cells as f32;
        let start = -size * 0.5;
        let row = cells + 1;

        let mut mesh = Self::new();
        for i in 0..=cells {
            for j in 0..=cells {
                mesh.vertices.push(MeshVertex {
                    position: [start + i as f32 * step, 0.0, start + j as f32 * step],
                    normal: [0.0, 1.0, 0.0],
                    color,
                });
            }
        }

        for i in 0..cells {
            for j in 0..cells {
                let a = i * row + j;
                let b = a + 1;
                let c = a + row + 1;
                let d = a + row;
                mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_normal(mesh: &MeshData, tri: usize) -> Vec3 {
        let idx = &mesh.indices[tri * 3..tri * 3 + 3];
        let p = |i: u32| Vec3::from(mesh.vertices[i as usize].position);
        (p(idx[1]) - p(idx[0])).cross(p(idx[2]) - p(idx[0]))
    }

    #[test]
    fn test_box_counts() {
        let mesh = MeshData::axis_box(Vec3::splat(-0.5), Vec3::splat(0.5), [1.0; 3]);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_box_winding_matches_normals() {
        let mesh = MeshData::axis_box(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(1.0, 3.0, 2.0), [1.0; 3]);
        for tri in 0..mesh.triangle_count() {
            let geometric = triangle_normal(&mesh, tri);
            let stored = Vec3::from(mesh.vertices[mesh.indices[tri * 3] as usize].normal);
            assert!(geometric.dot(stored) > 0.0, "triangle {} winds inward", tri);
        }
    }

    #[test]
    fn test_grid_counts_and_winding() {
        let mesh = MeshData::grid(10.0, 4, [1.0; 3]);
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.triangle_count(), 32);
        for tri in 0..mesh.triangle_count() {
            assert!(triangle_normal(&mesh, tri).y > 0.0);
        }
    }

    #[test]
    fn test_grid_zero_subdivisions_clamped() {
        let mesh = MeshData::grid(2.0, 0, [1.0; 3]);
        assert_eq!(mesh.triangle_count(), 2);
    }
}
