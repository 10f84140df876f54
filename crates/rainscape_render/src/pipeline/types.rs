//! GPU-compatible uniform types
//!
//! These types are designed to match the WGSL layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};
use rainscape_core::{normal_matrix, SpotLight};

/// Spotlight slots in the lit shader
pub const MAX_SPOTLIGHTS: usize = 4;

/// One spotlight in camera space
/// Layout: 96 bytes (must match scene.wgsl SpotLight)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SpotLightUniform {
    pub position: [f32; 3],
    pub constant_term: f32,
    pub direction: [f32; 3],
    pub linear_term: f32,
    pub quadratic_term: f32,
    /// Cosine of the inner cone half-angle
    pub cut_off: f32,
    /// Cosine of the outer cone half-angle
    pub outer_cut_off: f32,
    pub _padding0: f32,
    pub ambient: [f32; 3],
    pub _padding1: f32,
    pub diffuse: [f32; 3],
    pub _padding2: f32,
    pub specular: [f32; 3],
    pub _padding3: f32,
}

impl SpotLightUniform {
    /// Transform a world-space spotlight into camera space
    pub fn from_spotlight(spot: &SpotLight, view: Mat4) -> Self {
        let position = view.transform_point3(Vec3::from(spot.position));
        let direction = view.transform_vector3(Vec3::from(spot.direction));
        Self {
            position: position.to_array(),
            constant_term: spot.constant,
            direction: direction.to_array(),
            linear_term: spot.linear,
            quadratic_term: spot.quadratic,
            cut_off: spot.cut_off_cos(),
            outer_cut_off: spot.outer_cut_off_cos(),
            ambient: spot.ambient,
            diffuse: spot.diffuse,
            specular: spot.specular,
            ..Self::default()
        }
    }
}

/// Per-frame uniforms for the lit pass
/// Layout: 608 bytes (must match scene.wgsl FrameUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    /// View matrix (64 bytes)
    pub view: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection: [[f32; 4]; 4],
    /// World to light clip space (64 bytes)
    pub light_space: [[f32; 4]; 4],
    /// Camera-space direction towards the light + spotlight count (16 bytes)
    pub light_dir: [f32; 3],
    pub spot_count: u32,
    /// Directional light colour + padding (16 bytes)
    pub light_color: [f32; 3],
    /// Bias subtracted from the fragment depth before the shadow compare
    pub shadow_bias: f32,
    /// Spotlights, only the first `spot_count` are read (384 bytes)
    pub spotlights: [SpotLightUniform; MAX_SPOTLIGHTS],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            light_space: Mat4::IDENTITY.to_cols_array_2d(),
            light_dir: [0.0, 1.0, 1.0],
            spot_count: 0,
            light_color: [1.0, 1.0, 1.0],
            shadow_bias: 0.005,
            spotlights: [SpotLightUniform::default(); MAX_SPOTLIGHTS],
        }
    }
}

impl FrameUniforms {
    /// Builder: attach spotlights, converting them to camera space
    ///
    /// Lights beyond [`MAX_SPOTLIGHTS`] are ignored.
    pub fn with_spotlights(mut self, spots: &[SpotLight], view: Mat4) -> Self {
        let count = spots.len().min(MAX_SPOTLIGHTS);
        for (slot, spot) in self.spotlights.iter_mut().zip(spots.iter()) {
            *slot = SpotLightUniform::from_spotlight(spot, view);
        }
        self.spot_count = count as u32;
        self
    }
}

/// Per-object uniforms shared by the shadow and lit passes
/// Layout: 112 bytes (must match ObjectUniforms in scene.wgsl and shadow.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Model matrix (64 bytes)
    pub model: [[f32; 4]; 4],
    /// Normal matrix as three padded columns, WGSL `mat3x3<f32>` (48 bytes)
    pub normal: [[f32; 4]; 3],
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

impl ObjectUniforms {
    /// Model matrix plus the normal matrix of `view * model`
    pub fn new(model: Mat4, view: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: pad_mat3(normal_matrix(view, model)),
        }
    }
}

/// A single view-projection style matrix
/// Layout: 64 bytes (light space for shadow.wgsl, sky for skybox.wgsl,
/// camera for rain.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MatrixUniform {
    pub matrix: [[f32; 4]; 4],
}

impl MatrixUniform {
    pub fn new(matrix: Mat4) -> Self {
        Self {
            matrix: matrix.to_cols_array_2d(),
        }
    }
}

impl Default for MatrixUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

fn pad_mat3(m: Mat3) -> [[f32; 4]; 3] {
    [
        m.x_axis.extend(0.0).to_array(),
        m.y_axis.extend(0.0).to_array(),
        m.z_axis.extend(0.0).to_array(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_spotlight_uniform_size() {
        // 6 rows of 16 bytes
        assert_eq!(size_of::<SpotLightUniform>(), 96);
    }

    #[test]
    fn test_frame_uniforms_size() {
        // 3 matrices (192) + light_dir/count (16) + color/bias (16) + 4 spotlights (384)
        assert_eq!(size_of::<FrameUniforms>(), 608);
    }

    #[test]
    fn test_object_uniforms_size() {
        // mat4 (64) + padded mat3 (48)
        assert_eq!(size_of::<ObjectUniforms>(), 112);
    }

    #[test]
    fn test_matrix_uniform_size() {
        assert_eq!(size_of::<MatrixUniform>(), 64);
    }

    #[test]
    fn test_uniform_sizes_are_16_byte_multiples() {
        for size in [
            size_of::<SpotLightUniform>(),
            size_of::<FrameUniforms>(),
            size_of::<ObjectUniforms>(),
            size_of::<MatrixUniform>(),
        ] {
            assert_eq!(size % 16, 0);
        }
    }

    #[test]
    fn test_spotlights_truncated() {
        let spots = vec![SpotLight::default(); 6];
        let uniforms = FrameUniforms::default().with_spotlights(&spots, Mat4::IDENTITY);
        assert_eq!(uniforms.spot_count, MAX_SPOTLIGHTS as u32);
    }

    #[test]
    fn test_spotlight_to_camera_space() {
        let spot = SpotLight::default();
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0));
        let u = SpotLightUniform::from_spotlight(&spot, view);
        assert_eq!(u.position, [0.0, 0.5, -1.5]);
        // Translation does not affect directions
        assert_eq!(u.direction, spot.direction);
        assert!((u.cut_off - spot.cut_off_cos()).abs() < 1e-6);
    }

    #[test]
    fn test_object_normal_padding() {
        let uniforms = ObjectUniforms::new(Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)), Mat4::IDENTITY);
        assert_eq!(uniforms.normal[0][3], 0.0);
        // Inverse-transpose of a 2x scale on X halves X
        assert!((uniforms.normal[0][0] - 0.5).abs() < 1e-6);
        assert_eq!(uniforms.normal[1], [0.0, 1.0, 0.0, 0.0]);
    }
}
