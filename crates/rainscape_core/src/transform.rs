//! Object transforms and the matrices derived from them each frame

use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Serialize, Deserialize};

/// Placement of a scene object: translation, rotation about +Y, scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position
    pub position: [f32; 3],
    /// Rotation about the world Y axis, in degrees
    #[serde(default)]
    pub yaw_degrees: f32,
    /// Per-axis scale
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: [0.0; 3],
            yaw_degrees: 0.0,
            scale: unit_scale(),
        }
    }

    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
            ..Self::identity()
        }
    }

    /// Builder: set the base yaw
    pub fn with_yaw(mut self, degrees: f32) -> Self {
        self.yaw_degrees = degrees;
        self
    }

    /// Builder: set a uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = [scale; 3];
        self
    }

    /// Model matrix with an extra yaw (the spin angle) added on top
    ///
    /// Applies scale, then rotation, then translation.
    pub fn model_matrix(&self, extra_yaw_degrees: f32) -> Mat4 {
        let rotation = Quat::from_rotation_y((self.yaw_degrees + extra_yaw_degrees).to_radians());
        Mat4::from_scale_rotation_translation(
            Vec3::from(self.scale),
            rotation,
            Vec3::from(self.position),
        )
    }
}

/// Inverse-transpose of the linear part of `view * model`
///
/// Transforms normals into camera space correctly under non-uniform scale.
pub fn normal_matrix(view: Mat4, model: Mat4) -> Mat3 {
    Mat3::from_mat4(view * model).inverse().transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_model() {
        let t = Transform::identity();
        assert!(t.model_matrix(0.0).abs_diff_eq(Mat4::IDENTITY, EPSILON));
    }

    #[test]
    fn test_translation_applied_last() {
        let t = Transform::from_position(0.0, -1.0, 0.0).with_uniform_scale(2.0);
        let p = t.model_matrix(0.0).transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(2.0, -1.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_spin_adds_to_base_yaw() {
        let a = Transform::identity().with_yaw(30.0).model_matrix(60.0);
        let b = Transform::identity().with_yaw(90.0).model_matrix(0.0);
        assert!(a.abs_diff_eq(b, EPSILON));
    }

    #[test]
    fn test_normal_matrix_uniform_scale_keeps_direction() {
        let model = Mat4::from_scale(Vec3::splat(3.0));
        let n = (normal_matrix(Mat4::IDENTITY, model) * Vec3::Y).normalize();
        assert!((n - Vec3::Y).length() < EPSILON);
    }

    #[test]
    fn test_normal_matrix_non_uniform_scale() {
        // A 45 degree slope squashed in Y: the normal must tilt, not just scale
        let model = Mat4::from_scale(Vec3::new(1.0, 0.5, 1.0));
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let n = (normal_matrix(Mat4::IDENTITY, model) * normal).normalize();
        // Tangent (1,-1,0) maps to (1,-0.5,0); the transformed normal stays perpendicular
        let tangent = Vec3::new(1.0, -0.5, 0.0);
        assert!(n.dot(tangent).abs() < EPSILON);
    }
}
