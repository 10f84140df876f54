//! Directional light state
//!
//! The light has a fixed base direction which is orbited around the world Y
//! axis by an accumulated angle (J/L keys). Everything else (the light-space
//! transform, the view-space direction) is derived from these two values.

use glam::{Mat3, Mat4, Vec3};
use serde::{Serialize, Deserialize};

/// Direction towards the light before any orbit rotation is applied
pub const DEFAULT_LIGHT_DIRECTION: Vec3 = Vec3::new(0.0, 1.0, 1.0);

/// Directional light orbiting the vertical axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightState {
    base_direction: Vec3,
    /// Orbit angle about +Y, in degrees, kept in [0, 360)
    angle_degrees: f32,
}

impl Default for LightState {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_DIRECTION)
    }
}

impl LightState {
    /// Create a light pointing along `base_direction` with no orbit applied
    pub fn new(base_direction: Vec3) -> Self {
        Self {
            base_direction,
            angle_degrees: 0.0,
        }
    }

    /// Advance the orbit angle by `delta_degrees`
    pub fn rotate(&mut self, delta_degrees: f32) {
        self.angle_degrees = (self.angle_degrees + delta_degrees).rem_euclid(360.0);
    }

    /// Current orbit angle in degrees
    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    /// Base direction (before orbit)
    pub fn base_direction(&self) -> Vec3 {
        self.base_direction
    }

    /// Rotation of the orbit about +Y
    pub fn rotation(&self) -> Mat4 {
        Mat4::from_rotation_y(self.angle_degrees.to_radians())
    }

    /// World-space direction towards the light
    ///
    /// Not normalized: the shadow pass uses its length as the eye distance
    /// of the light camera.
    pub fn direction(&self) -> Vec3 {
        self.rotation().transform_vector3(self.base_direction)
    }

    /// Light direction transformed into camera space for the lit shader
    pub fn view_space_direction(&self, view: Mat4) -> Vec3 {
        let linear = Mat3::from_mat4(view).inverse().transpose();
        linear * self.direction()
    }
}

/// Light colours for the two day/night modes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightPalette {
    /// Colour used in day mode
    pub day: [f32; 3],
    /// Colour used in night mode
    pub night: [f32; 3],
}

impl Default for LightPalette {
    fn default() -> Self {
        Self {
            day: [1.0, 1.0, 1.0],
            night: [0.0, 0.0, 0.0],
        }
    }
}

/// Cone light with distance attenuation
///
/// Position and direction are in world space; angles are in degrees and
/// only converted to cosines when uploaded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotLight {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    /// Half-angle of the full-intensity cone
    pub cut_off_degrees: f32,
    /// Half-angle where the light fades to zero
    pub outer_cut_off_degrees: f32,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: [0.0, 0.5, 1.5],
            direction: [0.0, -0.5, -1.0],
            constant: 1.0,
            linear: 0.7,
            quadratic: 1.8,
            cut_off_degrees: 5.5,
            outer_cut_off_degrees: 10.5,
            ambient: [0.0, 0.0, 0.0],
            diffuse: [1.0, 1.0, 1.0],
            specular: [0.0, 0.0, 0.0],
        }
    }
}

impl SpotLight {
    pub fn cut_off_cos(&self) -> f32 {
        self.cut_off_degrees.to_radians().cos()
    }

    pub fn outer_cut_off_cos(&self) -> f32 {
        self.outer_cut_off_degrees.to_radians().cos()
    }

    /// Attenuation factor at `distance` from the light
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}
