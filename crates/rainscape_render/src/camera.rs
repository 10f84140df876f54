//! Fly camera
//!
//! The camera keeps a position and a look-at target plus an orthonormal
//! front/right/up basis derived from them. Movement translates position and
//! target together; rotation rebuilds the front vector from pitch/yaw angles.
//! The camera performs no clamping: the controller keeps pitch and yaw in range.

use glam::{Mat4, Vec3};
use rainscape_input::{CameraControl, MoveDirection};
use thiserror::Error;

/// Vectors shorter than this are treated as zero
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Camera construction failures
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CameraError {
    /// Target coincides with the position, so there is no view direction
    #[error("camera target coincides with its position")]
    ZeroFront,
    /// World up is parallel to the view direction, so there is no right vector
    #[error("world up {world_up:?} is parallel to the view direction")]
    DegenerateRight { world_up: [f32; 3] },
}

/// Free-flying perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
}

impl Camera {
    /// Create a camera at `position` looking at `target`
    pub fn new(position: Vec3, target: Vec3, world_up: Vec3) -> Result<Self, CameraError> {
        let offset = target - position;
        if offset.length() <= DEGENERATE_EPSILON {
            return Err(CameraError::ZeroFront);
        }
        let front = offset.normalize();
        let right = Self::right_from(world_up, front).ok_or(CameraError::DegenerateRight {
            world_up: world_up.to_array(),
        })?;

        Ok(Self {
            position,
            target,
            front,
            right,
            up: front.cross(right).normalize(),
            world_up,
        })
    }

    fn right_from(world_up: Vec3, front: Vec3) -> Option<Vec3> {
        let right = world_up.cross(front);
        if right.length() > DEGENERATE_EPSILON {
            Some(right.normalize())
        } else {
            None
        }
    }

    /// World-to-camera transform (right-handed look-at)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Basis vector `normalize(world_up x front)`
    ///
    /// With a right-handed look-at this points towards screen-left; strafing
    /// uses `front x up` instead.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit displacement for a movement direction
    fn displacement(&self, direction: MoveDirection) -> Vec3 {
        let strafe = self.front.cross(self.up).normalize_or_zero();
        match direction {
            MoveDirection::Forward => self.front,
            MoveDirection::Backward => -self.front,
            MoveDirection::Left => -strafe,
            MoveDirection::Right => strafe,
        }
    }
}

impl CameraControl for Camera {
    fn move_camera(&mut self, direction: MoveDirection, distance: f32) {
        let offset = self.displacement(direction) * distance;
        self.position += offset;
        self.target += offset;
    }

    fn rotate(&mut self, pitch_degrees: f32, yaw_degrees: f32) {
        let (pitch, yaw) = (pitch_degrees.to_radians(), yaw_degrees.to_radians());
        let direction = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = direction.normalize();
        // Straight up or down has no horizontal right; keep the previous one
        if let Some(right) = Self::right_from(self.world_up, self.front) {
            self.right = right;
        }
        self.up = self.front.cross(self.right).normalize();
        self.target = self.position + self.front;
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

/// Perspective projection with a 0..1 depth range
pub fn perspective_matrix(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect.max(f32::EPSILON), near, far)
}
