//! Fly camera and scene controller
//!
//! Controls:
//! - W/S: Forward/backward along the view direction
//! - A/D: Strafe left/right
//! - Shift: Sprint
//! - Mouse: Look (yaw/pitch in degrees)
//! - Scroll: Zoom (field of view)
//! - Q/E: Spin the scene object
//! - J/L: Orbit the light

use glam::Vec3;
use winit::keyboard::KeyCode;

use crate::bindings::{InputAction, InputMapper, MOVEMENT_KEYS, SPRINT_KEYS};
use crate::snapshot::InputSnapshot;

/// Direction of a camera translation, relative to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Trait for camera control
/// Allows the controller to drive any camera that can translate and orient itself
pub trait CameraControl {
    /// Translate by `distance` world units in `direction`
    fn move_camera(&mut self, direction: MoveDirection, distance: f32);
    /// Set the absolute orientation from pitch and yaw (degrees)
    fn rotate(&mut self, pitch_degrees: f32, yaw_degrees: f32);
    fn position(&self) -> Vec3;
}

/// Tunables for the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    /// Walking speed (units per second)
    pub move_speed: f32,
    /// Speed while Shift is held
    pub sprint_speed: f32,
    /// Degrees of rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Degrees per frame for the object and light rotation keys
    pub rotation_step: f32,
    /// Symmetric pitch limit in degrees
    pub pitch_limit: f32,
    pub fov_min: f32,
    pub fov_max: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            move_speed: 1.4,
            sprint_speed: 15.0,
            mouse_sensitivity: 0.1,
            rotation_step: 1.0,
            pitch_limit: 89.0,
            fov_min: 1.0,
            fov_max: 179.0,
        }
    }
}

/// Everything a frame's input asks for besides camera motion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameCommands {
    /// Discrete actions, in press order
    pub actions: Vec<InputAction>,
    /// Change to the object orbit angle (degrees)
    pub object_rotation: f32,
    /// Change to the light orbit angle (degrees)
    pub light_rotation: f32,
}

impl FrameCommands {
    pub fn has(&self, action: InputAction) -> bool {
        self.actions.contains(&action)
    }
}

/// Owns the look angles and field of view, and turns snapshots into commands
#[derive(Debug, Clone)]
pub struct InputController {
    yaw: f32,
    pitch: f32,
    fov: f32,
    pub settings: ControllerSettings,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    /// Looking down -Z with a 45 degree field of view
    pub fn new() -> Self {
        Self {
            yaw: -90.0,
            pitch: 0.0,
            fov: 45.0,
            settings: ControllerSettings::default(),
        }
    }

    /// Builder: replace all tunables
    pub fn with_settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder: set the starting field of view (clamped)
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov.clamp(self.settings.fov_min, self.settings.fov_max);
        self
    }

    /// Builder: derive yaw/pitch from a view direction so the first mouse
    /// motion continues from where the camera already looks
    pub fn aimed_along(mut self, front: Vec3) -> Self {
        let front = front.normalize_or_zero();
        if front != Vec3::ZERO {
            self.yaw = front.z.atan2(front.x).to_degrees();
            self.pitch = front
                .y
                .asin()
                .to_degrees()
                .clamp(-self.settings.pitch_limit, self.settings.pitch_limit);
        }
        self
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Apply one frame of input
    ///
    /// Moves and orients `camera` directly; returns the remaining commands.
    pub fn update<C: CameraControl>(
        &mut self,
        snapshot: &InputSnapshot,
        camera: &mut C,
        dt: f32,
    ) -> FrameCommands {
        let mut commands = FrameCommands::default();

        for &key in &snapshot.pressed {
            if let Some(action) = InputMapper::map_key_press(key) {
                log::debug!("Input action: {:?}", action);
                commands.actions.push(action);
            }
        }

        let sprinting = SPRINT_KEYS.iter().any(|&k| snapshot.is_held(k));
        let speed = if sprinting {
            self.settings.sprint_speed
        } else {
            self.settings.move_speed
        };
        let distance = speed * dt;
        for (key, direction) in MOVEMENT_KEYS {
            if snapshot.is_held(key) {
                camera.move_camera(direction, distance);
            }
        }

        let step = self.settings.rotation_step;
        commands.object_rotation = axis(snapshot, KeyCode::KeyE, KeyCode::KeyQ) * step;
        commands.light_rotation = axis(snapshot, KeyCode::KeyL, KeyCode::KeyJ) * step;

        let (dx, dy) = snapshot.mouse_delta;
        if dx != 0.0 || dy != 0.0 {
            // Mouse down (positive dy) looks down
            self.yaw += dx as f32 * self.settings.mouse_sensitivity;
            self.pitch -= dy as f32 * self.settings.mouse_sensitivity;
            self.pitch = self
                .pitch
                .clamp(-self.settings.pitch_limit, self.settings.pitch_limit);
            self.yaw = wrap_degrees(self.yaw);
            camera.rotate(self.pitch, self.yaw);
        }

        if snapshot.scroll_delta != 0.0 {
            self.fov = (self.fov - snapshot.scroll_delta)
                .clamp(self.settings.fov_min, self.settings.fov_max);
        }

        commands
    }
}

/// Wrap an angle into [-180, 180)
fn wrap_degrees(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// +1 when only `positive` is held, -1 when only `negative` is held
fn axis(snapshot: &InputSnapshot, positive: KeyCode, negative: KeyCode) -> f32 {
    (snapshot.is_held(positive) as i32 - snapshot.is_held(negative) as i32) as f32
}
