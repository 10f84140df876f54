//! Per-frame state owned by the frame loop
//!
//! [`FrameContext`] holds everything the loop mutates between frames: the
//! camera, the controller's look angles, the light orbit, the mode toggles,
//! the rain pool and the orbit angle of spinning objects. Nothing here
//! touches the GPU, so a whole frame of logic can run in tests.

use glam::{Mat4, Vec3};
use rainscape_core::{CameraSpawn, LightPalette, LightState, ParticleSystem, Toggles};
use rainscape_input::{FrameCommands, InputAction, InputController, InputSnapshot};
use rainscape_render::{perspective_matrix, Camera, CameraError, FrameView};

use crate::config::AppConfig;

/// Lifecycle of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Nothing created yet; waiting for the first resume
    Init,
    /// Window, GPU and scene are live; one frame per redraw
    Running,
    /// Exit requested or startup failed; resources released
    ShuttingDown,
}

/// What one frame of input asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    pub exit_requested: bool,
}

/// Everything the frame loop mutates, in one place
pub struct FrameContext {
    pub camera: Camera,
    pub controller: InputController,
    pub light: LightState,
    pub palette: LightPalette,
    pub toggles: Toggles,
    pub particles: ParticleSystem,
    /// Orbit angle of spinning objects, degrees in [0, 360)
    pub object_angle: f32,
    near: f32,
    far: f32,
}

impl FrameContext {
    /// Build the start-of-run state; a scene spawn overrides the configured camera start
    pub fn new(config: &AppConfig, spawn: Option<CameraSpawn>) -> Result<Self, CameraError> {
        let (position, target) = match spawn {
            Some(spawn) => (spawn.position, spawn.target),
            None => (config.camera.start_position, config.camera.start_target),
        };
        let camera = Camera::new(
            Vec3::from(position),
            Vec3::from(target),
            Vec3::from(config.camera.world_up),
        )?;

        let controller = InputController::new()
            .with_settings(config.controller_settings())
            .with_fov(config.camera.fov)
            .aimed_along(camera.front());

        let mut particles = ParticleSystem::new(config.rain);
        particles.initialize_all();
        log::info!(
            "Rain pool: {} slots, up to {} vertices per frame",
            particles.capacity(),
            particles.max_vertices()
        );

        Ok(Self {
            camera,
            controller,
            light: LightState::new(Vec3::from(config.lighting.direction)),
            palette: config.lighting.palette,
            toggles: Toggles::default(),
            particles,
            object_angle: 0.0,
            near: config.camera.near,
            far: config.camera.far,
        })
    }

    /// Run the input half of a frame: camera motion, toggles and orbits
    pub fn update(&mut self, snapshot: &InputSnapshot, dt: f32) -> FrameOutcome {
        let commands = self.controller.update(snapshot, &mut self.camera, dt);
        self.apply(&commands)
    }

    /// Apply the non-camera commands of a frame
    pub fn apply(&mut self, commands: &FrameCommands) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        for action in &commands.actions {
            match action {
                InputAction::Exit => {
                    log::info!("Exit requested");
                    outcome.exit_requested = true;
                }
                InputAction::ToggleNight => {
                    let night = self.toggles.toggle_night();
                    log::info!("Night mode: {}", if night { "ON" } else { "OFF" });
                }
                InputAction::ToggleWireframe => {
                    let wireframe = self.toggles.toggle_wireframe();
                    log::info!("Wireframe: {}", if wireframe { "ON" } else { "OFF" });
                }
            }
        }

        self.object_angle = (self.object_angle + commands.object_rotation).rem_euclid(360.0);
        if commands.light_rotation != 0.0 {
            self.light.rotate(commands.light_rotation);
        }
        outcome
    }

    /// Projection from the controller's current field of view
    pub fn projection(&self, aspect: f32) -> Mat4 {
        perspective_matrix(self.controller.fov(), aspect, self.near, self.far)
    }

    /// Advance the rain and describe the frame for the renderer
    ///
    /// Call once per frame, after [`Self::update`].
    pub fn frame_view(&mut self, aspect: f32) -> FrameView<'_> {
        let projection = self.projection(aspect);
        let rain = self.particles.update_and_emit(self.camera.position());
        FrameView {
            view: self.camera.view_matrix(),
            projection,
            light: self.light,
            light_color: self.toggles.light_color(&self.palette),
            object_angle: self.object_angle,
            toggles: self.toggles,
            rain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    const EPSILON: f32 = 1e-4;

    fn context() -> FrameContext {
        FrameContext::new(&AppConfig::default(), None).unwrap()
    }

    #[test]
    fn test_new_uses_config_start() {
        let ctx = context();
        assert!(ctx.camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), EPSILON));
        assert!(ctx.camera.front().abs_diff_eq(Vec3::NEG_Z, EPSILON));
        assert!((ctx.controller.yaw() - -90.0).abs() < EPSILON);
        assert_eq!(ctx.controller.fov(), 45.0);
        assert!(ctx.particles.particles().iter().all(|p| p.alive));
    }

    #[test]
    fn test_spawn_overrides_config() {
        let spawn = CameraSpawn {
            position: [5.0, 1.0, 0.0],
            target: [5.0, 1.0, -1.0],
        };
        let ctx = FrameContext::new(&AppConfig::default(), Some(spawn)).unwrap();
        assert!(ctx.camera.position().abs_diff_eq(Vec3::new(5.0, 1.0, 0.0), EPSILON));
    }

    #[test]
    fn test_degenerate_start_is_an_error() {
        let mut config = AppConfig::default();
        config.camera.start_target = config.camera.start_position;
        assert!(FrameContext::new(&config, None).is_err());
    }

    #[test]
    fn test_apply_toggles_and_exit() {
        let mut ctx = context();
        let commands = FrameCommands {
            actions: vec![InputAction::ToggleNight, InputAction::ToggleWireframe],
            ..Default::default()
        };
        assert!(!ctx.apply(&commands).exit_requested);
        assert!(ctx.toggles.is_night());
        assert!(ctx.toggles.is_wireframe());

        let exit = FrameCommands {
            actions: vec![InputAction::Exit],
            ..Default::default()
        };
        assert!(ctx.apply(&exit).exit_requested);
    }

    #[test]
    fn test_object_angle_wraps() {
        let mut ctx = context();
        ctx.apply(&FrameCommands {
            object_rotation: -1.0,
            ..Default::default()
        });
        assert!((ctx.object_angle - 359.0).abs() < EPSILON);
    }

    #[test]
    fn test_scroll_changes_projection() {
        let mut ctx = context();
        let before = ctx.projection(1.5);
        ctx.update(&InputSnapshot::default().with_scroll(10.0), 0.016);
        let after = ctx.projection(1.5);
        assert_eq!(ctx.controller.fov(), 35.0);
        // Narrower field of view magnifies
        assert!(after.x_axis.x > before.x_axis.x);
    }

    #[test]
    fn test_frame_view_reflects_night() {
        let mut ctx = context();
        ctx.update(&InputSnapshot::default().with_pressed(KeyCode::Minus), 0.016);
        let view = ctx.frame_view(1.0);
        assert_eq!(view.light_color, Vec3::ZERO);
        assert!(view.toggles.is_night());
        assert!(!view.rain.is_empty());
    }
}
