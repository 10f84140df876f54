//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`RAIN_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use rainscape_core::{LightPalette, ParticleSystem, RainSettings, SpotLight};
use rainscape_input::ControllerSettings;
use rainscape_render::{RendererSettings, ShadowSettings, SkyboxSource};
use serde::{Serialize, Deserialize};
use std::path::Path;
use thiserror::Error;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Directional light and spotlights
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Shadow map configuration
    #[serde(default)]
    pub shadow: ShadowConfig,
    /// Rain particle pool
    #[serde(default)]
    pub rain: RainSettings,
    /// Day and night skyboxes
    #[serde(default)]
    pub skybox: SkyboxConfig,
    /// Scene file
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`RAIN_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // RAIN_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("RAIN_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller and rain step cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pitch_limit = self.camera.pitch_limit;
        if !(pitch_limit > 0.0 && pitch_limit < 90.0) {
            return Err(ConfigError::invalid(format!(
                "camera.pitch_limit must be between 0 and 90 degrees (exclusive), got {}",
                pitch_limit
            )));
        }
        let slowdown = self.rain.slowdown;
        if !(slowdown.is_finite() && slowdown > 0.0) {
            return Err(ConfigError::invalid(format!(
                "rain.slowdown must be positive, got {}",
                slowdown
            )));
        }
        let (fov_min, fov_max) = (self.input.fov_min, self.input.fov_max);
        if !(fov_min > 0.0 && fov_min <= fov_max && fov_max < 180.0) {
            return Err(ConfigError::invalid(format!(
                "input.fov_min..fov_max must lie in (0, 180), got {}..{}",
                fov_min, fov_max
            )));
        }
        Ok(())
    }

    /// Controller tunables from the input and camera sections
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            move_speed: self.input.move_speed,
            sprint_speed: self.input.sprint_speed,
            mouse_sensitivity: self.input.mouse_sensitivity,
            rotation_step: self.input.rotation_step,
            pitch_limit: self.camera.pitch_limit,
            fov_min: self.input.fov_min,
            fov_max: self.input.fov_max,
        }
    }

    /// Renderer settings; the rain buffer is sized from the particle pool
    pub fn renderer_settings(&self) -> RendererSettings {
        RendererSettings {
            shadow: self.shadow.to_settings(),
            clear_color: self.skybox.clear_color,
            spotlights: self.lighting.spotlights.clone(),
            rain_max_vertices: ParticleSystem::max_vertices_for(self.rain.capacity),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Rainscape".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
///
/// The starting yaw and pitch are derived from the start target, so the
/// first mouse motion continues from the initial view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]; a scene camera spawn overrides it
    pub start_position: [f32; 3],
    /// Point the camera initially looks at
    pub start_target: [f32; 3],
    /// World up reference
    pub world_up: [f32; 3],
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Maximum pitch angle in degrees
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, 3.0],
            start_target: [0.0, 0.0, -10.0],
            world_up: [0.0, 1.0, 0.0],
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            pitch_limit: 89.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Movement speed (units per second)
    pub move_speed: f32,
    /// Movement speed while Shift is held
    pub sprint_speed: f32,
    /// Degrees of look rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Degrees per frame for the object and light rotation keys
    pub rotation_step: f32,
    /// Narrowest field of view reachable by scrolling
    pub fov_min: f32,
    /// Widest field of view reachable by scrolling
    pub fov_max: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        let controller = ControllerSettings::default();
        Self {
            move_speed: controller.move_speed,
            sprint_speed: controller.sprint_speed,
            mouse_sensitivity: controller.mouse_sensitivity,
            rotation_step: controller.rotation_step,
            fov_min: controller.fov_min,
            fov_max: controller.fov_max,
        }
    }
}

/// Lighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Direction towards the directional light before any orbit
    pub direction: [f32; 3],
    /// Day and night light colours
    pub palette: LightPalette,
    /// Cone lights (at most four reach the shader)
    pub spotlights: Vec<SpotLight>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            direction: rainscape_core::DEFAULT_LIGHT_DIRECTION.to_array(),
            palette: LightPalette::default(),
            spotlights: vec![SpotLight::default()],
        }
    }
}

/// Shadow map configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Width and height of the depth target
    pub resolution: u32,
    /// Light frustum near plane
    pub near: f32,
    /// Light frustum far plane
    pub far: f32,
    /// Half-width of the orthographic light frustum
    pub half_extent: f32,
    /// Bias applied before the depth comparison
    pub depth_bias: f32,
}

impl ShadowConfig {
    pub fn to_settings(&self) -> ShadowSettings {
        ShadowSettings {
            resolution: self.resolution.max(1),
            near: self.near,
            far: self.far,
            half_extent: self.half_extent,
            depth_bias: self.depth_bias,
        }
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        let settings = ShadowSettings::default();
        Self {
            resolution: settings.resolution,
            near: settings.near,
            far: settings.far,
            half_extent: settings.half_extent,
            depth_bias: settings.depth_bias,
        }
    }
}

/// Skybox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyboxConfig {
    /// Clear colour behind the skybox
    pub clear_color: [f32; 3],
    /// Background drawn in day mode
    pub day: SkyboxSource,
    /// Background drawn in night mode
    pub night: SkyboxSource,
}

impl Default for SkyboxConfig {
    fn default() -> Self {
        Self {
            clear_color: RendererSettings::default().clear_color,
            day: SkyboxSource::day(),
            night: SkyboxSource::night(),
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to the RON scene file
    pub path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/default.ron".to_string(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` wins
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
#[error("Configuration error: {message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.camera.start_position, [0.0, 0.0, 3.0]);
        assert_eq!(config.input.move_speed, 1.4);
        assert_eq!(config.input.sprint_speed, 15.0);
        assert_eq!(config.lighting.direction, [0.0, 1.0, 1.0]);
        assert_eq!(config.shadow.resolution, 2048);
        assert_eq!(config.rain.capacity, 3000);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("half_extent"));
        assert!(toml.contains("kind = \"gradient\""));
    }

    #[test]
    fn test_controller_settings_follow_config() {
        let mut config = AppConfig::default();
        config.input.move_speed = 2.0;
        config.camera.pitch_limit = 80.0;
        let settings = config.controller_settings();
        assert_eq!(settings.move_speed, 2.0);
        assert_eq!(settings.pitch_limit, 80.0);
        assert_eq!(settings.fov_max, 179.0);
    }

    #[test]
    fn test_renderer_settings_size_rain_buffer() {
        let mut config = AppConfig::default();
        config.rain.capacity = 100;
        let settings = config.renderer_settings();
        assert_eq!(settings.rain_max_vertices, ParticleSystem::max_vertices_for(100));
        assert_eq!(settings.spotlights.len(), 1);
        assert_eq!(settings.shadow.far, 6.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[rain]\ncapacity = 10\n\n[lighting]\ndirection = [1.0, 1.0, 0.0]\n"))
            .extract()
            .unwrap();
        assert_eq!(config.rain.capacity, 10);
        assert_eq!(config.rain.gravity, -0.8);
        assert_eq!(config.lighting.direction, [1.0, 1.0, 0.0]);
        assert_eq!(config.lighting.spotlights.len(), 1);
        assert_eq!(config.window.title, "Rainscape");
    }

    #[test]
    fn test_defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_pitch_limit_must_stay_below_vertical() {
        let mut config = AppConfig::default();
        for limit in [90.0, 120.0, 0.0, -10.0, f32::NAN] {
            config.camera.pitch_limit = limit;
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("camera.pitch_limit"), "{}", err);
        }
        config.camera.pitch_limit = 89.9;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rain_slowdown_must_be_positive() {
        let mut config = AppConfig::default();
        for slowdown in [0.0, -0.4, f32::INFINITY, f32::NAN] {
            config.rain.slowdown = slowdown;
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("rain.slowdown"), "{}", err);
        }
    }

    #[test]
    fn test_inverted_fov_bounds_rejected() {
        let mut config = AppConfig::default();
        config.input.fov_min = 120.0;
        config.input.fov_max = 30.0;
        assert!(config.validate().is_err());
    }
}
