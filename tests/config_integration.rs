//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables,
//! and that the checked-in files agree with the built-in defaults.

use rainscape::config::AppConfig;
use rainscape_core::{Scene, SpotLight};
use rainscape_render::SkyboxSource;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

/// Fresh scratch directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rainscape_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("RAIN_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("RAIN_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("RAIN_SHADOW__RESOLUTION", "1024");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("RAIN_SHADOW__RESOLUTION");
    assert_eq!(config.shadow.resolution, 1024);
    // Untouched keys keep the file values
    assert_eq!(config.shadow.far, 6.0);
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    let from_file = AppConfig::load_from("config").unwrap();
    let builtin = AppConfig::default();

    assert_eq!(from_file.window.title, builtin.window.title);
    assert_eq!(from_file.camera.start_position, builtin.camera.start_position);
    assert_eq!(from_file.camera.start_target, builtin.camera.start_target);
    assert_eq!(from_file.input.move_speed, builtin.input.move_speed);
    assert_eq!(from_file.input.sprint_speed, builtin.input.sprint_speed);
    assert_eq!(from_file.lighting.direction, builtin.lighting.direction);
    assert_eq!(from_file.lighting.spotlights, vec![SpotLight::default()]);
    assert_eq!(from_file.shadow.resolution, builtin.shadow.resolution);
    assert_eq!(from_file.rain, builtin.rain);
    assert_eq!(from_file.skybox.day, SkyboxSource::day());
    assert_eq!(from_file.skybox.night, SkyboxSource::night());
    assert_eq!(from_file.scene.path, builtin.scene.path);
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = scratch_dir("user_override");
    fs::write(dir.join("default.toml"), "[rain]\ncapacity = 3000\nslowdown = 0.4\n").unwrap();
    fs::write(dir.join("user.toml"), "[rain]\ncapacity = 500\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.rain.capacity, 500);
    assert_eq!(config.rain.slowdown, 0.4);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_missing_directory_yields_defaults() {
    let dir = scratch_dir("empty");
    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.rain.capacity, 3000);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_malformed_value_is_error() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("default.toml"), "[window]\nwidth = \"wide\"\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_configured_scene_loads() {
    let config = AppConfig::load_from("config").unwrap();
    let scene = Scene::load(&config.scene.path).unwrap();
    let demo = Scene::demo();

    assert_eq!(scene.name, demo.name);
    assert_eq!(scene.object_count(), demo.object_count());
    assert_eq!(scene.camera_spawn, demo.camera_spawn);
    for (loaded, built) in scene.objects.iter().zip(&demo.objects) {
        assert_eq!(loaded.name, built.name);
        assert_eq!(loaded.mesh, built.mesh);
        assert_eq!(loaded.transform, built.transform);
        assert_eq!(loaded.spins, built.spins);
    }
}

#[test]
#[serial]
fn test_out_of_range_values_are_rejected_on_load() {
    let dir = scratch_dir("out_of_range");
    fs::write(dir.join("default.toml"), "[rain]\nslowdown = 0.0\n").unwrap();
    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().contains("rain.slowdown"), "{}", err);

    fs::write(dir.join("default.toml"), "[camera]\npitch_limit = 90.0\n").unwrap();
    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().contains("camera.pitch_limit"), "{}", err);

    let _ = fs::remove_dir_all(&dir);
}
