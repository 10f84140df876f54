//! Scene serialization
//!
//! Provides the [`Scene`] struct for loading/saving scenes from RON files.
//! A scene lists the drawable objects and an optional camera spawn.

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::shapes::MeshSource;
use crate::transform::Transform;

/// A serializable scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Objects drawn in both passes, in order
    pub objects: Vec<SceneObject>,
    /// Camera start, overriding the configured one
    #[serde(default)]
    pub camera_spawn: Option<CameraSpawn>,
}

/// One drawable object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub mesh: MeshSource,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default = "default_color")]
    pub color: [f32; 3],
    /// Whether the Q/E orbit angle rotates this object
    #[serde(default)]
    pub spins: bool,
}

/// Camera start position and look-at target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSpawn {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

fn default_color() -> [f32; 3] {
    [0.8, 0.8, 0.8]
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh: MeshSource, transform: Transform) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform,
            color: default_color(),
            spins: false,
        }
    }

    /// Builder: set the vertex colour
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Builder: let the orbit angle rotate this object
    pub fn spinning(mut self) -> Self {
        self.spins = true;
        self
    }
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            camera_spawn: None,
        }
    }

    /// The built-in scene: a spinning cube over a ground plane with a few buildings
    pub fn demo() -> Self {
        let mut scene = Scene::new("Rainy Plaza");
        scene.add_object(
            SceneObject::new(
                "centerpiece",
                MeshSource::Cube { size: 0.6 },
                Transform::identity(),
            )
            .with_color([0.85, 0.35, 0.25])
            .spinning(),
        );
        scene.add_object(
            SceneObject::new(
                "ground",
                MeshSource::Plane { size: 60.0, subdivisions: 30 },
                Transform::from_position(0.0, -1.0, 0.0),
            )
            .with_color([0.35, 0.38, 0.4]),
        );
        for (i, (x, z, h)) in [(-6.0, -8.0, 5.0), (7.0, -12.0, 8.0), (-10.0, 4.0, 3.5), (9.0, 6.0, 6.0)]
            .into_iter()
            .enumerate()
        {
            scene.add_object(
                SceneObject::new(
                    format!("building_{}", i),
                    MeshSource::Pillar { width: 3.0, height: h },
                    Transform::from_position(x, -1.0, z),
                )
                .with_color([0.55, 0.55, 0.6]),
            );
        }
        scene.with_camera_spawn([0.0, 0.0, 3.0], [0.0, 0.0, -10.0])
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Set the camera spawn
    pub fn with_camera_spawn(mut self, position: [f32; 3], target: [f32; 3]) -> Self {
        self.camera_spawn = Some(CameraSpawn { position, target });
        self
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}

/// Error loading a scene
#[derive(Debug, Error)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Parse error (invalid RON syntax)
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Error saving a scene
#[derive(Debug, Error)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Serialization error
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_contents() {
        let scene = Scene::demo();
        assert_eq!(scene.object_count(), 6);
        let cube = scene.get_by_name("centerpiece").expect("centerpiece exists");
        assert!(cube.spins);
        let ground = scene.get_by_name("ground").expect("ground exists");
        assert_eq!(ground.transform.position, [0.0, -1.0, 0.0]);
        assert!(!ground.spins);
    }

    #[test]
    fn test_parse_minimal_ron() {
        let source = r#"(
            name: "tiny",
            objects: [
                (
                    name: "box",
                    mesh: Cube(size: 1.0),
                ),
            ],
        )"#;
        let scene: Scene = ron::from_str(source).expect("valid RON");
        assert_eq!(scene.name, "tiny");
        assert_eq!(scene.objects[0].transform, Transform::identity());
        assert_eq!(scene.objects[0].color, [0.8, 0.8, 0.8]);
        assert!(scene.camera_spawn.is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Scene::load("definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, SceneLoadError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_malformed_is_parse_error() {
        let dir = std::env::temp_dir().join("rainscape_scene_parse_test.ron");
        fs::write(&dir, "(name: 3").expect("write temp file");
        let err = Scene::load(&dir).unwrap_err();
        assert!(matches!(err, SceneLoadError::Parse(_)));
        let _ = fs::remove_file(&dir);
    }

    #[test]
    fn test_save_then_load_keeps_objects() {
        let path = std::env::temp_dir().join("rainscape_scene_save_test.ron");
        let scene = Scene::demo();
        scene.save(&path).expect("save succeeds");
        let loaded = Scene::load(&path).expect("load succeeds");
        assert_eq!(loaded.object_count(), scene.object_count());
        assert_eq!(loaded.camera_spawn, scene.camera_spawn);
        let _ = fs::remove_file(&path);
    }
}
