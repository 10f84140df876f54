//! Integration tests for the CPU side of a frame
//!
//! These tests drive the core state the way the frame loop does:
//! 1. The demo scene builds drawable geometry for every object
//! 2. Rain emits bounded, well-formed geometry frame after frame
//! 3. Mode toggles and the light orbit leave the rain untouched

use rainscape_core::glam::{Mat4, Vec3};
use rainscape_core::{
    normal_matrix, LightPalette, LightState, ParticleSystem, RainSettings, Scene, Toggles,
    FLOOR_HEIGHT, STREAK_LENGTH,
};

// ==================== Scene Tests ====================

#[test]
fn test_demo_scene_builds_geometry() {
    let scene = Scene::demo();
    for object in &scene.objects {
        let mesh = object.mesh.build(object.color);
        assert!(mesh.triangle_count() > 0, "Object '{}' has no triangles", object.name);
        assert!(
            mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()),
            "Object '{}' has out-of-range indices",
            object.name
        );
    }
}

#[test]
fn test_spinning_object_follows_orbit_angle() {
    let scene = Scene::demo();
    let cube = scene.get_by_name("centerpiece").expect("Centerpiece should exist");
    assert!(cube.spins);

    let still = cube.transform.model_matrix(0.0);
    let turned = cube.transform.model_matrix(90.0);
    let x = turned.transform_vector3(Vec3::X);
    assert!(still.transform_vector3(Vec3::X).abs_diff_eq(Vec3::X, 1e-5));
    // Rotating +X by 90 degrees about +Y gives -Z
    assert!(x.abs_diff_eq(Vec3::NEG_Z, 1e-5));
}

#[test]
fn test_normal_matrix_keeps_normals_perpendicular() {
    let scene = Scene::demo();
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -10.0), Vec3::Y);
    let building = scene.get_by_name("building_1").expect("Building should exist");
    let model = building.transform.model_matrix(0.0) * Mat4::from_scale(Vec3::new(1.0, 3.0, 0.5));
    let normals = normal_matrix(view, model);

    // A tangent on the +X face is transformed by the model-view, the normal by its inverse-transpose
    let tangent = (view * model).transform_vector3(Vec3::Y);
    let normal = normals * Vec3::X;
    assert!(tangent.dot(normal).abs() < 1e-4);
}

// ==================== Rain Tests ====================

#[test]
fn test_rain_over_many_frames() {
    let mut rain = ParticleSystem::new(RainSettings::default());
    rain.initialize_all();

    let mut camera = Vec3::new(0.0, 0.0, 3.0);
    for frame in 0..500 {
        // Camera walks forward; rain stays anchored to it
        camera.z -= 0.05;
        let vertices = rain.update_and_emit(camera).to_vec();
        assert!(vertices.len() <= rain.max_vertices());
        assert_eq!(vertices.len() % 2, 0);

        for pair in vertices.chunks(2) {
            let (a, b) = (Vec3::from(pair[0].position), Vec3::from(pair[1].position));
            assert_eq!(a.x, b.x);
            assert_eq!(a.z, b.z);
            assert!((b.y - a.y - STREAK_LENGTH).abs() < 1e-4, "frame {}", frame);
            assert!((a.x - camera.x).abs() <= 10.0 + 1e-3);
            assert!((a.z - camera.z).abs() <= 10.0 + 1e-3);
        }

        for (index, particle) in rain.particles().iter().enumerate().step_by(2) {
            assert!(particle.alive);
            assert!(particle.life >= 0.0, "slot {} carried negative life", index);
            assert!(particle.offset.y > FLOOR_HEIGHT, "slot {} below the floor", index);
        }
    }
}

#[test]
fn test_same_seed_same_rain() {
    let mut a = ParticleSystem::new(RainSettings::default());
    let mut b = ParticleSystem::new(RainSettings::default());
    a.initialize_all();
    b.initialize_all();
    for _ in 0..50 {
        let va = a.update_and_emit(Vec3::ZERO).to_vec();
        let vb = b.update_and_emit(Vec3::ZERO).to_vec();
        assert_eq!(va, vb);
    }
}

// ==================== Mode Tests ====================

#[test]
fn test_night_and_light_orbit_leave_rain_alone() {
    let palette = LightPalette::default();
    let mut toggles = Toggles::default();
    let mut light = LightState::default();

    let mut with_toggles = ParticleSystem::new(RainSettings::default());
    let mut untouched = ParticleSystem::new(RainSettings::default());
    with_toggles.initialize_all();
    untouched.initialize_all();

    for frame in 0..20 {
        if frame % 5 == 0 {
            toggles.toggle_night();
            toggles.toggle_wireframe();
        }
        light.rotate(1.0);
        let _ = toggles.light_color(&palette);

        let a = with_toggles.update_and_emit(Vec3::ZERO).to_vec();
        let b = untouched.update_and_emit(Vec3::ZERO).to_vec();
        assert_eq!(a, b);
    }

    assert!((light.angle_degrees() - 20.0).abs() < 1e-3);
    // Four flips: back to day
    assert!(!toggles.is_night());
    assert_eq!(toggles.light_color(&palette), Vec3::ONE);
}
