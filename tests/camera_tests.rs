// Host-side tests for the camera and damped orbit controls.

use galaxy_core::{Camera, OrbitControls};
use glam::Vec3;

fn distance(c: &Camera) -> f32 {
    (c.eye - c.target).length()
}

#[test]
fn default_camera_sits_in_front_of_the_galaxy() {
    let cam = Camera::new(16.0 / 9.0);
    assert_eq!(cam.eye, Vec3::new(0.0, 30.0, 800.0));
    assert_eq!(cam.target, Vec3::ZERO);
    assert!((cam.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
    assert_eq!(cam.znear, 0.8);
    assert_eq!(cam.zfar, 10_000.0);
}

#[test]
fn set_aspect_tolerates_zero_sizes() {
    let mut cam = Camera::new(1.0);
    cam.set_aspect(1920, 1080);
    assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    cam.set_aspect(0, 0);
    assert_eq!(cam.aspect, 1.0);
}

#[test]
fn billboard_axes_are_orthonormal() {
    let cam = Camera::new(1.0);
    let (right, up) = cam.billboard_axes();
    assert!((right.length() - 1.0).abs() < 1e-5);
    assert!((up.length() - 1.0).abs() < 1e-5);
    assert!(right.dot(up).abs() < 1e-5);
    // eye on +Z looking at the origin: screen right is world +X
    assert!((right - Vec3::X).length() < 1e-5);
}

#[test]
fn controls_without_input_hold_the_camera() {
    let mut cam = Camera::new(1.0);
    let start = cam.eye;
    let mut controls = OrbitControls::default();
    for _ in 0..100 {
        controls.update(&mut cam);
    }
    assert!((cam.eye - start).length() < 1e-2, "drifted to {:?}", cam.eye);
}

#[test]
fn drag_eases_out_to_the_full_rotation() {
    let mut cam = Camera::new(1.0);
    let mut controls = OrbitControls::default();
    let start_distance = distance(&cam);
    controls.rotate(100.0, 0.0, 800.0);

    let mut steps = Vec::new();
    let mut last_theta = cam.eye.x.atan2(cam.eye.z);
    for _ in 0..600 {
        controls.update(&mut cam);
        let theta = cam.eye.x.atan2(cam.eye.z);
        steps.push((theta - last_theta).abs());
        last_theta = theta;
    }
    // 2π · 100 / 800, applied leftwards
    let expected = -std::f32::consts::TAU * 100.0 / 800.0;
    assert!((last_theta - expected).abs() < 1e-3, "theta {}", last_theta);
    assert!(steps[0] > steps[10] && steps[10] > steps[100]);
    assert!((distance(&cam) - start_distance).abs() < 0.05);
}

#[test]
fn zoom_clamps_to_distance_limits() {
    let mut cam = Camera::new(1.0);
    let mut controls = OrbitControls::default();
    for _ in 0..200 {
        controls.zoom(-1.0);
        controls.update(&mut cam);
    }
    assert!((distance(&cam) - controls.min_distance).abs() < 1e-2);
    for _ in 0..400 {
        controls.zoom(1.0);
        controls.update(&mut cam);
    }
    assert!((distance(&cam) - controls.max_distance).abs() < 0.5);
}

#[test]
fn vertical_drag_never_flips_over_the_pole() {
    let mut cam = Camera::new(1.0);
    let mut controls = OrbitControls::default();
    controls.rotate(0.0, 50_000.0, 800.0);
    for _ in 0..400 {
        controls.update(&mut cam);
        assert!(cam.eye.is_finite());
        assert!(cam.view_proj().is_finite());
        assert!(cam.eye.y > 0.0);
    }
}
