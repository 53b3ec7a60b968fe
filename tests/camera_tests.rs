use glam::Vec3;
use melt_core::{Camera, OrbitControls, ViewportState};
use melt_core::viewport::clamp_pixel_ratio;

#[test]
fn camera_defaults() {
    let cam = Camera::new(1.5);
    assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 18.0));
    assert_eq!(cam.target, Vec3::ZERO);
    assert!((cam.fovy_radians - 35f32.to_radians()).abs() < 1e-6);
    assert_eq!((cam.znear, cam.zfar), (0.1, 100.0));
}

#[test]
fn view_matrix_puts_target_in_front() {
    let cam = Camera::new(1.0);
    let p = cam.view_matrix().transform_point3(Vec3::ZERO);
    assert!((p - Vec3::new(0.0, 0.0, -18.0)).length() < 1e-5);
}

#[test]
fn set_aspect_ignores_invalid_values() {
    let mut cam = Camera::new(1.0);
    cam.set_aspect(2.0);
    assert_eq!(cam.aspect, 2.0);
    cam.set_aspect(0.0);
    cam.set_aspect(f32::NAN);
    assert_eq!(cam.aspect, 2.0);
}

#[test]
fn idle_controls_do_not_move_camera() {
    let mut cam = Camera::new(1.0);
    let mut controls = OrbitControls::default();
    assert!(controls.is_settled());
    assert!(!controls.update(&mut cam));
    assert!((cam.eye - Vec3::new(0.0, 0.0, 18.0)).length() < 1e-4);
}

#[test]
fn rotation_is_damped_and_settles() {
    let mut cam = Camera::new(1.0);
    let mut controls = OrbitControls::default();
    controls.rotate_by_pixels(100.0, 0.0, 600.0);
    assert!(controls.update(&mut cam));
    let first = cam.eye;
    let mut last_step = f32::MAX;
    for _ in 0..20 {
        let before = cam.eye;
        controls.update(&mut cam);
        let step = (cam.eye - before).length();
        assert!(step <= last_step + 1e-5);
        last_step = step;
    }
    for _ in 0..600 {
        controls.update(&mut cam);
    }
    assert!(controls.is_settled());
    assert!(cam.eye.distance(first) > 0.0);
    assert!((cam.eye.length() - 18.0).abs() < 1e-3);
}

#[test]
fn polar_angle_never_reaches_the_pole() {
    let mut cam = Camera::new(1.0);
    let mut controls = OrbitControls::default();
    for _ in 0..50 {
        controls.rotate_by_pixels(0.0, 5000.0, 600.0);
        controls.update(&mut cam);
    }
    let horizontal = (cam.eye.x * cam.eye.x + cam.eye.z * cam.eye.z).sqrt();
    assert!(horizontal > 0.0);
    assert!(cam.eye.y.abs() < 18.0);
}

#[test]
fn dolly_is_clamped() {
    let mut cam = Camera::new(1.0);
    let mut controls = OrbitControls::default();
    for _ in 0..200 {
        controls.dolly(-1.0);
        controls.update(&mut cam);
    }
    assert!((cam.eye.length() - controls.min_distance).abs() < 1e-3);
    for _ in 0..200 {
        controls.dolly(1.0);
        controls.update(&mut cam);
    }
    assert!((cam.eye.length() - controls.max_distance).abs() < 1e-2);
}

#[test]
fn viewport_resolution_and_clamping() {
    assert_eq!(clamp_pixel_ratio(3.0), 2.0);
    assert_eq!(clamp_pixel_ratio(1.5), 1.5);
    assert_eq!(clamp_pixel_ratio(0.0), 1.0);
    assert_eq!(clamp_pixel_ratio(f32::NAN), 1.0);

    let vp = ViewportState::new(640.0, 480.0, 2.0);
    assert_eq!(vp.resolution(), glam::Vec2::new(1280.0, 960.0));
    assert_eq!(vp.physical_size(), (1280, 960));
    assert!((vp.aspect() - 4.0 / 3.0).abs() < 1e-6);

    let tiny = ViewportState::new(0.0, 0.0, 1.0);
    assert_eq!((tiny.width, tiny.height), (1.0, 1.0));
}
