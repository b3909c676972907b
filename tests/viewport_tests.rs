// Host-side tests for viewport sizing and the camera.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod noel {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod viewport {
        include!("../src/core/viewport.rs");
    }
}

use glam::Vec3;
use noel::viewport::*;

#[test]
fn resize_sets_exact_aspect_and_sizes() {
    let mut vp = Viewport::new(800, 600, 1.0);
    let change = vp.on_resize(1280, 720);
    assert_eq!(change.aspect, 1280.0 / 720.0);
    assert_eq!((change.width, change.height), (1280, 720));
    assert_eq!((change.backing_width, change.backing_height), (1280, 720));
    assert_eq!(vp.camera().aspect, change.aspect);
}

#[test]
fn backing_size_follows_pixel_ratio() {
    let mut vp = Viewport::new(375, 667, 1.5);
    assert_eq!(vp.pixel_ratio(), 1.5);
    let change = vp.on_resize(375, 667);
    assert_eq!(change.backing_width, (375.0f32 * 1.5).round() as u32);
    assert_eq!(change.backing_height, (667.0f32 * 1.5).round() as u32);
}

#[test]
fn pixel_ratio_is_capped() {
    assert_eq!(capped_pixel_ratio(3.0), 2.0);
    assert_eq!(capped_pixel_ratio(1.5), 1.5);
    assert_eq!(capped_pixel_ratio(f64::NAN), 1.0);
    assert_eq!(capped_pixel_ratio(0.0), 1.0);
    assert_eq!(capped_pixel_ratio(-1.0), 1.0);

    let mut vp = Viewport::new(100, 100, 1.0);
    vp.set_device_pixel_ratio(4.0);
    assert_eq!(vp.backing_size(), (200, 200));
}

#[test]
fn zero_height_does_not_divide_by_zero() {
    let mut vp = Viewport::new(0, 0, 1.0);
    assert_eq!(vp.backing_size(), (1, 1));
    let change = vp.on_resize(640, 0);
    assert!(change.aspect.is_finite());
    assert_eq!(change.aspect, 640.0);
    assert_eq!(change.backing_height, 1);
}

#[test]
fn camera_placement() {
    let cam = Camera::new(1.0);
    assert_eq!(cam.eye, Vec3::new(-0.1, -1.5, 20.0));
    assert_eq!(cam.rotation, Vec3::new(0.08, -0.004, 0.0));
    assert!((cam.fovy_radians - 60f32.to_radians()).abs() < 1e-6);
    assert_eq!((cam.znear, cam.zfar), (1.0, 1000.0));
}

#[test]
fn view_matrix_moves_eye_to_origin() {
    let cam = Camera::new(16.0 / 9.0);
    let p = cam.view_matrix().transform_point3(cam.eye);
    assert!(p.length() < 1e-4, "eye maps to {:?}", p);

    // a tree in front of the camera ends up in front (negative view z)
    let ahead = cam.view_matrix().transform_point3(Vec3::new(0.0, 0.0, -30.0));
    assert!(ahead.z < 0.0);
}
