// Viewport and camera state shared by the resize handler and the renderer.
// Platform-free so it can be checked on the host.

use super::constants::MAX_PIXEL_RATIO;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Perspective camera placed by position + XYZ Euler rotation.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub rotation: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(-0.1, -1.5, 20.0),
            rotation: Vec3::new(0.08, -0.004, 0.0),
            aspect,
            fovy_radians: 60f32.to_radians(),
            znear: 1.0,
            zfar: 1000.0,
        }
    }

    /// Clip-space projection (depth 0..1).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// World to view space: inverse of the camera's own transform.
    pub fn view_matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_rotation_translation(rot, self.eye).inverse()
    }
}

/// Sizes produced by a resize, ready for the surface and post chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportChange {
    pub width: u32,
    pub height: u32,
    pub backing_width: u32,
    pub backing_height: u32,
    pub aspect: f32,
}

#[derive(Clone, Debug)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f32,
    camera: Camera,
}

/// Device pixel ratio clamped to bound GPU cost on dense displays.
#[inline]
pub fn capped_pixel_ratio(device_pixel_ratio: f64) -> f32 {
    if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return 1.0;
    }
    (device_pixel_ratio as f32).min(MAX_PIXEL_RATIO)
}

#[inline]
fn aspect_of(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        let mut vp = Self {
            width,
            height,
            pixel_ratio: capped_pixel_ratio(device_pixel_ratio),
            camera: Camera::new(1.0),
        };
        vp.configure_camera(aspect_of(width, height));
        vp
    }

    pub fn configure_camera(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Recompute aspect and render sizes for a new window size. One call per
    /// resize event; no debouncing.
    pub fn on_resize(&mut self, width: u32, height: u32) -> ViewportChange {
        self.width = width;
        self.height = height;
        self.configure_camera(aspect_of(width, height));
        self.change()
    }

    /// Pick up a new device pixel ratio (e.g. window moved to another screen).
    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: f64) {
        self.pixel_ratio = capped_pixel_ratio(device_pixel_ratio);
    }

    pub fn change(&self) -> ViewportChange {
        let (backing_width, backing_height) = self.backing_size();
        ViewportChange {
            width: self.width,
            height: self.height,
            backing_width,
            backing_height,
            aspect: self.camera.aspect,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Drawing-buffer size in device pixels, never zero.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width as f32 * self.pixel_ratio).round() as u32;
        let h = (self.height as f32 * self.pixel_ratio).round() as u32;
        (w.max(1), h.max(1))
    }
}
