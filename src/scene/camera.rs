//! Perspective camera.

use glam::{Mat4, Vec3};

const FOV_Y_DEGREES: f32 = 15.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// Perspective camera positioned on the +Z axis, looking at the origin.
///
/// The distance is fixed for the lifetime of a mounted instance; only
/// the aspect ratio changes, driven by surface resizes.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    distance: f32,
    aspect: f32,
}

impl Camera {
    /// Create a camera at `distance` along the view axis.
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            aspect: 1.0,
        }
    }

    /// Update the aspect ratio from surface dimensions.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Current aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Camera distance along the view axis.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// View matrix.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, self.distance), Vec3::ZERO, Vec3::Y)
    }

    /// Projection matrix.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect, Z_NEAR, Z_FAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_view_translates_by_distance() {
        let camera = Camera::new(20.0);
        let origin = camera.view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        // The origin ends up `distance` in front of the camera (-Z in view space).
        assert!((origin.z + 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_aspect_follows_resize() {
        let mut camera = Camera::new(20.0);
        camera.set_aspect(1920, 1080);
        assert!((camera.aspect() - 1920.0 / 1080.0).abs() < 1e-6);

        // Degenerate sizes are clamped rather than dividing by zero.
        camera.set_aspect(100, 0);
        assert!(camera.aspect().is_finite());
    }

    #[test]
    fn test_projection_depends_on_aspect() {
        let mut camera = Camera::new(20.0);
        camera.set_aspect(640, 480);
        let narrow = camera.projection();
        camera.set_aspect(1920, 480);
        let wide = camera.projection();
        assert_ne!(narrow.col(0).x, wide.col(0).x);
    }
}
