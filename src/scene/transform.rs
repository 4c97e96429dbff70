//! Rigid-body transform applied to the whole particle field.

use glam::{EulerRot, Mat4, Vec3};

/// Translation offset and euler rotation composed into the model matrix.
///
/// The animation loop rewrites `offset` from the pointer state and the
/// rotation angles from elapsed time; the individual particles never
/// move on the CPU.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneTransform {
    pub offset: Vec3,
    pub rotation: Vec3,
}

impl SceneTransform {
    /// Model matrix: translation composed with YXZ euler rotation.
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.offset)
            * Mat4::from_euler(
                EulerRot::YXZ,
                self.rotation.y,
                self.rotation.x,
                self.rotation.z,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_identity_by_default() {
        let transform = SceneTransform::default();
        assert_eq!(transform.model(), Mat4::IDENTITY);
    }

    #[test]
    fn test_offset_translates() {
        let transform = SceneTransform {
            offset: Vec3::new(1.5, -2.0, 0.0),
            rotation: Vec3::ZERO,
        };
        let p = transform.model() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((p.x - 1.5).abs() < 1e-6);
        assert!((p.y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_z_rotation_spins_in_plane() {
        let transform = SceneTransform {
            offset: Vec3::ZERO,
            rotation: Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
        };
        let p = transform.model() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }
}
