use std::ops::Mul;

use na::{Isometry3, Matrix6, Translation3, UnitQuaternion};
use nalgebra::{Matrix3, Vector3};

use crate::{spatial::algebra::adjoint, types::Float};

/// A rigid transformation from one 3-dimensional Cartesian coordinate system
/// to another. Frames are tracked by name so that compositions can be
/// checked.
#[derive(Debug, PartialEq, Clone)]
pub struct Transform3D {
    pub from: String,
    pub to: String,
    pub iso: Isometry3<Float>,
}

impl Transform3D {
    pub fn new(from: &str, to: &str, iso: &Isometry3<Float>) -> Self {
        Transform3D {
            from: from.to_string(),
            to: to.to_string(),
            iso: *iso,
        }
    }

    pub fn new_xyz_rpy(from: &str, to: &str, xyz: &[Float; 3], rpy: &[Float; 3]) -> Self {
        let translation = Translation3::new(xyz[0], xyz[1], xyz[2]);
        let rotation = UnitQuaternion::from_euler_angles(rpy[0], rpy[1], rpy[2]);
        Transform3D::new(from, to, &Isometry3::from_parts(translation, rotation))
    }

    pub fn identity(from: &str, to: &str) -> Self {
        Transform3D::new(from, to, &Isometry3::identity())
    }

    pub fn move_xyz(from: &str, to: &str, x: Float, y: Float, z: Float) -> Self {
        Transform3D::new(from, to, &Isometry3::translation(x, y, z))
    }

    pub fn inv(&self) -> Self {
        Transform3D {
            from: self.to.clone(),
            to: self.from.clone(),
            iso: self.iso.inverse(),
        }
    }

    pub fn rot(&self) -> Matrix3<Float> {
        self.iso.rotation.to_rotation_matrix().into_inner()
    }

    pub fn trans(&self) -> Vector3<Float> {
        self.iso.translation.vector
    }

    /// 6x6 matrix carrying spatial motion vectors expressed in the `from`
    /// frame into the `to` frame.
    pub fn adjoint(&self) -> Matrix6<Float> {
        adjoint(&self.iso)
    }
}

impl Mul for Transform3D {
    type Output = Transform3D;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl<'a, 'b> Mul<&'b Transform3D> for &'a Transform3D {
    type Output = Transform3D;
    fn mul(self, rhs: &'b Transform3D) -> Self::Output {
        if self.from != rhs.to {
            panic!(
                "lhs from frame {} is not same as rhs to frame {}!",
                self.from, rhs.to
            );
        }
        Transform3D {
            from: rhs.from.clone(),
            to: self.to.clone(),
            iso: self.iso * rhs.iso,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_vec_close, joint::euler::rot_z, WORLD_FRAME};

    use super::*;

    #[test]
    fn compose_tracks_frames() {
        // Arrange
        let a_to_world = Transform3D::move_xyz("a", WORLD_FRAME, 1.0, 0.0, 0.0);
        let b_to_a = Transform3D::new_xyz_rpy("b", "a", &[0.0, 0.0, 2.0], &[0.0, 0.0, 0.5]);

        // Act
        let b_to_world = &a_to_world * &b_to_a;

        // Assert
        assert_eq!(b_to_world.from, "b");
        assert_eq!(b_to_world.to, WORLD_FRAME);
        assert_vec_close!(b_to_world.trans(), Vector3::new(1.0, 0.0, 2.0), 1e-12);
        assert_vec_close!(b_to_world.rot(), rot_z(0.5), 1e-12);
    }

    #[test]
    fn inverse_composes_to_identity() {
        // Arrange
        let t = Transform3D::new_xyz_rpy("b", "a", &[0.3, -1.0, 2.0], &[0.1, 0.2, 0.3]);

        // Act
        let round_trip = &t.inv() * &t;

        // Assert
        assert_eq!(round_trip.from, "b");
        assert_eq!(round_trip.to, "b");
        assert_vec_close!(round_trip.iso.to_homogeneous(), na::Matrix4::<Float>::identity(), 1e-12);
    }

    #[test]
    #[should_panic]
    fn mismatched_frames_panic() {
        let a = Transform3D::identity("a", WORLD_FRAME);
        let b = Transform3D::identity("b", "c");
        let _ = &a * &b;
    }
}
