use na::{Isometry3, Matrix3, Matrix3x6, Matrix4, Matrix6, Vector3, Vector6};

use crate::{spatial::spatial_vector::SpatialVector, types::Float};

/// Returns the skew-symmetric matrix of v, such that skew(v) * x = v × x
#[rustfmt::skip]
pub fn skew(v: &Vector3<Float>) -> Matrix3<Float> {
    Matrix3::new(
         0.0, -v.z,  v.y,
         v.z,  0.0, -v.x,
        -v.y,  v.x,  0.0,
    )
}

/// Linear map from the upper triangle of an inertia tensor,
///     p = [Ixx, Ixy, Ixz, Iyy, Iyz, Izz],
/// to the product I * w, i.e. moment_map(w) * p == I * w.
#[rustfmt::skip]
pub fn moment_map(w: &Vector3<Float>) -> Matrix3x6<Float> {
    Matrix3x6::new(
        w.x, w.y, w.z, 0.0, 0.0, 0.0,
        0.0, w.x, 0.0, w.y, w.z, 0.0,
        0.0, 0.0, w.x, 0.0, w.y, w.z,
    )
}

/// Adjoint of a rigid transform T = (R, t), acting on [angular; linear]
/// spatial motion vectors:
/// | R         0 |
/// | t_hat R   R |
pub fn adjoint(iso: &Isometry3<Float>) -> Matrix6<Float> {
    let R = iso.rotation.to_rotation_matrix().into_inner();
    let t = iso.translation.vector;

    let mut X = Matrix6::zeros();
    X.fixed_view_mut::<3, 3>(0, 0).copy_from(&R);
    X.fixed_view_mut::<3, 3>(3, 0).copy_from(&(skew(&t) * R));
    X.fixed_view_mut::<3, 3>(3, 3).copy_from(&R);
    X
}

/// Applies the adjoint of iso to a single spatial vector without forming the
/// 6x6 matrix.
pub fn ad_t(iso: &Isometry3<Float>, v: &Vector6<Float>) -> Vector6<Float> {
    let v = SpatialVector::from_vector6(v);
    let angular = iso.rotation * v.angular;
    let linear = iso.rotation * v.linear + iso.translation.vector.cross(&angular);
    SpatialVector::new(angular, linear).as_vector6()
}

/// Spatial cross product for force vectors: v ×* f
/// Reference: Chapter 2.9 Spatial Cross Products in "Robot Dynamics Algorithms" by Roy Featherstone
pub fn cross_force(v: &SpatialVector, f: &SpatialVector) -> SpatialVector {
    let angular = v.angular.cross(&f.angular) + v.linear.cross(&f.linear);
    let linear = v.angular.cross(&f.linear);
    SpatialVector::new(angular, linear)
}

/// Checks that a homogeneous matrix is a rigid transform: orthonormal
/// rotation block with determinant +1 and a [0 0 0 1] bottom row.
pub fn is_valid_transform(mat: &Matrix4<Float>) -> bool {
    let tol = 1e-6;
    let R: Matrix3<Float> = mat.fixed_view::<3, 3>(0, 0).into();

    let bottom_ok = mat[(3, 0)].abs() < tol
        && mat[(3, 1)].abs() < tol
        && mat[(3, 2)].abs() < tol
        && (mat[(3, 3)] - 1.0).abs() < tol;
    let orthonormal = (R.transpose() * R - Matrix3::identity()).abs().max() < tol;
    let proper = (R.determinant() - 1.0).abs() < tol;

    bottom_ok && orthonormal && proper
}
