use na::{SMatrix, Vector3};

use crate::{
    inertia::NUM_INERTIAL_PARAMETERS,
    spatial::{
        algebra::{moment_map, skew},
        spatial_vector::SpatialVector,
    },
    types::Float,
};

/// Linear map from a body's inertial parameters
/// [mass, mx, my, mz, Ixx, Ixy, Ixz, Iyy, Iyz, Izz] to the wrench
/// [moment; force] it exerts.
pub type Regressor = SMatrix<Float, 6, NUM_INERTIAL_PARAMETERS>;

/// Computes the body regressor A such that A * p = I a + v ×* (I v), given
/// the body's spatial velocity and acceleration in its own frame.
///
/// With d = v̇ + ω × v the acceleration of the frame origin:
/// | 0    -d_hat            L(ω̇) + ω_hat L(ω) |
/// | d    ω̇_hat + ω_hat²    0                 |
/// where L is `moment_map`.
pub fn body_regressor(velocity: &SpatialVector, acceleration: &SpatialVector) -> Regressor {
    let w = &velocity.angular;
    let v = &velocity.linear;
    let w_dot = &acceleration.angular;
    let d: Vector3<Float> = acceleration.linear + w.cross(v);

    let S_w = skew(w);
    let mut A = Regressor::zeros();

    // moment rows
    A.fixed_view_mut::<3, 3>(0, 1).copy_from(&(-skew(&d)));
    A.fixed_view_mut::<3, 6>(0, 4)
        .copy_from(&(moment_map(w_dot) + S_w * moment_map(w)));

    // force rows
    A.fixed_view_mut::<3, 1>(3, 0).copy_from(&d);
    A.fixed_view_mut::<3, 3>(3, 1)
        .copy_from(&(skew(w_dot) + S_w * S_w));

    A
}
