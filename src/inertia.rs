use na::{Matrix3, SVector, Vector3};

use crate::{
    spatial::{algebra::cross_force, spatial_vector::SpatialVector},
    types::Float,
    util::mul_inertia,
};

/// Number of inertial parameters per body
pub const NUM_INERTIAL_PARAMETERS: usize = 10;

/// The 10 inertial parameters of a body, ordered
/// [mass, mx, my, mz, Ixx, Ixy, Ixz, Iyy, Iyz, Izz]
pub type InertialParameters = SVector<Float, NUM_INERTIAL_PARAMETERS>;

/// A spatial inertia represents the mass distribution of a rigid body.
/// A spatial inertia expressed in frame i is defined as:
/// I^i = | J         c_hat |
///       | c_hat^T     mI  |
/// where J is the mass moment of inertia, m is the total mass, and c is the
/// 'cross part', which is the center of mass position scaled by m.
///
/// !!! Warning
///     The __moment__ field of a __SpatialInertia__ is the moment of inertia
///     about the origin of its __frame__, not about the center of mass.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialInertia {
    pub frame: String,
    pub moment: Matrix3<Float>,
    pub cross_part: Vector3<Float>,
    pub mass: Float,
}

impl SpatialInertia {
    pub fn new(moment: Matrix3<Float>, cross_part: Vector3<Float>, mass: Float, frame: &str) -> Self {
        SpatialInertia {
            frame: frame.to_string(),
            moment,
            cross_part,
            mass,
        }
    }

    /// Build from the moment of inertia about the center of mass, shifting it
    /// to the frame origin with the parallel axis theorem.
    pub fn from_com(
        mass: Float,
        com: &Vector3<Float>,
        moment_about_com: &Matrix3<Float>,
        frame: &str,
    ) -> Self {
        let moment = moment_about_com
            + mass * (com.norm_squared() * Matrix3::identity() - com * com.transpose());
        SpatialInertia::new(moment, mass * com, mass, frame)
    }

    pub fn from_parameters(p: &InertialParameters, frame: &str) -> Self {
        #[rustfmt::skip]
        let moment = Matrix3::new(
            p[4], p[5], p[6],
            p[5], p[7], p[8],
            p[6], p[8], p[9],
        );
        SpatialInertia::new(moment, Vector3::new(p[1], p[2], p[3]), p[0], frame)
    }

    pub fn parameters(&self) -> InertialParameters {
        let c = &self.cross_part;
        let J = &self.moment;
        InertialParameters::from_column_slice(&[
            self.mass,
            c.x,
            c.y,
            c.z,
            J[(0, 0)],
            J[(0, 1)],
            J[(0, 2)],
            J[(1, 1)],
            J[(1, 2)],
            J[(2, 2)],
        ])
    }

    pub fn center_of_mass(&self) -> Vector3<Float> {
        self.cross_part / self.mass
    }

    /// Wrench the body exerts given its spatial velocity and acceleration,
    /// both expressed in the inertia's frame:
    ///     f = I a + v ×* (I v)
    pub fn wrench(&self, velocity: &SpatialVector, acceleration: &SpatialVector) -> SpatialVector {
        let (h_angular, h_linear) = mul_inertia(
            &self.moment,
            &self.cross_part,
            self.mass,
            &velocity.angular,
            &velocity.linear,
        );
        let (ia_angular, ia_linear) = mul_inertia(
            &self.moment,
            &self.cross_part,
            self.mass,
            &acceleration.angular,
            &acceleration.linear,
        );

        let momentum = SpatialVector::new(h_angular, h_linear);
        SpatialVector::new(ia_angular, ia_linear) + cross_force(velocity, &momentum)
    }
}
