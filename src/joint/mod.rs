use euler::EulerJoint;
use na::{Isometry3, Matrix4, Matrix6x3, Vector3};

use crate::types::Float;

pub mod euler;

/// Kinematic capabilities of a joint. Every output is recomputed from the
/// joint's current coordinates and rates.
pub trait JointKinematics {
    fn update_transform(&mut self) -> &Isometry3<Float>;
    fn update_jacobian(&mut self) -> &Matrix6x3<Float>;
    fn update_jacobian_time_deriv(&mut self) -> &Matrix6x3<Float>;
    fn elemental_transform(&self, index: usize) -> Isometry3<Float>;
    fn elemental_transform_derivative(&self, index: usize) -> Matrix4<Float>;
}

impl JointKinematics for EulerJoint {
    fn update_transform(&mut self) -> &Isometry3<Float> {
        EulerJoint::update_transform(self)
    }

    fn update_jacobian(&mut self) -> &Matrix6x3<Float> {
        EulerJoint::update_jacobian(self)
    }

    fn update_jacobian_time_deriv(&mut self) -> &Matrix6x3<Float> {
        EulerJoint::update_jacobian_time_deriv(self)
    }

    fn elemental_transform(&self, index: usize) -> Isometry3<Float> {
        EulerJoint::elemental_transform(self, index)
    }

    fn elemental_transform_derivative(&self, index: usize) -> Matrix4<Float> {
        EulerJoint::elemental_transform_derivative(self, index)
    }
}

pub enum Joint {
    EulerJoint(EulerJoint),
}

impl Joint {
    pub fn dof(&self) -> usize {
        match self {
            Joint::EulerJoint(_) => 3,
        }
    }

    /// Set coordinates and rates, then recompute every kinematic output
    pub fn update(&mut self, q: &[Float], v: &[Float]) {
        match self {
            Joint::EulerJoint(joint) => {
                if q.len() != 3 || v.len() != 3 {
                    panic!(
                        "Euler joint expects 3 coordinates and 3 rates, got {} and {}",
                        q.len(),
                        v.len()
                    );
                }
                joint.update(Vector3::from_column_slice(q), Vector3::from_column_slice(v));
            }
        }
    }

    pub fn transform(&self) -> &Isometry3<Float> {
        match self {
            Joint::EulerJoint(joint) => joint.transform(),
        }
    }

    pub fn jacobian(&self) -> &Matrix6x3<Float> {
        match self {
            Joint::EulerJoint(joint) => joint.jacobian(),
        }
    }

    pub fn kinematics(&mut self) -> &mut dyn JointKinematics {
        match self {
            Joint::EulerJoint(joint) => joint,
        }
    }
}
