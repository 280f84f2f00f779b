use std::ops::Add;

use crate::types::Float;
use na::{zero, Vector3, Vector6};

/// A 6-dimensional [angular; linear] vector. Depending on context it is a
/// spatial velocity, a spatial acceleration, or a wrench (moment; force).
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct SpatialVector {
    pub angular: Vector3<Float>,
    pub linear: Vector3<Float>,
}

impl SpatialVector {
    pub fn zero() -> Self {
        SpatialVector {
            angular: zero(),
            linear: zero(),
        }
    }

    pub fn new(angular: Vector3<Float>, linear: Vector3<Float>) -> Self {
        SpatialVector { angular, linear }
    }

    pub fn angular(angular: Vector3<Float>) -> Self {
        SpatialVector {
            angular,
            linear: zero(),
        }
    }

    pub fn linear(linear: Vector3<Float>) -> Self {
        SpatialVector {
            angular: zero(),
            linear,
        }
    }

    pub fn from_vector6(v: &Vector6<Float>) -> Self {
        SpatialVector {
            angular: Vector3::new(v[0], v[1], v[2]),
            linear: Vector3::new(v[3], v[4], v[5]),
        }
    }

    pub fn as_vector6(&self) -> Vector6<Float> {
        Vector6::new(
            self.angular.x,
            self.angular.y,
            self.angular.z,
            self.linear.x,
            self.linear.y,
            self.linear.z,
        )
    }
}

impl Add for &SpatialVector {
    type Output = SpatialVector;

    fn add(self, rhs: Self) -> Self::Output {
        SpatialVector {
            angular: self.angular + rhs.angular,
            linear: self.linear + rhs.linear,
        }
    }
}

impl Add for SpatialVector {
    type Output = SpatialVector;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}
