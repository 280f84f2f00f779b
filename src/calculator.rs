use na::{DMatrix, Matrix6};
use tracing::warn;

use crate::{
    body::{BodyProvider, BodyState},
    error::{Result, SysIdError},
    inertia::NUM_INERTIAL_PARAMETERS,
    regressor::{body_regressor, Regressor},
    types::Float,
};

/// Builds per-instant identification quantities from the current state of a
/// body collection.
pub struct SystemCalculator<'a, B: BodyProvider + ?Sized> {
    bodies: &'a B,
}

impl<'a, B: BodyProvider + ?Sized> SystemCalculator<'a, B> {
    pub fn new(bodies: &'a B) -> Self {
        SystemCalculator { bodies }
    }

    pub fn bodies(&self) -> &'a B {
        self.bodies
    }

    fn body(&self, index: usize) -> Result<&'a BodyState> {
        self.bodies.body_at(index).ok_or(SysIdError::InvalidIndex {
            index,
            count: self.bodies.body_count(),
        })
    }

    /// Regressor of body `index` at its current velocity and acceleration
    pub fn try_regressor(&self, index: usize) -> Result<Regressor> {
        let body = self.body(index)?;
        Ok(body_regressor(&body.velocity, &body.acceleration))
    }

    /// Like `try_regressor`, but an invalid index is logged and yields the
    /// all-zero regressor. A zero regressor must not be stacked into an
    /// identification problem.
    pub fn regressor(&self, index: usize) -> Regressor {
        self.try_regressor(index).unwrap_or_else(|err| {
            warn!("{}", err);
            Regressor::zeros()
        })
    }

    /// Adjoint transform carrying spatial motion vectors expressed in body
    /// `from`'s frame into body `to`'s frame
    pub fn try_spatial_transform(&self, from: usize, to: usize) -> Result<Matrix6<Float>> {
        let from = self.body(from)?;
        let to = self.body(to)?;
        let from_to_to = &to.transform.inv() * &from.transform;
        Ok(from_to_to.adjoint())
    }

    /// Like `try_spatial_transform`, but an invalid index is logged and
    /// yields the identity
    pub fn spatial_transform(&self, from: usize, to: usize) -> Matrix6<Float> {
        self.try_spatial_transform(from, to).unwrap_or_else(|err| {
            warn!("{}", err);
            Matrix6::identity()
        })
    }

    /// Block-diagonal regressor of several bodies at the current instant, for
    /// identifying their parameters jointly. Parameter block k belongs to
    /// `indices[k]`.
    pub fn stacked_regressor(&self, indices: &[usize]) -> Result<DMatrix<Float>> {
        let n = NUM_INERTIAL_PARAMETERS;
        let mut A = DMatrix::zeros(6 * indices.len(), n * indices.len());
        for (k, &index) in indices.iter().enumerate() {
            let block = self.try_regressor(index)?;
            A.view_mut((6 * k, n * k), (6, n)).copy_from(&block);
        }
        Ok(A)
    }
}

#[cfg(test)]
mod tests {
    use na::{vector, Isometry3, Translation3, UnitQuaternion, Vector6};
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        assert_vec_close,
        spatial::{algebra::adjoint, spatial_vector::SpatialVector},
        util::test_utils::{random_isometry, random_vector},
    };

    use super::*;

    fn sample_bodies() -> Vec<BodyState> {
        let mut rng = StdRng::seed_from_u64(31);
        ["base", "upper", "lower"]
            .iter()
            .map(|name| {
                BodyState::new(name, &random_isometry(&mut rng, 2.0)).with_motion(
                    SpatialVector::new(random_vector(&mut rng, 1.0), random_vector(&mut rng, 1.0)),
                    SpatialVector::new(random_vector(&mut rng, 1.0), random_vector(&mut rng, 1.0)),
                )
            })
            .collect()
    }

    #[test]
    fn regressor_uses_body_motion() {
        // Arrange
        let bodies = sample_bodies();
        let calculator = SystemCalculator::new(&bodies);

        // Act
        let A = calculator.regressor(1);

        // Assert
        assert_eq!(A, body_regressor(&bodies[1].velocity, &bodies[1].acceleration));
    }

    #[test]
    fn invalid_regressor_index() {
        // Arrange
        let bodies = sample_bodies();
        let calculator = SystemCalculator::new(&bodies);

        // Act
        let sentinel = calculator.regressor(3);
        let result = calculator.try_regressor(3);

        // Assert
        assert_eq!(sentinel, Regressor::zeros());
        assert_eq!(result, Err(SysIdError::InvalidIndex { index: 3, count: 3 }));
    }

    #[test]
    fn spatial_transform_to_self_is_identity() {
        // Arrange
        let bodies = sample_bodies();
        let calculator = SystemCalculator::new(&bodies);

        for i in 0..bodies.len() {
            // Act
            let X = calculator.spatial_transform(i, i);

            // Assert
            assert_vec_close!(X, Matrix6::<Float>::identity(), 1e-12);
        }
    }

    #[test]
    fn spatial_transform_between_offset_bodies() {
        // Arrange
        let rotation = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.5);
        let bodies = vec![
            BodyState::new("a", &Isometry3::from_parts(Translation3::new(1.0, 0.0, 0.0), rotation)),
            BodyState::new("b", &Isometry3::translation(0.0, 2.0, 0.0)),
        ];
        let calculator = SystemCalculator::new(&bodies);

        // Act
        let X = calculator.spatial_transform(0, 1);

        // Assert
        let a_to_b = bodies[1].transform.iso.inverse() * bodies[0].transform.iso;
        assert_vec_close!(X, adjoint(&a_to_b), 1e-12);
        assert_vec_close!(a_to_b.translation.vector, vector![1.0, -2.0, 0.0], 1e-12);
    }

    #[test]
    fn spatial_transforms_compose_through_intermediate_body() {
        // Arrange
        let bodies = sample_bodies();
        let calculator = SystemCalculator::new(&bodies);

        // Act
        let direct = calculator.spatial_transform(0, 2);
        let via = calculator.spatial_transform(1, 2) * calculator.spatial_transform(0, 1);

        // Assert
        assert_vec_close!(direct, via, 1e-10);
    }

    #[test]
    fn invalid_spatial_transform_index() {
        // Arrange
        let bodies = sample_bodies();
        let calculator = SystemCalculator::new(&bodies);

        // Act & Assert
        assert_eq!(calculator.spatial_transform(0, 9), Matrix6::identity());
        assert_eq!(calculator.spatial_transform(9, 0), Matrix6::identity());
        assert!(matches!(
            calculator.try_spatial_transform(5, 0),
            Err(SysIdError::InvalidIndex { index: 5, .. })
        ));
    }

    #[test]
    fn stacked_regressor_is_block_diagonal() {
        // Arrange
        let bodies = sample_bodies();
        let calculator = SystemCalculator::new(&bodies);

        // Act
        let A = calculator.stacked_regressor(&[2, 0]).unwrap();

        // Assert
        assert_eq!(A.shape(), (12, 20));
        assert_eq!(A.view((0, 0), (6, 10)), calculator.regressor(2));
        assert_eq!(A.view((6, 10), (6, 10)), calculator.regressor(0));
        assert!(A.view((0, 10), (6, 10)).iter().all(|x| *x == 0.0));
        assert!(A.view((6, 0), (6, 10)).iter().all(|x| *x == 0.0));

        let p = na::DVector::from_element(20, 1.0);
        let f = &A * &p;
        let expected: Vector6<Float> = calculator.regressor(2) * na::SVector::<Float, 10>::repeat(1.0);
        assert_vec_close!(f.rows(0, 6), expected, 1e-12);
    }

    #[test]
    fn stacked_regressor_rejects_invalid_index() {
        let bodies = sample_bodies();
        let calculator = SystemCalculator::new(&bodies);
        assert!(calculator.stacked_regressor(&[0, 4]).is_err());
    }

    #[test]
    fn works_over_slices() {
        let bodies = sample_bodies();
        let calculator = SystemCalculator::new(&bodies[..2]);
        assert_eq!(calculator.bodies().body_count(), 2);
        assert_eq!(calculator.try_regressor(2).unwrap_err(), SysIdError::InvalidIndex { index: 2, count: 2 });
    }
}
