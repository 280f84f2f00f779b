use rand::{rngs::StdRng, Rng, SeedableRng};
use rigid_sysid::{
    assert_close, assert_vec_close,
    body::BodyState,
    calculator::SystemCalculator,
    identification::SystemIdentifier,
    inertia::SpatialInertia,
    na::{vector, DMatrix, DVector, Isometry3, Matrix3, Vector3},
    regressor::Regressor,
    report::ParameterTable,
    spatial::spatial_vector::SpatialVector,
    types::Float,
};

fn random_vector(rng: &mut StdRng, range: Float) -> Vector3<Float> {
    vector![
        rng.random_range(-range..range),
        rng.random_range(-range..range),
        rng.random_range(-range..range)
    ]
}

fn ground_truth() -> Vec<SpatialInertia> {
    vec![
        SpatialInertia::from_com(
            5.0,
            &vector![0.1, 0.0, -0.3],
            &Matrix3::from_diagonal(&vector![0.2, 0.25, 0.1]),
            "upper_arm",
        ),
        SpatialInertia::from_com(
            2.0,
            &vector![0.0, 0.05, 0.2],
            &Matrix3::new(0.04, 0.002, 0.0, 0.002, 0.05, -0.001, 0.0, -0.001, 0.03),
            "forearm",
        ),
    ]
}

/// Collects P samples of stacked two-body regressors and the wrenches the
/// ground truth bodies exert
fn collect_samples(
    rng: &mut StdRng,
    num_samples: usize,
    motion: impl Fn(&mut StdRng) -> (SpatialVector, SpatialVector),
) -> (Vec<DVector<Float>>, Vec<DMatrix<Float>>) {
    let truth = ground_truth();
    let mut forces = vec![];
    let mut regressors = vec![];
    for _ in 0..num_samples {
        let mut bodies = vec![];
        let mut f = DVector::zeros(12);
        for (k, inertia) in truth.iter().enumerate() {
            let (velocity, acceleration) = motion(rng);
            let wrench = inertia.wrench(&velocity, &acceleration);
            f.rows_mut(6 * k, 6).copy_from(&wrench.as_vector6());
            bodies.push(
                BodyState::new(&inertia.frame, &Isometry3::translation(0.0, 0.0, k as Float))
                    .with_motion(velocity, acceleration),
            );
        }
        let calculator = SystemCalculator::new(&bodies);
        regressors.push(calculator.stacked_regressor(&[0, 1]).unwrap());
        forces.push(f);
    }
    (forces, regressors)
}

fn truth_vector() -> DVector<Float> {
    let truth = ground_truth();
    let mut x = DVector::zeros(20);
    x.rows_mut(0, 10).copy_from(&truth[0].parameters());
    x.rows_mut(10, 10).copy_from(&truth[1].parameters());
    x
}

#[test]
fn two_bodies_fifty_noiseless_samples() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(2024);
    let (forces, regressors) = collect_samples(&mut rng, 50, |rng| {
        (
            SpatialVector::new(random_vector(rng, 2.0), random_vector(rng, 1.0)),
            SpatialVector::new(random_vector(rng, 4.0), random_vector(rng, 3.0)),
        )
    });

    // Act
    let identification = SystemIdentifier::default()
        .identify(&forces, &regressors)
        .unwrap();

    // Assert
    let x = truth_vector();
    assert_eq!(identification.rank, 20);
    assert_eq!(identification.num_bodies(), 2);
    let relative_error = (&identification.parameters - &x).norm() / x.norm();
    assert!(relative_error <= 1e-6, "relative error {}", relative_error);

    let forearm = identification.body_inertia(1, "forearm").unwrap();
    assert_close!(forearm.mass, 2.0, 1e-6);
    assert_vec_close!(forearm.center_of_mass(), vector![0.0, 0.05, 0.2], 1e-6);
}

#[test]
fn translation_only_trajectory_leaves_inertia_unidentified() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(7);
    let (forces, regressors) = collect_samples(&mut rng, 20, |rng| {
        (
            SpatialVector::linear(random_vector(rng, 1.0)),
            SpatialVector::linear(random_vector(rng, 3.0)),
        )
    });

    // Act
    let identification = SystemIdentifier::default()
        .identify(&forces, &regressors)
        .unwrap();

    // Assert
    assert!(identification.rank < 20);
    assert_eq!(identification.rank, 8);
    let x = truth_vector();
    for body in 0..2 {
        let p = identification.body_parameters(body).unwrap();
        assert_close!(p[0], x[10 * body], 1e-8);
        for j in 4..10 {
            assert_close!(p[j], 0.0, 1e-8);
        }
    }
}

#[test]
fn zero_regressor_sentinel_from_invalid_index() {
    let bodies = vec![BodyState::new("only", &Isometry3::identity())];
    let calculator = SystemCalculator::new(&bodies);
    assert_eq!(calculator.regressor(1), Regressor::zeros());
    assert!(calculator.try_regressor(1).is_err());
}

#[test]
fn report_lists_identified_bodies() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(99);
    let (forces, regressors) = collect_samples(&mut rng, 10, |rng| {
        (
            SpatialVector::new(random_vector(rng, 2.0), random_vector(rng, 1.0)),
            SpatialVector::new(random_vector(rng, 4.0), random_vector(rng, 3.0)),
        )
    });
    let identification = SystemIdentifier::default()
        .identify(&forces, &regressors)
        .unwrap();
    let names = vec!["upper_arm".to_string(), "forearm".to_string()];
    let parameters: Vec<Float> = identification.parameters.iter().cloned().collect();

    // Act
    let report = ParameterTable::new(&names, &parameters).to_string();

    // Assert
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].trim_start().starts_with("name"));
    assert!(lines[1].trim_start().starts_with("upper_arm         5"));
    assert!(lines[2].trim_start().starts_with("forearm         2"));
}
