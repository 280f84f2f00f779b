use rand::{rngs::StdRng, Rng, SeedableRng};
use rigid_sysid::{
    body::{BodyProvider, BodyState},
    calculator::SystemCalculator,
    identification::SystemIdentifier,
    inertia::SpatialInertia,
    joint::euler::{AxisOrder, EulerJoint},
    na::{vector, DMatrix, DVector, Isometry3, Matrix3, Vector3, Vector6},
    report::ParameterTable,
    spatial::{algebra::adjoint, spatial_vector::SpatialVector},
    types::Float,
    TWO_PI,
};

/// Spatial motion cross product v ×m u
fn cross_motion(v: &SpatialVector, u: &SpatialVector) -> SpatialVector {
    SpatialVector::new(
        v.angular.cross(&u.angular),
        v.angular.cross(&u.linear) + v.linear.cross(&u.angular),
    )
}

/// Torso motion prescribed in its own frame: (velocity, acceleration)
fn torso_motion(t: Float) -> (SpatialVector, SpatialVector) {
    let w = vector![0.3 * t.sin(), 0.5 * (2.0 * t).cos(), 0.2 * (3.0 * t).sin()];
    let w_dot = vector![0.3 * t.cos(), -1.0 * (2.0 * t).sin(), 0.6 * (3.0 * t).cos()];
    let v = vector![0.4 * (0.5 * t).cos(), 0.1 * t.sin(), -0.2 * (1.5 * t).cos()];
    let v_dot = vector![-0.2 * (0.5 * t).sin(), 0.1 * t.cos(), 0.3 * (1.5 * t).sin()];
    (SpatialVector::new(w, v), SpatialVector::new(w_dot, v_dot))
}

/// Neck angles (q, dq, ddq) as sums of sinusoids with random phases
fn neck_motion(t: Float, phases: &[Float; 3]) -> (Vector3<Float>, Vector3<Float>, Vector3<Float>) {
    let mut q = Vector3::zeros();
    let mut dq = Vector3::zeros();
    let mut ddq = Vector3::zeros();
    for i in 0..3 {
        let f = 0.7 + 0.4 * i as Float;
        let a = 0.6;
        q[i] = a * (f * t + phases[i]).sin();
        dq[i] = a * f * (f * t + phases[i]).cos();
        ddq[i] = -a * f * f * (f * t + phases[i]).sin();
    }
    (q, dq, ddq)
}

fn main() {
    let mut rng = StdRng::seed_from_u64(2013);
    let phases = [
        rng.random_range(0.0..TWO_PI),
        rng.random_range(0.0..TWO_PI),
        rng.random_range(0.0..TWO_PI),
    ];

    let torso = SpatialInertia::from_com(
        12.0,
        &vector![0.0, 0.02, 0.25],
        &Matrix3::from_diagonal(&vector![0.35, 0.30, 0.12]),
        "torso",
    );
    let head = SpatialInertia::from_com(
        3.5,
        &vector![0.01, 0.0, 0.09],
        &Matrix3::new(0.015, 0.001, 0.0, 0.001, 0.017, 0.0005, 0.0, 0.0005, 0.012),
        "head",
    );

    let mut neck = EulerJoint::new(
        AxisOrder::ZYX,
        Isometry3::translation(0.0, 0.0, 0.5),
        Isometry3::translation(0.0, 0.0, -0.05),
    );

    let num_samples = 50;
    let dt = 0.1;
    let mut forces = Vec::with_capacity(num_samples);
    let mut regressors: Vec<DMatrix<Float>> = Vec::with_capacity(num_samples);
    let mut names = vec![];

    for k in 0..num_samples {
        let t = k as Float * dt;
        let (torso_v, torso_a) = torso_motion(t);
        let (q, dq, ddq) = neck_motion(t, &phases);
        neck.update(q, dq);

        // head motion from the torso through the neck
        let torso_to_head = adjoint(&neck.transform().inverse());
        let joint_v = SpatialVector::from_vector6(&(neck.jacobian() * dq));
        let head_v = SpatialVector::from_vector6(&(torso_to_head * torso_v.as_vector6())) + joint_v;
        let head_a = SpatialVector::from_vector6(
            &(torso_to_head * torso_a.as_vector6() + neck.jacobian() * ddq + neck.jacobian_deriv() * dq),
        ) + cross_motion(&head_v, &joint_v);

        let bodies = vec![
            BodyState::new("torso", &Isometry3::identity()).with_motion(torso_v, torso_a),
            BodyState::new("head", neck.transform()).with_motion(head_v, head_a),
        ];
        let calculator = SystemCalculator::new(&bodies);
        let regressor = match calculator.stacked_regressor(&[0, 1]) {
            Ok(regressor) => regressor,
            Err(err) => {
                eprintln!("{}", err);
                return;
            }
        };

        let mut f = DVector::zeros(12);
        let torso_f: Vector6<Float> = torso.wrench(&torso_v, &torso_a).as_vector6();
        let head_f: Vector6<Float> = head.wrench(&head_v, &head_a).as_vector6();
        f.rows_mut(0, 6).copy_from(&torso_f);
        f.rows_mut(6, 6).copy_from(&head_f);

        forces.push(f);
        regressors.push(regressor);
        if names.is_empty() {
            names = bodies.body_names();
        }
    }

    println!("Creating data structures: {}, {}", forces.len(), regressors.len());
    let identification = match SystemIdentifier::default().identify(&forces, &regressors) {
        Ok(identification) => identification,
        Err(err) => {
            eprintln!("identification failed: {}", err);
            return;
        }
    };
    println!(
        "We have {} non-zero parameters out of a possible {}",
        identification.rank,
        identification.num_parameters()
    );

    let parameters: Vec<Float> = identification.parameters.iter().cloned().collect();
    print!("{}", ParameterTable::new(&names, &parameters));

    let mut truth = DVector::zeros(20);
    truth.rows_mut(0, 10).copy_from(&torso.parameters());
    truth.rows_mut(10, 10).copy_from(&head.parameters());
    let error = (&identification.parameters - &truth).norm() / truth.norm();
    println!("relative parameter error: {:e}", error);
}
