use itertools::izip;
use na::{DMatrix, DVector};
use tracing::{debug, info};

use crate::{
    config::IdentifierConfig,
    error::{Result, SysIdError},
    inertia::{InertialParameters, SpatialInertia, NUM_INERTIAL_PARAMETERS},
    types::Float,
};

/// Singular values at or below this are treated as zero
pub const RANK_TOLERANCE: Float = 1e-8;

/// Result of a batch identification
#[derive(Debug, Clone, PartialEq)]
pub struct Identification {
    /// C = 10 * number of bodies, grouped per body
    pub parameters: DVector<Float>,
    /// Number of singular values above `RANK_TOLERANCE`
    pub rank: usize,
    pub singular_values: DVector<Float>,
}

impl Identification {
    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    pub fn num_bodies(&self) -> usize {
        self.parameters.len() / NUM_INERTIAL_PARAMETERS
    }

    pub fn is_full_rank(&self) -> bool {
        self.rank == self.num_parameters()
    }

    /// Parameters of the i-th identified body
    pub fn body_parameters(&self, i: usize) -> Option<InertialParameters> {
        if i >= self.num_bodies() {
            return None;
        }
        let block = self
            .parameters
            .rows(i * NUM_INERTIAL_PARAMETERS, NUM_INERTIAL_PARAMETERS);
        Some(InertialParameters::from_iterator(block.iter().cloned()))
    }

    pub fn body_inertia(&self, i: usize, frame: &str) -> Option<SpatialInertia> {
        self.body_parameters(i)
            .map(|p| SpatialInertia::from_parameters(&p, frame))
    }
}

/// Recovers inertial parameters from a trajectory of measured wrenches and
/// their regressors
#[derive(Debug, Clone, Default)]
pub struct SystemIdentifier {
    pub config: IdentifierConfig,
}

impl SystemIdentifier {
    pub fn new(config: IdentifierConfig) -> Self {
        SystemIdentifier { config }
    }

    /// Stacks the P samples into A x ≈ f and solves it with the truncated
    /// pseudo-inverse.
    pub fn identify(
        &self,
        forces: &[DVector<Float>],
        regressors: &[DMatrix<Float>],
    ) -> Result<Identification> {
        let (A, f) = stack(forces, regressors, &self.config)?;
        let identification = truncated_least_squares(A, &f, self.config.max_svd_iterations)?;

        info!(
            "We have {} non-zero parameters out of a possible {}",
            identification.rank,
            identification.num_parameters()
        );
        Ok(identification)
    }
}

/// Vertically concatenates regressors and force samples. Every regressor must
/// share the shape of the first, every force must match its row count, and
/// no entry may be NaN or infinite.
pub fn stack(
    forces: &[DVector<Float>],
    regressors: &[DMatrix<Float>],
    config: &IdentifierConfig,
) -> Result<(DMatrix<Float>, DVector<Float>)> {
    if forces.len() != regressors.len() {
        return Err(SysIdError::SampleCountMismatch {
            forces: forces.len(),
            regressors: regressors.len(),
        });
    }
    let first = regressors.first().ok_or(SysIdError::EmptyTrajectory)?;
    let (n, C) = first.shape();
    if C == 0 || C % NUM_INERTIAL_PARAMETERS != 0 {
        return Err(SysIdError::ParameterCount { columns: C });
    }

    let P = regressors.len();
    let rows = n * P;
    if let Some(limit) = config.max_stacked_rows {
        if rows > limit {
            return Err(SysIdError::ProblemTooLarge { rows, limit });
        }
    }
    debug!("stacking {} samples of {}x{} regressors", P, n, C);

    let mut A = DMatrix::zeros(rows, C);
    let mut f = DVector::zeros(rows);
    for (i, force, regressor) in izip!(0.., forces.iter(), regressors.iter()) {
        if regressor.shape() != (n, C) {
            return Err(SysIdError::RegressorShape {
                sample: i,
                expected: (n, C),
                found: regressor.shape(),
            });
        }
        if force.len() != n {
            return Err(SysIdError::ForceLength {
                sample: i,
                expected: n,
                found: force.len(),
            });
        }
        if !regressor.iter().chain(force.iter()).all(|x| x.is_finite()) {
            return Err(SysIdError::NonFinite { sample: i });
        }
        A.view_mut((i * n, 0), (n, C)).copy_from(regressor);
        f.rows_mut(i * n, n).copy_from(force);
    }

    Ok((A, f))
}

/// Least-squares solution of A x ≈ f through the SVD, keeping only singular
/// directions with σ > `RANK_TOLERANCE`:
///     x = Σ v_j (u_jᵀ f) / σ_j
/// Parameter combinations along discarded directions come out as zero.
/// Fails when the SVD needs more than `max_iterations` iterations.
pub fn truncated_least_squares(
    A: DMatrix<Float>,
    f: &DVector<Float>,
    max_iterations: usize,
) -> Result<Identification> {
    // zero would mean unbounded to nalgebra
    let max_iterations = max_iterations.max(1);
    let failed = SysIdError::Decomposition { max_iterations };

    let C = A.ncols();
    let svd = A
        .try_svd(true, true, Float::EPSILON, max_iterations)
        .ok_or_else(|| failed.clone())?;
    let U = svd.u.as_ref().ok_or_else(|| failed.clone())?;
    let V_T = svd.v_t.as_ref().ok_or(failed)?;

    let mut parameters = DVector::zeros(C);
    let mut rank = 0;
    for (j, &sigma) in svd.singular_values.iter().enumerate() {
        if sigma <= RANK_TOLERANCE {
            continue;
        }
        rank += 1;
        let coefficient = U.column(j).dot(f) / sigma;
        parameters += V_T.row(j).transpose() * coefficient;
    }

    Ok(Identification {
        parameters,
        rank,
        singular_values: svd.singular_values.clone(),
    })
}
