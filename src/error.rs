//! Error types for kinematics and identification.

use thiserror::Error;

/// Errors reported by the body regressor builder and the system identifier.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SysIdError {
    /// Body index outside `0..count`.
    #[error("out-of-bounds index: {index} (max {count})")]
    InvalidIndex {
        /// The requested index.
        index: usize,
        /// Number of bodies available.
        count: usize,
    },

    /// No samples were supplied.
    #[error("empty trajectory: at least one sample is required")]
    EmptyTrajectory,

    /// Force and regressor sequences differ in length.
    #[error("sample count mismatch: {forces} force samples, {regressors} regressors")]
    SampleCountMismatch {
        /// Number of force samples.
        forces: usize,
        /// Number of regressor samples.
        regressors: usize,
    },

    /// A regressor does not share the shape of the first one.
    #[error("regressor {sample} has shape {found:?}, expected {expected:?}")]
    RegressorShape {
        /// Sample index.
        sample: usize,
        /// (rows, cols) of the first regressor.
        expected: (usize, usize),
        /// (rows, cols) found.
        found: (usize, usize),
    },

    /// A force sample does not match the regressor row count.
    #[error("force sample {sample} has length {found}, expected {expected}")]
    ForceLength {
        /// Sample index.
        sample: usize,
        /// Regressor row count.
        expected: usize,
        /// Length found.
        found: usize,
    },

    /// Parameter count is not a positive multiple of 10.
    #[error("regressor has {columns} columns, expected a positive multiple of 10")]
    ParameterCount {
        /// Column count found.
        columns: usize,
    },

    /// Stacked problem exceeds the configured row budget.
    #[error("stacked problem has {rows} rows, limit is {limit}")]
    ProblemTooLarge {
        /// Rows of the stacked system.
        rows: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A regressor or force sample holds a NaN or infinite entry.
    #[error("sample {sample} has non-finite entries")]
    NonFinite {
        /// Sample index.
        sample: usize,
    },

    /// The singular value decomposition did not converge within the
    /// configured iteration cap.
    #[error("singular value decomposition did not converge in {max_iterations} iterations")]
    Decomposition {
        /// Configured iteration cap.
        max_iterations: usize,
    },
}

/// Result type for identification operations.
pub type Result<T> = std::result::Result<T, SysIdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_index_message() {
        let err = SysIdError::InvalidIndex { index: 7, count: 3 };
        assert_eq!(err.to_string(), "out-of-bounds index: 7 (max 3)");
    }

    #[test]
    fn regressor_shape_message() {
        let err = SysIdError::RegressorShape {
            sample: 2,
            expected: (6, 10),
            found: (6, 20),
        };
        assert!(err.to_string().contains("regressor 2"));
        assert!(err.to_string().contains("(6, 20)"));
    }

    #[test]
    fn decomposition_message() {
        let err = SysIdError::Decomposition { max_iterations: 5 };
        assert_eq!(
            err.to_string(),
            "singular value decomposition did not converge in 5 iterations"
        );
    }

    #[test]
    fn problem_too_large_message() {
        let err = SysIdError::ProblemTooLarge { rows: 600, limit: 100 };
        assert!(err.to_string().contains("600"));
        assert!(err.to_string().contains("100"));
    }
}
