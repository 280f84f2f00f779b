//! Configuration for identification and reporting.

/// Resource policy for the batch identification solve.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierConfig {
    /// Upper bound on the rows of the stacked system. The decomposition is
    /// not attempted when the bound is exceeded. `None` means unbounded.
    pub max_stacked_rows: Option<usize>,
    /// Cap on the total iterations of the SVD. Must be non-zero, since
    /// nalgebra reads zero as "iterate until convergence".
    pub max_svd_iterations: usize,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            max_stacked_rows: None,
            max_svd_iterations: 10_000,
        }
    }
}

impl IdentifierConfig {
    pub fn with_max_stacked_rows(max_stacked_rows: usize) -> Self {
        Self {
            max_stacked_rows: Some(max_stacked_rows),
            ..Default::default()
        }
    }

    pub fn with_max_svd_iterations(max_svd_iterations: usize) -> Self {
        Self {
            max_svd_iterations,
            ..Default::default()
        }
    }
}

/// Layout of the identified-parameter table
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Width of every numeric column
    pub column_width: usize,
    /// Significant digits per numeric cell
    pub precision: usize,
    /// Extra width added to the longest body name
    pub name_padding: usize,
    /// Lower bound on the longest body name before padding
    pub min_name_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            column_width: 10,
            precision: 3,
            name_padding: 3,
            min_name_width: 4,
        }
    }
}
