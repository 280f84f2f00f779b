use std::fmt;

use crate::{config::ReportConfig, inertia::NUM_INERTIAL_PARAMETERS, types::Float};

pub const PARAMETER_NAMES: [&str; NUM_INERTIAL_PARAMETERS] =
    ["mass", "mx", "my", "mz", "Ixx", "Ixy", "Ixz", "Iyy", "Iyz", "Izz"];

/// Formats x with `precision` significant digits, choosing between fixed and
/// scientific notation the way a `%g` conversion does.
pub fn format_significant(x: Float, precision: usize) -> String {
    let precision = precision.max(1);
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return x.to_string();
    }

    // The exponent is taken after rounding, so 999.7 at 3 digits is 1e+03
    let scientific = format!("{:.*e}", precision - 1, x);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(&mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, x))
    }
}

fn trim_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// Identified parameters laid out one body per row
pub struct ParameterTable<'a> {
    pub names: &'a [String],
    pub parameters: &'a [Float],
    pub config: ReportConfig,
}

impl<'a> ParameterTable<'a> {
    pub fn new(names: &'a [String], parameters: &'a [Float]) -> Self {
        ParameterTable {
            names,
            parameters,
            config: ReportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    fn name_width(&self) -> usize {
        let longest = self.names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
        longest.max(self.config.min_name_width) + self.config.name_padding
    }
}

impl fmt::Display for ParameterTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nw = self.name_width();
        let w = self.config.column_width;

        write!(f, "{:>nw$}", "name")?;
        for header in PARAMETER_NAMES {
            write!(f, "{:>w$}", header)?;
        }
        writeln!(f)?;

        for (i, row) in self.parameters.chunks_exact(NUM_INERTIAL_PARAMETERS).enumerate() {
            match self.names.get(i) {
                Some(name) => write!(f, "{:>nw$}", name)?,
                None => write!(f, "{:>nw$}", i)?,
            }
            for value in row {
                write!(f, "{:>w$}", format_significant(*value, self.config.precision))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
