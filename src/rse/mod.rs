//! Relative standard error: theory vs. observation
//!
//! For a HyperLogLog-family estimator with `m = 2^B` registers the standard
//! error of the estimate relative to the true count is approximately
//! `1.04 / sqrt(m)`. Two coefficients are in common use: `1.042` for the
//! bias-corrected estimator and `1.32` for the raw one, so `theo1 < theo2`.

use crate::records::SummaryRecord;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// RSE coefficient of the bias-corrected estimator
pub const BIAS_CORRECTED_COEFFICIENT: f64 = 1.042;

/// RSE coefficient of the uncorrected estimator
pub const UNCORRECTED_COEFFICIENT: f64 = 1.32;

/// Largest `B` for which `2^B` fits in a `u64`
pub const MAX_PRECISION: u32 = 63;

/// Estimator precision `B` (number of register index bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Precision(u32);

impl Precision {
    /// Get `B`.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Number of registers, `m = 2^B`.
    #[must_use]
    pub const fn registers(self) -> u64 {
        1u64 << self.0
    }
}

impl TryFrom<i64> for Precision {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(Error::InvalidParameter(format!(
                "B must be non-negative, got {value}"
            )));
        }
        match u32::try_from(value) {
            Ok(bits) if bits <= MAX_PRECISION => Ok(Self(bits)),
            _ => Err(Error::InvalidParameter(format!(
                "B must be at most {MAX_PRECISION}, got {value}"
            ))),
        }
    }
}

impl TryFrom<u32> for Precision {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::try_from(i64::from(value))
    }
}

impl From<Precision> for u32 {
    fn from(precision: Precision) -> Self {
        precision.0
    }
}

impl FromStr for Precision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let value: i64 = text.parse().map_err(|_| {
            Error::InvalidParameter(format!("B must be a non-negative integer, got {text:?}"))
        })?;
        Self::try_from(value)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed-form RSE bounds for one precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TheoreticalBounds {
    /// Precision the bounds were derived from
    pub precision: Precision,
    /// `m = 2^B`
    pub registers: u64,
    /// `1.042 / sqrt(m)`
    pub bias_corrected: f64,
    /// `1.32 / sqrt(m)`
    pub uncorrected: f64,
}

/// Derive both theoretical RSE values from `B`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn theoretical_bounds(precision: Precision) -> TheoreticalBounds {
    let registers = precision.registers();
    let root = (registers as f64).sqrt();
    TheoreticalBounds {
        precision,
        registers,
        bias_corrected: BIAS_CORRECTED_COEFFICIENT / root,
        uncorrected: UNCORRECTED_COEFFICIENT / root,
    }
}

/// Empirical RSE per summary bucket, `sigma / mean`
///
/// Same length and order as `summary`. A zero mean yields a non-finite value
/// which is kept as-is; it is logged, not repaired.
#[must_use]
pub fn empirical_rse(summary: &[SummaryRecord]) -> Vec<f64> {
    let series: Vec<f64> = summary
        .iter()
        .map(|record| record.sigma_estimate_nt() / record.mean_estimate_nt())
        .collect();

    let anomalies: Vec<usize> = series
        .iter()
        .enumerate()
        .filter(|(_, value)| !value.is_finite())
        .map(|(index, _)| index)
        .collect();
    if !anomalies.is_empty() {
        warn!(
            count = anomalies.len(),
            rows = ?anomalies,
            "non-finite empirical RSE (zero or missing mean_estimate_Nt)"
        );
    }

    series
}
