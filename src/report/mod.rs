//! Theory-check report
//!
//! Pure formatting of the theoretical/empirical RSE comparison. The caller
//! decides where the text goes.

use crate::rse::TheoreticalBounds;
use crate::tail::TailStats;
use serde::Serialize;
use std::fmt;

/// Everything printed by `theory-check`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TheoryReport {
    /// Precision `B`
    pub b: u32,
    /// Registers `m = 2^B`
    pub m: u64,
    /// `1.042 / sqrt(m)`
    pub theory_rse_1_042: f64,
    /// `1.32 / sqrt(m)`
    pub theory_rse_1_32: f64,
    /// Requested window size, used in the labels
    pub tail: usize,
    /// Values actually in the window (`min(tail, series length)`)
    pub tail_len: usize,
    /// Mean empirical RSE over the window
    pub empirical_rse_mean: f64,
    /// Max empirical RSE over the window
    pub empirical_rse_max: f64,
}

impl TheoryReport {
    /// Combine the bounds with the reduced tail window
    #[must_use]
    pub const fn new(bounds: &TheoreticalBounds, tail: usize, stats: &TailStats) -> Self {
        Self {
            b: bounds.precision.bits(),
            m: bounds.registers,
            theory_rse_1_042: bounds.bias_corrected,
            theory_rse_1_32: bounds.uncorrected,
            tail,
            tail_len: stats.len,
            empirical_rse_mean: stats.mean,
            empirical_rse_max: stats.max,
        }
    }

    /// Render as the five-line text report
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Render as pretty JSON (non-finite values become `null`)
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for TheoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "B={} m={}", self.b, self.m)?;
        writeln!(f, "theory_rse_1_042={}", Fixed6(self.theory_rse_1_042))?;
        writeln!(f, "theory_rse_1_32={}", Fixed6(self.theory_rse_1_32))?;
        writeln!(
            f,
            "empirical_rse_mean_last{}={}",
            self.tail,
            Fixed6(self.empirical_rse_mean)
        )?;
        writeln!(
            f,
            "empirical_rse_max_last{}={}",
            self.tail,
            Fixed6(self.empirical_rse_max)
        )
    }
}

/// Six decimals; non-finite as `nan` / `inf` / `-inf`
struct Fixed6(f64);

impl fmt::Display for Fixed6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:.6}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rse::{theoretical_bounds, Precision};
    use crate::tail::reduce;

    fn report(b: i64, window: &[f64], tail: usize) -> TheoryReport {
        let bounds = theoretical_bounds(Precision::try_from(b).unwrap());
        TheoryReport::new(&bounds, tail, &reduce(window).unwrap())
    }

    #[test]
    fn test_render_shape() {
        let text = report(10, &[0.08, 0.06], 2).render();
        assert_eq!(
            text,
            "B=10 m=1024\n\
             theory_rse_1_042=0.032563\n\
             theory_rse_1_32=0.041250\n\
             empirical_rse_mean_last2=0.070000\n\
             empirical_rse_max_last2=0.080000\n"
        );
    }

    #[test]
    fn test_label_uses_requested_tail() {
        let report = report(4, &[0.5], 5);
        assert_eq!(report.tail_len, 1);
        assert!(report.render().contains("empirical_rse_mean_last5=0.500000"));
    }

    #[test]
    fn test_non_finite_values() {
        let text = report(4, &[f64::INFINITY, 0.1], 2).render();
        assert!(text.contains("empirical_rse_mean_last2=inf\n"));
        assert!(text.contains("empirical_rse_max_last2=inf\n"));

        let text = report(4, &[f64::NAN], 1).render();
        assert!(text.contains("empirical_rse_mean_last1=nan\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = report(14, &[0.0081, 0.0079, 0.0083], 3);
        let b = report(14, &[0.0081, 0.0079, 0.0083], 3);
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn test_json_nan_is_null() {
        let json = report(4, &[f64::NAN], 1).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["empirical_rse_mean"].is_null());
        assert_eq!(value["m"], 16);
    }
}
