//! Run Record - one progress sample of a single simulated stream

use serde::{Deserialize, Serialize};

/// Run Record is the estimator state at one point of one stream.
///
/// A run is the ordered sequence of these, keyed by `processed_fraction`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RunRecord {
    processed_fraction: f64,
    true_f0: f64,
    estimate_nt: f64,
}

impl RunRecord {
    /// Source column holding the progress fraction.
    pub const PROCESSED_FRACTION: &'static str = "processed_fraction";
    /// Source column holding the exact distinct count.
    pub const TRUE_F0: &'static str = "true_F0";
    /// Source column holding the estimator output.
    pub const ESTIMATE_NT: &'static str = "estimate_Nt";

    /// Columns a run table must carry.
    pub const REQUIRED_COLUMNS: [&'static str; 3] =
        [Self::PROCESSED_FRACTION, Self::TRUE_F0, Self::ESTIMATE_NT];

    /// Create a new run record.
    ///
    /// # Arguments
    ///
    /// * `processed_fraction` - Progress through the stream, in [0, 1]
    /// * `true_f0` - Exact number of distinct items seen so far
    /// * `estimate_nt` - Estimator output at this point
    #[must_use]
    pub const fn new(processed_fraction: f64, true_f0: f64, estimate_nt: f64) -> Self {
        Self {
            processed_fraction,
            true_f0,
            estimate_nt,
        }
    }

    /// Get the processed fraction.
    #[must_use]
    pub const fn processed_fraction(&self) -> f64 {
        self.processed_fraction
    }

    /// Get the ground-truth distinct count.
    #[must_use]
    pub const fn true_f0(&self) -> f64 {
        self.true_f0
    }

    /// Get the estimate.
    #[must_use]
    pub const fn estimate_nt(&self) -> f64 {
        self.estimate_nt
    }

    /// Signed relative error of the estimate, `(Nt - F0) / F0`.
    ///
    /// Non-finite while nothing has been seen (`F0 == 0`).
    #[must_use]
    pub fn relative_error(&self) -> f64 {
        (self.estimate_nt - self.true_f0) / self.true_f0
    }
}
