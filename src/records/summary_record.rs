//! Summary Record - per-bucket statistics aggregated across runs

use serde::{Deserialize, Serialize};

/// Summary Record holds the across-run statistics of one progress bucket.
///
/// `mean_estimate_nt` should be positive for the bucket's RSE to be finite;
/// this is not enforced here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SummaryRecord {
    processed_fraction: f64,
    mean_estimate_nt: f64,
    sigma_estimate_nt: f64,
    mean_true_f0: Option<f64>,
}

impl SummaryRecord {
    /// Source column holding the bucket's progress fraction.
    pub const PROCESSED_FRACTION: &'static str = "processed_fraction";
    /// Source column holding the mean estimate.
    pub const MEAN_ESTIMATE_NT: &'static str = "mean_estimate_Nt";
    /// Source column holding the estimate's standard deviation.
    pub const SIGMA_ESTIMATE_NT: &'static str = "sigma_estimate_Nt";
    /// Optional source column holding the mean exact count.
    pub const MEAN_TRUE_F0: &'static str = "mean_true_F0";

    /// Columns a summary table must carry.
    pub const REQUIRED_COLUMNS: [&'static str; 3] = [
        Self::PROCESSED_FRACTION,
        Self::MEAN_ESTIMATE_NT,
        Self::SIGMA_ESTIMATE_NT,
    ];

    /// Create a new summary record without the exact-count mean.
    #[must_use]
    pub const fn new(processed_fraction: f64, mean_estimate_nt: f64, sigma_estimate_nt: f64) -> Self {
        Self {
            processed_fraction,
            mean_estimate_nt,
            sigma_estimate_nt,
            mean_true_f0: None,
        }
    }

    /// Attach the mean exact distinct count for this bucket.
    #[must_use]
    pub const fn with_mean_true_f0(mut self, mean_true_f0: f64) -> Self {
        self.mean_true_f0 = Some(mean_true_f0);
        self
    }

    /// Get the processed fraction.
    #[must_use]
    pub const fn processed_fraction(&self) -> f64 {
        self.processed_fraction
    }

    /// Get the mean estimate across runs.
    #[must_use]
    pub const fn mean_estimate_nt(&self) -> f64 {
        self.mean_estimate_nt
    }

    /// Get the standard deviation of the estimate across runs.
    #[must_use]
    pub const fn sigma_estimate_nt(&self) -> f64 {
        self.sigma_estimate_nt
    }

    /// Get the mean exact count, if the table carried it.
    #[must_use]
    pub const fn mean_true_f0(&self) -> Option<f64> {
        self.mean_true_f0
    }

    /// Lower edge of the one-sigma band.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.mean_estimate_nt - self.sigma_estimate_nt
    }

    /// Upper edge of the one-sigma band.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.mean_estimate_nt + self.sigma_estimate_nt
    }
}
