//! Per-command configuration
//!
//! Each command builds exactly one of these per invocation. The default
//! constants are shared with the CLI definitions.

use crate::rse::Precision;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default single-run table
pub const DEFAULT_RUN_PATH: &str = "data/runs/run_1.csv";
/// Default summary table
pub const DEFAULT_SUMMARY_PATH: &str = "data/summary.csv";
/// Default run chart destination
pub const DEFAULT_RUN_CHART_PATH: &str = "report/figures/graph1.png";
/// Default summary chart destination
pub const DEFAULT_SUMMARY_CHART_PATH: &str = "report/figures/graph2.png";
/// Default tail window
pub const DEFAULT_TAIL: usize = 5;

/// Inputs and outputs of `visualize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizeConfig {
    /// Single-run table (`processed_fraction`, `true_F0`, `estimate_Nt`)
    pub run: PathBuf,
    /// Summary table (`processed_fraction`, `mean_estimate_Nt`, `sigma_estimate_Nt`)
    pub summary: PathBuf,
    /// Run chart destination
    pub out1: PathBuf,
    /// Summary chart destination
    pub out2: PathBuf,
}

impl Default for VisualizeConfig {
    fn default() -> Self {
        Self {
            run: PathBuf::from(DEFAULT_RUN_PATH),
            summary: PathBuf::from(DEFAULT_SUMMARY_PATH),
            out1: PathBuf::from(DEFAULT_RUN_CHART_PATH),
            out2: PathBuf::from(DEFAULT_SUMMARY_CHART_PATH),
        }
    }
}

/// Inputs of `theory-check`
///
/// There is no default precision; `B` must come from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheoryCheckConfig {
    /// Summary table
    #[serde(default = "default_summary_path")]
    pub summary: PathBuf,
    /// Estimator precision `B`
    pub precision: Precision,
    /// Trailing window size
    #[serde(default = "default_tail")]
    pub tail: usize,
}

fn default_summary_path() -> PathBuf {
    PathBuf::from(DEFAULT_SUMMARY_PATH)
}

const fn default_tail() -> usize {
    DEFAULT_TAIL
}

impl TheoryCheckConfig {
    /// Config with default summary path and tail window
    #[must_use]
    pub fn new(precision: Precision) -> Self {
        Self {
            summary: default_summary_path(),
            precision,
            tail: DEFAULT_TAIL,
        }
    }

    /// Override the summary table
    #[must_use]
    pub fn summary(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary = path.into();
        self
    }

    /// Override the tail window from a signed command-line value
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] for a negative window.
    pub fn tail(mut self, tail: i64) -> Result<Self> {
        self.tail = usize::try_from(tail).map_err(|_| {
            Error::InvalidParameter(format!("tail must be non-negative, got {tail}"))
        })?;
        Ok(self)
    }
}
