//! # hll-validate: accuracy checks for streaming cardinality estimators
//!
//! Consumes the tables written by a HyperLogLog simulation harness and
//! answers two questions:
//!
//! - Does the empirical relative standard error (`sigma / mean` across runs)
//!   settle near the closed-form bounds `1.042 / sqrt(m)` and `1.32 / sqrt(m)`?
//! - What do the estimate trajectories look like against the exact count?
//!
//! ## Pipelines
//!
//! - **theory-check**: summary table → RSE series → tail window → report
//! - **visualize**: run + summary tables → chart specs → PNG files
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use hll_validate::config::TheoryCheckConfig;
//! use hll_validate::pipeline::theory_check;
//!
//! let config = TheoryCheckConfig::new("14".parse()?).summary("data/summary.csv");
//! let report = theory_check(&config)?;
//! print!("{}", report.render());
//! # Ok::<(), hll_validate::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod chart;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod rse;
pub mod storage;
pub mod tail;

pub use error::{Error, Result};
