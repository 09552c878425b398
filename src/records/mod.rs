//! Typed rows of the simulation harness output tables
//!
//! ## Schema Overview
//!
//! ```text
//! run_<n>.csv     processed_fraction, true_F0, estimate_Nt          -> RunRecord
//! summary.csv     processed_fraction, mean_estimate_Nt,
//!                 sigma_estimate_Nt [, mean_true_F0]                 -> SummaryRecord
//! ```
//!
//! Both tables are ordered by `processed_fraction` ascending; the loader keeps
//! file order as-is.

mod run_record;
mod summary_record;

pub use run_record::RunRecord;
pub use summary_record::SummaryRecord;
