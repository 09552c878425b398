//! The two command pipelines
//!
//! ```text
//! visualize:     load run, load summary -> chart specs -> PNGs
//! theory-check:  load summary -> RSE series -> tail window -> report
//! ```
//!
//! Each is a straight-line batch: the first failure ends the invocation.

use crate::chart::{self, ChartSpec};
use crate::config::{TheoryCheckConfig, VisualizeConfig};
use crate::records::RunRecord;
use crate::report::TheoryReport;
use crate::rse::{empirical_rse, theoretical_bounds};
use crate::storage::{load_run, load_summary};
use crate::tail::tail_stats;
use crate::Result;
use tracing::{debug, info};

/// Chart specs produced by [`visualize`]
#[derive(Debug, Clone, PartialEq)]
pub struct Charts {
    /// Run trajectory (`F0 (true)` vs `Nt (HLL)`)
    pub run: ChartSpec,
    /// Summary (`E(Nt)` with `± sigma` band)
    pub summary: ChartSpec,
}

/// Build both charts from the configured tables without drawing them
///
/// # Errors
/// Any loader error for either table.
pub fn build_charts(config: &VisualizeConfig) -> Result<Charts> {
    let run = load_run(&config.run)?;
    debug!(
        path = %config.run.display(),
        rows = run.len(),
        final_relative_error = run.last().map(RunRecord::relative_error),
        "loaded run"
    );
    let summary = load_summary(&config.summary)?;
    debug!(path = %config.summary.display(), rows = summary.len(), "loaded summary");

    Ok(Charts {
        run: chart::run_chart(&run),
        summary: chart::summary_chart(&summary),
    })
}

/// Render the run chart to `out1` and the summary chart to `out2`
///
/// Both tables are loaded before anything is written.
///
/// # Errors
/// Loader errors, or [`crate::Error::Io`] / [`crate::Error::Render`] on output.
pub fn visualize(config: &VisualizeConfig) -> Result<Charts> {
    let charts = build_charts(config)?;
    chart::render(&charts.run, &config.out1)?;
    chart::render(&charts.summary, &config.out2)?;
    info!(
        run_chart = %config.out1.display(),
        summary_chart = %config.out2.display(),
        "visualize complete"
    );
    Ok(charts)
}

/// Compare empirical and theoretical RSE over the tail of the summary
///
/// # Errors
/// Loader errors, or [`crate::Error::InsufficientData`] if the tail window is
/// empty.
pub fn theory_check(config: &TheoryCheckConfig) -> Result<TheoryReport> {
    let bounds = theoretical_bounds(config.precision);

    let summary = load_summary(&config.summary)?;
    debug!(path = %config.summary.display(), rows = summary.len(), "loaded summary");

    let series = empirical_rse(&summary);
    let stats = tail_stats(&series, config.tail)?;
    debug!(
        window = stats.len,
        mean = stats.mean,
        max = stats.max,
        "reduced tail window"
    );

    Ok(TheoryReport::new(&bounds, config.tail, &stats))
}
