//! Diagnostic charts
//!
//! Building a chart and drawing it are separate steps: [`spec`] turns records
//! into a [`ChartSpec`] (labels, series, band edges) and [`render`] is the only
//! code that touches the raster backend or the filesystem.

pub mod render;
pub mod spec;

pub use render::{render, DPI, FIGURE_SIZE};
pub use spec::{run_chart, summary_chart, BandSpec, ChartSpec, LineSpec};
