//! Chart specifications
//!
//! Pure data: what to draw, with which labels. Nothing here touches the
//! filesystem or the raster backend.

use crate::records::{RunRecord, SummaryRecord};
use serde::Serialize;
use std::ops::Range;

/// Fraction of the data span added on each side of the plotting range
const MARGIN: f64 = 0.05;

/// A named polyline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSpec {
    /// Legend entry
    pub label: String,
    /// `(x, y)` points in draw order
    pub points: Vec<(f64, f64)>,
}

impl LineSpec {
    /// Maximal runs of consecutive finite points
    ///
    /// A non-finite coordinate ends the current run, so the drawn line breaks
    /// there instead of joining its neighbours.
    #[must_use]
    pub fn finite_runs(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            if x.is_finite() && y.is_finite() {
                current.push((x, y));
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

/// A shaded region between two curves sharing x values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSpec {
    /// Legend entry
    pub label: String,
    /// Shared x values
    pub x: Vec<f64>,
    /// Lower edge, one per x
    pub lower: Vec<f64>,
    /// Upper edge, one per x
    pub upper: Vec<f64>,
}

/// Everything needed to draw one figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Bands, drawn first
    pub bands: Vec<BandSpec>,
    /// Lines, drawn over the bands
    pub lines: Vec<LineSpec>,
}

impl ChartSpec {
    /// Plotting range over all finite values, with a 5% margin
    ///
    /// Falls back to `0..1` when nothing is finite.
    #[must_use]
    pub fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let xs = self
            .lines
            .iter()
            .flat_map(|line| line.points.iter().map(|&(x, _)| x))
            .chain(self.bands.iter().flat_map(|band| band.x.iter().copied()));
        let ys = self
            .lines
            .iter()
            .flat_map(|line| line.points.iter().map(|&(_, y)| y))
            .chain(
                self.bands
                    .iter()
                    .flat_map(|band| band.lower.iter().chain(&band.upper).copied()),
            );

        (padded_range(xs), padded_range(ys))
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        return 0.0..1.0;
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * MARGIN
    } else {
        lo.abs().max(1.0) * MARGIN
    };
    (lo - pad)..(hi + pad)
}

/// Single run: exact count and estimate against progress
#[must_use]
pub fn run_chart(run: &[RunRecord]) -> ChartSpec {
    let truth = run
        .iter()
        .map(|r| (r.processed_fraction(), r.true_f0()))
        .collect();
    let estimate = run
        .iter()
        .map(|r| (r.processed_fraction(), r.estimate_nt()))
        .collect();

    ChartSpec {
        x_label: RunRecord::PROCESSED_FRACTION.to_string(),
        y_label: "unique_count".to_string(),
        bands: Vec::new(),
        lines: vec![
            LineSpec {
                label: "F0 (true)".to_string(),
                points: truth,
            },
            LineSpec {
                label: "Nt (HLL)".to_string(),
                points: estimate,
            },
        ],
    }
}

/// Across-run summary: mean estimate with a one-sigma band
///
/// When every record carries `mean_true_F0`, an `E(F0)` reference line is
/// added after the mean.
#[must_use]
pub fn summary_chart(summary: &[SummaryRecord]) -> ChartSpec {
    let band = BandSpec {
        label: "± sigma".to_string(),
        x: summary.iter().map(SummaryRecord::processed_fraction).collect(),
        lower: summary.iter().map(SummaryRecord::lower).collect(),
        upper: summary.iter().map(SummaryRecord::upper).collect(),
    };

    let mut lines = vec![LineSpec {
        label: "E(Nt)".to_string(),
        points: summary
            .iter()
            .map(|r| (r.processed_fraction(), r.mean_estimate_nt()))
            .collect(),
    }];

    let true_mean: Option<Vec<(f64, f64)>> = summary
        .iter()
        .map(|r| r.mean_true_f0().map(|f0| (r.processed_fraction(), f0)))
        .collect();
    if let Some(points) = true_mean.filter(|points| !points.is_empty()) {
        lines.push(LineSpec {
            label: "E(F0)".to_string(),
            points,
        });
    }

    ChartSpec {
        x_label: SummaryRecord::PROCESSED_FRACTION.to_string(),
        y_label: "estimate_stats".to_string(),
        bands: vec![band],
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Vec<SummaryRecord> {
        vec![
            SummaryRecord::new(0.2, 100.0, 10.0),
            SummaryRecord::new(0.4, 100.0, 8.0),
            SummaryRecord::new(0.6, 100.0, 6.0),
        ]
    }

    #[test]
    fn test_finite_runs_break_at_gaps() {
        let line = LineSpec {
            label: "E(Nt)".to_string(),
            points: vec![
                (0.1, 1.0),
                (0.2, 2.0),
                (0.3, f64::NAN),
                (0.4, 4.0),
                (f64::INFINITY, 5.0),
                (0.6, f64::NAN),
            ],
        };
        assert_eq!(
            line.finite_runs(),
            vec![vec![(0.1, 1.0), (0.2, 2.0)], vec![(0.4, 4.0)]]
        );

        let empty = LineSpec {
            label: "E(Nt)".to_string(),
            points: vec![(0.1, f64::NAN)],
        };
        assert!(empty.finite_runs().is_empty());
    }

    #[test]
    fn test_run_chart_series() {
        let run = [RunRecord::new(0.5, 10.0, 11.0), RunRecord::new(1.0, 20.0, 19.0)];
        let spec = run_chart(&run);

        assert_eq!(spec.x_label, "processed_fraction");
        assert_eq!(spec.y_label, "unique_count");
        assert!(spec.bands.is_empty());
        assert_eq!(spec.lines.len(), 2);
        assert_eq!(spec.lines[0].label, "F0 (true)");
        assert_eq!(spec.lines[0].points, vec![(0.5, 10.0), (1.0, 20.0)]);
        assert_eq!(spec.lines[1].label, "Nt (HLL)");
        assert_eq!(spec.lines[1].points, vec![(0.5, 11.0), (1.0, 19.0)]);
    }

    #[test]
    fn test_summary_chart_band() {
        let spec = summary_chart(&summary());

        assert_eq!(spec.y_label, "estimate_stats");
        assert_eq!(spec.lines.len(), 1);
        assert_eq!(spec.lines[0].label, "E(Nt)");
        assert_eq!(spec.bands.len(), 1);

        let band = &spec.bands[0];
        assert_eq!(band.label, "± sigma");
        assert_eq!(band.x, vec![0.2, 0.4, 0.6]);
        assert_eq!(band.lower, vec![90.0, 92.0, 94.0]);
        assert_eq!(band.upper, vec![110.0, 108.0, 106.0]);
    }

    #[test]
    fn test_summary_chart_true_mean_line() {
        let with_truth: Vec<SummaryRecord> = summary()
            .into_iter()
            .map(|r| r.with_mean_true_f0(101.0))
            .collect();
        let spec = summary_chart(&with_truth);
        assert_eq!(spec.lines.len(), 2);
        assert_eq!(spec.lines[1].label, "E(F0)");

        let mut partial = summary();
        partial[0] = partial[0].with_mean_true_f0(99.0);
        assert_eq!(summary_chart(&partial).lines.len(), 1);
    }

    #[test]
    fn test_spec_is_structurally_stable() {
        assert_eq!(summary_chart(&summary()), summary_chart(&summary()));
    }

    #[test]
    fn test_bounds_pad_and_skip_non_finite() {
        let mut records = summary();
        records.push(SummaryRecord::new(0.8, f64::NAN, 1.0));
        let (x, y) = summary_chart(&records).bounds();

        assert!((x.start - (0.2 - 0.03)).abs() < 1e-12);
        assert!((x.end - (0.8 + 0.03)).abs() < 1e-12);
        assert!((y.start - 89.0).abs() < 1e-9);
        assert!((y.end - 111.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_degenerate() {
        let (x, y) = run_chart(&[]).bounds();
        assert_eq!(x, 0.0..1.0);
        assert_eq!(y, 0.0..1.0);

        let (x, _) = run_chart(&[RunRecord::new(1.0, 5.0, 5.0)]).bounds();
        assert!(x.start < 1.0 && x.end > 1.0);
    }
}
