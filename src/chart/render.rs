//! Raster rendering of chart specifications (plotters bitmap backend)

use super::spec::ChartSpec;
use crate::{Error, Result};
use plotters::prelude::*;
use std::fs;
use std::path::Path;
use tracing::info;

/// Output resolution in dots per inch
pub const DPI: u32 = 200;

/// Figure size in pixels: a 6.4 x 4.8 inch figure at [`DPI`]
pub const FIGURE_SIZE: (u32, u32) = (6 * DPI + 2 * DPI / 5, 4 * DPI + 4 * DPI / 5);

/// Series colors, assigned lines first, then bands
const PALETTE: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

const BAND_ALPHA: f64 = 0.25;
const LINE_WIDTH: u32 = 3;

/// Draw `spec` into a PNG at `path`
///
/// Missing parent directories are created. Lines break at points with a
/// non-finite coordinate. The legend lists lines before bands.
///
/// # Errors
/// - [`Error::Io`] if the parent directory cannot be created
/// - [`Error::Render`] if drawing or writing the image fails
pub fn render(spec: &ChartSpec, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    draw(spec, path).map_err(|e| Error::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    info!(path = %path.display(), width = FIGURE_SIZE.0, height = FIGURE_SIZE.1, "wrote chart");
    Ok(())
}

fn draw(spec: &ChartSpec, path: &Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (x_range, y_range) = spec.bounds();

    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(24)
        .x_label_area_size(80)
        .y_label_area_size(120)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .label_style(("sans-serif", 22))
        .axis_desc_style(("sans-serif", 28))
        .draw()?;

    // Bands go underneath the lines but after them in the legend
    let mut band_fills = Vec::with_capacity(spec.bands.len());
    for (i, band) in spec.bands.iter().enumerate() {
        let fill = PALETTE[(spec.lines.len() + i) % PALETTE.len()].mix(BAND_ALPHA);
        band_fills.push(fill);

        let edges: Vec<(f64, f64, f64)> = band
            .x
            .iter()
            .zip(&band.lower)
            .zip(&band.upper)
            .map(|((&x, &lo), &hi)| (x, lo, hi))
            .filter(|(x, lo, hi)| x.is_finite() && lo.is_finite() && hi.is_finite())
            .collect();
        if edges.is_empty() {
            continue;
        }

        let mut outline: Vec<(f64, f64)> = edges.iter().map(|&(x, _, hi)| (x, hi)).collect();
        outline.extend(edges.iter().rev().map(|&(x, lo, _)| (x, lo)));
        chart.draw_series(std::iter::once(Polygon::new(outline, fill.filled())))?;
    }

    for (line, &color) in spec.lines.iter().zip(PALETTE.iter().cycle()) {
        let style = color.stroke_width(LINE_WIDTH);
        let mut runs = line.finite_runs().into_iter();

        chart
            .draw_series(LineSeries::new(runs.next().unwrap_or_default(), style))?
            .label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 28, y)], style));
        for run in runs {
            chart.draw_series(LineSeries::new(run, style))?;
        }
    }

    for (band, fill) in spec.bands.iter().zip(band_fills) {
        chart
            .draw_series(std::iter::empty::<Polygon<(f64, f64)>>())?
            .label(band.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 8), (x + 28, y + 8)], fill.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 24))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
