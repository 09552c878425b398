//! Trailing-window aggregation
//!
//! The last samples of the RSE series describe the estimator once the stream
//! has been mostly consumed, which is what the theoretical bounds talk about.

use crate::{Error, Result};
use serde::Serialize;

/// Last `k` elements of `series`, in original order
///
/// `k` larger than the series is clamped to the whole series.
///
/// # Errors
/// Returns [`Error::InsufficientData`] if the window would be empty
/// (empty series or `k == 0`).
///
/// # Examples
///
/// ```rust
/// use hll_validate::tail::tail;
///
/// let series = [0.1, 0.08, 0.06];
/// assert_eq!(tail(&series, 2)?, &[0.08, 0.06]);
/// assert_eq!(tail(&series, 10)?, &series);
/// # Ok::<(), hll_validate::Error>(())
/// ```
pub fn tail(series: &[f64], k: usize) -> Result<&[f64]> {
    let window = &series[series.len().saturating_sub(k)..];
    if k == 0 || window.is_empty() {
        return Err(Error::InsufficientData(format!(
            "tail window of {k} over a series of {} values is empty",
            series.len()
        )));
    }
    Ok(window)
}

/// Mean and maximum of a window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TailStats {
    /// Number of values reduced
    pub len: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Maximum
    pub max: f64,
}

/// Reduce a window to `(mean, max)`
///
/// A NaN anywhere in the window makes both results NaN; infinities follow
/// IEEE arithmetic.
///
/// # Errors
/// Returns [`Error::InsufficientData`] if `window` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn reduce(window: &[f64]) -> Result<TailStats> {
    if window.is_empty() {
        return Err(Error::InsufficientData(
            "cannot reduce an empty window".to_string(),
        ));
    }

    let sum: f64 = window.iter().sum();
    let max = window.iter().copied().fold(f64::NEG_INFINITY, |acc, value| {
        if acc.is_nan() || value.is_nan() {
            f64::NAN
        } else {
            acc.max(value)
        }
    });

    Ok(TailStats {
        len: window.len(),
        mean: sum / window.len() as f64,
        max,
    })
}

/// [`tail`] followed by [`reduce`]
///
/// # Errors
/// Returns [`Error::InsufficientData`] if the window is empty.
pub fn tail_stats(series: &[f64], k: usize) -> Result<TailStats> {
    reduce(tail(series, k)?)
}
