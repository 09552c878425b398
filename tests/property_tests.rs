//! Property-based tests for hll-validate
//!
//! - Test mathematical invariants of the RSE bounds
//! - Test shape/order preservation of the series transforms
//! - Run with ProptestConfig::with_cases(100)

use hll_validate::chart::summary_chart;
use hll_validate::records::SummaryRecord;
use hll_validate::rse::{empirical_rse, theoretical_bounds, Precision, MAX_PRECISION};
use hll_validate::tail::{reduce, tail};
use hll_validate::Error;
use proptest::prelude::*;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Summary rows with positive means, ascending fractions
fn arb_summary(max_rows: usize) -> impl Strategy<Value = Vec<SummaryRecord>> {
    proptest::collection::vec((1.0f64..1e7, 0.0f64..1e5), 0..max_rows).prop_map(|rows| {
        let n = rows.len().max(1);
        rows.into_iter()
            .enumerate()
            .map(|(i, (mean, sigma))| {
                #[allow(clippy::cast_precision_loss)]
                let fraction = (i + 1) as f64 / n as f64;
                SummaryRecord::new(fraction, mean, sigma)
            })
            .collect()
    })
}

fn arb_series(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.0f64..1.0, 0..max_len)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: bounds follow the closed form and theo1 < theo2
    #[test]
    fn prop_theoretical_bounds_closed_form(b in 0u32..=MAX_PRECISION) {
        let bounds = theoretical_bounds(Precision::try_from(b).unwrap());
        #[allow(clippy::cast_precision_loss)]
        let root = (2f64).powi(i32::try_from(b).unwrap()).sqrt();

        prop_assert_eq!(bounds.registers, 1u64 << b);
        prop_assert!((bounds.bias_corrected - 1.042 / root).abs() <= 1e-15 * (1.042 / root));
        prop_assert!((bounds.uncorrected - 1.32 / root).abs() <= 1e-15 * (1.32 / root));
        prop_assert!(bounds.bias_corrected < bounds.uncorrected);
    }

    /// Property: negative precision is always rejected
    #[test]
    fn prop_negative_precision_rejected(b in i64::MIN..0) {
        prop_assert!(matches!(Precision::try_from(b), Err(Error::InvalidParameter(_))));
    }

    /// Property: empirical RSE is elementwise sigma/mean, same length and order
    #[test]
    fn prop_empirical_rse_elementwise(summary in arb_summary(64)) {
        let rse = empirical_rse(&summary);
        prop_assert_eq!(rse.len(), summary.len());
        for (value, record) in rse.iter().zip(&summary) {
            prop_assert_eq!(*value, record.sigma_estimate_nt() / record.mean_estimate_nt());
        }
    }

    /// Property: tail returns exactly the last k elements, clamped to the series
    #[test]
    fn prop_tail_is_suffix(series in arb_series(64), k in 1usize..100) {
        match tail(&series, k) {
            Ok(window) => {
                prop_assert_eq!(window.len(), k.min(series.len()));
                prop_assert_eq!(window, &series[series.len() - window.len()..]);
            }
            Err(Error::InsufficientData(_)) => prop_assert!(series.is_empty()),
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// Property: zero-width window never succeeds
    #[test]
    fn prop_tail_zero_insufficient(series in arb_series(64)) {
        prop_assert!(matches!(tail(&series, 0), Err(Error::InsufficientData(_))));
    }

    /// Property: mean lies within [min, max] and max is attained
    #[test]
    fn prop_reduce_bounds(series in proptest::collection::vec(0.0f64..1.0, 1..64)) {
        let stats = reduce(&series).unwrap();
        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        prop_assert!(stats.mean >= min - 1e-12);
        prop_assert!(stats.mean <= stats.max + 1e-12);
        prop_assert!(series.contains(&stats.max));
    }

    /// Property: band edges bracket the mean line point for point
    #[test]
    fn prop_summary_band_brackets_mean(summary in arb_summary(64)) {
        let spec = summary_chart(&summary);
        let band = &spec.bands[0];
        let mean = &spec.lines[0].points;

        prop_assert_eq!(band.x.len(), summary.len());
        for (i, &(x, y)) in mean.iter().enumerate() {
            prop_assert_eq!(band.x[i], x);
            prop_assert!(band.lower[i] <= y && y <= band.upper[i]);
        }
    }
}
