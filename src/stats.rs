//! Descriptive statistics and binning helpers shared by the basin and
//! spectral modules.

use serde::{Deserialize, Serialize};

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample standard deviation.
pub fn standard_deviation(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

pub fn standard_error(values: &[f64], standard_deviation: f64) -> f64 {
    standard_deviation / (values.len() as f64).sqrt()
}

/// Median of a sample. Even-length samples average the two middle elements.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
    }
}

/// Linear-interpolated percentile, `percentile` in [0, 100].
///
/// Returns NaN for an empty sample.
pub fn percentile(values: &[f64], percentile: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let rank = percentile / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let t = rank - lower as f64;
        sorted[lower] * (1.0 - t) + sorted[upper] * t
    }
}

/// Ordinary least-squares fit of `y = slope * x + intercept`.
///
/// Returns `(slope, intercept, r_squared)`.
pub fn simple_linear_regression(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    let n = x.len() as f64;
    let x_mean = mean(x);
    let y_mean = mean(y);
    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    let mut ss_yy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        ss_xx += (xi - x_mean) * (xi - x_mean);
        ss_xy += (xi - x_mean) * (yi - y_mean);
        ss_yy += (yi - y_mean) * (yi - y_mean);
    }
    let slope = ss_xy / ss_xx;
    let intercept = y_mean - slope * x_mean;
    let r_squared = if ss_yy == 0.0 || n < 2.0 {
        1.0
    } else {
        (ss_xy * ss_xy) / (ss_xx * ss_yy)
    };
    (slope, intercept, r_squared)
}

/// One logarithmically spaced bin of (x, y) observations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogBin {
    pub mean_x: f64,
    pub mean_y: f64,
    /// Midpoint of the bin in log10(x) space, mapped back to linear units.
    pub midpoint: f64,
    pub stddev_x: f64,
    pub stddev_y: f64,
    pub count: usize,
}

/// Bins (x, y) pairs into intervals of width `log_bin_width` in log10(x).
///
/// Pairs with non-positive x cannot be placed on a log axis and are skipped.
/// Empty bins between occupied ones are retained with a zero count so the
/// midpoints stay evenly spaced; use [`remove_small_bins`] to prune them.
pub fn log_bin_data(x: &[f64], y: &[f64], log_bin_width: f64) -> Vec<LogBin> {
    assert_eq!(x.len(), y.len());
    let positive: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(&xi, _)| xi > 0.0)
        .map(|(&xi, &yi)| (xi, yi))
        .collect();
    if positive.is_empty() {
        return Vec::new();
    }

    let log_min = positive
        .iter()
        .map(|(xi, _)| xi.log10())
        .fold(f64::INFINITY, f64::min);
    let log_max = positive
        .iter()
        .map(|(xi, _)| xi.log10())
        .fold(f64::NEG_INFINITY, f64::max);
    let n_bins = ((log_max - log_min) / log_bin_width).floor() as usize + 1;

    let mut binned_x: Vec<Vec<f64>> = vec![Vec::new(); n_bins];
    let mut binned_y: Vec<Vec<f64>> = vec![Vec::new(); n_bins];
    for (xi, yi) in positive {
        let mut index = ((xi.log10() - log_min) / log_bin_width).floor() as usize;
        if index >= n_bins {
            index = n_bins - 1;
        }
        binned_x[index].push(xi);
        binned_y[index].push(yi);
    }

    let mut bins = Vec::with_capacity(n_bins);
    for (i, (xs, ys)) in binned_x.iter().zip(&binned_y).enumerate() {
        let midpoint = 10f64.powf(log_min + (i as f64 + 0.5) * log_bin_width);
        if xs.is_empty() {
            bins.push(LogBin {
                mean_x: 0.0,
                mean_y: 0.0,
                midpoint,
                stddev_x: 0.0,
                stddev_y: 0.0,
                count: 0,
            });
            continue;
        }
        let mean_x = mean(xs);
        let mean_y = mean(ys);
        bins.push(LogBin {
            mean_x,
            mean_y,
            midpoint,
            stddev_x: standard_deviation(xs, mean_x),
            stddev_y: standard_deviation(ys, mean_y),
            count: xs.len(),
        });
    }
    bins
}

/// Drops bins holding fewer than `threshold_fraction` of all observations.
/// A fraction of zero removes only empty bins.
pub fn remove_small_bins(bins: Vec<LogBin>, threshold_fraction: f64) -> Vec<LogBin> {
    let total: usize = bins.iter().map(|b| b.count).sum();
    let cutoff = threshold_fraction * total as f64;
    bins.into_iter()
        .filter(|b| b.count > 0 && b.count as f64 >= cutoff)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn median_of_even_sample_averages_middle_pair() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_relative_eq!(median(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn stddev_matches_hand_computation() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_relative_eq!(m, 5.0);
        // Unbiased: sum of squares 32, n-1 = 7.
        assert_relative_eq!(standard_deviation(&values, m), (32.0f64 / 7.0).sqrt());
    }

    #[test]
    fn regression_recovers_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v - 1.0).collect();
        let (slope, intercept, r2) = simple_linear_regression(&x, &y);
        assert_relative_eq!(slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(intercept, -1.0, epsilon = 1e-12);
        assert_relative_eq!(r2, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn log_bins_have_monotone_midpoints_and_preserve_unit_means() {
        let x = [1.0, 2.0, 4.0, 8.0, 16.0, 32.0];
        let y = [1.0; 6];
        let bins = remove_small_bins(log_bin_data(&x, &y, 0.3), 0.0);
        assert!(!bins.is_empty());
        for pair in bins.windows(2) {
            assert!(pair[1].midpoint > pair[0].midpoint);
        }
        for bin in &bins {
            assert_relative_eq!(bin.mean_y, 1.0);
        }
    }

    #[test]
    fn percentile_interpolates() {
        let values = [10.0, 20.0, 30.0, 40.0];
        assert_relative_eq!(percentile(&values, 0.0), 10.0);
        assert_relative_eq!(percentile(&values, 100.0), 40.0);
        assert_relative_eq!(percentile(&values, 50.0), 25.0);
    }

    #[test]
    fn percentile_of_empty_sample_is_nan() {
        assert!(percentile(&[], 50.0).is_nan());
    }
}
