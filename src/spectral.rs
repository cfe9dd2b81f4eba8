//! 2D spectral analysis of elevation surfaces.
//!
//! The pipeline is staged: detrend, optionally window, zero-pad to power-of-
//! two dimensions, transform, quadrant-shift. Each stage hands an explicit
//! value to the next, so quantities like the window's squared-weight sum
//! travel with the data they describe instead of living in shared mutable
//! state.
//!
//! Two terminal paths exist. The filter path weights the shifted spectrum,
//! inverts and restores the trend, yielding a filtered grid. The analysis
//! path reduces the shifted spectrum to 2D and radially averaged power
//! spectral densities.

use log::{debug, info};
use nalgebra::{Matrix3, Vector3};
use ndarray::{s, Array2, Axis};
use num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

use crate::error::{GeomorphError, Result};
use crate::raster::Raster;
use crate::stats::{self, LogBin};

/// Frequency band used to fit the Wiener signal model, as wavelengths of
/// 1000 m down to 100 m.
const WIENER_FIT_BAND: (f64, f64) = (0.001, 0.01);

/// Frequencies at or above `10^WIENER_NOISE_EXPONENT` are treated as pure
/// noise when estimating the white-noise floor.
const WIENER_NOISE_EXPONENT: f64 = -0.7;

/// Frequency-domain filter selection for [`SpectralSurface::filter`].
///
/// Band edges satisfy `f1 <= f2`; a reversed band is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterSpec {
    /// Gaussian band centered on `(f1 + f2) / 2` with sigma `|f2 - f1| / 6`.
    Bandpass { f1: f64, f2: f64 },
    /// Unit gain below `f1`, Gaussian roll-off above it with sigma
    /// `|f2 - f1| / 3`. Equal band edges degenerate to a hard cutoff.
    Lowpass { f1: f64, f2: f64 },
    /// Mirror image of `Lowpass`: unit gain above `f2`, roll-off below.
    Highpass { f1: f64, f2: f64 },
    /// Signal-over-(signal plus noise) weighting with a power-law signal
    /// model fitted to the radial spectrum and a white-noise floor taken
    /// from its high-frequency tail.
    Wiener,
}

impl FilterSpec {
    fn validate(&self) -> Result<()> {
        match *self {
            FilterSpec::Bandpass { f1, f2 }
            | FilterSpec::Lowpass { f1, f2 }
            | FilterSpec::Highpass { f1, f2 } => {
                if f1 > f2 || f1 < 0.0 {
                    Err(GeomorphError::InvalidFilterBand { f1, f2 })
                } else {
                    Ok(())
                }
            }
            FilterSpec::Wiener => Ok(()),
        }
    }
}

/// One row of the radially averaged spectrum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadialRow {
    pub frequency: f64,
    pub wavelength: f64,
    pub power: f64,
}

/// One row of the log-binned radial spectrum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinnedRow {
    pub frequency: f64,
    pub wavelength: f64,
    pub power: f64,
    pub stddev: f64,
}

/// Output of [`SpectralSurface::spectral_analysis`]: the shifted 2D power
/// spectral density as a grid plus the radial and binned spectrum tables.
#[derive(Debug)]
pub struct SpectralReport {
    pub psd: Raster,
    pub radial: Vec<RadialRow>,
    pub binned: Vec<BinnedRow>,
}

impl SpectralReport {
    /// Serializes the radial and binned tables as a JSON document for a
    /// downstream reporting sink.
    pub fn tables_to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({
            "radial": self.radial,
            "binned": self.binned,
        }))
    }
}

/// A grid staged for spectral processing, with its padded transform
/// dimensions fixed at construction.
#[derive(Debug)]
pub struct SpectralSurface {
    grid: Raster,
    ly: usize,
    lx: usize,
}

impl SpectralSurface {
    pub fn new(grid: Raster) -> Self {
        let ly = grid.rows().next_power_of_two();
        let lx = grid.cols().next_power_of_two();
        SpectralSurface { grid, ly, lx }
    }

    /// Padded row count, the next power of two at or above the grid's rows.
    pub fn ly(&self) -> usize {
        self.ly
    }

    /// Padded column count.
    pub fn lx(&self) -> usize {
        self.lx
    }

    pub fn grid(&self) -> &Raster {
        &self.grid
    }

    /// Fits and removes a planar trend `z = a x + b y + c` over the valid
    /// cells, by ordinary least squares through the 3x3 normal equations.
    ///
    /// Nodata cells become exactly zero in the detrended surface so the
    /// transform can run over a dense array; the trend plane itself is dense
    /// and is re-added cell by cell when a filtered surface is rebuilt.
    pub fn detrend(&self) -> Result<Detrended> {
        let rows = self.grid.rows();
        let cols = self.grid.cols();

        let mut sxx = 0.0;
        let mut syy = 0.0;
        let mut sxy = 0.0;
        let mut sx = 0.0;
        let mut sy = 0.0;
        let mut sxz = 0.0;
        let mut syz = 0.0;
        let mut sz = 0.0;
        let mut n = 0.0;
        for row in 0..rows {
            for col in 0..cols {
                let z = self.grid.get(row, col);
                if self.grid.is_nodata(z) {
                    continue;
                }
                let x = col as f64;
                let y = row as f64;
                sxx += x * x;
                syy += y * y;
                sxy += x * y;
                sx += x;
                sy += y;
                sxz += x * z;
                syz += y * z;
                sz += z;
                n += 1.0;
            }
        }

        let normal = Matrix3::new(sxx, sxy, sx, sxy, syy, sy, sx, sy, n);
        let rhs = Vector3::new(sxz, syz, sz);
        let solution = normal.lu().solve(&rhs).ok_or(GeomorphError::SingularFit)?;
        let (a, b, c) = (solution[0], solution[1], solution[2]);
        debug!("trend plane: a = {:.6e}, b = {:.6e}, c = {:.6e}", a, b, c);

        let mut surface = Array2::zeros((rows, cols));
        let mut trend = Array2::zeros((rows, cols));
        for row in 0..rows {
            for col in 0..cols {
                let plane = a * col as f64 + b * row as f64 + c;
                trend[[row, col]] = plane;
                let z = self.grid.get(row, col);
                if !self.grid.is_nodata(z) {
                    surface[[row, col]] = z - plane;
                }
            }
        }

        Ok(Detrended {
            surface,
            trend,
            coefficients: [a, b, c],
        })
    }

    /// Runs the full filter pipeline and rebuilds a spatial-domain grid:
    /// detrend, pad, transform, shift, weight, unshift, invert, rescale by
    /// `1 / (Lx Ly)` and re-add the trend plane. Nodata cells of the input
    /// are never assigned a filtered value.
    pub fn filter(&self, spec: FilterSpec) -> Result<Raster> {
        spec.validate()?;
        info!(
            "filtering {}x{} grid (padded {}x{}) with {:?}",
            self.grid.rows(),
            self.grid.cols(),
            self.ly,
            self.lx,
            spec
        );

        let detrended = self.detrend()?;
        let padded = pad(&detrended.surface, self.ly, self.lx);
        let mut complex = padded.mapv(|v| Complex::new(v, 0.0));
        fft_2d(&mut complex, Direction::Forward);
        shift_quadrants(&mut complex);

        // The filter path skips windowing, so the squared-weight sum is one.
        let spectrum = Spectrum {
            shifted: complex,
            ly: self.ly,
            lx: self.lx,
            resolution: self.grid.cell_size(),
            wss: 1.0,
        };
        let mut weighted = spectrum.apply_filter(spec)?;

        shift_quadrants(&mut weighted);
        fft_2d(&mut weighted, Direction::Inverse);

        let scale = 1.0 / (self.ly * self.lx) as f64;
        let rows = self.grid.rows();
        let cols = self.grid.cols();
        let mut out = self.grid.filled(self.grid.nodata());
        for row in 0..rows {
            for col in 0..cols {
                let original = self.grid.get(row, col);
                if self.grid.is_nodata(original) {
                    continue;
                }
                let filtered = weighted[[row, col]].re * scale;
                out.set(row, col, filtered + detrended.trend[[row, col]]);
            }
        }
        Ok(out)
    }

    /// Runs the analysis pipeline: detrend, elliptical Hann window, pad,
    /// transform, shift, then reduce to a 2D power spectral density grid,
    /// the radially averaged spectrum, and its log-binned form.
    ///
    /// The DC component has no finite wavelength and is omitted from both
    /// tables.
    pub fn spectral_analysis(&self, log_bin_width: f64) -> Result<SpectralReport> {
        info!(
            "spectral analysis of {}x{} grid (padded {}x{})",
            self.grid.rows(),
            self.grid.cols(),
            self.ly,
            self.lx
        );

        let windowed = self.detrend()?.window();
        let padded = pad(&windowed.surface, self.ly, self.lx);
        let mut complex = padded.mapv(|v| Complex::new(v, 0.0));
        fft_2d(&mut complex, Direction::Forward);
        shift_quadrants(&mut complex);

        let spectrum = Spectrum {
            shifted: complex,
            ly: self.ly,
            lx: self.lx,
            resolution: self.grid.cell_size(),
            wss: windowed.wss,
        };

        let psd_2d = spectrum.psd_2d();
        let psd = Raster::from_parts(
            self.ly,
            self.lx,
            self.grid.x_min(),
            self.grid.y_min(),
            self.grid.cell_size(),
            self.grid.nodata(),
            psd_2d,
        )?;

        let (frequency, power) = spectrum.radial_psd();
        let radial = frequency
            .iter()
            .zip(&power)
            .filter(|(&f, _)| f > 0.0)
            .map(|(&f, &p)| RadialRow {
                frequency: f,
                wavelength: 1.0 / f,
                power: p,
            })
            .collect();

        let bins = stats::remove_small_bins(
            stats::log_bin_data(&frequency, &power, log_bin_width),
            0.0,
        );
        let binned = bins
            .iter()
            .filter(|b| b.mean_x > 0.0)
            .map(|b: &LogBin| BinnedRow {
                frequency: b.mean_x,
                wavelength: 1.0 / b.mean_x,
                power: b.mean_y,
                stddev: b.stddev_y,
            })
            .collect();

        Ok(SpectralReport {
            psd,
            radial,
            binned,
        })
    }
}

/// A detrended surface paired with its trend plane.
#[derive(Debug)]
pub struct Detrended {
    /// Residual surface, zero at nodata cells.
    pub surface: Array2<f64>,
    /// Dense fitted plane over the whole grid.
    pub trend: Array2<f64>,
    /// Fit coefficients `[a, b, c]` of `z = a x + b y + c`.
    pub coefficients: [f64; 3],
}

impl Detrended {
    /// Applies an elliptical Hann taper matched to the array's half-extents.
    ///
    /// Cells inside the ellipse get weight `0.5 (1 + cos(pi r / r'))` where
    /// `r'` is the ellipse radius along the cell's direction; cells outside
    /// get zero. The accumulated sum of squared weights normalizes the power
    /// spectrum later.
    pub fn window(&self) -> Windowed {
        let (rows, cols) = self.surface.dim();
        let a = (cols - 1) as f64 / 2.0;
        let b = (rows - 1) as f64 / 2.0;

        let mut surface = Array2::zeros((rows, cols));
        let mut coefficients = Array2::zeros((rows, cols));
        let mut wss = 0.0;
        for row in 0..rows {
            for col in 0..cols {
                let dx = col as f64 - a;
                let dy = row as f64 - b;
                let r = (dx * dx + dy * dy).sqrt();
                // Ellipse radius along this cell's direction from center.
                let theta = dy.atan2(dx);
                let denominator =
                    (b * theta.cos()).powi(2) + (a * theta.sin()).powi(2);
                let r_prime = if denominator > 0.0 {
                    a * b / denominator.sqrt()
                } else {
                    0.0
                };
                let weight = if r < r_prime {
                    0.5 * (1.0 + (std::f64::consts::PI * r / r_prime).cos())
                } else {
                    0.0
                };
                coefficients[[row, col]] = weight;
                surface[[row, col]] = self.surface[[row, col]] * weight;
                wss += weight * weight;
            }
        }

        Windowed {
            surface,
            coefficients,
            wss,
        }
    }
}

/// A windowed surface together with the window that produced it.
#[derive(Debug)]
pub struct Windowed {
    pub surface: Array2<f64>,
    pub coefficients: Array2<f64>,
    /// Sum of squared window weights.
    pub wss: f64,
}

/// A quadrant-shifted complex spectrum with the context needed to interpret
/// it: padded dimensions, spatial resolution and the window normalization.
#[derive(Debug)]
pub struct Spectrum {
    shifted: Array2<Complex<f64>>,
    ly: usize,
    lx: usize,
    resolution: f64,
    wss: f64,
}

impl Spectrum {
    /// 2D power spectral density, `|F|^2 / (Ly Lx WSS)`.
    pub fn psd_2d(&self) -> Array2<f64> {
        let norm = (self.ly * self.lx) as f64 * self.wss;
        self.shifted.mapv(|c| c.norm_sqr() / norm)
    }

    /// Collapses the 2D spectrum to a 1D radial spectrum.
    ///
    /// Only the non-redundant half plane is visited and each sample's power
    /// is doubled to stand in for its complex conjugate. Samples beyond the
    /// Nyquist frequency are discarded. Exactly equal radii are grouped and
    /// their powers averaged, so both returned sequences are strictly
    /// increasing in frequency.
    pub fn radial_psd(&self) -> (Vec<f64>, Vec<f64>) {
        let psd = self.psd_2d();
        let dfx = 1.0 / (self.resolution * self.lx as f64);
        let dfy = 1.0 / (self.resolution * self.ly as f64);
        let nyquist = 1.0 / (2.0 * self.resolution);
        let center_row = (self.ly / 2) as f64;
        let center_col = (self.lx / 2) as f64;

        let mut samples = Vec::new();
        for row in 0..self.ly {
            for col in 0..=(self.lx / 2) {
                let fy = (row as f64 - center_row) * dfy;
                let fx = (col as f64 - center_col) * dfx;
                let radius = (fx * fx + fy * fy).sqrt();
                if radius > nyquist {
                    continue;
                }
                samples.push((radius, 2.0 * psd[[row, col]]));
            }
        }
        samples.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut frequency = Vec::new();
        let mut power = Vec::new();
        let mut i = 0;
        while i < samples.len() {
            let radius = samples[i].0;
            let mut sum = 0.0;
            let mut count = 0;
            while i < samples.len() && samples[i].0 == radius {
                sum += samples[i].1;
                count += 1;
                i += 1;
            }
            frequency.push(radius);
            power.push(sum / count as f64);
        }
        (frequency, power)
    }

    /// Scales every spectral sample by the filter's weight at its radial
    /// frequency, returning the weighted shifted spectrum.
    fn apply_filter(&self, spec: FilterSpec) -> Result<Array2<Complex<f64>>> {
        let weight_at: Box<dyn Fn(f64) -> f64> = match spec {
            FilterSpec::Bandpass { f1, f2 } => {
                let center = (f1 + f2) / 2.0;
                let sigma = (f2 - f1).abs() / 6.0;
                Box::new(move |f| gaussian(f, center, sigma))
            }
            FilterSpec::Lowpass { f1, f2 } => {
                let sigma = (f2 - f1).abs() / 3.0;
                Box::new(move |f| {
                    if f < f1 {
                        1.0
                    } else {
                        gaussian(f, f1, sigma)
                    }
                })
            }
            FilterSpec::Highpass { f1, f2 } => {
                let sigma = (f2 - f1).abs() / 3.0;
                Box::new(move |f| {
                    if f > f2 {
                        1.0
                    } else {
                        gaussian(f, f2, sigma)
                    }
                })
            }
            FilterSpec::Wiener => self.wiener_weight()?,
        };

        let dfx = 1.0 / (self.resolution * self.lx as f64);
        let dfy = 1.0 / (self.resolution * self.ly as f64);
        let center_row = (self.ly / 2) as f64;
        let center_col = (self.lx / 2) as f64;

        let mut weighted = self.shifted.clone();
        for row in 0..self.ly {
            for col in 0..self.lx {
                let fy = (row as f64 - center_row) * dfy;
                let fx = (col as f64 - center_col) * dfx;
                let radius = (fx * fx + fy * fy).sqrt();
                weighted[[row, col]] *= weight_at(radius);
            }
        }
        Ok(weighted)
    }

    /// Builds the Wiener weight function from this spectrum.
    ///
    /// A power law `PSD = c f^m` is fitted to the radial spectrum inside the
    /// preset long-wavelength band; the white-noise floor is the mean radial
    /// power in the high-frequency tail. The weight at any frequency is
    /// `model / (model + noise)`, forced to one at zero frequency.
    fn wiener_weight(&self) -> Result<Box<dyn Fn(f64) -> f64>> {
        let (frequency, power) = self.radial_psd();
        let (f_low, f_high) = WIENER_FIT_BAND;

        let mut log_f = Vec::new();
        let mut log_p = Vec::new();
        for (&f, &p) in frequency.iter().zip(&power) {
            if f >= f_low && f <= f_high && p > 0.0 {
                log_f.push(f.log10());
                log_p.push(p.log10());
            }
        }
        if log_f.len() < 2 {
            return Err(GeomorphError::InsufficientSpectralSamples {
                f_low,
                f_high,
                found: log_f.len(),
            });
        }
        let (slope, intercept, r_squared) =
            stats::simple_linear_regression(&log_f, &log_p);
        debug!(
            "wiener signal model: log10(PSD) = {:.4} log10(f) + {:.4} (r^2 = {:.4})",
            slope, intercept, r_squared
        );

        let noise_threshold = 10f64.powf(WIENER_NOISE_EXPONENT);
        let tail: Vec<f64> = frequency
            .iter()
            .zip(&power)
            .filter(|(&f, _)| f >= noise_threshold)
            .map(|(_, &p)| p)
            .collect();
        if tail.is_empty() {
            return Err(GeomorphError::InsufficientSpectralSamples {
                f_low: noise_threshold,
                f_high: 1.0 / (2.0 * self.resolution),
                found: 0,
            });
        }
        let noise = stats::mean(&tail);
        debug!("wiener white-noise floor: {:.6e}", noise);

        Ok(Box::new(move |f| {
            if f == 0.0 {
                return 1.0;
            }
            let model = 10f64.powf(intercept + slope * f.log10());
            model / (model + noise)
        }))
    }
}

fn gaussian(f: f64, center: f64, sigma: f64) -> f64 {
    if sigma == 0.0 {
        // Degenerate band: a hard cutoff at the center frequency.
        return if f == center { 1.0 } else { 0.0 };
    }
    (-(f - center).powi(2) / (2.0 * sigma * sigma)).exp()
}

/// Zero-pads `data` into an `ly` by `lx` array, original data in the top
/// left.
pub fn pad(data: &Array2<f64>, ly: usize, lx: usize) -> Array2<f64> {
    let (rows, cols) = data.dim();
    let mut padded = Array2::zeros((ly, lx));
    padded.slice_mut(s![..rows, ..cols]).assign(data);
    padded
}

/// Transform direction for [`fft_2d`]. A closed enum; there is no invalid
/// direction to reject at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    /// Unnormalized; the caller divides by `Ly Lx` after inverting.
    Inverse,
}

/// In-place 2D FFT over a row-major complex array, one axis at a time with a
/// transpose in between for contiguous access.
pub fn fft_2d(data: &mut Array2<Complex<f64>>, direction: Direction) {
    let (rows, cols) = data.dim();
    let mut planner = FftPlanner::new();
    let (fft_rows, fft_cols) = match direction {
        Direction::Forward => (
            planner.plan_fft_forward(cols),
            planner.plan_fft_forward(rows),
        ),
        Direction::Inverse => (
            planner.plan_fft_inverse(cols),
            planner.plan_fft_inverse(rows),
        ),
    };

    data.axis_iter_mut(Axis(0)).for_each(|mut row| {
        fft_rows.process(row.as_slice_mut().unwrap());
    });

    let mut transposed = data.t().as_standard_layout().to_owned();
    transposed.axis_iter_mut(Axis(0)).for_each(|mut row| {
        fft_cols.process(row.as_slice_mut().unwrap());
    });
    // Transposing back must also restore standard layout, or the row slices
    // of a later pass over this array come back non-contiguous.
    *data = transposed.t().as_standard_layout().to_owned();
}

/// Swaps the four quadrants of an even-dimensioned array, moving the zero-
/// frequency sample between the corner and the center. The swap is its own
/// inverse, so the same routine shifts and unshifts.
pub fn shift_quadrants<T>(data: &mut Array2<T>) {
    let (rows, cols) = data.dim();
    debug_assert!(rows % 2 == 0 && cols % 2 == 0);
    let half_rows = rows / 2;
    let half_cols = cols / 2;
    for row in 0..half_rows {
        for col in 0..half_cols {
            data.swap([row, col], [row + half_rows, col + half_cols]);
            data.swap([row, col + half_cols], [row + half_rows, col]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp_grid(rows: usize, cols: usize) -> Raster {
        let data = Array2::from_shape_fn((rows, cols), |(r, c)| {
            3.0 * c as f64 - 2.0 * r as f64 + 5.0
        });
        Raster::from_parts(rows, cols, 0.0, 0.0, 1.0, -9999.0, data).unwrap()
    }

    #[test]
    fn padded_dimensions_are_powers_of_two() {
        let surface = SpectralSurface::new(ramp_grid(6, 9));
        assert_eq!(surface.ly(), 8);
        assert_eq!(surface.lx(), 16);
    }

    #[test]
    fn detrend_removes_an_exact_plane() {
        let surface = SpectralSurface::new(ramp_grid(8, 8));
        let detrended = surface.detrend().unwrap();
        assert_relative_eq!(detrended.coefficients[0], 3.0, epsilon = 1e-9);
        assert_relative_eq!(detrended.coefficients[1], -2.0, epsilon = 1e-9);
        assert_relative_eq!(detrended.coefficients[2], 5.0, epsilon = 1e-9);
        for v in detrended.surface.iter() {
            assert!(v.abs() < 1e-9);
        }
    }

    #[test]
    fn detrend_is_idempotent() {
        let noisy = Array2::from_shape_fn((8, 8), |(r, c)| {
            ((r * 13 + c * 7) % 5) as f64 - 2.0
        });
        let grid = Raster::from_parts(8, 8, 0.0, 0.0, 1.0, -9999.0, noisy).unwrap();
        let once = SpectralSurface::new(grid).detrend().unwrap();
        let residual =
            Raster::from_parts(8, 8, 0.0, 0.0, 1.0, -9999.0, once.surface.clone())
                .unwrap();
        let twice = SpectralSurface::new(residual).detrend().unwrap();
        for coefficient in twice.coefficients {
            assert!(coefficient.abs() < 1e-9);
        }
    }

    #[test]
    fn degenerate_surface_fit_is_singular() {
        // A single valid cell cannot pin down a plane.
        let mut data = Array2::from_elem((4, 4), -9999.0);
        data[[1, 1]] = 3.0;
        let grid = Raster::from_parts(4, 4, 0.0, 0.0, 1.0, -9999.0, data).unwrap();
        assert!(matches!(
            SpectralSurface::new(grid).detrend(),
            Err(GeomorphError::SingularFit)
        ));
    }

    #[test]
    fn shift_is_an_involution() {
        let mut data = Array2::from_shape_fn((4, 8), |(r, c)| (r * 8 + c) as f64);
        let original = data.clone();
        shift_quadrants(&mut data);
        assert_ne!(data, original);
        shift_quadrants(&mut data);
        assert_eq!(data, original);
    }

    #[test]
    fn forward_then_inverse_fft_round_trips() {
        let data = Array2::from_shape_fn((8, 16), |(r, c)| {
            (r as f64 * 0.7).sin() + (c as f64 * 1.3).cos()
        });
        let mut complex = data.mapv(|v| Complex::new(v, 0.0));
        fft_2d(&mut complex, Direction::Forward);
        fft_2d(&mut complex, Direction::Inverse);
        let n = (8 * 16) as f64;
        for (expected, actual) in data.iter().zip(complex.iter()) {
            assert_relative_eq!(*expected, actual.re / n, epsilon = 1e-10);
            assert!((actual.im / n).abs() < 1e-10);
        }
    }

    #[test]
    fn window_never_exceeds_unit_weight() {
        let surface = SpectralSurface::new(ramp_grid(16, 16));
        let windowed = surface.detrend().unwrap().window();
        assert!(windowed.wss > 0.0);
        for &w in windowed.coefficients.iter() {
            assert!((0.0..=1.0).contains(&w));
        }
        // Corner cells lie outside the ellipse.
        assert_relative_eq!(windowed.coefficients[[0, 0]], 0.0);
    }

    #[test]
    fn reversed_band_is_rejected() {
        let surface = SpectralSurface::new(ramp_grid(8, 8));
        assert!(matches!(
            surface.filter(FilterSpec::Lowpass { f1: 0.2, f2: 0.1 }),
            Err(GeomorphError::InvalidFilterBand { .. })
        ));
    }

    #[test]
    fn degenerate_lowpass_is_a_hard_step() {
        let weight_inside = {
            let f1 = 0.01;
            // Mirrors the Lowpass weight expression for f1 == f2.
            let f = 0.005;
            if f < f1 {
                1.0
            } else {
                gaussian(f, f1, 0.0)
            }
        };
        let weight_outside = {
            let f1 = 0.01;
            let f = 0.02;
            if f < f1 {
                1.0
            } else {
                gaussian(f, f1, 0.0)
            }
        };
        assert_relative_eq!(weight_inside, 1.0);
        assert_relative_eq!(weight_outside, 0.0);
    }
}
