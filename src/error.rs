use thiserror::Error;

/// Errors produced by basin extraction and spectral analysis.
///
/// An aggregation over zero valid samples is deliberately absent here: it is
/// an expected outcome (e.g. a fully masked field) and is reported by
/// returning the nodata sentinel instead.
#[derive(Debug, Error)]
pub enum GeomorphError {
    /// The requested outlet junction does not exist in the flow topology.
    #[error("junction {0} is not present in the flow topology")]
    InvalidJunction(usize),

    /// A raster passed to an operation does not match the dimensions of the
    /// raster the receiver was built from.
    #[error("raster is {found_rows}x{found_cols} but {expected_rows}x{expected_cols} was expected")]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    /// The normal equations of the planar trend fit could not be solved,
    /// e.g. because all valid cells are collinear.
    #[error("planar trend fit is singular; the surface is degenerate")]
    SingularFit,

    /// A derived basin statistic was requested before its inputs were set.
    #[error("{0} must be set before this statistic can be derived")]
    MissingPrerequisite(&'static str),

    /// A spectral filter was given a reversed frequency band.
    #[error("invalid filter band: f1 = {f1} must not exceed f2 = {f2}")]
    InvalidFilterBand { f1: f64, f2: f64 },

    /// The radial spectrum holds too few samples inside the power-law fitting
    /// band to estimate the Wiener signal model.
    #[error("only {found} radial frequencies between {f_low} and {f_high}; at least 2 are needed")]
    InsufficientSpectralSamples {
        f_low: f64,
        f_high: f64,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, GeomorphError>;
