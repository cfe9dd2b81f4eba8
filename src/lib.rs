//! # Geomorph Core Library
//!
//! This library provides the computational core for quantitative landscape
//! analysis over gridded elevation data.
//!
//! The main components are:
//! - `Raster` / `IndexRaster`: dense 2D grids with georeferencing and a
//!   nodata sentinel.
//! - `FlowTopology`: the flow-routing contract basin extraction consumes,
//!   with `ReceiverTable` as a dense in-memory implementation.
//! - `Basin`: drainage-basin membership, shape descriptors and per-basin
//!   aggregation of terrain attribute rasters.
//! - `SpectralSurface`: the staged detrend / window / FFT / filter pipeline
//!   producing filtered grids and power spectral density reports.
//!
//! Reading and writing raster files, flow routing itself and any driver
//! code live outside this crate; everything here operates on in-memory
//! arrays and returns in-memory results.

pub mod basin;
pub mod error;
pub mod flow;
pub mod raster;
pub mod spectral;
pub mod stats;

pub use basin::{AggregateOp, Basin};
pub use error::{GeomorphError, Result};
pub use flow::{FlowTopology, ReceiverTable};
pub use raster::{IndexRaster, Raster};
pub use spectral::{
    BinnedRow, Direction, FilterSpec, RadialRow, SpectralReport, SpectralSurface,
};
