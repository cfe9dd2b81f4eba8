//! Drainage-basin extraction and per-basin attribute aggregation.
//!
//! A [`Basin`] is carved out of a flow topology once, by collecting every
//! cell whose downstream walk terminates at the outlet of a junction. It then
//! owns its membership outright. Terrain statistics are attached afterwards,
//! one setter per attribute, each aggregating a caller-supplied raster over
//! the member cells.

use log::debug;
use serde::Serialize;

use crate::error::{GeomorphError, Result};
use crate::flow::FlowTopology;
use crate::raster::{IndexRaster, Raster};
use crate::stats;

/// Reduction applied by [`Basin::aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Mean,
    Max,
    Min,
    /// Even-length samples average the two middle elements.
    Median,
    /// Unbiased sample standard deviation.
    StdDev,
    /// Standard error of the mean.
    StdErr,
    Range,
    /// Number of valid (non-nodata) samples.
    Count,
}

/// One drainage basin: membership, shape descriptors and accumulated terrain
/// statistics.
///
/// Member nodes are stored in grid-scan (row-major) order, which fixes the
/// iteration order of every aggregation and of perimeter detection.
#[derive(Debug, Clone, Serialize)]
pub struct Basin {
    junction: usize,
    #[serde(skip)]
    nodes: Vec<usize>,
    #[serde(skip)]
    membership: Vec<bool>,

    rows: usize,
    cols: usize,
    x_min: f64,
    y_min: f64,
    cell_size: f64,
    nodata: f64,

    number_of_cells: usize,
    area: f64,
    basin_order: u32,
    beheaded: bool,
    outlet_row: usize,
    outlet_col: usize,
    centroid_row: usize,
    centroid_col: usize,

    slope_mean: Option<f64>,
    elevation_mean: Option<f64>,
    relief_mean: Option<f64>,
    aspect_mean: Option<f64>,
    plan_curv_mean: Option<f64>,
    plan_curv_max: Option<f64>,
    profile_curv_mean: Option<f64>,
    profile_curv_max: Option<f64>,
    total_curv_mean: Option<f64>,
    total_curv_max: Option<f64>,
    hilltop_curv_mean: Option<f64>,
    hillslope_length_hfr: Option<f64>,
    hillslope_length_density: Option<f64>,
    flow_length: Option<f64>,
    drainage_density: Option<f64>,
    cosmo_erosion_rate: Option<f64>,
    other_erosion_rate: Option<f64>,
    e_star: Option<f64>,
    r_star: Option<f64>,
}

impl Basin {
    /// Builds the basin draining to `junction`'s outlet.
    ///
    /// Every routed cell whose terminal receiver is the outlet node becomes a
    /// member. The basin is beheaded when its boundary touches the grid edge
    /// or a nodata cell of `dem`, meaning the true catchment extends past the
    /// available data.
    pub fn from_junction(
        junction: usize,
        topology: &impl FlowTopology,
        dem: &Raster,
    ) -> Result<Basin> {
        let outlet = topology
            .junction_node(junction)
            .ok_or(GeomorphError::InvalidJunction(junction))?;
        let basin_order = topology
            .stream_order(junction)
            .ok_or(GeomorphError::InvalidJunction(junction))?;

        let rows = dem.rows();
        let cols = dem.cols();
        let mut nodes = Vec::new();
        let mut membership = vec![false; rows * cols];
        for row in 0..rows {
            for col in 0..cols {
                if let Some(node) = topology.node_index(row, col) {
                    if topology.terminal_receiver(node, outlet) == outlet {
                        nodes.push(node);
                        membership[row * cols + col] = true;
                    }
                }
            }
        }

        let (outlet_row, outlet_col) = topology.row_col(outlet);
        let number_of_cells = nodes.len();
        let area = number_of_cells as f64 * dem.cell_size() * dem.cell_size();

        let mut row_sum = 0usize;
        let mut col_sum = 0usize;
        let mut beheaded = false;
        for &node in &nodes {
            let (row, col) = topology.row_col(node);
            row_sum += row;
            col_sum += col;
            if row == 0 || col == 0 || row == rows - 1 || col == cols - 1 {
                beheaded = true;
                continue;
            }
            for (dr, dc) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                let nr = (row as i64 + dr) as usize;
                let nc = (col as i64 + dc) as usize;
                if !membership[nr * cols + nc] && dem.is_nodata(dem.get(nr, nc)) {
                    beheaded = true;
                }
            }
        }
        let centroid_row =
            (row_sum as f64 / number_of_cells.max(1) as f64).round() as usize;
        let centroid_col =
            (col_sum as f64 / number_of_cells.max(1) as f64).round() as usize;

        debug!(
            "junction {}: {} cells, order {}, beheaded {}",
            junction, number_of_cells, basin_order, beheaded
        );

        Ok(Basin {
            junction,
            nodes,
            membership,
            rows,
            cols,
            x_min: dem.x_min(),
            y_min: dem.y_min(),
            cell_size: dem.cell_size(),
            nodata: dem.nodata(),
            number_of_cells,
            area,
            basin_order,
            beheaded,
            outlet_row,
            outlet_col,
            centroid_row,
            centroid_col,
            slope_mean: None,
            elevation_mean: None,
            relief_mean: None,
            aspect_mean: None,
            plan_curv_mean: None,
            plan_curv_max: None,
            profile_curv_mean: None,
            profile_curv_max: None,
            total_curv_mean: None,
            total_curv_max: None,
            hilltop_curv_mean: None,
            hillslope_length_hfr: None,
            hillslope_length_density: None,
            flow_length: None,
            drainage_density: None,
            cosmo_erosion_rate: None,
            other_erosion_rate: None,
            e_star: None,
            r_star: None,
        })
    }

    pub fn junction(&self) -> usize {
        self.junction
    }

    /// Member node indices in grid-scan order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn number_of_cells(&self) -> usize {
        self.number_of_cells
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn basin_order(&self) -> u32 {
        self.basin_order
    }

    pub fn beheaded(&self) -> bool {
        self.beheaded
    }

    pub fn outlet(&self) -> (usize, usize) {
        (self.outlet_row, self.outlet_col)
    }

    pub fn centroid(&self) -> (usize, usize) {
        (self.centroid_row, self.centroid_col)
    }

    pub fn slope_mean(&self) -> Option<f64> {
        self.slope_mean
    }

    pub fn elevation_mean(&self) -> Option<f64> {
        self.elevation_mean
    }

    pub fn relief_mean(&self) -> Option<f64> {
        self.relief_mean
    }

    pub fn aspect_mean(&self) -> Option<f64> {
        self.aspect_mean
    }

    pub fn hilltop_curv_mean(&self) -> Option<f64> {
        self.hilltop_curv_mean
    }

    pub fn hillslope_length_hfr(&self) -> Option<f64> {
        self.hillslope_length_hfr
    }

    pub fn hillslope_length_density(&self) -> Option<f64> {
        self.hillslope_length_density
    }

    pub fn flow_length(&self) -> Option<f64> {
        self.flow_length
    }

    pub fn drainage_density(&self) -> Option<f64> {
        self.drainage_density
    }

    pub fn e_star(&self) -> Option<f64> {
        self.e_star
    }

    pub fn r_star(&self) -> Option<f64> {
        self.r_star
    }

    fn check_field(&self, field: &Raster) -> Result<()> {
        if field.rows() != self.rows || field.cols() != self.cols {
            return Err(GeomorphError::DimensionMismatch {
                expected_rows: self.rows,
                expected_cols: self.cols,
                found_rows: field.rows(),
                found_cols: field.cols(),
            });
        }
        Ok(())
    }

    /// Collects the field's valid values over the member cells, in grid-scan
    /// order.
    fn collect(&self, field: &Raster, topology: &impl FlowTopology) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.nodes.len());
        for &node in &self.nodes {
            let (row, col) = topology.row_col(node);
            let value = field.get(row, col);
            if !field.is_nodata(value) {
                values.push(value);
            }
        }
        values
    }

    /// Reduces `field` over the basin's member cells.
    ///
    /// Nodata cells of the field are skipped. When no valid sample remains
    /// the field's nodata sentinel is returned; an empty field is an expected
    /// outcome (a fully masked region), not an error.
    pub fn aggregate(
        &self,
        field: &Raster,
        topology: &impl FlowTopology,
        op: AggregateOp,
    ) -> Result<f64> {
        self.check_field(field)?;
        let values = self.collect(field, topology);
        if values.is_empty() {
            return Ok(match op {
                AggregateOp::Count => 0.0,
                _ => field.nodata(),
            });
        }
        Ok(match op {
            AggregateOp::Mean => stats::mean(&values),
            AggregateOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            AggregateOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            AggregateOp::Median => stats::median(&values),
            AggregateOp::StdDev => {
                stats::standard_deviation(&values, stats::mean(&values))
            }
            AggregateOp::StdErr => {
                let sd = stats::standard_deviation(&values, stats::mean(&values));
                stats::standard_error(&values, sd)
            }
            AggregateOp::Range => {
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                max - min
            }
            AggregateOp::Count => values.len() as f64,
        })
    }

    /// Perimeter cells in grid-scan order, as parallel row and column index
    /// vectors. A member cell belongs to the perimeter when any 4-neighbor is
    /// off-grid or outside the basin.
    pub fn perimeter(&self, topology: &impl FlowTopology) -> (Vec<usize>, Vec<usize>) {
        let mut perimeter_rows = Vec::new();
        let mut perimeter_cols = Vec::new();
        for &node in &self.nodes {
            let (row, col) = topology.row_col(node);
            let mut on_boundary = false;
            for (dr, dc) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                let nr = row as i64 + dr;
                let nc = col as i64 + dc;
                if nr < 0 || nc < 0 || nr >= self.rows as i64 || nc >= self.cols as i64
                {
                    on_boundary = true;
                } else if !self.membership[nr as usize * self.cols + nc as usize] {
                    on_boundary = true;
                }
            }
            if on_boundary {
                perimeter_rows.push(row);
                perimeter_cols.push(col);
            }
        }
        (perimeter_rows, perimeter_cols)
    }

    /// Rasterizes `value` into the basin's footprint: a new grid with the
    /// basin's originating shape, nodata outside the membership and `value`
    /// at every member cell.
    pub fn paint_scalar(&self, value: f64, topology: &impl FlowTopology) -> Raster {
        let mut out = Raster::filled_with(
            self.rows,
            self.cols,
            self.x_min,
            self.y_min,
            self.cell_size,
            self.nodata,
            self.nodata,
        );
        for &node in &self.nodes {
            let (row, col) = topology.row_col(node);
            out.set(row, col, value);
        }
        out
    }

    /// Copies the basin subset of `field` into a nodata-backed grid of the
    /// basin's shape.
    pub fn paint_field(
        &self,
        field: &Raster,
        topology: &impl FlowTopology,
    ) -> Result<Raster> {
        self.check_field(field)?;
        let mut out = Raster::filled_with(
            self.rows,
            self.cols,
            self.x_min,
            self.y_min,
            self.cell_size,
            self.nodata,
            self.nodata,
        );
        for &node in &self.nodes {
            let (row, col) = topology.row_col(node);
            out.set(row, col, field.get(row, col));
        }
        Ok(out)
    }

    pub fn set_slope_mean(
        &mut self,
        slope: &Raster,
        topology: &impl FlowTopology,
    ) -> Result<()> {
        self.slope_mean = Some(self.aggregate(slope, topology, AggregateOp::Mean)?);
        Ok(())
    }

    pub fn set_elevation_mean(
        &mut self,
        elevation: &Raster,
        topology: &impl FlowTopology,
    ) -> Result<()> {
        self.elevation_mean =
            Some(self.aggregate(elevation, topology, AggregateOp::Mean)?);
        Ok(())
    }

    pub fn set_relief_mean(
        &mut self,
        relief: &Raster,
        topology: &impl FlowTopology,
    ) -> Result<()> {
        self.relief_mean = Some(self.aggregate(relief, topology, AggregateOp::Mean)?);
        Ok(())
    }

    /// Circular mean of aspect, in degrees in `[0, 360)`. An arithmetic mean
    /// would average 350 and 10 degrees to 180 instead of 0.
    pub fn set_aspect_mean(
        &mut self,
        aspect: &Raster,
        topology: &impl FlowTopology,
    ) -> Result<()> {
        self.check_field(aspect)?;
        let values = self.collect(aspect, topology);
        if values.is_empty() {
            self.aspect_mean = Some(aspect.nodata());
            return Ok(());
        }
        let mut sin_sum = 0.0;
        let mut cos_sum = 0.0;
        for v in &values {
            sin_sum += v.to_radians().sin();
            cos_sum += v.to_radians().cos();
        }
        let mut mean = sin_sum.atan2(cos_sum).to_degrees();
        if mean < 0.0 {
            mean += 360.0;
        }
        self.aspect_mean = Some(mean);
        Ok(())
    }

    pub fn set_plan_curv(
        &mut self,
        plan_curv: &Raster,
        topology: &impl FlowTopology,
    ) -> Result<()> {
        self.plan_curv_mean =
            Some(self.aggregate(plan_curv, topology, AggregateOp::Mean)?);
        self.plan_curv_max =
            Some(self.aggregate(plan_curv, topology, AggregateOp::Max)?);
        Ok(())
    }

    pub fn set_profile_curv(
        &mut self,
        profile_curv: &Raster,
        topology: &impl FlowTopology,
    ) -> Result<()> {
        self.profile_curv_mean =
            Some(self.aggregate(profile_curv, topology, AggregateOp::Mean)?);
        self.profile_curv_max =
            Some(self.aggregate(profile_curv, topology, AggregateOp::Max)?);
        Ok(())
    }

    pub fn set_total_curv(
        &mut self,
        total_curv: &Raster,
        topology: &impl FlowTopology,
    ) -> Result<()> {
        self.total_curv_mean =
            Some(self.aggregate(total_curv, topology, AggregateOp::Mean)?);
        self.total_curv_max =
            Some(self.aggregate(total_curv, topology, AggregateOp::Max)?);
        Ok(())
    }

    /// Mean hilltop curvature, aggregated from a raster that is nodata away
    /// from hilltops.
    pub fn set_hilltop_curv_mean(
        &mut self,
        hilltop_curv: &Raster,
        topology: &impl FlowTopology,
    ) -> Result<()> {
        self.hilltop_curv_mean =
            Some(self.aggregate(hilltop_curv, topology, AggregateOp::Mean)?);
        Ok(())
    }

    /// Mean hillslope length from hilltop flow routing.
    pub fn set_hillslope_length_hfr(
        &mut self,
        hillslope_lengths: &Raster,
        topology: &impl FlowTopology,
    ) -> Result<()> {
        self.hillslope_length_hfr =
            Some(self.aggregate(hillslope_lengths, topology, AggregateOp::Mean)?);
        Ok(())
    }

    pub fn set_cosmo_erosion_rate(&mut self, rate: f64) {
        self.cosmo_erosion_rate = Some(rate);
    }

    pub fn set_other_erosion_rate(&mut self, rate: f64) {
        self.other_erosion_rate = Some(rate);
    }

    /// Total channel length inside the basin, following D8 steps along the
    /// stream network: one cell size per cardinal step, `sqrt(2)` cell sizes
    /// per diagonal step.
    pub fn set_flow_length(
        &mut self,
        stream_network: &IndexRaster,
        topology: &impl FlowTopology,
    ) -> Result<()> {
        if stream_network.rows() != self.rows || stream_network.cols() != self.cols {
            return Err(GeomorphError::DimensionMismatch {
                expected_rows: self.rows,
                expected_cols: self.cols,
                found_rows: stream_network.rows(),
                found_cols: stream_network.cols(),
            });
        }
        let mut length = 0.0;
        for &node in &self.nodes {
            let (row, col) = topology.row_col(node);
            if stream_network.is_nodata(stream_network.get(row, col)) {
                continue;
            }
            let receiver = topology.receiver(node);
            if receiver == node {
                continue;
            }
            let (r_row, r_col) = topology.row_col(receiver);
            let diagonal = r_row != row && r_col != col;
            length += if diagonal {
                self.cell_size * std::f64::consts::SQRT_2
            } else {
                self.cell_size
            };
        }
        self.flow_length = Some(length);
        Ok(())
    }

    /// Drainage density, flow length per unit area.
    pub fn set_drainage_density(&mut self) -> Result<()> {
        let flow_length = self
            .flow_length
            .ok_or(GeomorphError::MissingPrerequisite("flow length"))?;
        self.drainage_density = Some(flow_length / self.area);
        Ok(())
    }

    /// Mean hillslope length estimated from drainage density,
    /// `1 / (2 * Dd)`.
    pub fn set_hillslope_length_density(&mut self) -> Result<()> {
        let dd = self
            .drainage_density
            .ok_or(GeomorphError::MissingPrerequisite("drainage density"))?;
        self.hillslope_length_density = Some(1.0 / (2.0 * dd));
        Ok(())
    }

    /// Dimensionless erosion rate and relief after Roering et al. (2007):
    /// `E* = 2 |C_HT| L_H / S_c`, `R* = R / (L_H S_c)`, with hilltop
    /// curvature, hillslope length and mean relief taken from the basin.
    pub fn set_estar_rstar(&mut self, critical_slope: f64) -> Result<()> {
        let cht = self
            .hilltop_curv_mean
            .ok_or(GeomorphError::MissingPrerequisite("hilltop curvature mean"))?;
        let lh = self
            .hillslope_length_hfr
            .ok_or(GeomorphError::MissingPrerequisite("hillslope length (HFR)"))?;
        let relief = self
            .relief_mean
            .ok_or(GeomorphError::MissingPrerequisite("relief mean"))?;
        self.e_star = Some(2.0 * cht.abs() * lh / critical_slope);
        self.r_star = Some(relief / (lh * critical_slope));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::ReceiverTable;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    // 4x4 grid, every cell routed one step toward the outlet at (3, 0).
    fn corner_topology() -> ReceiverTable {
        let rows = 4;
        let cols = 4;
        let mut receivers = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let target = if row == 3 && col == 0 {
                    (3, 0)
                } else if col > 0 {
                    (row, col - 1)
                } else {
                    (row + 1, 0)
                };
                receivers.push(Some(target));
            }
        }
        ReceiverTable::from_cell_receivers(rows, cols, &receivers, vec![((3, 0), 2)])
            .unwrap()
    }

    fn flat_dem(rows: usize, cols: usize, cell_size: f64) -> Raster {
        Raster::from_parts(
            rows,
            cols,
            0.0,
            0.0,
            cell_size,
            -9999.0,
            Array2::from_elem((rows, cols), 100.0),
        )
        .unwrap()
    }

    #[test]
    fn corner_outlet_collects_the_whole_grid() {
        let topology = corner_topology();
        let dem = flat_dem(4, 4, 10.0);
        let basin = Basin::from_junction(0, &topology, &dem).unwrap();
        assert_eq!(basin.number_of_cells(), 16);
        assert_relative_eq!(basin.area(), 1600.0);
        assert_eq!(basin.basin_order(), 2);
        assert_eq!(basin.outlet(), (3, 0));
        assert!(basin.beheaded());
    }

    #[test]
    fn unknown_junction_is_rejected() {
        let topology = corner_topology();
        let dem = flat_dem(4, 4, 10.0);
        assert!(matches!(
            Basin::from_junction(7, &topology, &dem),
            Err(GeomorphError::InvalidJunction(7))
        ));
    }

    #[test]
    fn interior_basin_is_not_beheaded() {
        // 5x5 grid: only the 3x3 interior is routed, draining to (2, 2).
        let rows = 5;
        let cols = 5;
        let mut receivers = vec![None; rows * cols];
        for row in 1..4 {
            for col in 1..4 {
                receivers[row * cols + col] = Some((2, 2));
            }
        }
        let topology =
            ReceiverTable::from_cell_receivers(rows, cols, &receivers, vec![((2, 2), 1)])
                .unwrap();
        let dem = flat_dem(rows, cols, 1.0);
        let basin = Basin::from_junction(0, &topology, &dem).unwrap();
        assert_eq!(basin.number_of_cells(), 9);
        assert!(!basin.beheaded());
        assert_eq!(basin.centroid(), (2, 2));
    }

    #[test]
    fn count_never_exceeds_membership_and_median_averages() {
        let topology = corner_topology();
        let dem = flat_dem(4, 4, 10.0);
        let basin = Basin::from_junction(0, &topology, &dem).unwrap();

        let mut field_data = Array2::from_elem((4, 4), -9999.0);
        field_data[[0, 0]] = 1.0;
        field_data[[0, 1]] = 2.0;
        field_data[[0, 2]] = 3.0;
        field_data[[0, 3]] = 4.0;
        let field =
            Raster::from_parts(4, 4, 0.0, 0.0, 10.0, -9999.0, field_data).unwrap();

        let count = basin.aggregate(&field, &topology, AggregateOp::Count).unwrap();
        assert!(count as usize <= basin.number_of_cells());
        assert_relative_eq!(count, 4.0);
        assert_relative_eq!(
            basin.aggregate(&field, &topology, AggregateOp::Median).unwrap(),
            2.5
        );
        assert_relative_eq!(
            basin.aggregate(&field, &topology, AggregateOp::Range).unwrap(),
            3.0
        );
    }

    #[test]
    fn empty_field_aggregates_to_the_sentinel() {
        let topology = corner_topology();
        let dem = flat_dem(4, 4, 10.0);
        let basin = Basin::from_junction(0, &topology, &dem).unwrap();
        let masked = dem.filled(-9999.0);
        let mean = basin.aggregate(&masked, &topology, AggregateOp::Mean).unwrap();
        assert_relative_eq!(mean, -9999.0);
    }

    #[test]
    fn mismatched_field_is_rejected() {
        let topology = corner_topology();
        let dem = flat_dem(4, 4, 10.0);
        let basin = Basin::from_junction(0, &topology, &dem).unwrap();
        let wrong = flat_dem(5, 5, 10.0);
        assert!(matches!(
            basin.aggregate(&wrong, &topology, AggregateOp::Mean),
            Err(GeomorphError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn aspect_mean_is_circular() {
        let topology = corner_topology();
        let dem = flat_dem(4, 4, 10.0);
        let mut basin = Basin::from_junction(0, &topology, &dem).unwrap();

        let mut aspect_data = Array2::from_elem((4, 4), -9999.0);
        aspect_data[[0, 0]] = 350.0;
        aspect_data[[0, 1]] = 10.0;
        let aspect =
            Raster::from_parts(4, 4, 0.0, 0.0, 10.0, -9999.0, aspect_data).unwrap();
        basin.set_aspect_mean(&aspect, &topology).unwrap();
        let mean = basin.aspect_mean().unwrap();
        assert!(mean < 1e-9 || (360.0 - mean) < 1e-9);
    }

    #[test]
    fn estar_requires_its_inputs() {
        let topology = corner_topology();
        let dem = flat_dem(4, 4, 10.0);
        let mut basin = Basin::from_junction(0, &topology, &dem).unwrap();
        assert!(matches!(
            basin.set_estar_rstar(0.4),
            Err(GeomorphError::MissingPrerequisite(_))
        ));
    }

    #[test]
    fn painting_fills_only_the_membership() {
        let rows = 5;
        let cols = 5;
        let mut receivers = vec![None; rows * cols];
        for row in 1..4 {
            for col in 1..4 {
                receivers[row * cols + col] = Some((2, 2));
            }
        }
        let topology =
            ReceiverTable::from_cell_receivers(rows, cols, &receivers, vec![((2, 2), 1)])
                .unwrap();
        let dem = flat_dem(rows, cols, 1.0);
        let basin = Basin::from_junction(0, &topology, &dem).unwrap();

        let painted = basin.paint_scalar(7.0, &topology);
        assert_relative_eq!(painted.get(2, 2), 7.0);
        assert_relative_eq!(painted.get(0, 0), -9999.0);

        let (p_rows, p_cols) = basin.perimeter(&topology);
        assert_eq!(p_rows.len(), p_cols.len());
        // 3x3 block: the center is the only non-perimeter cell.
        assert_eq!(p_rows.len(), 8);
    }
}
