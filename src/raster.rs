use ndarray::Array2;

use crate::error::{GeomorphError, Result};

/// A georeferenced elevation (or derived field) raster.
///
/// Every stored value is either a real measurement or exactly equals the
/// nodata sentinel; all nodata tests go through [`Raster::is_nodata`] so no
/// other sentinel comparison leaks into the algorithms.
#[derive(Debug, Clone)]
pub struct Raster {
    rows: usize,
    cols: usize,
    x_min: f64,
    y_min: f64,
    cell_size: f64,
    nodata: f64,
    data: Array2<f64>,
}

impl Raster {
    /// Builds a raster from georeferencing metadata and a dense data array.
    ///
    /// Fails with `DimensionMismatch` if the array shape disagrees with the
    /// stated dimensions.
    pub fn from_parts(
        rows: usize,
        cols: usize,
        x_min: f64,
        y_min: f64,
        cell_size: f64,
        nodata: f64,
        data: Array2<f64>,
    ) -> Result<Self> {
        let (found_rows, found_cols) = data.dim();
        if found_rows != rows || found_cols != cols {
            return Err(GeomorphError::DimensionMismatch {
                expected_rows: rows,
                expected_cols: cols,
                found_rows,
                found_cols,
            });
        }
        Ok(Raster {
            rows,
            cols,
            x_min,
            y_min,
            cell_size,
            nodata,
            data,
        })
    }

    /// Builds a new raster carrying this raster's georeferencing but holding
    /// `data` instead. The replacement must have the same shape.
    pub fn same_shape(&self, data: Array2<f64>) -> Result<Self> {
        Raster::from_parts(
            self.rows,
            self.cols,
            self.x_min,
            self.y_min,
            self.cell_size,
            self.nodata,
            data,
        )
    }

    /// Builds a raster filled with one value.
    pub fn filled_with(
        rows: usize,
        cols: usize,
        x_min: f64,
        y_min: f64,
        cell_size: f64,
        nodata: f64,
        value: f64,
    ) -> Self {
        Raster {
            rows,
            cols,
            x_min,
            y_min,
            cell_size,
            nodata,
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// A raster of this shape and georeferencing filled with one value.
    pub fn filled(&self, value: f64) -> Self {
        Raster {
            rows: self.rows,
            cols: self.cols,
            x_min: self.x_min,
            y_min: self.y_min,
            cell_size: self.cell_size,
            nodata: self.nodata,
            data: Array2::from_elem((self.rows, self.cols), value),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn nodata(&self) -> f64 {
        self.nodata
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[[row, col]] = value;
    }

    /// The only permitted nodata test.
    pub fn is_nodata(&self, value: f64) -> bool {
        value == self.nodata
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Checks that `other` covers the same grid as this raster.
    pub fn check_shape(&self, other: &Raster) -> Result<()> {
        if other.rows != self.rows || other.cols != self.cols {
            return Err(GeomorphError::DimensionMismatch {
                expected_rows: self.rows,
                expected_cols: self.cols,
                found_rows: other.rows,
                found_cols: other.cols,
            });
        }
        Ok(())
    }
}

/// An integer raster for categorical data: stream networks, basin masks,
/// junction ids.
#[derive(Debug, Clone)]
pub struct IndexRaster {
    rows: usize,
    cols: usize,
    x_min: f64,
    y_min: f64,
    cell_size: f64,
    nodata: i32,
    data: Array2<i32>,
}

impl IndexRaster {
    pub fn from_parts(
        rows: usize,
        cols: usize,
        x_min: f64,
        y_min: f64,
        cell_size: f64,
        nodata: i32,
        data: Array2<i32>,
    ) -> Result<Self> {
        let (found_rows, found_cols) = data.dim();
        if found_rows != rows || found_cols != cols {
            return Err(GeomorphError::DimensionMismatch {
                expected_rows: rows,
                expected_cols: cols,
                found_rows,
                found_cols,
            });
        }
        Ok(IndexRaster {
            rows,
            cols,
            x_min,
            y_min,
            cell_size,
            nodata,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn nodata(&self) -> i32 {
        self.nodata
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[[row, col]]
    }

    pub fn is_nodata(&self, value: i32) -> bool {
        value == self.nodata
    }

    pub fn data(&self) -> &Array2<i32> {
        &self.data
    }

    /// Thins a binary raster (1 = feature, 0 = background) into a continuous
    /// single-thread skeleton, after Rosenfeld and Kak (1982).
    ///
    /// Cells are first classified as background (0), skeleton (1), boundary
    /// (2) or interior (3); boundary cells facing north, south, east and west
    /// are then peeled in turn, each pass promoting the next cell inward,
    /// until a full sweep removes nothing. Line ends two pixels wide are
    /// preserved so the skeleton is not truncated.
    pub fn thin_to_single_thread(&self) -> IndexRaster {
        let rows = self.rows;
        let cols = self.cols;
        let mut skeleton = Array2::<i32>::from_elem((rows, cols), self.nodata);

        // Initial classification. A feature cell with opposite background
        // neighbours is already skeletal; one background neighbour makes it a
        // boundary; none makes it interior. Off-grid neighbours count as
        // feature so edge cells are not stripped prematurely.
        let at = |r: isize, c: isize| -> i32 {
            if r < 0 || c < 0 || r >= rows as isize || c >= cols as isize {
                1
            } else {
                let v = self.data[[r as usize, c as usize]];
                if v == self.nodata {
                    1
                } else {
                    v
                }
            }
        };
        for i in 0..rows {
            for j in 0..cols {
                let v = self.data[[i, j]];
                if v == self.nodata {
                    continue;
                }
                if v == 0 {
                    skeleton[[i, j]] = 0;
                    continue;
                }
                let (ri, ci) = (i as isize, j as isize);
                let n = at(ri - 1, ci);
                let s = at(ri + 1, ci);
                let w = at(ri, ci - 1);
                let e = at(ri, ci + 1);
                skeleton[[i, j]] = if (n == 0 && s == 0) || (w == 0 && e == 0) {
                    1
                } else if n == 0 || s == 0 || w == 0 || e == 0 {
                    2
                } else {
                    3
                };
            }
        }

        // Directional peeling passes. Each direction strips boundary cells
        // whose outward neighbour is background, promoting the inward cell to
        // skeleton or to next round's boundary.
        let mut update = skeleton.clone();
        let mut settled = false;
        while !settled {
            settled = true;
            for &(dr, dc) in &[(-1isize, 0isize), (1, 0), (0, -1), (0, 1)] {
                for i in 1..rows.saturating_sub(1) {
                    for j in 1..cols.saturating_sub(1) {
                        let (ri, ci) = (i as isize, j as isize);
                        let outward = skeleton[[(ri + dr) as usize, (ci + dc) as usize]];
                        if skeleton[[i, j]] != 2 || outward != 0 {
                            continue;
                        }
                        let (ir, ic) = ((ri - dr) as usize, (ci - dc) as usize);
                        // Two-pixel-wide line end: keep, or the thread snaps.
                        let (pr, pc) = (dc.abs(), dr.abs()); // perpendicular step
                        let side = |sr: isize, sc: isize| {
                            let r = ri + sr;
                            let c = ci + sc;
                            if r < 0 || c < 0 || r >= rows as isize || c >= cols as isize {
                                0
                            } else {
                                skeleton[[r as usize, c as usize]]
                            }
                        };
                        let end_left = side(pr, pc) == 0
                            && side(pr - dr, pc - dc) == 0
                            && skeleton[[ir, ic]] == 2;
                        let end_right = side(-pr, -pc) == 0
                            && side(-pr - dr, -pc - dc) == 0
                            && skeleton[[ir, ic]] == 2;
                        // A preserved end changes nothing, so it must not
                        // keep the sweep alive; only a removal does. Every
                        // removal or promotion moves a cell strictly down
                        // the 3 -> 2 -> 1/0 ladder, which bounds the number
                        // of sweeps.
                        if end_left || end_right {
                            update[[i, j]] = 2;
                        } else {
                            settled = false;
                            update[[i, j]] = 0;
                            match skeleton[[ir, ic]] {
                                2 => update[[ir, ic]] = 1,
                                3 => update[[ir, ic]] = 2,
                                _ => {}
                            }
                        }
                    }
                }
                skeleton.assign(&update);
            }
        }

        // Any surviving interior cell is a skeleton pixel surrounded by
        // skeleton on all four sides.
        skeleton.mapv_inplace(|v| if v == 3 { 1 } else { v });

        IndexRaster {
            rows,
            cols,
            x_min: self.x_min,
            y_min: self.y_min,
            cell_size: self.cell_size,
            nodata: self.nodata,
            data: skeleton,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn binary_raster(data: Array2<i32>) -> IndexRaster {
        let (rows, cols) = data.dim();
        IndexRaster::from_parts(rows, cols, 0.0, 0.0, 1.0, -9999, data).unwrap()
    }

    #[test]
    fn raster_rejects_mismatched_data() {
        let data = Array2::<f64>::zeros((3, 4));
        let err = Raster::from_parts(4, 4, 0.0, 0.0, 1.0, -9999.0, data).unwrap_err();
        assert!(matches!(err, GeomorphError::DimensionMismatch { .. }));
    }

    #[test]
    fn nodata_comparison_is_exact() {
        let data = Array2::<f64>::zeros((2, 2));
        let raster = Raster::from_parts(2, 2, 0.0, 0.0, 1.0, -9999.0, data).unwrap();
        assert!(raster.is_nodata(-9999.0));
        assert!(!raster.is_nodata(-9999.0001));
    }

    #[test]
    fn thinning_a_two_wide_bar_terminates() {
        // A 2-wide bar produces preserved two-pixel line ends at both tips,
        // the configuration where a sweep can run without removing anything.
        let mut data = Array2::<i32>::zeros((7, 9));
        for i in 2..4 {
            for j in 1..8 {
                data[[i, j]] = 1;
            }
        }
        let skeleton = binary_raster(data).thin_to_single_thread();

        let mut total = 0;
        for j in 0..9 {
            let count: i32 = (0..7).map(|i| (skeleton.get(i, j) == 1) as i32).sum();
            assert!(count <= 1, "column {} is {} pixels wide", j, count);
            total += count;
        }
        assert!(total > 0, "skeleton vanished");
    }

    #[test]
    fn thinning_a_wide_bar_leaves_a_single_thread() {
        // A 3-wide horizontal bar through a 7x9 grid.
        let mut data = Array2::<i32>::zeros((7, 9));
        for i in 2..5 {
            for j in 1..8 {
                data[[i, j]] = 1;
            }
        }
        let skeleton = binary_raster(data).thin_to_single_thread();

        // No column crossed by the bar may retain more than one skeleton
        // pixel, and the thread must not vanish entirely.
        let mut total = 0;
        for j in 2..7 {
            let count: i32 = (0..7).map(|i| (skeleton.get(i, j) == 1) as i32).sum();
            assert!(count <= 1, "column {} is {} pixels wide", j, count);
            total += count;
        }
        assert!(total > 0, "skeleton vanished");
    }
}
