//! Grid and raster stack containers
//!
//! A `Grid` is a row-major 2-D array where row 0 corresponds to the first
//! entry of the latitude axis and column 0 to the first entry of the
//! longitude axis. A `RasterStack` adds a leading band/time dimension.

use crate::extractor::Window;
use super::errors::{GridError, GridResult};

/// Numeric sample types that can be widened to `f64` without loss
pub trait Sample: Copy + PartialEq + std::fmt::Debug {
    /// Widen to f64
    fn to_f64(self) -> f64;

    /// `value` as a sample of this type would widen back
    ///
    /// Metadata values arrive as f64; a sentinel written into f32 samples
    /// only matches after the same rounding.
    fn stored(value: f64) -> f64 {
        value
    }
}

macro_rules! impl_sample {
    ($($t:ty),*) => {
        $(impl Sample for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_sample!(u8, i8, u16, i16, u32, i32, f64);

impl Sample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn stored(value: f64) -> f64 {
        value as f32 as f64
    }
}

/// Row-major 2-D array of samples
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid from row-major data
    ///
    /// # Arguments
    /// * `rows` - Number of rows (latitude direction)
    /// * `cols` - Number of columns (longitude direction)
    /// * `data` - Samples in row-major order, `rows * cols` long
    ///
    /// # Returns
    /// The grid, or an error if the data length disagrees with the shape
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> GridResult<Self> {
        if data.len() != rows * cols {
            return Err(GridError::GenericError(format!(
                "Grid of {}x{} needs {} samples, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        Ok(Grid { rows, cols, data })
    }

    /// Create a grid from data whose length the caller has already matched to the shape
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Grid { rows, cols, data }
    }

    /// Create a grid with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Grid { rows, cols, data: vec![value; rows * cols] }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the grid holds no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the row-major samples
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the grid and return its samples
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Get the sample at (row, col), or None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// Fail with `ShapeMismatch` unless this grid has the expected shape
    pub fn check_shape(&self, expected: (usize, usize)) -> GridResult<()> {
        if self.shape() != expected {
            return Err(GridError::ShapeMismatch { expected, actual: self.shape() });
        }
        Ok(())
    }

    /// Apply a function to every sample
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two equally shaped grids cell by cell
    pub fn zip_map<U: Copy, V: Copy>(
        &self,
        other: &Grid<U>,
        f: impl Fn(T, U) -> V,
    ) -> GridResult<Grid<V>> {
        other.check_shape(self.shape())?;
        Ok(Grid {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Copy out a rectangular window
    ///
    /// # Arguments
    /// * `window` - Index window; must lie inside the grid
    ///
    /// # Returns
    /// A new grid holding a copy of the window's cells
    pub fn window(&self, window: &Window) -> GridResult<Grid<T>> {
        if window.end_row() > self.rows || window.end_col() > self.cols {
            return Err(GridError::GenericError(format!(
                "Window rows {}..{}, cols {}..{} exceeds grid of {}x{}",
                window.row,
                window.end_row(),
                window.col,
                window.end_col(),
                self.rows,
                self.cols
            )));
        }

        let mut data = Vec::with_capacity(window.rows * window.cols);
        for r in window.row..window.end_row() {
            let start = r * self.cols + window.col;
            data.extend_from_slice(&self.data[start..start + window.cols]);
        }

        Ok(Grid { rows: window.rows, cols: window.cols, data })
    }

    /// Reverse the row order (north-up <-> south-up)
    pub fn flip_rows(&self) -> Grid<T> {
        let mut data = Vec::with_capacity(self.data.len());
        for r in (0..self.rows).rev() {
            let start = r * self.cols;
            data.extend_from_slice(&self.data[start..start + self.cols]);
        }
        Grid { rows: self.rows, cols: self.cols, data }
    }

    /// Take every `row_step`-th row and `col_step`-th column, starting at (0, 0)
    pub fn stride(&self, row_step: usize, col_step: usize) -> Grid<T> {
        let row_step = row_step.max(1);
        let col_step = col_step.max(1);
        let mut data = Vec::new();
        let mut rows = 0;
        let mut cols = 0;

        for r in (0..self.rows).step_by(row_step) {
            rows += 1;
            cols = 0;
            for c in (0..self.cols).step_by(col_step) {
                data.push(self.data[r * self.cols + c]);
                cols += 1;
            }
        }

        Grid { rows, cols, data }
    }
}

/// Summary statistics over the valid (non-NaN) cells of a grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Smallest valid value
    pub min: f64,
    /// Largest valid value
    pub max: f64,
    /// Mean of valid values
    pub mean: f64,
    /// Number of valid cells
    pub valid: usize,
    /// Number of NaN cells
    pub missing: usize,
}

impl Grid<f64> {
    /// Number of cells that are not NaN
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| !v.is_nan()).count()
    }

    /// Statistics over valid cells, or None if every cell is NaN
    pub fn statistics(&self) -> Option<Statistics> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut valid = 0;

        for &v in self.data.iter().filter(|v| !v.is_nan()) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            valid += 1;
        }

        if valid == 0 {
            return None;
        }

        Some(Statistics {
            min,
            max,
            mean: sum / valid as f64,
            valid,
            missing: self.data.len() - valid,
        })
    }
}

/// Band-major 3-D array (bands x rows x cols)
#[derive(Debug, Clone, PartialEq)]
pub struct RasterStack<T> {
    bands: usize,
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> RasterStack<T> {
    /// Create a stack from band-major data
    pub fn new(bands: usize, rows: usize, cols: usize, data: Vec<T>) -> GridResult<Self> {
        if data.len() != bands * rows * cols {
            return Err(GridError::GenericError(format!(
                "Stack of {}x{}x{} needs {} samples, got {}",
                bands,
                rows,
                cols,
                bands * rows * cols,
                data.len()
            )));
        }
        Ok(RasterStack { bands, rows, cols, data })
    }

    /// Build a stack from equally shaped grids
    pub fn from_grids(grids: Vec<Grid<T>>) -> GridResult<Self> {
        let Some(first) = grids.first() else {
            return Err(GridError::GenericError("Cannot stack zero grids".to_string()));
        };
        let shape = first.shape();
        let bands = grids.len();

        let mut data = Vec::with_capacity(bands * shape.0 * shape.1);
        for grid in grids {
            grid.check_shape(shape)?;
            data.extend(grid.into_data());
        }

        Ok(RasterStack { bands, rows: shape.0, cols: shape.1, data })
    }

    /// Number of bands along the leading axis
    pub fn band_count(&self) -> usize {
        self.bands
    }

    /// Shape of one band as (rows, cols)
    pub fn band_shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Copy out one band
    pub fn band(&self, index: usize) -> GridResult<Grid<T>> {
        if index >= self.bands {
            return Err(GridError::GenericError(format!(
                "Band {} out of range (stack has {} bands)",
                index, self.bands
            )));
        }
        let size = self.rows * self.cols;
        let start = index * size;
        Grid::new(self.rows, self.cols, self.data[start..start + size].to_vec())
    }
}
