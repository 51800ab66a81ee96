//! Index window for sub-grid extraction
//!
//! This module defines the Window structure that specifies a rectangular
//! block of grid cells. Rows follow the latitude axis and columns the
//! longitude axis, both counted from index 0 of their axis.

/// Rectangular block of grid cells (in index coordinates)
///
/// Represents a block defined by its first row and column and its
/// dimensions. This is what a geographic bounding box resolves to once
/// the coordinate lookups are done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First row of the window
    pub row: usize,

    /// First column of the window
    pub col: usize,

    /// Number of rows in the window
    pub rows: usize,

    /// Number of columns in the window
    pub cols: usize,
}

impl Window {
    /// Create a new window
    ///
    /// # Arguments
    /// * `row` - First row
    /// * `col` - First column
    /// * `rows` - Number of rows
    /// * `cols` - Number of columns
    pub fn new(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Window { row, col, rows, cols }
    }

    /// Create a window from inclusive row and column index ranges
    ///
    /// The caller guarantees `row_start <= row_end` and `col_start <= col_end`.
    pub fn from_inclusive(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        Window {
            row: row_start,
            col: col_start,
            rows: row_end - row_start + 1,
            cols: col_end - col_start + 1,
        }
    }

    /// Get the row immediately after the window (exclusive)
    pub fn end_row(&self) -> usize {
        self.row + self.rows
    }

    /// Get the column immediately after the window (exclusive)
    pub fn end_col(&self) -> usize {
        self.col + self.cols
    }

    /// True when the window covers no cells
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}
