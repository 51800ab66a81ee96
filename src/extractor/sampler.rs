//! Point sampling on gridded rasters

use log::debug;

use crate::coordinate::{CoordinateAxis, Point};
use crate::raster::{Grid, GridResult};

/// Value of the grid cell nearest to a point
///
/// # Arguments
/// * `grid` - Physical values; rows follow `lat_axis`, columns `lon_axis`
/// * `lat_axis` - Latitude axis of the grid rows
/// * `lon_axis` - Longitude axis of the grid columns
/// * `point` - Location to sample
///
/// # Returns
/// The cell value (NaN if the cell is missing)
pub fn sample_point(
    grid: &Grid<f64>,
    lat_axis: &CoordinateAxis,
    lon_axis: &CoordinateAxis,
    point: &Point,
) -> GridResult<f64> {
    grid.check_shape((lat_axis.len(), lon_axis.len()))?;

    let row = lat_axis.nearest_index(point.lat)?;
    let col = lon_axis.nearest_index(point.lon)?;
    let value = grid.get(row, col).unwrap_or(f64::NAN);

    debug!("Sampled ({}, {}) at row {}, col {}: {}", point.lon, point.lat, row, col, value);
    Ok(value)
}

/// Round to a number of decimal places; NaN stays NaN
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
