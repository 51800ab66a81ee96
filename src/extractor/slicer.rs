//! Bounding-box slicing of gridded rasters
//!
//! Turns a geographic bounding box into an index window with four
//! nearest-coordinate lookups and copies the matching sub-grid and sub-axes.

use log::{debug, info, warn};

use crate::coordinate::{BoundingBox, CoordinateAxis, Orientation};
use crate::raster::{Grid, GridError, GridResult};

use super::window::Window;

/// A sub-grid together with the coordinate axes that describe it
#[derive(Debug, Clone, PartialEq)]
pub struct Subset<T> {
    /// Copied cells
    pub grid: Grid<T>,
    /// Latitude values of the subset rows
    pub lat: CoordinateAxis,
    /// Longitude values of the subset columns
    pub lon: CoordinateAxis,
    /// Window the subset occupies in the source grid
    pub window: Window,
}

/// Inclusive index range covering `[lo, hi]` along an axis
///
/// # Arguments
/// * `axis` - Coordinate axis
/// * `lo` - Smaller coordinate of the range
/// * `hi` - Larger coordinate of the range
/// * `axis_name` - Name used in errors and log messages
///
/// # Returns
/// `(start, end)` with `start <= end`, or `EmptySlice` if the range does
/// not touch the axis at all
pub fn index_range(
    axis: &CoordinateAxis,
    lo: f64,
    hi: f64,
    axis_name: &'static str,
) -> GridResult<(usize, usize)> {
    let tolerance = axis.spacing();
    if lo > axis.max() + tolerance || hi < axis.min() - tolerance {
        return Err(GridError::EmptySlice {
            axis: axis_name,
            reason: format!(
                "requested [{}, {}] does not overlap axis span [{}, {}]",
                lo,
                hi,
                axis.min(),
                axis.max()
            ),
        });
    }

    let (lo_index, lo_warning) = axis.nearest_lookup(lo)?;
    let (hi_index, hi_warning) = axis.nearest_lookup(hi)?;
    for w in lo_warning.iter().chain(hi_warning.iter()) {
        warn!("{} bound out of range: {}", axis_name, w);
    }

    // On a descending axis the larger coordinate sits at the smaller index.
    let (start, end) = match axis.orientation() {
        Orientation::Ascending => (lo_index, hi_index),
        Orientation::Descending => (hi_index, lo_index),
    };

    if start > end {
        return Err(GridError::EmptySlice {
            axis: axis_name,
            reason: format!("index range {}..={} is reversed", start, end),
        });
    }

    debug!(
        "{} [{}, {}] -> indices {}..={} ({} axis)",
        axis_name,
        lo,
        hi,
        start,
        end,
        axis.orientation().name()
    );
    Ok((start, end))
}

/// Resolve a bounding box to an index window on a lat/lon grid
pub fn window_for_bbox(
    lat_axis: &CoordinateAxis,
    lon_axis: &CoordinateAxis,
    bbox: &BoundingBox,
) -> GridResult<Window> {
    bbox.validate()?;

    let (row_start, row_end) = index_range(lat_axis, bbox.min_lat, bbox.max_lat, "latitude")?;
    let (col_start, col_end) = index_range(lon_axis, bbox.min_lon, bbox.max_lon, "longitude")?;

    Ok(Window::from_inclusive(row_start, row_end, col_start, col_end))
}

/// Slice a raster and its axes to a bounding box
///
/// # Arguments
/// * `raster` - Full grid; rows follow `lat_axis`, columns `lon_axis`
/// * `lat_axis` - Latitude axis of the grid rows
/// * `lon_axis` - Longitude axis of the grid columns, in the same longitude
///   convention as `bbox`
/// * `bbox` - Region of interest
///
/// # Returns
/// A copied subset whose corner coordinates are each within one grid cell
/// of the requested corners
pub fn slice_bbox<T: Copy>(
    raster: &Grid<T>,
    lat_axis: &CoordinateAxis,
    lon_axis: &CoordinateAxis,
    bbox: &BoundingBox,
) -> GridResult<Subset<T>> {
    raster.check_shape((lat_axis.len(), lon_axis.len()))?;

    let window = window_for_bbox(lat_axis, lon_axis, bbox)?;
    if window.is_empty() {
        return Err(GridError::EmptySlice {
            axis: "latitude",
            reason: format!("window {:?} has no cells", window),
        });
    }

    info!(
        "Slicing rows {}..{} and columns {}..{} from {}x{} grid",
        window.row,
        window.end_row(),
        window.col,
        window.end_col(),
        raster.rows(),
        raster.cols()
    );

    let grid = raster.window(&window)?;
    let lat = lat_axis.slice(window.row, window.end_row() - 1)?;
    let lon = lon_axis.slice(window.col, window.end_col() - 1)?;

    Ok(Subset { grid, lat, lon, window })
}
