//! Categorical region masks
//!
//! A mask labels every cell of a lat/lon grid with the index of the region
//! containing the cell centre, or `NO_REGION`.

use log::info;

use crate::coordinate::{CoordinateAxis, Point};
use crate::raster::{Grid, GridError, GridResult};

use super::region_set::RegionSet;

/// Label of cells outside every region
pub const NO_REGION: i32 = -1;

/// Per-cell region labels
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalMask {
    labels: Grid<i32>,
    region_count: usize,
}

impl CategoricalMask {
    /// Wrap an existing label grid over `region_count` regions
    ///
    /// Every label must be `NO_REGION` or a region index below `region_count`.
    pub fn from_labels(labels: Grid<i32>, region_count: usize) -> GridResult<Self> {
        if let Some(&bad) = labels
            .data()
            .iter()
            .find(|&&l| l != NO_REGION && (l < 0 || l as usize >= region_count))
        {
            return Err(GridError::GenericError(format!(
                "Mask label {} is not a region index below {}",
                bad, region_count
            )));
        }
        Ok(CategoricalMask { labels, region_count })
    }

    /// Number of regions the labels index into
    pub fn region_count(&self) -> usize {
        self.region_count
    }

    /// Shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.labels.shape()
    }

    /// Label grid
    pub fn labels(&self) -> &Grid<i32> {
        &self.labels
    }

    /// Region index at a cell, None for `NO_REGION` or out of bounds
    pub fn region_at(&self, row: usize, col: usize) -> Option<usize> {
        self.labels
            .get(row, col)
            .filter(|&l| l != NO_REGION)
            .map(|l| l as usize)
    }

    /// Number of cells labelled with a region
    pub fn count(&self, region_index: usize) -> usize {
        self.labels
            .data()
            .iter()
            .filter(|&&l| l == region_index as i32)
            .count()
    }
}

/// Label every cell centre of a lat/lon grid with its enclosing region
///
/// # Arguments
/// * `region_set` - Regions in load order
/// * `lon_axis` - Longitudes of the grid columns
/// * `lat_axis` - Latitudes of the grid rows
///
/// # Returns
/// A mask with `lat_axis.len()` rows and `lon_axis.len()` columns. A cell
/// on a border shared by several regions gets the first of them in load
/// order. Cell centres are also tried 360 degrees east and west, so region
/// polygons need not share the longitude convention of the grid.
pub fn rasterize_region_mask(
    region_set: &RegionSet,
    lon_axis: &CoordinateAxis,
    lat_axis: &CoordinateAxis,
) -> CategoricalMask {
    let rows = lat_axis.len();
    let cols = lon_axis.len();
    let mut labels = Vec::with_capacity(rows * cols);

    for &lat in lat_axis.values() {
        for &lon in lon_axis.values() {
            let label = region_set
                .first_containing_wrapped(&Point::new(lon, lat))
                .map_or(NO_REGION, |i| i as i32);
            labels.push(label);
        }
    }

    let labels = Grid::from_parts(rows, cols, labels);
    let mask = CategoricalMask { labels, region_count: region_set.len() };

    info!(
        "Rasterized {} regions onto {}x{} grid ({} cells labelled)",
        region_set.len(),
        rows,
        cols,
        mask.labels.data().iter().filter(|&&l| l != NO_REGION).count()
    );
    mask
}

/// Keep raster cells whose mask label equals `region_index`, NaN elsewhere
///
/// An index outside the regions the mask was built from is `RegionNotFound`.
pub fn select_region(
    raster: &Grid<f64>,
    mask: &CategoricalMask,
    region_index: usize,
) -> GridResult<Grid<f64>> {
    let wanted = match i32::try_from(region_index) {
        Ok(wanted) if region_index < mask.region_count => wanted,
        _ => {
            return Err(GridError::RegionNotFound(format!(
                "index {} (mask has {} regions)",
                region_index, mask.region_count
            )))
        }
    };
    raster.zip_map(&mask.labels, |v, l| if l == wanted { v } else { f64::NAN })
}

/// Keep raster cells of the region called `name`
pub fn select_named_region(
    raster: &Grid<f64>,
    mask: &CategoricalMask,
    region_set: &RegionSet,
    name: &str,
) -> GridResult<Grid<f64>> {
    let index = region_set.index_of(name)?;
    select_region(raster, mask, index)
}
