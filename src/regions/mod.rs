//! Region geometry and categorical masks
//!
//! Regions are loaded in a fixed order, given stable indices, and rasterized
//! onto a lat/lon grid so a single region can be selected from a raster.

mod polygon;
mod region_set;
mod mask;
mod loader;
mod tests;

pub use polygon::{Polygon, Ring};
pub use region_set::{Region, RegionSet};
pub use mask::{rasterize_region_mask, select_named_region, select_region, CategoricalMask, NO_REGION};
pub use loader::{load_regions, regions_from_str};
