pub mod raster;
pub mod coordinate;
pub mod extractor;
pub mod regions;
pub mod colormap;
pub mod compression;
pub mod io;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{ExtractRequest, Extraction, GeoSlice};

pub use raster::{apply_fill_mask, apply_scale_offset, extract_bit, Grid, GridError, GridResult};
pub use coordinate::{nearest_index, BoundingBox, CoordinateAxis, Orientation, Point};
pub use extractor::slice_bbox;
pub use regions::{rasterize_region_mask, select_region, CategoricalMask, RegionSet};
