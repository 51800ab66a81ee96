//! Sub-grid extraction from gridded rasters
//!
//! This module turns geographic requests (bounding boxes, points) into
//! index windows and copies the matching cells.

mod window;
mod slicer;
mod sampler;
mod tests;

// Public exports
pub use window::Window;
pub use slicer::{index_range, slice_bbox, window_for_bbox, Subset};
pub use sampler::{round_to, sample_point};
