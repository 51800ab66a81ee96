//! Coordinate handling for geographic grids
//!
//! This module provides coordinate axes with declared orientation,
//! bounding boxes with longitude-convention handling, and points.

mod axis;
mod bbox;
mod point;
mod tests;

// Re-export key types
pub use self::axis::{nearest_index, CoordinateAxis, Orientation, OutOfRangeWarning};
pub use self::bbox::{BoundingBox, LongitudeConvention};
pub use self::point::Point;
