//! Monotonic coordinate axes and nearest-index lookup
//!
//! Every axis declares whether its values ascend or descend with the index.
//! North-up rasters usually carry a descending latitude axis; code that turns
//! coordinates into index windows branches on the declared orientation
//! instead of assuming one convention.

use std::fmt;
use log::warn;

use crate::raster::{GridError, GridResult};
use super::bbox::LongitudeConvention;

/// Direction of an axis relative to increasing index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Values increase with index (e.g. south-up latitude)
    Ascending,
    /// Values decrease with index (e.g. north-up latitude)
    Descending,
}

impl Orientation {
    /// Returns a string representation of this orientation
    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Ascending => "ascending",
            Orientation::Descending => "descending",
        }
    }
}

/// Non-fatal notice that a lookup value lay outside the axis span
///
/// The lookup still succeeds with the nearest endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfRangeWarning {
    /// Requested coordinate
    pub value: f64,
    /// Smallest axis value
    pub min: f64,
    /// Largest axis value
    pub max: f64,
    /// Endpoint index that was returned
    pub index: usize,
}

impl fmt::Display for OutOfRangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "coordinate {} outside axis span [{}, {}], clamped to index {}",
            self.value, self.min, self.max, self.index
        )
    }
}

/// Strictly monotonic 1-D coordinate axis in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateAxis {
    values: Vec<f64>,
    orientation: Orientation,
}

impl CoordinateAxis {
    /// Create an axis with a declared orientation
    ///
    /// # Arguments
    /// * `values` - Coordinate values, one per raster row or column
    /// * `orientation` - Declared direction of the values
    ///
    /// # Returns
    /// The axis, or an error if it is empty, holds non-finite values or is
    /// not strictly monotonic in the declared direction
    pub fn new(values: Vec<f64>, orientation: Orientation) -> GridResult<Self> {
        if values.is_empty() {
            return Err(GridError::EmptyAxis);
        }

        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(GridError::InvalidCoordinate(*bad));
        }

        for (i, pair) in values.windows(2).enumerate() {
            let ordered = match orientation {
                Orientation::Ascending => pair[0] < pair[1],
                Orientation::Descending => pair[0] > pair[1],
            };
            if !ordered {
                return Err(GridError::NonMonotonicAxis(i + 1));
            }
        }

        Ok(CoordinateAxis { values, orientation })
    }

    /// Create an axis, taking the orientation from its first two values
    pub fn infer(values: Vec<f64>) -> GridResult<Self> {
        let orientation = match values.as_slice() {
            [a, b, ..] if a > b => Orientation::Descending,
            _ => Orientation::Ascending,
        };
        Self::new(values, orientation)
    }

    /// Create an axis of `count` cell centres
    ///
    /// # Arguments
    /// * `first_center` - Coordinate of the centre of cell 0
    /// * `step` - Cell size in degrees (sign is ignored)
    /// * `count` - Number of cells
    /// * `orientation` - Whether centres ascend or descend from `first_center`
    pub fn from_cell_centers(
        first_center: f64,
        step: f64,
        count: usize,
        orientation: Orientation,
    ) -> GridResult<Self> {
        if !(step.is_finite() && step != 0.0) {
            return Err(GridError::InvalidCoordinate(step));
        }
        let step = match orientation {
            Orientation::Ascending => step.abs(),
            Orientation::Descending => -step.abs(),
        };
        let values = (0..count).map(|i| first_center + i as f64 * step).collect();
        Self::new(values, orientation)
    }

    /// Coordinate values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Declared orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; empty axes cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at an index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Smallest value
    pub fn min(&self) -> f64 {
        match self.orientation {
            Orientation::Ascending => self.values[0],
            Orientation::Descending => self.values[self.values.len() - 1],
        }
    }

    /// Largest value
    pub fn max(&self) -> f64 {
        match self.orientation {
            Orientation::Ascending => self.values[self.values.len() - 1],
            Orientation::Descending => self.values[0],
        }
    }

    /// Largest distance between neighbouring values, 0 for a single value
    pub fn spacing(&self) -> f64 {
        self.values
            .windows(2)
            .map(|p| (p[1] - p[0]).abs())
            .fold(0.0, f64::max)
    }

    /// Longitude convention this axis appears to use
    pub fn longitude_convention(&self) -> LongitudeConvention {
        if self.max() > 180.0 {
            LongitudeConvention::Positive360
        } else {
            LongitudeConvention::Signed180
        }
    }

    /// Nearest index plus a warning when the value lies outside the span
    ///
    /// Ties resolve to the lower index. A value counts as out of range when
    /// it is more than one grid spacing beyond either end of the axis.
    pub fn nearest_lookup(&self, value: f64) -> GridResult<(usize, Option<OutOfRangeWarning>)> {
        if !value.is_finite() {
            return Err(GridError::InvalidCoordinate(value));
        }

        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, v) in self.values.iter().enumerate() {
            let distance = (v - value).abs();
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }

        let tolerance = self.spacing();
        let warning = if value < self.min() - tolerance || value > self.max() + tolerance {
            Some(OutOfRangeWarning { value, min: self.min(), max: self.max(), index: best })
        } else {
            None
        };

        Ok((best, warning))
    }

    /// Index of the value closest to `value`
    ///
    /// Out-of-range values are clamped to an endpoint and logged as a warning.
    pub fn nearest_index(&self, value: f64) -> GridResult<usize> {
        let (index, warning) = self.nearest_lookup(value)?;
        if let Some(w) = warning {
            warn!("Out of range: {}", w);
        }
        Ok(index)
    }

    /// Sub-axis covering `start..=end`
    pub fn slice(&self, start: usize, end: usize) -> GridResult<CoordinateAxis> {
        if start > end || end >= self.values.len() {
            return Err(GridError::GenericError(format!(
                "Axis slice {}..={} invalid for axis of length {}",
                start,
                end,
                self.values.len()
            )));
        }
        Ok(CoordinateAxis {
            values: self.values[start..=end].to_vec(),
            orientation: self.orientation,
        })
    }
}

/// Index of the axis element closest to `value`
///
/// Free-function form of [`CoordinateAxis::nearest_index`].
pub fn nearest_index(axis: &CoordinateAxis, value: f64) -> GridResult<usize> {
    axis.nearest_index(value)
}
