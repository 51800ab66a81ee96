//! Bounding box structure for defining geographic regions of interest

use crate::raster::{GridError, GridResult};
use super::point::Point;

/// Longitude numbering used by an axis or a bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongitudeConvention {
    /// Longitudes in [-180, 180]
    Signed180,
    /// Longitudes in [0, 360]
    Positive360,
}

impl LongitudeConvention {
    /// Express a longitude in this convention
    ///
    /// Values already inside the convention's closed range are returned
    /// unchanged, so 180 stays 180 and 0 stays 0.
    pub fn normalize(&self, lon: f64) -> f64 {
        match self {
            LongitudeConvention::Signed180 => {
                if (-180.0..=180.0).contains(&lon) {
                    lon
                } else {
                    (lon + 180.0).rem_euclid(360.0) - 180.0
                }
            }
            LongitudeConvention::Positive360 => {
                if (0.0..=360.0).contains(&lon) {
                    lon
                } else {
                    lon.rem_euclid(360.0)
                }
            }
        }
    }
}

/// A geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Western edge
    pub min_lon: f64,
    /// Southern edge
    pub min_lat: f64,
    /// Eastern edge
    pub max_lon: f64,
    /// Northern edge
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        BoundingBox { min_lon, min_lat, max_lon, max_lat }
    }

    /// Parse a bounding box from a string (format: "minlon,minlat,maxlon,maxlat")
    pub fn from_string(bbox_str: &str) -> GridResult<Self> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err(GridError::InvalidBoundingBox(
                "Bounding box must have 4 comma-separated values".to_string(),
            ));
        }

        let parse = |s: &str, what: &str| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| GridError::InvalidBoundingBox(format!("Invalid {} value '{}'", what, s)))
        };

        let bbox = BoundingBox::new(
            parse(parts[0], "min_lon")?,
            parse(parts[1], "min_lat")?,
            parse(parts[2], "max_lon")?,
            parse(parts[3], "max_lat")?,
        );
        bbox.validate()?;
        Ok(bbox)
    }

    /// Check that all edges are finite and min <= max on both axes
    pub fn validate(&self) -> GridResult<()> {
        let edges = [self.min_lon, self.min_lat, self.max_lon, self.max_lat];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(GridError::InvalidBoundingBox(format!("non-finite edge in {:?}", self)));
        }
        if self.min_lat > self.max_lat {
            return Err(GridError::InvalidBoundingBox(format!(
                "min_lat {} > max_lat {}",
                self.min_lat, self.max_lat
            )));
        }
        if self.min_lon > self.max_lon {
            return Err(GridError::InvalidBoundingBox(format!(
                "min_lon {} > max_lon {} (box straddles the antimeridian for this longitude convention)",
                self.min_lon, self.max_lon
            )));
        }
        Ok(())
    }

    /// Re-express the longitudes in another convention
    ///
    /// Fails when the converted box straddles the antimeridian of that
    /// convention, since it would not map to one contiguous column range.
    pub fn normalized_to(&self, convention: LongitudeConvention) -> GridResult<Self> {
        let bbox = BoundingBox::new(
            convention.normalize(self.min_lon),
            self.min_lat,
            convention.normalize(self.max_lon),
            self.max_lat,
        );
        bbox.validate()?;
        Ok(bbox)
    }

    /// Get the width of the bounding box in degrees
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Get the height of the bounding box in degrees
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Point {
        Point::new(self.min_lon + self.width() / 2.0, self.min_lat + self.height() / 2.0)
    }

    /// Check if this bounding box contains a point (edges included)
    pub fn contains(&self, point: &Point) -> bool {
        point.lon >= self.min_lon
            && point.lon <= self.max_lon
            && point.lat >= self.min_lat
            && point.lat <= self.max_lat
    }
}
