//! Point structure for representing geographic coordinates

use crate::raster::{GridError, GridResult};

/// A geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Longitude
    pub lon: f64,
    /// Latitude
    pub lat: f64,
}

impl Point {
    /// Create a new point
    pub fn new(lon: f64, lat: f64) -> Self {
        Point { lon, lat }
    }

    /// Parse a point from "lon,lat"
    pub fn from_string(coord_str: &str) -> GridResult<Self> {
        let parts: Vec<&str> = coord_str.split(',').collect();
        if parts.len() != 2 {
            return Err(GridError::GenericError(
                "Coordinate must be in format 'lon,lat'".to_string(),
            ));
        }

        let lon = parts[0].trim().parse::<f64>()
            .map_err(|_| GridError::GenericError(format!("Invalid longitude '{}'", parts[0])))?;
        let lat = parts[1].trim().parse::<f64>()
            .map_err(|_| GridError::GenericError(format!("Invalid latitude '{}'", parts[1])))?;

        Ok(Point::new(lon, lat))
    }
}
