//! TOML region file loading
//!
//! Region files list regions in the order they will be indexed:
//!
//! ```toml
//! [[region]]
//! name = "NE"
//! abbrev = "Nordeste"
//!
//! [[region.polygon]]
//! exterior = [[-48.0, -18.0], [-35.0, -18.0], [-35.0, -1.0], [-48.0, -1.0]]
//! holes = []
//! ```

use std::fs;
use log::info;

use crate::coordinate::Point;
use crate::raster::{GridError, GridResult};

use super::polygon::{Polygon, Ring};
use super::region_set::{Region, RegionSet};

/// Parse a region set from TOML text
pub fn regions_from_str(content: &str) -> GridResult<RegionSet> {
    let toml_value: toml::Value = match content.parse() {
        Ok(value) => value,
        Err(e) => return Err(GridError::ConfigError(format!("Failed to parse TOML: {}", e))),
    };

    let Some(entries) = toml_value.get("region").and_then(|v| v.as_array()) else {
        return Err(GridError::ConfigError("Region file has no [[region]] entries".to_string()));
    };

    let mut regions = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        regions.push(parse_region(entry, i)?);
    }

    RegionSet::new(regions)
}

/// Load a region set from a TOML file
pub fn load_regions(path: &str) -> GridResult<RegionSet> {
    let contents = fs::read_to_string(path)?;
    let set = regions_from_str(&contents)?;
    info!("Loaded {} regions from {}: {:?}", set.len(), path, set.names());
    Ok(set)
}

fn parse_region(entry: &toml::Value, position: usize) -> GridResult<Region> {
    let name = entry
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| GridError::ConfigError(format!("Region #{} has no name", position)))?;
    let abbrev = entry.get("abbrev").and_then(|v| v.as_str());

    let polygons = entry
        .get("polygon")
        .and_then(|v| v.as_array())
        .ok_or_else(|| GridError::ConfigError(format!("Region '{}' has no polygons", name)))?
        .iter()
        .map(|p| parse_polygon(p, name))
        .collect::<GridResult<Vec<_>>>()?;

    Ok(Region::new(name, abbrev, polygons))
}

fn parse_polygon(value: &toml::Value, region: &str) -> GridResult<Polygon> {
    let exterior = value
        .get("exterior")
        .ok_or_else(|| GridError::ConfigError(format!("Polygon of '{}' has no exterior", region)))
        .and_then(|v| parse_ring(v, region))?;

    let holes = match value.get("holes").and_then(|v| v.as_array()) {
        Some(rings) => rings
            .iter()
            .map(|r| parse_ring(r, region))
            .collect::<GridResult<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(Polygon::new(exterior, holes))
}

fn parse_ring(value: &toml::Value, region: &str) -> GridResult<Ring> {
    let Some(coords) = value.as_array() else {
        return Err(GridError::ConfigError(format!("Ring of '{}' is not an array", region)));
    };

    let mut vertices = Vec::with_capacity(coords.len());
    for pair in coords {
        let lon = pair.get(0).and_then(as_number);
        let lat = pair.get(1).and_then(as_number);
        match (lon, lat) {
            (Some(lon), Some(lat)) => vertices.push(Point::new(lon, lat)),
            _ => {
                return Err(GridError::ConfigError(format!(
                    "Ring of '{}' has a vertex that is not [lon, lat]: {}",
                    region, pair
                )))
            }
        }
    }

    Ring::new(vertices)
}

/// TOML numbers may be written as integers or floats
fn as_number(value: &toml::Value) -> Option<f64> {
    value.as_float().or_else(|| value.as_integer().map(|i| i as f64))
}
