//! Named region collections
//!
//! A `RegionSet` keeps regions in load order and an explicit name -> index
//! map built once at construction. The index of a region is its position in
//! load order, which is also the value written into categorical masks.

use std::collections::HashMap;
use log::debug;

use crate::coordinate::Point;
use crate::raster::{GridError, GridResult};

use super::polygon::Polygon;

/// A named region made of one or more polygons
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Unique name used for lookups (e.g. "NE")
    pub name: String,
    /// Optional long name or abbreviation from the attribute table
    pub abbrev: Option<String>,
    /// Polygons making up the region
    pub polygons: Vec<Polygon>,
}

impl Region {
    /// Create a region
    pub fn new(name: &str, abbrev: Option<&str>, polygons: Vec<Polygon>) -> Self {
        Region {
            name: name.to_string(),
            abbrev: abbrev.map(str::to_string),
            polygons,
        }
    }

    /// True if any polygon contains the point
    pub fn contains(&self, point: &Point) -> bool {
        self.polygons.iter().any(|p| p.contains(point))
    }
}

/// Ordered set of regions with a name index
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
    index: HashMap<String, usize>,
}

impl RegionSet {
    /// Build a region set, rejecting duplicate names
    pub fn new(regions: Vec<Region>) -> GridResult<Self> {
        let mut index = HashMap::with_capacity(regions.len());
        for (i, region) in regions.iter().enumerate() {
            if index.insert(region.name.clone(), i).is_some() {
                return Err(GridError::DuplicateRegion(region.name.clone()));
            }
        }
        debug!("Region set with {} regions", regions.len());
        Ok(RegionSet { regions, index })
    }

    /// Regions in load order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region names in load order
    pub fn names(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.name.as_str()).collect()
    }

    /// Number of regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when the set holds no regions
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Index of a region by name, or `RegionNotFound`
    pub fn index_of(&self, name: &str) -> GridResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GridError::RegionNotFound(name.to_string()))
    }

    /// Region by index
    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    /// Index of the first region (in load order) containing the point
    pub fn first_containing(&self, point: &Point) -> Option<usize> {
        self.regions.iter().position(|r| r.contains(point))
    }

    /// Like `first_containing`, also trying the point shifted by 360 degrees
    ///
    /// Regions drawn in `[-180, 180)` then match grids in `[0, 360)` and the
    /// other way round.
    pub fn first_containing_wrapped(&self, point: &Point) -> Option<usize> {
        let shifted = [
            *point,
            Point::new(point.lon - 360.0, point.lat),
            Point::new(point.lon + 360.0, point.lat),
        ];
        self.regions
            .iter()
            .position(|r| shifted.iter().any(|p| r.contains(p)))
    }
}
