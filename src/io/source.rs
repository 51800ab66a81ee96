//! Reader seam for gridded products
//!
//! Every input format is read through `RasterSource`. Readers return raw
//! stored values (widened to f64) together with the variable attributes;
//! decoding to physical values happens afterwards.

use std::collections::BTreeMap;
use log::debug;

use crate::coordinate::CoordinateAxis;
use crate::raster::{AttrValue, Attributes, FlagGrid, Grid, GridError, GridResult, RasterStack};

/// Names tried, in order, for the latitude coordinate variable
pub const LATITUDE_NAMES: &[&str] = &["lat", "latitude"];
/// Names tried, in order, for the longitude coordinate variable
pub const LONGITUDE_NAMES: &[&str] = &["lon", "longitude"];

/// One band of a variable with its attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Variable name
    pub name: String,
    /// Stored values, rows along latitude and columns along longitude
    pub grid: Grid<f64>,
    /// Variable attributes (fill value, scale, units, ...)
    pub attributes: Attributes,
}

/// Source of gridded variables and their coordinates
pub trait RasterSource {
    /// Short description of the source for logs and reports
    fn describe(&self) -> String;

    /// Names of the data variables
    fn variables(&self) -> Vec<String>;

    /// Number of bands along the leading dimension of a variable
    fn band_count(&self, name: &str) -> GridResult<usize>;

    /// Read one band of a variable
    fn read_variable(&self, name: &str, band: usize) -> GridResult<Variable>;

    /// Read a packed quality-flag variable
    fn read_flags(&self, name: &str, band: usize) -> GridResult<FlagGrid>;

    /// Read the values of a 1-D coordinate variable
    fn read_coordinates(&self, name: &str) -> GridResult<Vec<f64>>;

    /// Look up a file-level attribute
    fn global_attribute(&self, name: &str) -> Option<AttrValue>;

    /// Latitude and longitude axes, orientation inferred from the values
    fn axes(&self) -> GridResult<(CoordinateAxis, CoordinateAxis)> {
        let lat = first_coordinates(self, LATITUDE_NAMES)?;
        let lon = first_coordinates(self, LONGITUDE_NAMES)?;
        Ok((CoordinateAxis::infer(lat)?, CoordinateAxis::infer(lon)?))
    }
}

fn first_coordinates<S: RasterSource + ?Sized>(source: &S, names: &[&str]) -> GridResult<Vec<f64>> {
    for name in names {
        match source.read_coordinates(name) {
            Ok(values) => return Ok(values),
            Err(GridError::VariableNotFound(_)) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(GridError::VariableNotFound(names.join("|")))
}

/// In-memory source, used by tests and by callers that read files themselves
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    label: String,
    variables: BTreeMap<String, (RasterStack<f64>, Attributes)>,
    flags: BTreeMap<String, FlagGrid>,
    coordinates: BTreeMap<String, Vec<f64>>,
    globals: Attributes,
}

impl MemorySource {
    /// Create an empty source
    pub fn new(label: &str) -> Self {
        MemorySource { label: label.to_string(), ..Default::default() }
    }

    /// Add a single-band variable
    pub fn with_variable(self, name: &str, grid: Grid<f64>, attributes: Attributes) -> GridResult<Self> {
        let stack = RasterStack::from_grids(vec![grid])?;
        Ok(self.with_stack(name, stack, attributes))
    }

    /// Add a multi-band variable
    pub fn with_stack(mut self, name: &str, stack: RasterStack<f64>, attributes: Attributes) -> Self {
        self.variables.insert(name.to_string(), (stack, attributes));
        self
    }

    /// Add a packed flag variable
    pub fn with_flags(mut self, name: &str, flags: FlagGrid) -> Self {
        self.flags.insert(name.to_string(), flags);
        self
    }

    /// Add a coordinate variable
    pub fn with_coordinates(mut self, name: &str, values: Vec<f64>) -> Self {
        self.coordinates.insert(name.to_string(), values);
        self
    }

    /// Add a file-level attribute
    pub fn with_global(mut self, name: &str, value: AttrValue) -> Self {
        self.globals.insert(name, value);
        self
    }

    fn stack(&self, name: &str) -> GridResult<&(RasterStack<f64>, Attributes)> {
        self.variables
            .get(name)
            .ok_or_else(|| GridError::VariableNotFound(name.to_string()))
    }
}

impl RasterSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory:{}", self.label)
    }

    fn variables(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }

    fn band_count(&self, name: &str) -> GridResult<usize> {
        Ok(self.stack(name)?.0.band_count())
    }

    fn read_variable(&self, name: &str, band: usize) -> GridResult<Variable> {
        let (stack, attributes) = self.stack(name)?;
        debug!("Reading {} band {} from {}", name, band, self.describe());
        Ok(Variable {
            name: name.to_string(),
            grid: stack.band(band)?,
            attributes: attributes.clone(),
        })
    }

    fn read_flags(&self, name: &str, _band: usize) -> GridResult<FlagGrid> {
        self.flags
            .get(name)
            .cloned()
            .ok_or_else(|| GridError::VariableNotFound(name.to_string()))
    }

    fn read_coordinates(&self, name: &str) -> GridResult<Vec<f64>> {
        self.coordinates
            .get(name)
            .cloned()
            .ok_or_else(|| GridError::VariableNotFound(name.to_string()))
    }

    fn global_attribute(&self, name: &str) -> Option<AttrValue> {
        self.globals.get(name).cloned()
    }
}
