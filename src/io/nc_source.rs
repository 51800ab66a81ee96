//! Reader for NetCDF-4 and HDF5 products
//!
//! Data variables are `(lat, lon)` or `(band, lat, lon)`. Values are
//! requested from the C library as f64 (flags as i64), which converts from
//! the stored type; fill, scale and offset are left to `decode`.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use log::{debug, info, warn};
use netcdf::AttributeValue;

use crate::compression::{CompressionFactory, CompressionHandler};
use crate::raster::{AttrValue, Attributes, FlagGrid, Grid, GridError, GridResult};

use super::source::{RasterSource, Variable};

/// NetCDF file opened for reading
pub struct NetcdfSource {
    path: String,
    file: netcdf::File,
    /// Decompressed copy of a `.gz`/`.zst` product, removed on drop
    scratch: Option<PathBuf>,
}

impl NetcdfSource {
    /// Open a NetCDF or HDF5 file
    ///
    /// Gzip and zstd compressed files are decompressed to a temporary copy
    /// first, since the C library only reads from disk.
    pub fn open(path: &str) -> GridResult<Self> {
        let handler = CompressionFactory::handler_for_path(path);
        let (file, scratch) = if handler.name() == "none" {
            (netcdf::open(path)?, None)
        } else {
            let copy = scratch_copy(path, handler.as_ref())?;
            match netcdf::open(&copy) {
                Ok(file) => (file, Some(copy)),
                Err(e) => {
                    let _ = fs::remove_file(&copy);
                    return Err(e.into());
                }
            }
        };

        info!("Opened NetCDF product {}", path);
        Ok(NetcdfSource { path: path.to_string(), file, scratch })
    }

    fn variable(&self, name: &str) -> GridResult<netcdf::Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| GridError::VariableNotFound(name.to_string()))
    }
}

impl Drop for NetcdfSource {
    fn drop(&mut self) {
        if let Some(copy) = &self.scratch {
            if let Err(e) = fs::remove_file(copy) {
                warn!("Could not remove {}: {}", copy.display(), e);
            }
        }
    }
}

fn scratch_copy(path: &str, handler: &dyn CompressionHandler) -> GridResult<PathBuf> {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let payload = handler.decompress(&fs::read(path)?)?;
    let copy = std::env::temp_dir().join(format!(
        "geoslice_{}_{}.nc",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    fs::write(&copy, &payload)?;
    debug!("{}: {} decompressed bytes in {}", path, payload.len(), copy.display());
    Ok(copy)
}

/// (bands, rows, cols) of a gridded variable
fn grid_shape(var: &netcdf::Variable) -> GridResult<(usize, usize, usize)> {
    let lens: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    match lens.as_slice() {
        [rows, cols] => Ok((1, *rows, *cols)),
        [bands, rows, cols] => Ok((*bands, *rows, *cols)),
        other => Err(GridError::GenericError(format!(
            "Variable {} has {} dimensions, expected (lat, lon) or (band, lat, lon)",
            var.name(),
            other.len()
        ))),
    }
}

fn check_band(var: &netcdf::Variable, band: usize, bands: usize) -> GridResult<()> {
    if band >= bands {
        return Err(GridError::GenericError(format!(
            "Band {} out of range ({} has {} bands)",
            band,
            var.name(),
            bands
        )));
    }
    Ok(())
}

fn attr_value(value: AttributeValue) -> Option<AttrValue> {
    match value {
        AttributeValue::Str(text) => Some(AttrValue::Text(text)),
        other => f64::try_from(other).ok().map(AttrValue::Number),
    }
}

fn attributes_of(var: &netcdf::Variable) -> Attributes {
    let mut attributes = Attributes::new();
    for attr in var.attributes() {
        let name = attr.name().to_string();
        match attr.value().ok().and_then(attr_value) {
            Some(value) => attributes.insert(&name, value),
            None => debug!("Skipping attribute {} of {}", name, var.name()),
        }
    }
    attributes
}

impl RasterSource for NetcdfSource {
    fn describe(&self) -> String {
        format!("netcdf:{}", self.path)
    }

    fn variables(&self) -> Vec<String> {
        self.file
            .variables()
            .filter(|v| v.dimensions().len() >= 2)
            .map(|v| v.name().to_string())
            .collect()
    }

    fn band_count(&self, name: &str) -> GridResult<usize> {
        Ok(grid_shape(&self.variable(name)?)?.0)
    }

    fn read_variable(&self, name: &str, band: usize) -> GridResult<Variable> {
        let var = self.variable(name)?;
        let (bands, rows, cols) = grid_shape(&var)?;
        check_band(&var, band, bands)?;

        let values: Vec<f64> = if var.dimensions().len() == 3 {
            var.get_values((band, .., ..))?
        } else {
            var.get_values(..)?
        };
        debug!("Read {} band {} ({}x{}) from {}", name, band, rows, cols, self.path);

        Ok(Variable {
            name: name.to_string(),
            grid: Grid::new(rows, cols, values)?,
            attributes: attributes_of(&var),
        })
    }

    /// Signed flag types keep their two's complement bits
    fn read_flags(&self, name: &str, band: usize) -> GridResult<FlagGrid> {
        let var = self.variable(name)?;
        let (bands, rows, cols) = grid_shape(&var)?;
        check_band(&var, band, bands)?;

        let values: Vec<i64> = if var.dimensions().len() == 3 {
            var.get_values((band, .., ..))?
        } else {
            var.get_values(..)?
        };
        let flags = values.into_iter().map(|v| v as u32).collect();
        Ok(FlagGrid::U32(Grid::new(rows, cols, flags)?))
    }

    fn read_coordinates(&self, name: &str) -> GridResult<Vec<f64>> {
        let var = self.variable(name)?;
        if var.dimensions().len() != 1 {
            return Err(GridError::GenericError(format!(
                "Coordinate variable {} is not 1-D",
                name
            )));
        }
        Ok(var.get_values(..)?)
    }

    fn global_attribute(&self, name: &str) -> Option<AttrValue> {
        self.file.attribute(name)?.value().ok().and_then(attr_value)
    }
}
