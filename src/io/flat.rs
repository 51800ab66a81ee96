//! Reader for headerless binary grids described by a `GridDescriptor`

use std::fs;
use log::{debug, info};

use crate::compression::{CompressionFactory, CompressionHandler};
use crate::coordinate::CoordinateAxis;
use crate::raster::{AttrValue, FlagGrid, Grid, GridError, GridResult};

use super::data_type::{decode_flags, decode_samples};
use super::descriptor::GridDescriptor;
use super::source::{RasterSource, Variable, LATITUDE_NAMES, LONGITUDE_NAMES};

/// Flat binary product loaded into memory
#[derive(Debug, Clone)]
pub struct FlatGridSource {
    path: String,
    descriptor: GridDescriptor,
    samples: Vec<f64>,
}

impl FlatGridSource {
    /// Read and decode a flat binary file
    ///
    /// # Arguments
    /// * `path` - Data file, optionally gzip or zstd compressed
    /// * `descriptor` - Geometry and encoding of the file
    ///
    /// # Returns
    /// The source, or an error if the payload length disagrees with the descriptor
    pub fn open(path: &str, descriptor: GridDescriptor) -> GridResult<Self> {
        let payload = read_payload(path, &descriptor)?;
        let expected = descriptor.payload_len();
        if payload.len() != expected {
            return Err(GridError::GenericError(format!(
                "{} holds {} bytes of samples, descriptor expects {} ({} x {}x{} {})",
                path,
                payload.len(),
                expected,
                descriptor.bands,
                descriptor.rows,
                descriptor.cols,
                descriptor.data_type
            )));
        }

        let samples = decode_samples(&payload, descriptor.data_type, descriptor.byte_order)?;
        info!(
            "Loaded {} ({} band(s) of {}x{} {})",
            path, descriptor.bands, descriptor.rows, descriptor.cols, descriptor.data_type
        );

        Ok(FlatGridSource { path: path.to_string(), descriptor, samples })
    }

    /// Descriptor the file was read with
    pub fn descriptor(&self) -> &GridDescriptor {
        &self.descriptor
    }

    fn check_variable(&self, name: &str) -> GridResult<()> {
        if name != self.descriptor.variable {
            return Err(GridError::VariableNotFound(name.to_string()));
        }
        Ok(())
    }
}

/// Read a file, decompress it, and drop the header
fn read_payload(path: &str, descriptor: &GridDescriptor) -> GridResult<Vec<u8>> {
    let handler: Box<dyn CompressionHandler> = match &descriptor.compression {
        Some(name) => CompressionFactory::get_handler_by_name(name)?,
        None => CompressionFactory::handler_for_path(path),
    };

    let raw = fs::read(path)?;
    let mut payload = handler.decompress(&raw)?;
    debug!("{}: {} bytes on disk, {} after {} decompression", path, raw.len(), payload.len(), handler.name());

    if payload.len() < descriptor.header_bytes {
        return Err(GridError::GenericError(format!(
            "{} is shorter ({} bytes) than its {} byte header",
            path,
            payload.len(),
            descriptor.header_bytes
        )));
    }
    payload.drain(..descriptor.header_bytes);
    Ok(payload)
}

impl RasterSource for FlatGridSource {
    fn describe(&self) -> String {
        format!("{} (flat {} grid)", self.path, self.descriptor.data_type)
    }

    fn variables(&self) -> Vec<String> {
        let mut names = vec![self.descriptor.variable.clone()];
        if let Some(flags) = &self.descriptor.flags {
            names.push(flags.variable.clone());
        }
        names
    }

    fn band_count(&self, name: &str) -> GridResult<usize> {
        self.check_variable(name)?;
        Ok(self.descriptor.bands)
    }

    fn read_variable(&self, name: &str, band: usize) -> GridResult<Variable> {
        self.check_variable(name)?;
        if band >= self.descriptor.bands {
            return Err(GridError::GenericError(format!(
                "Band {} out of range ({} has {} bands)",
                band, name, self.descriptor.bands
            )));
        }

        let size = self.descriptor.band_len();
        let start = band * size;
        let grid = Grid::new(
            self.descriptor.rows,
            self.descriptor.cols,
            self.samples[start..start + size].to_vec(),
        )?;

        Ok(Variable {
            name: name.to_string(),
            grid,
            attributes: self.descriptor.attributes.clone(),
        })
    }

    /// Flag files hold a single band, so `band` is ignored
    fn read_flags(&self, name: &str, _band: usize) -> GridResult<FlagGrid> {
        let spec = match &self.descriptor.flags {
            Some(spec) if spec.variable == name => spec,
            _ => return Err(GridError::VariableNotFound(name.to_string())),
        };

        let flag_path = spec.flag_path(&self.path);
        if flag_path == self.path {
            return Err(GridError::ConfigError(format!(
                "Flag substitution '{}' -> '{}' does not change {}",
                spec.substitute.0, spec.substitute.1, self.path
            )));
        }

        let handler = CompressionFactory::handler_for_path(&flag_path);
        let payload = handler.decompress(&fs::read(&flag_path)?)?;
        info!("Loaded flags {} from {}", name, flag_path);
        decode_flags(
            &payload,
            spec.data_type,
            self.descriptor.byte_order,
            self.descriptor.rows,
            self.descriptor.cols,
        )
    }

    fn read_coordinates(&self, name: &str) -> GridResult<Vec<f64>> {
        if LATITUDE_NAMES.contains(&name) {
            Ok(self.descriptor.lat_axis()?.values().to_vec())
        } else if LONGITUDE_NAMES.contains(&name) {
            Ok(self.descriptor.lon_axis()?.values().to_vec())
        } else {
            Err(GridError::VariableNotFound(name.to_string()))
        }
    }

    fn global_attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "reference_time" => self.descriptor.reference_time.clone().map(AttrValue::Text),
            _ => None,
        }
    }

    /// Axes come straight from the descriptor, with the declared row order
    fn axes(&self) -> GridResult<(CoordinateAxis, CoordinateAxis)> {
        Ok((self.descriptor.lat_axis()?, self.descriptor.lon_axis()?))
    }
}
