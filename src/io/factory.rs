//! Factory choosing a reader by file extension

use std::path::Path;
use log::{debug, error, info};

use crate::raster::{GridError, GridResult};

use super::descriptor::GridDescriptor;
use super::flat::FlatGridSource;
#[cfg(feature = "netcdf")]
use super::nc_source::NetcdfSource;
use super::source::RasterSource;

/// Factory for creating raster sources
pub struct SourceFactory;

impl SourceFactory {
    /// Open a product file
    ///
    /// # Arguments
    /// * `file_path` - Product file; `.gz`/`.zst` suffixes are looked through
    /// * `descriptor_path` - Grid descriptor; defaults to `<file_path>.toml`
    ///
    /// # Returns
    /// A source for the file, or an error if no reader handles its format
    pub fn open(file_path: &str, descriptor_path: Option<&str>) -> GridResult<Box<dyn RasterSource>> {
        let extension = data_extension(file_path);
        debug!("Determining reader for file extension: {}", extension);

        if let Some(descriptor_path) = descriptor_path {
            return Self::open_flat(file_path, descriptor_path);
        }

        match extension.as_str() {
            "bin" | "raw" | "dat" | "img" => {
                let sibling = format!("{}.toml", file_path);
                Self::open_flat(file_path, &sibling)
            }
            "nc" | "nc4" | "h5" | "hdf5" => Self::open_netcdf(file_path),
            "grb" | "grib2" => {
                error!("No built-in reader for {}", file_path);
                Err(GridError::UnsupportedFormat(format!(
                    "{} (read the variable with an external reader and wrap it in a MemorySource)",
                    extension
                )))
            }
            _ => {
                error!("Unsupported file format: {}", extension);
                Err(GridError::UnsupportedFormat(extension))
            }
        }
    }

    #[cfg(feature = "netcdf")]
    fn open_netcdf(file_path: &str) -> GridResult<Box<dyn RasterSource>> {
        info!("Using NetCDF reader for {}", file_path);
        Ok(Box::new(NetcdfSource::open(file_path)?))
    }

    #[cfg(not(feature = "netcdf"))]
    fn open_netcdf(file_path: &str) -> GridResult<Box<dyn RasterSource>> {
        error!("{} needs the NetCDF reader, which this build does not include", file_path);
        Err(GridError::UnsupportedFormat(format!(
            "{} (rebuild with `--features netcdf`)",
            data_extension(file_path)
        )))
    }

    fn open_flat(file_path: &str, descriptor_path: &str) -> GridResult<Box<dyn RasterSource>> {
        info!("Using flat grid reader for {} with descriptor {}", file_path, descriptor_path);
        let descriptor = GridDescriptor::from_file(descriptor_path)?;
        Ok(Box::new(FlatGridSource::open(file_path, descriptor)?))
    }
}

/// Lower-case extension of the data inside any compression suffix
fn data_extension(file_path: &str) -> String {
    let path = Path::new(file_path);
    let outer = extension_of(path);
    if outer == "gz" || outer == "zst" {
        if let Some(stem) = path.file_stem() {
            return extension_of(Path::new(stem));
        }
    }
    outer
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("")
        .to_lowercase()
}
