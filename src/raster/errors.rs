//! Custom error types for grid processing

use std::fmt;
use std::io;

/// Grid processing error types
#[derive(Debug)]
pub enum GridError {
    /// I/O error
    IoError(io::Error),
    /// Fill masking was requested but the metadata carries no fill value
    InvalidFillValue(String),
    /// A bounding box resolved to a zero-width window along an axis
    EmptySlice {
        /// Axis the window collapsed on ("latitude" or "longitude")
        axis: &'static str,
        /// Human readable reason
        reason: String,
    },
    /// A named region is absent from the region set
    RegionNotFound(String),
    /// A region name appears twice in one region set
    DuplicateRegion(String),
    /// Two arrays that must align have different shapes
    ShapeMismatch {
        /// Expected (rows, cols)
        expected: (usize, usize),
        /// Actual (rows, cols)
        actual: (usize, usize),
    },
    /// Coordinate axis values are not strictly monotonic in the declared direction
    NonMonotonicAxis(usize),
    /// Coordinate axis has no values
    EmptyAxis,
    /// Coordinate value is NaN or infinite
    InvalidCoordinate(f64),
    /// Malformed or unusable bounding box
    InvalidBoundingBox(String),
    /// Bit position outside the sample width
    InvalidBitPosition {
        /// Requested bit
        bit: u32,
        /// Width of the sample type in bits
        width: u32,
    },
    /// Variable not present in the source
    VariableNotFound(String),
    /// Unsupported payload compression
    UnsupportedCompression(String),
    /// No reader for this file format
    UnsupportedFormat(String),
    /// Invalid configuration (descriptor, region file, colour table)
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::IoError(e) => write!(f, "I/O error: {}", e),
            GridError::InvalidFillValue(var) => {
                write!(f, "No fill value found in metadata for '{}'", var)
            }
            GridError::EmptySlice { axis, reason } => {
                write!(f, "Empty slice along {} axis: {}", axis, reason)
            }
            GridError::RegionNotFound(name) => write!(f, "Region not found: '{}'", name),
            GridError::DuplicateRegion(name) => write!(f, "Duplicate region name: '{}'", name),
            GridError::ShapeMismatch { expected, actual } => write!(
                f,
                "Shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            GridError::NonMonotonicAxis(i) => {
                write!(f, "Coordinate axis is not strictly monotonic at index {}", i)
            }
            GridError::EmptyAxis => write!(f, "Coordinate axis is empty"),
            GridError::InvalidCoordinate(v) => write!(f, "Invalid coordinate value: {}", v),
            GridError::InvalidBoundingBox(msg) => write!(f, "Invalid bounding box: {}", msg),
            GridError::InvalidBitPosition { bit, width } => {
                write!(f, "Bit position {} out of range for {}-bit samples", bit, width)
            }
            GridError::VariableNotFound(name) => write!(f, "Variable not found: '{}'", name),
            GridError::UnsupportedCompression(name) => {
                write!(f, "Unsupported compression: {}", name)
            }
            GridError::UnsupportedFormat(ext) => write!(f, "Unsupported file format: {}", ext),
            GridError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GridError::GenericError(msg) => write!(f, "Grid error: {}", msg),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GridError {
    fn from(error: io::Error) -> Self {
        GridError::IoError(error)
    }
}

#[cfg(feature = "netcdf")]
impl From<netcdf::Error> for GridError {
    fn from(error: netcdf::Error) -> Self {
        GridError::GenericError(format!("NetCDF error: {}", error))
    }
}

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

impl From<String> for GridError {
    fn from(msg: String) -> Self {
        GridError::GenericError(msg)
    }
}
