//! Sample data types of flat binary payloads

use std::fmt;
use std::io::Cursor;
use log::debug;

use crate::raster::{FlagGrid, Grid, GridError, GridResult};

use super::byte_order::ByteOrder;

/// Storage type of one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

impl DataType {
    /// Parse a type name such as "u8", "int16" or "float32"
    pub fn from_name(name: &str) -> GridResult<Self> {
        match name.to_lowercase().as_str() {
            "u8" | "uint8" | "byte" => Ok(DataType::U8),
            "i8" | "int8" => Ok(DataType::I8),
            "u16" | "uint16" => Ok(DataType::U16),
            "i16" | "int16" => Ok(DataType::I16),
            "u32" | "uint32" => Ok(DataType::U32),
            "i32" | "int32" => Ok(DataType::I32),
            "f32" | "float32" => Ok(DataType::F32),
            "f64" | "float64" => Ok(DataType::F64),
            other => Err(GridError::ConfigError(format!("Unknown data type '{}'", other))),
        }
    }

    /// Size of one sample in bytes
    pub fn size(&self) -> usize {
        match self {
            DataType::U8 | DataType::I8 => 1,
            DataType::U16 | DataType::I16 => 2,
            DataType::U32 | DataType::I32 | DataType::F32 => 4,
            DataType::F64 => 8,
        }
    }

    /// A value as it would read back after being stored in this type
    ///
    /// Only `f32` loses precision: `-999.9` is stored as `-999.9000244...`,
    /// so sentinels given in decimal must be rounded before exact comparison.
    pub fn storage_value(&self, value: f64) -> f64 {
        match self {
            DataType::F32 => value as f32 as f64,
            _ => value,
        }
    }

    /// Payload length of `count` samples, or None on overflow
    pub fn payload_len(&self, count: usize) -> Option<usize> {
        count.checked_mul(self.size())
    }
}

/// `rows * cols` samples, rejecting products that overflow `usize`
pub fn sample_count(rows: usize, cols: usize) -> GridResult<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        GridError::ConfigError(format!("Grid of {}x{} samples is too large", rows, cols))
    })
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DataType::U8 => "u8",
            DataType::I8 => "i8",
            DataType::U16 => "u16",
            DataType::I16 => "i16",
            DataType::U32 => "u32",
            DataType::I32 => "i32",
            DataType::F32 => "f32",
            DataType::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// Decode a payload into samples widened to f64
///
/// # Arguments
/// * `bytes` - Payload; its length must be a multiple of the sample size
/// * `data_type` - Storage type
/// * `byte_order` - Byte order of multi-byte samples
pub fn decode_samples(bytes: &[u8], data_type: DataType, byte_order: ByteOrder) -> GridResult<Vec<f64>> {
    let size = data_type.size();
    if bytes.len() % size != 0 {
        return Err(GridError::GenericError(format!(
            "Payload of {} bytes is not a whole number of {} samples",
            bytes.len(),
            data_type
        )));
    }

    let count = bytes.len() / size;
    let handler = byte_order.create_handler();
    let mut cursor = Cursor::new(bytes);
    let mut samples = Vec::with_capacity(count);

    for _ in 0..count {
        let value = match data_type {
            DataType::U8 => handler.read_u8(&mut cursor)? as f64,
            DataType::I8 => handler.read_i8(&mut cursor)? as f64,
            DataType::U16 => handler.read_u16(&mut cursor)? as f64,
            DataType::I16 => handler.read_i16(&mut cursor)? as f64,
            DataType::U32 => handler.read_u32(&mut cursor)? as f64,
            DataType::I32 => handler.read_i32(&mut cursor)? as f64,
            DataType::F32 => handler.read_f32(&mut cursor)? as f64,
            DataType::F64 => handler.read_f64(&mut cursor)?,
        };
        samples.push(value);
    }

    debug!("Decoded {} {} samples ({} byte order)", count, data_type, byte_order.name());
    Ok(samples)
}

/// Decode a payload of unsigned flag samples into a grid
pub fn decode_flags(
    bytes: &[u8],
    data_type: DataType,
    byte_order: ByteOrder,
    rows: usize,
    cols: usize,
) -> GridResult<FlagGrid> {
    let count = sample_count(rows, cols)?;
    let expected = data_type.payload_len(count).ok_or_else(|| {
        GridError::ConfigError(format!("Flag grid of {}x{} {} is too large", rows, cols, data_type))
    })?;
    if bytes.len() != expected {
        return Err(GridError::GenericError(format!(
            "Flag payload has {} bytes, expected {} for {}x{} {}",
            bytes.len(),
            expected,
            rows,
            cols,
            data_type
        )));
    }

    let handler = byte_order.create_handler();
    let mut cursor = Cursor::new(bytes);

    match data_type {
        DataType::U8 => Ok(FlagGrid::U8(Grid::new(rows, cols, bytes.to_vec())?)),
        DataType::U16 => {
            let mut data = Vec::with_capacity(count);
            for _ in 0..count {
                data.push(handler.read_u16(&mut cursor)?);
            }
            Ok(FlagGrid::U16(Grid::new(rows, cols, data)?))
        }
        DataType::U32 => {
            let mut data = Vec::with_capacity(count);
            for _ in 0..count {
                data.push(handler.read_u32(&mut cursor)?);
            }
            Ok(FlagGrid::U32(Grid::new(rows, cols, data)?))
        }
        other => Err(GridError::ConfigError(format!(
            "Flags must be stored as u8, u16 or u32, not {}",
            other
        ))),
    }
}
