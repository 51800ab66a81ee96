//! Grid descriptors for headerless binary products
//!
//! Flat binary products (e.g. the 1/112 degree NDVI composites) carry no
//! metadata, so their geometry and encoding come from a small TOML file:
//!
//! ```toml
//! variable = "NDVI"
//! rows = 9072
//! cols = 6720
//! data_type = "u8"
//! row_order = "north_up"
//! extent = [-93.0, -56.0, -33.0, 25.0]
//!
//! [attributes]
//! _FillValue = 255
//! valid_min = 0
//! valid_max = 250
//! scale_factor = 0.004
//! add_offset = -0.08
//!
//! [flags]
//! variable = "cloud"
//! substitute = ["NDV", "STM"]
//! data_type = "u8"
//! ```

use std::fs;
use log::debug;

use crate::coordinate::{BoundingBox, CoordinateAxis, Orientation};
use crate::raster::{AttrValue, Attributes, FillKind, GridError, GridResult};

use super::byte_order::ByteOrder;
use super::data_type::{sample_count, DataType};

/// Which edge of the grid the first stored row lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// Row 0 is the northern edge
    #[default]
    NorthUp,
    /// Row 0 is the southern edge
    SouthUp,
}

impl RowOrder {
    /// Parse "north_up" or "south_up"
    pub fn from_name(name: &str) -> GridResult<Self> {
        match name.to_lowercase().as_str() {
            "north_up" | "north-up" | "northup" => Ok(RowOrder::NorthUp),
            "south_up" | "south-up" | "southup" => Ok(RowOrder::SouthUp),
            other => Err(GridError::ConfigError(format!("Unknown row order '{}'", other))),
        }
    }

    /// Orientation of the latitude axis implied by the row order
    pub fn lat_orientation(&self) -> Orientation {
        match self {
            RowOrder::NorthUp => Orientation::Descending,
            RowOrder::SouthUp => Orientation::Ascending,
        }
    }
}

/// Companion flag file of a product
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    /// Variable name the flags are exposed under
    pub variable: String,
    /// (from, to) replacement applied to the data file name
    pub substitute: (String, String),
    /// Storage type of the flag samples
    pub data_type: DataType,
}

impl FlagSpec {
    /// Path of the flag file belonging to `data_path`
    pub fn flag_path(&self, data_path: &str) -> String {
        data_path.replace(&self.substitute.0, &self.substitute.1)
    }
}

/// Geometry and encoding of a flat binary grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridDescriptor {
    /// Name of the data variable
    pub variable: String,
    /// Number of rows (latitude)
    pub rows: usize,
    /// Number of columns (longitude)
    pub cols: usize,
    /// Number of bands stored one after another
    pub bands: usize,
    /// Bytes to skip before the first sample
    pub header_bytes: usize,
    /// Sample storage type
    pub data_type: DataType,
    /// Byte order of multi-byte samples
    pub byte_order: ByteOrder,
    /// Edge the first row lies on
    pub row_order: RowOrder,
    /// Outer edges of the grid
    pub extent: BoundingBox,
    /// Compression name; None picks by file extension
    pub compression: Option<String>,
    /// Variable attributes (fill value, scale, ...)
    pub attributes: Attributes,
    /// Companion flag file
    pub flags: Option<FlagSpec>,
    /// Nominal time of the product
    pub reference_time: Option<String>,
}

impl GridDescriptor {
    /// Parse a descriptor from TOML text
    pub fn from_str(content: &str) -> GridResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(GridError::ConfigError(format!("Failed to parse TOML: {}", e))),
        };

        let rows = required_usize(&toml_value, "rows")?;
        let cols = required_usize(&toml_value, "cols")?;
        let bands = optional_usize(&toml_value, "bands")?.unwrap_or(1);
        let header_bytes = optional_usize(&toml_value, "header_bytes")?.unwrap_or(0);
        if rows == 0 || cols == 0 || bands == 0 {
            return Err(GridError::ConfigError(format!(
                "Grid dimensions must be positive, got {} bands of {}x{}",
                bands, rows, cols
            )));
        }

        let data_type = DataType::from_name(required_str(&toml_value, "data_type")?)?;

        // Checked once here so band_len and payload_len cannot overflow
        let too_large = || {
            GridError::ConfigError(format!(
                "Grid of {} bands of {}x{} {} is too large",
                bands, rows, cols, data_type
            ))
        };
        sample_count(rows, cols)?
            .checked_mul(bands)
            .and_then(|count| data_type.payload_len(count))
            .and_then(|len| len.checked_add(header_bytes))
            .ok_or_else(too_large)?;
        let byte_order = match toml_value.get("byte_order").and_then(|v| v.as_str()) {
            Some(name) => ByteOrder::from_name(name)?,
            None => ByteOrder::default(),
        };
        let row_order = match toml_value.get("row_order").and_then(|v| v.as_str()) {
            Some(name) => RowOrder::from_name(name)?,
            None => RowOrder::default(),
        };

        let extent = parse_extent(&toml_value)?;
        let variable = toml_value
            .get("variable")
            .and_then(|v| v.as_str())
            .unwrap_or("data")
            .to_string();

        let descriptor = GridDescriptor {
            variable,
            rows,
            cols,
            bands,
            header_bytes,
            data_type,
            byte_order,
            row_order,
            extent,
            compression: toml_value.get("compression").and_then(|v| v.as_str()).map(str::to_string),
            attributes: storage_attributes(parse_attributes(&toml_value), data_type),
            flags: parse_flags(&toml_value)?,
            reference_time: toml_value
                .get("reference_time")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        };

        debug!("Parsed descriptor: {:?}", descriptor);
        Ok(descriptor)
    }

    /// Load a descriptor from a TOML file
    pub fn from_file(path: &str) -> GridResult<Self> {
        let content = fs::read_to_string(path)?;
        GridDescriptor::from_str(&content)
    }

    /// Number of samples in one band
    pub fn band_len(&self) -> usize {
        self.rows * self.cols
    }

    /// Expected payload length in bytes, header excluded
    pub fn payload_len(&self) -> usize {
        self.bands * self.band_len() * self.data_type.size()
    }

    /// Latitude cell centres in storage order
    pub fn lat_axis(&self) -> GridResult<CoordinateAxis> {
        let step = self.extent.height() / self.rows as f64;
        let orientation = self.row_order.lat_orientation();
        let first = match orientation {
            Orientation::Descending => self.extent.max_lat - step / 2.0,
            Orientation::Ascending => self.extent.min_lat + step / 2.0,
        };
        CoordinateAxis::from_cell_centers(first, step, self.rows, orientation)
    }

    /// Longitude cell centres, west to east
    pub fn lon_axis(&self) -> GridResult<CoordinateAxis> {
        let step = self.extent.width() / self.cols as f64;
        CoordinateAxis::from_cell_centers(
            self.extent.min_lon + step / 2.0,
            step,
            self.cols,
            Orientation::Ascending,
        )
    }
}

fn required_usize(value: &toml::Value, key: &str) -> GridResult<usize> {
    optional_usize(value, key)?
        .ok_or_else(|| GridError::ConfigError(format!("Descriptor is missing '{}'", key)))
}

fn optional_usize(value: &toml::Value, key: &str) -> GridResult<Option<usize>> {
    match value.get(key) {
        None => Ok(None),
        Some(v) => match v.as_integer() {
            Some(i) if i >= 0 => Ok(Some(i as usize)),
            _ => Err(GridError::ConfigError(format!(
                "Descriptor '{}' must be a non-negative integer, got {}",
                key, v
            ))),
        },
    }
}

fn required_str<'a>(value: &'a toml::Value, key: &str) -> GridResult<&'a str> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| GridError::ConfigError(format!("Descriptor is missing '{}'", key)))
}

fn as_number(value: &toml::Value) -> Option<f64> {
    value.as_float().or_else(|| value.as_integer().map(|i| i as f64))
}

fn parse_extent(value: &toml::Value) -> GridResult<BoundingBox> {
    let numbers: Vec<f64> = value
        .get("extent")
        .and_then(|v| v.as_array())
        .ok_or_else(|| GridError::ConfigError("Descriptor is missing 'extent'".to_string()))?
        .iter()
        .filter_map(as_number)
        .collect();

    if numbers.len() != 4 {
        return Err(GridError::ConfigError(
            "Descriptor 'extent' must be [min_lon, min_lat, max_lon, max_lat]".to_string(),
        ));
    }

    let extent = BoundingBox::new(numbers[0], numbers[1], numbers[2], numbers[3]);
    extent.validate()?;
    if extent.width() == 0.0 || extent.height() == 0.0 {
        return Err(GridError::ConfigError("Descriptor 'extent' has zero area".to_string()));
    }
    Ok(extent)
}

fn parse_attributes(value: &toml::Value) -> Attributes {
    let mut attributes = Attributes::new();
    if let Some(table) = value.get("attributes").and_then(|v| v.as_table()) {
        for (k, v) in table {
            if let Some(n) = as_number(v) {
                attributes.insert(k, AttrValue::Number(n));
            } else if let Some(s) = v.as_str() {
                attributes.insert(k, AttrValue::Text(s.to_string()));
            }
        }
    }
    attributes
}

/// Round raw-domain sentinels and bounds to what the samples can hold
///
/// A physical fill (`fill_kind = "physical"`) is compared after scaling in
/// f64 and is left alone.
fn storage_attributes(mut attributes: Attributes, data_type: DataType) -> Attributes {
    let physical_fill = matches!(
        attributes.text("fill_kind").map(FillKind::from_name),
        Some(Ok(FillKind::Physical))
    );

    for key in ["_FillValue", "MISSING_VALUE", "valid_min", "valid_max"] {
        if physical_fill && (key == "_FillValue" || key == "MISSING_VALUE") {
            continue;
        }
        if let Some(value) = attributes.number(key) {
            attributes.insert(key, AttrValue::Number(data_type.storage_value(value)));
        }
    }
    attributes
}

fn parse_flags(value: &toml::Value) -> GridResult<Option<FlagSpec>> {
    let Some(table) = value.get("flags") else {
        return Ok(None);
    };

    let variable = table
        .get("variable")
        .and_then(|v| v.as_str())
        .unwrap_or("flags")
        .to_string();

    let substitute = match table.get("substitute").and_then(|v| v.as_array()) {
        Some(pair) if pair.len() == 2 => match (pair[0].as_str(), pair[1].as_str()) {
            (Some(from), Some(to)) => (from.to_string(), to.to_string()),
            _ => return Err(GridError::ConfigError("Flag 'substitute' must hold two strings".to_string())),
        },
        _ => {
            return Err(GridError::ConfigError(
                "Flag table needs substitute = [\"from\", \"to\"]".to_string(),
            ))
        }
    };

    let data_type = match table.get("data_type").and_then(|v| v.as_str()) {
        Some(name) => DataType::from_name(name)?,
        None => DataType::U8,
    };

    Ok(Some(FlagSpec { variable, substitute, data_type }))
}
