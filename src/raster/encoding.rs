//! Fill values and linear scale/offset decoding
//!
//! Stored samples become physical values through three steps: fill cells
//! become NaN, samples outside the valid range become NaN, and the rest are
//! transformed by `raw * scale + offset`. Whether the fill sentinel is
//! compared before or after the transform depends on the product format and
//! is carried in `FillKind`.

use log::debug;

use super::errors::{GridError, GridResult};
use super::metadata::Attributes;
use super::types::{Grid, Sample};

/// Where the fill sentinel is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    /// Compared against the stored (packed) sample
    Raw,
    /// Compared against the value after scale/offset
    Physical,
}

impl FillKind {
    /// Parse "raw" / "physical"
    pub fn from_name(name: &str) -> GridResult<Self> {
        match name.to_lowercase().as_str() {
            "raw" | "packed" => Ok(FillKind::Raw),
            "physical" | "unpacked" => Ok(FillKind::Physical),
            other => Err(GridError::ConfigError(format!("Unknown fill kind '{}'", other))),
        }
    }
}

/// How a variable's stored samples map to physical values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoding {
    /// Fill sentinel, if the metadata defines one
    pub fill_value: Option<f64>,
    /// Whether the sentinel is raw or physical
    pub fill_kind: FillKind,
    /// Multiplicative factor
    pub scale: f64,
    /// Additive offset
    pub offset: f64,
    /// Inclusive range of valid raw samples
    pub valid_range: Option<(f64, f64)>,
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding {
            fill_value: None,
            fill_kind: FillKind::Raw,
            scale: 1.0,
            offset: 0.0,
            valid_range: None,
        }
    }
}

impl Encoding {
    /// Read an encoding from variable attributes
    ///
    /// Recognises the CF names (`_FillValue`, `scale_factor`, `add_offset`,
    /// `valid_min`, `valid_max`) and the LSA SAF HDF5 names (`MISSING_VALUE`, `SCALING_FACTOR`,
    /// `OFFSET`), where the scaling factor divides the stored value.
    /// A `fill_kind` text attribute overrides the default raw comparison.
    pub fn from_attributes(attributes: &Attributes) -> GridResult<Self> {
        let mut encoding = Encoding::default();

        if let Some(fill) = attributes.number("_FillValue") {
            encoding.fill_value = Some(fill);
            encoding.scale = attributes.number("scale_factor").unwrap_or(1.0);
            encoding.offset = attributes.number("add_offset").unwrap_or(0.0);
        } else if let Some(fill) = attributes.number("MISSING_VALUE") {
            encoding.fill_value = Some(fill);
            let factor = attributes.number("SCALING_FACTOR").unwrap_or(1.0);
            if factor == 0.0 {
                return Err(GridError::ConfigError("SCALING_FACTOR is zero".to_string()));
            }
            encoding.scale = 1.0 / factor;
            encoding.offset = attributes.number("OFFSET").unwrap_or(0.0);
        } else {
            encoding.scale = attributes.number("scale_factor").unwrap_or(1.0);
            encoding.offset = attributes.number("add_offset").unwrap_or(0.0);
        }

        if let (Some(lo), Some(hi)) = (attributes.number("valid_min"), attributes.number("valid_max")) {
            encoding.valid_range = Some((lo, hi));
        }

        if let Some(kind) = attributes.text("fill_kind") {
            encoding.fill_kind = FillKind::from_name(kind)?;
        }

        debug!("Encoding from attributes: {:?}", encoding);
        Ok(encoding)
    }

    /// The fill value, or `InvalidFillValue` naming the variable
    pub fn require_fill(&self, variable: &str) -> GridResult<f64> {
        self.fill_value
            .ok_or_else(|| GridError::InvalidFillValue(variable.to_string()))
    }
}

/// Replace every sample equal to `fill_value` with NaN
///
/// Comparison is exact equality on the value as given; apply it to raw
/// samples for raw sentinels and to decoded values for physical sentinels.
/// Applying it twice gives the same result as applying it once.
pub fn apply_fill_mask<T: Sample>(raster: &Grid<T>, fill_value: f64) -> Grid<f64> {
    raster.map(|v| {
        let v = v.to_f64();
        if v == fill_value {
            f64::NAN
        } else {
            v
        }
    })
}

/// Elementwise `raw * scale + offset`; NaN cells stay NaN
pub fn apply_scale_offset<T: Sample>(raw: &Grid<T>, scale: f64, offset: f64) -> Grid<f64> {
    raw.map(|v| v.to_f64() * scale + offset)
}

/// Replace samples outside the inclusive range with NaN
pub fn apply_valid_range<T: Sample>(raster: &Grid<T>, min: f64, max: f64) -> Grid<f64> {
    raster.map(|v| {
        let v = v.to_f64();
        if v < min || v > max {
            f64::NAN
        } else {
            v
        }
    })
}

/// Decode stored samples to physical values
///
/// # Arguments
/// * `raw` - Stored samples
/// * `encoding` - Fill, valid range and scale/offset metadata
///
/// # Returns
/// Physical values with fill and out-of-range cells set to NaN
///
/// Raw fill values and valid bounds are compared in the precision of `T`.
pub fn decode<T: Sample>(raw: &Grid<T>, encoding: &Encoding) -> Grid<f64> {
    let mut values = raw.map(|v| v.to_f64());

    if let (Some(fill), FillKind::Raw) = (encoding.fill_value, encoding.fill_kind) {
        values = apply_fill_mask(&values, T::stored(fill));
    }

    if let Some((lo, hi)) = encoding.valid_range {
        values = apply_valid_range(&values, T::stored(lo), T::stored(hi));
    }

    values = apply_scale_offset(&values, encoding.scale, encoding.offset);

    if let (Some(fill), FillKind::Physical) = (encoding.fill_value, encoding.fill_kind) {
        values = apply_fill_mask(&values, fill);
    }

    values
}
