//! Product colour tables
//!
//! A `ProductTable` maps product keys to colour scales. It is built from
//! TOML and handed to whatever renders; there is no process-wide table.

use std::collections::HashMap;
use std::fs;
use log::{debug, info};

use crate::raster::{GridError, GridResult};

use super::color::RgbColor;
use super::scale::{ColorScale, ScaleKind};

/// Bundled colour scales
const BUILTIN_SCALES: &str = include_str!("../../color_scales.toml");

/// Colour scales keyed by product
#[derive(Debug, Clone, Default)]
pub struct ProductTable {
    scales: Vec<ColorScale>,
    index: HashMap<String, usize>,
}

impl ProductTable {
    /// Parse a table from TOML text with `[[scale]]` entries
    pub fn from_str(content: &str) -> GridResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(GridError::ConfigError(format!("Failed to parse TOML: {}", e))),
        };

        let mut table = ProductTable::default();
        if let Some(entries) = toml_value.get("scale").and_then(|v| v.as_array()) {
            for entry in entries {
                table.insert(parse_scale(entry)?);
            }
        }

        debug!("Parsed {} colour scales", table.scales.len());
        Ok(table)
    }

    /// Load a table from a TOML file
    pub fn from_file(path: &str) -> GridResult<Self> {
        let content = fs::read_to_string(path)?;
        let table = ProductTable::from_str(&content)?;
        info!("Loaded {} colour scales from {}", table.len(), path);
        Ok(table)
    }

    /// The bundled table (LST, NDVI, SM, FRP, PRECIP, FAPAR, DSSF)
    pub fn builtin() -> GridResult<Self> {
        ProductTable::from_str(BUILTIN_SCALES)
    }

    /// Add or replace a scale
    pub fn insert(&mut self, scale: ColorScale) {
        let key = scale.product.to_ascii_uppercase();
        match self.index.get(&key) {
            Some(&i) => self.scales[i] = scale,
            None => {
                self.index.insert(key, self.scales.len());
                self.scales.push(scale);
            }
        }
    }

    /// Scale for a product (case-insensitive)
    pub fn get(&self, product: &str) -> GridResult<&ColorScale> {
        self.index
            .get(&product.to_ascii_uppercase())
            .map(|&i| &self.scales[i])
            .ok_or_else(|| {
                GridError::ConfigError(format!(
                    "No colour scale for product '{}' (known: {})",
                    product,
                    self.products().join(", ")
                ))
            })
    }

    /// Product keys in insertion order
    pub fn products(&self) -> Vec<&str> {
        self.scales.iter().map(|s| s.product.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

fn parse_scale(entry: &toml::Value) -> GridResult<ColorScale> {
    let product = entry
        .get("product")
        .and_then(|v| v.as_str())
        .ok_or_else(|| GridError::ConfigError("Scale entry has no product".to_string()))?;

    let kind = match entry.get("kind").and_then(|v| v.as_str()) {
        Some(name) => ScaleKind::from_name(name)?,
        None => ScaleKind::Listed,
    };

    let colors = entry
        .get("colors")
        .and_then(|v| v.as_array())
        .ok_or_else(|| GridError::ConfigError(format!("Scale '{}' has no colors", product)))?
        .iter()
        .map(|c| match c.as_str() {
            Some(s) => RgbColor::parse(s),
            None => Err(GridError::ConfigError(format!("Scale '{}' has a non-string color", product))),
        })
        .collect::<GridResult<Vec<_>>>()?;

    let vmin = number(entry, "vmin", product)?;
    let vmax = number(entry, "vmax", product)?;
    let under = optional_color(entry, "under")?;
    let over = optional_color(entry, "over")?;
    let title = entry.get("title").and_then(|v| v.as_str()).unwrap_or(product);
    let units = entry.get("units").and_then(|v| v.as_str()).unwrap_or("");

    Ok(ColorScale::new(product, kind, colors, vmin, vmax)?
        .with_extremes(under, over)
        .with_labels(title, units))
}

fn number(entry: &toml::Value, key: &str, product: &str) -> GridResult<f64> {
    entry
        .get(key)
        .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
        .ok_or_else(|| GridError::ConfigError(format!("Scale '{}' has no numeric {}", product, key)))
}

fn optional_color(entry: &toml::Value, key: &str) -> GridResult<Option<RgbColor>> {
    match entry.get(key).and_then(|v| v.as_str()) {
        Some(s) => RgbColor::parse(s).map(Some),
        None => Ok(None),
    }
}
