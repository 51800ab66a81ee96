//! Colour scales mapping physical values to colours

use std::fmt;

use crate::raster::{GridError, GridResult};

use super::color::RgbColor;

/// How values between vmin and vmax pick a colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    /// Equal-width bins, one per colour
    Listed,
    /// Colours evenly spaced over the range and blended
    Linear,
}

impl ScaleKind {
    /// Parse "listed" or "linear"
    pub fn from_name(name: &str) -> GridResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "listed" => Ok(ScaleKind::Listed),
            "linear" => Ok(ScaleKind::Linear),
            other => Err(GridError::ConfigError(format!("Unknown scale kind '{}'", other))),
        }
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScaleKind::Listed => write!(f, "listed"),
            ScaleKind::Linear => write!(f, "linear"),
        }
    }
}

/// Colour scale of one product
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    /// Product key, e.g. "LST"
    pub product: String,
    /// Human readable title
    pub title: String,
    /// Units of the values
    pub units: String,
    kind: ScaleKind,
    colors: Vec<RgbColor>,
    vmin: f64,
    vmax: f64,
    under: Option<RgbColor>,
    over: Option<RgbColor>,
}

impl ColorScale {
    /// Create a colour scale
    ///
    /// # Arguments
    /// * `product` - Product key
    /// * `kind` - Listed or linear
    /// * `colors` - At least one colour, lowest value first
    /// * `vmin` - Lower bound of the colour range
    /// * `vmax` - Upper bound of the colour range, greater than `vmin`
    ///
    /// # Returns
    /// The scale, or a `ConfigError` for an empty palette or a bad range
    pub fn new(
        product: &str,
        kind: ScaleKind,
        colors: Vec<RgbColor>,
        vmin: f64,
        vmax: f64,
    ) -> GridResult<Self> {
        if colors.is_empty() {
            return Err(GridError::ConfigError(format!("Scale '{}' has no colors", product)));
        }
        if !vmin.is_finite() || !vmax.is_finite() || vmin >= vmax {
            return Err(GridError::ConfigError(format!(
                "Scale '{}' needs finite vmin < vmax, got {} and {}",
                product, vmin, vmax
            )));
        }

        Ok(ColorScale {
            product: product.to_string(),
            title: product.to_string(),
            units: String::new(),
            kind,
            colors,
            vmin,
            vmax,
            under: None,
            over: None,
        })
    }

    /// Set the colours used below vmin and above vmax
    pub fn with_extremes(mut self, under: Option<RgbColor>, over: Option<RgbColor>) -> Self {
        self.under = under;
        self.over = over;
        self
    }

    /// Set title and units
    pub fn with_labels(mut self, title: &str, units: &str) -> Self {
        self.title = title.to_string();
        self.units = units.to_string();
        self
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    pub fn colors(&self) -> &[RgbColor] {
        &self.colors
    }

    /// Value range as (vmin, vmax)
    pub fn range(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }

    /// Colour for a value; None for NaN, which renders transparent
    pub fn color_for(&self, value: f64) -> Option<RgbColor> {
        if value.is_nan() {
            return None;
        }
        let n = self.colors.len();
        let first = self.colors[0];
        let last = self.colors[n - 1];

        if value < self.vmin {
            return Some(self.under.unwrap_or(first));
        }
        if value > self.vmax {
            return Some(self.over.unwrap_or(last));
        }

        let t = (value - self.vmin) / (self.vmax - self.vmin);
        let color = match self.kind {
            ScaleKind::Listed => {
                let bin = ((t * n as f64).floor() as usize).min(n - 1);
                self.colors[bin]
            }
            ScaleKind::Linear => {
                if n == 1 {
                    return Some(first);
                }
                let position = t * (n - 1) as f64;
                let lower = (position.floor() as usize).min(n - 2);
                self.colors[lower].lerp(&self.colors[lower + 1], position - lower as f64)
            }
        };
        Some(color)
    }
}
