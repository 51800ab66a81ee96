//! RGB colours parsed from hex codes or a small set of names

use crate::raster::{GridError, GridResult};

/// Simple RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

/// Named colours accepted in colour scale files
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("green", "#008000"),
    ("limegreen", "#32cd32"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("gray", "#808080"),
];

impl RgbColor {
    /// Create a new RGB color
    ///
    /// # Arguments
    /// * `r` - Red component (0-255)
    /// * `g` - Green component (0-255)
    /// * `b` - Blue component (0-255)
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        RgbColor { r, g, b }
    }

    /// Convert to hex string (#RRGGBB format)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Create from hex string
    ///
    /// # Arguments
    /// * `hex` - Hex color string (with or without # prefix)
    ///
    /// # Returns
    /// A Result containing the parsed RgbColor or an error
    pub fn from_hex(hex: &str) -> GridResult<Self> {
        let hex = hex.trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return Err(GridError::ConfigError(format!(
                "Invalid hex color code: {} - must be 6 hexadecimal digits",
                hex
            )));
        }

        let r = parse_hex_component(&hex[0..2], hex)?;
        let g = parse_hex_component(&hex[2..4], hex)?;
        let b = parse_hex_component(&hex[4..6], hex)?;

        Ok(RgbColor { r, g, b })
    }

    /// Parse a hex code or one of the known colour names
    pub fn parse(spec: &str) -> GridResult<Self> {
        let spec = spec.trim();
        if spec.starts_with('#') {
            return RgbColor::from_hex(spec);
        }
        let lower = spec.to_ascii_lowercase();
        match NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
            Some((_, hex)) => RgbColor::from_hex(hex),
            None => RgbColor::from_hex(spec),
        }
    }

    /// Blend towards `other`; `t` is clamped to [0, 1]
    pub fn lerp(&self, other: &RgbColor, t: f64) -> RgbColor {
        let t = t.clamp(0.0, 1.0);
        RgbColor {
            r: lerp_component(self.r, other.r, t),
            g: lerp_component(self.g, other.g, t),
            b: lerp_component(self.b, other.b, t),
        }
    }
}

/// Helper function to parse a hex color component
fn parse_hex_component(hex_part: &str, full_hex: &str) -> GridResult<u8> {
    u8::from_str_radix(hex_part, 16)
        .map_err(|_| GridError::ConfigError(format!("Invalid hex color: {}", full_hex)))
}

fn lerp_component(start: u8, end: u8, t: f64) -> u8 {
    (start as f64 + (end as f64 - start as f64) * t).round() as u8
}
