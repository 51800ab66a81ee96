//! Raster containers and per-cell decoding
//!
//! This module provides the grid types that every other part of the crate
//! operates on, together with fill/scale decoding and quality-flag bits.

pub mod errors;
mod types;
mod metadata;
mod encoding;
mod bits;
mod tests;

pub use errors::{GridError, GridResult};
pub use types::{Grid, RasterStack, Sample, Statistics};
pub use metadata::{AttrValue, Attributes};
pub use encoding::{apply_fill_mask, apply_scale_offset, apply_valid_range, decode, Encoding, FillKind};
pub use bits::{apply_quality_flag, extract_bit, BitField, FlagGrid};
