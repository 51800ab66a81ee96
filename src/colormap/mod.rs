//! Colour scales and rendering
//!
//! Scales are looked up in a `ProductTable` that callers construct and pass
//! along explicitly.

mod color;
mod scale;
mod table;
mod render;
mod tests;

pub use color::RgbColor;
pub use scale::{ColorScale, ScaleKind};
pub use table::ProductTable;
pub use render::{colorize, ensure_png_extension, save_png};
