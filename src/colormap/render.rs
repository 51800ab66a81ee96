//! Rendering grids to north-up RGBA images

use std::path::Path;
use image::{Rgba, RgbaImage};
use log::info;

use crate::coordinate::Orientation;
use crate::raster::{Grid, GridError, GridResult};

use super::scale::ColorScale;

/// Colour every cell of a grid
///
/// # Arguments
/// * `grid` - Physical values; NaN cells become transparent
/// * `scale` - Colour scale to apply
/// * `lat_orientation` - Orientation of the grid's latitude axis
///
/// # Returns
/// An image with north at the top, one pixel per cell
pub fn colorize(grid: &Grid<f64>, scale: &ColorScale, lat_orientation: Orientation) -> RgbaImage {
    let (rows, cols) = grid.shape();
    let mut image = RgbaImage::new(cols as u32, rows as u32);

    for r in 0..rows {
        // Ascending latitude puts the south edge in row 0
        let y = match lat_orientation {
            Orientation::Descending => r,
            Orientation::Ascending => rows - 1 - r,
        };
        for c in 0..cols {
            let pixel = match grid.get(r, c).and_then(|v| scale.color_for(v)) {
                Some(color) => Rgba([color.r, color.g, color.b, 255]),
                None => Rgba([0, 0, 0, 0]),
            };
            image.put_pixel(c as u32, y as u32, pixel);
        }
    }

    image
}

/// Ensure a file path has PNG extension for transparency support
pub fn ensure_png_extension(file_path: &str) -> String {
    let path = Path::new(file_path);

    if let Some(ext) = path.extension() {
        if ext.to_string_lossy().to_lowercase() == "png" {
            return file_path.to_string();
        }
    }

    let stem = path.file_stem().unwrap_or_default();
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    let new_path = parent.join(format!("{}.png", stem.to_string_lossy()));
    new_path.to_string_lossy().to_string()
}

/// Save an image as PNG, returning the path actually written
pub fn save_png(image: &RgbaImage, output_path: &str) -> GridResult<String> {
    let final_path = ensure_png_extension(output_path);
    if final_path != output_path {
        info!("Changed output extension to PNG for transparency support: {}", final_path);
    }

    match image.save(&final_path) {
        Ok(_) => {
            info!("Saved {}x{} image to {}", image.width(), image.height(), final_path);
            Ok(final_path)
        }
        Err(e) => Err(GridError::GenericError(format!("Failed to save image: {}", e))),
    }
}
