//! Array and table writers
//!
//! Grids are written as CSV (with a `row/col` header) or JSON. Missing
//! cells are written as an empty CSV field or JSON `null`.

use std::fs::File;
use std::io::{BufWriter, Write};
use log::info;

use crate::raster::{Grid, GridError, GridResult};

/// Output format for grids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayFormat {
    Csv,
    Json,
}

impl ArrayFormat {
    /// Parse "csv" or "json"
    pub fn from_name(name: &str) -> GridResult<Self> {
        match name.to_lowercase().as_str() {
            "csv" => Ok(ArrayFormat::Csv),
            "json" => Ok(ArrayFormat::Json),
            other => Err(GridError::GenericError(format!("Unsupported array format: {}", other))),
        }
    }
}

/// Save a grid to a file in the specified format
///
/// # Arguments
/// * `grid` - Values to write; NaN marks missing cells
/// * `path` - Path to save the file
/// * `format` - Output format
pub fn save_array(grid: &Grid<f64>, path: &str, format: ArrayFormat) -> GridResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    match format {
        ArrayFormat::Csv => write_csv(grid, &mut writer)?,
        ArrayFormat::Json => write_json(grid, &mut writer)?,
    }
    writer.flush()?;
    info!("Saved {}x{} array to {} as {:?}", grid.rows(), grid.cols(), path, format);
    Ok(())
}

/// Write a grid as CSV
pub fn write_csv<W: Write>(grid: &Grid<f64>, writer: &mut W) -> GridResult<()> {
    write!(writer, "row/col")?;
    for c in 0..grid.cols() {
        write!(writer, ",{}", c)?;
    }
    writeln!(writer)?;

    for r in 0..grid.rows() {
        write!(writer, "{}", r)?;
        for c in 0..grid.cols() {
            match grid.get(r, c) {
                Some(v) if !v.is_nan() => write!(writer, ",{}", v)?,
                _ => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write a grid as JSON
pub fn write_json<W: Write>(grid: &Grid<f64>, writer: &mut W) -> GridResult<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"rows\": {},", grid.rows())?;
    writeln!(writer, "  \"cols\": {},", grid.cols())?;
    writeln!(writer, "  \"data\": [")?;

    for r in 0..grid.rows() {
        write!(writer, "    [")?;
        for c in 0..grid.cols() {
            match grid.get(r, c) {
                Some(v) if v.is_finite() => write!(writer, "{}", v)?,
                _ => write!(writer, "null")?,
            }
            if c + 1 < grid.cols() {
                write!(writer, ", ")?;
            }
        }
        if r + 1 < grid.rows() {
            writeln!(writer, "],")?;
        } else {
            writeln!(writer, "]")?;
        }
    }

    writeln!(writer, "  ]")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Save `(label, value)` rows as a two-column CSV
pub fn save_series(rows: &[(String, f64)], value_name: &str, path: &str) -> GridResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "date,{}", value_name)?;
    for (label, value) in rows {
        if value.is_nan() {
            writeln!(writer, "{},", label)?;
        } else {
            writeln!(writer, "{},{}", label, value)?;
        }
    }
    writer.flush()?;
    info!("Saved {} rows to {}", rows.len(), path);
    Ok(())
}
