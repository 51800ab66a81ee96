use image::RgbaImage;
use log::{debug, info, warn};

use crate::colormap::{colorize, ColorScale};
use crate::coordinate::{BoundingBox, CoordinateAxis, Point};
use crate::extractor::{round_to, sample_point, slice_bbox, Window};
use crate::io::{RasterSource, SourceFactory};
use crate::raster::{apply_quality_flag, decode, Encoding, Grid, GridError, GridResult, Statistics};
use crate::regions::{rasterize_region_mask, select_region, RegionSet};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;
use crate::utils::time_utils::{date_from_filename, format_utc, parse_reference_time};

/// What to cut out of a product
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractRequest {
    /// Variable to read
    pub variable: String,
    /// Band along the leading dimension
    pub band: usize,
    /// Region of interest; None keeps the full grid
    pub bbox: Option<BoundingBox>,
    /// Flag variable and bit; cells with the bit set become NaN
    pub quality: Option<(String, u32)>,
    /// Region to keep, looked up in the region set passed to `extract`
    pub region: Option<String>,
    /// Fail with `InvalidFillValue` when the variable has no fill value
    pub mask_fill: bool,
}

impl ExtractRequest {
    /// Request the whole of band 0 of a variable
    pub fn new(variable: &str) -> Self {
        ExtractRequest {
            variable: variable.to_string(),
            band: 0,
            bbox: None,
            quality: None,
            region: None,
            mask_fill: true,
        }
    }

    pub fn with_band(mut self, band: usize) -> Self {
        self.band = band;
        self
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_quality_bit(mut self, flags: &str, bit: u32) -> Self {
        self.quality = Some((flags.to_string(), bit));
        self
    }

    pub fn with_region(mut self, name: &str) -> Self {
        self.region = Some(name.to_string());
        self
    }

    pub fn with_fill_mask(mut self, mask_fill: bool) -> Self {
        self.mask_fill = mask_fill;
        self
    }
}

/// Decoded subset of a variable with its coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Variable the values come from
    pub variable: String,
    /// Physical values, NaN where missing, flagged or outside the region
    pub grid: Grid<f64>,
    /// Latitudes of the rows
    pub lat: CoordinateAxis,
    /// Longitudes of the columns
    pub lon: CoordinateAxis,
    /// Position of the subset in the source grid
    pub window: Window,
    /// Region the values were restricted to
    pub region: Option<String>,
}

impl Extraction {
    /// Statistics over the valid cells
    pub fn statistics(&self) -> Option<Statistics> {
        self.grid.statistics()
    }

    /// Render with a colour scale, north up
    pub fn render(&self, scale: &ColorScale) -> RgbaImage {
        colorize(&self.grid, scale, self.lat.orientation())
    }
}

/// Main interface to the geoslice library
pub struct GeoSlice {
    logger: Logger,
}

impl GeoSlice {
    /// Create a new GeoSlice instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "geoslice.log"
    ///
    /// # Returns
    /// A GeoSlice instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> GridResult<Self> {
        let log_path = log_file.unwrap_or("geoslice.log");
        let logger = Logger::new(log_path)?;
        Ok(GeoSlice { logger })
    }

    /// Open a product file
    ///
    /// # Arguments
    /// * `input_path` - Product file
    /// * `descriptor` - Optional grid descriptor for flat binary files
    pub fn open(&self, input_path: &str, descriptor: Option<&str>) -> GridResult<Box<dyn RasterSource>> {
        self.logger.log(&format!("Opening {}", input_path))?;
        SourceFactory::open(input_path, descriptor)
    }

    /// Describe the variables, axes and time of a source
    ///
    /// # Arguments
    /// * `source` - Opened product
    /// * `file_name` - File name, used to recover a date when no reference time is stored
    ///
    /// # Returns
    /// A multi-line report
    pub fn inspect(&self, source: &dyn RasterSource, file_name: &str) -> GridResult<String> {
        let mut lines = vec![format!("Source: {}", source.describe())];

        match source.global_attribute("reference_time").and_then(|v| v.as_str().map(str::to_string)) {
            Some(text) => lines.push(format!("Reference time: {}", format_utc(&parse_reference_time(&text)?))),
            None => {
                if let Some(date) = date_from_filename(file_name) {
                    lines.push(format!("Date (from file name): {}", date.format("%Y-%m-%d")));
                }
            }
        }

        let (lat, lon) = source.axes()?;
        lines.push(describe_axis("Latitude", &lat));
        lines.push(describe_axis("Longitude", &lon));

        for name in source.variables() {
            let bands = match source.band_count(&name) {
                Ok(bands) => bands,
                // Flag variables have no decodable bands
                Err(GridError::VariableNotFound(_)) => {
                    lines.push(format!("Variable {}: flags", name));
                    continue;
                }
                Err(e) => return Err(e),
            };

            let variable = source.read_variable(&name, 0)?;
            let encoding = Encoding::from_attributes(&variable.attributes)?;
            lines.push(format!(
                "Variable {}: {} band(s) of {}x{}, fill {:?}, scale {}, offset {}",
                name,
                bands,
                variable.grid.rows(),
                variable.grid.cols(),
                encoding.fill_value,
                encoding.scale,
                encoding.offset
            ));
            for (key, value) in variable.attributes.iter() {
                lines.push(format!("  {} = {}", key, value));
            }
            match decode(&variable.grid, &encoding).statistics() {
                Some(s) => lines.push(format!(
                    "  band 0: min {:.4}, max {:.4}, mean {:.4}, {} valid, {} missing",
                    s.min, s.max, s.mean, s.valid, s.missing
                )),
                None => lines.push("  band 0: no valid cells".to_string()),
            }
        }

        self.logger.log_block("Inspection:", &lines)?;
        Ok(lines.join("\n"))
    }

    /// Cut a decoded subset out of a source
    ///
    /// Steps: read the band, slice to the bounding box (expressed in the
    /// longitude convention of the grid), decode fill/scale/offset, drop
    /// flagged cells, then keep only the requested region.
    ///
    /// # Arguments
    /// * `source` - Opened product
    /// * `request` - What to extract
    /// * `regions` - Region set, required when the request names a region
    ///
    /// # Returns
    /// The decoded subset, or the first error hit along the way
    pub fn extract(
        &self,
        source: &dyn RasterSource,
        request: &ExtractRequest,
        regions: Option<&RegionSet>,
    ) -> GridResult<Extraction> {
        // Resolve the region first so a bad name fails before any reading
        let region_index = match (&request.region, regions) {
            (Some(name), Some(set)) => Some(set.index_of(name)?),
            (Some(name), None) => {
                return Err(GridError::ConfigError(format!(
                    "Region '{}' requested without a region file",
                    name
                )))
            }
            (None, _) => None,
        };

        let variable = source.read_variable(&request.variable, request.band)?;
        let encoding = Encoding::from_attributes(&variable.attributes)?;
        if request.mask_fill {
            encoding.require_fill(&request.variable)?;
        }

        let (lat, lon) = source.axes()?;
        let full_shape = (lat.len(), lon.len());
        variable.grid.check_shape(full_shape)?;

        let (raw, lat, lon, window) = match &request.bbox {
            Some(bbox) => {
                let bbox = bbox.normalized_to(lon.longitude_convention())?;
                let subset = slice_bbox(&variable.grid, &lat, &lon, &bbox)?;
                (subset.grid, subset.lat, subset.lon, subset.window)
            }
            None => {
                let window = Window::new(0, 0, full_shape.0, full_shape.1);
                (variable.grid, lat, lon, window)
            }
        };

        let mut grid = decode(&raw, &encoding);
        debug!("Decoded {}: {} of {} cells valid", request.variable, grid.valid_count(), grid.len());

        if let Some((flag_name, bit)) = &request.quality {
            let flags = source.read_flags(flag_name, request.band)?;
            if flags.shape() != full_shape {
                return Err(GridError::ShapeMismatch { expected: full_shape, actual: flags.shape() });
            }
            let flagged = flags.window(&window)?.extract_bit(*bit)?;
            grid = apply_quality_flag(&grid, &flagged)?;
            info!("Masked cells with {} bit {} set: {} valid remain", flag_name, bit, grid.valid_count());
        }

        if let (Some(index), Some(set)) = (region_index, regions) {
            let mask = rasterize_region_mask(set, &lon, &lat);
            if mask.count(index) == 0 {
                warn!("Region '{}' covers no cell centre of the extracted grid", set.names()[index]);
            }
            grid = select_region(&grid, &mask, index)?;
        }

        self.logger.log(&format!(
            "Extracted {} band {}: {}x{} cells at rows {}..{}, cols {}..{}",
            request.variable,
            request.band,
            grid.rows(),
            grid.cols(),
            window.row,
            window.end_row(),
            window.col,
            window.end_col()
        ))?;

        Ok(Extraction {
            variable: request.variable.clone(),
            grid,
            lat,
            lon,
            window,
            region: request.region.clone(),
        })
    }

    /// Physical value of the cell nearest to a point
    ///
    /// # Arguments
    /// * `source` - Opened product
    /// * `variable` - Variable to sample
    /// * `band` - Band to sample
    /// * `point` - Location
    ///
    /// # Returns
    /// The decoded value; NaN if the cell holds the fill value
    pub fn sample(&self, source: &dyn RasterSource, variable: &str, band: usize, point: &Point) -> GridResult<f64> {
        let data = source.read_variable(variable, band)?;
        let encoding = Encoding::from_attributes(&data.attributes)?;
        let (lat, lon) = source.axes()?;
        let value = sample_point(&decode(&data.grid, &encoding), &lat, &lon, point)?;
        self.logger.log(&format!("Sampled {} at ({}, {}): {}", variable, point.lon, point.lat, value))?;
        Ok(value)
    }

    /// Sample the same point across a series of files
    ///
    /// Files are processed in name order. Each row is labelled with the date
    /// recovered from the file name, or the file name itself when none is
    /// found, and values are rounded to `decimals` places.
    ///
    /// # Arguments
    /// * `inputs` - Product files, one time step each
    /// * `descriptor` - Optional grid descriptor shared by every file
    /// * `variable` - Variable to sample
    /// * `point` - Location
    /// * `decimals` - Decimal places kept in the output
    pub fn time_series(
        &self,
        inputs: &[String],
        descriptor: Option<&str>,
        variable: &str,
        point: &Point,
        decimals: u32,
    ) -> GridResult<Vec<(String, f64)>> {
        let mut files = inputs.to_vec();
        files.sort();

        let progress = ProgressTracker::new(files.len() as u64, "Sampling");
        let mut rows = Vec::with_capacity(files.len());

        for file in &files {
            let source = self.open(file, descriptor)?;
            let value = self.sample(source.as_ref(), variable, 0, point)?;

            let name = file_name(file);
            let label = match date_from_filename(&name) {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => name,
            };
            rows.push((label, round_to(value, decimals)));
            progress.increment(1);
        }

        progress.finish();
        info!("Sampled {} files at ({}, {})", rows.len(), point.lon, point.lat);
        Ok(rows)
    }
}

fn describe_axis(label: &str, axis: &CoordinateAxis) -> String {
    format!(
        "{}: {} values from {} to {} ({}, spacing {})",
        label,
        axis.len(),
        axis.min(),
        axis.max(),
        axis.orientation().name(),
        axis.spacing()
    )
}

fn file_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}
