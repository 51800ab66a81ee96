//! Regional extraction command
//!
//! This module implements the command that cuts a bounding box and/or a
//! named region out of one product, optionally drops quality-flagged cells,
//! and writes the result as a coloured PNG or as a CSV/JSON array.

use std::path::Path;
use clap::ArgMatches;
use log::{info, warn};

use crate::api::{ExtractRequest, Extraction, GeoSlice};
use crate::colormap::{save_png, ProductTable};
use crate::commands::command_traits::Command;
use crate::coordinate::BoundingBox;
use crate::io::{save_array, ArrayFormat};
use crate::raster::{GridError, GridResult};
use crate::regions::{load_regions, RegionSet};

/// Command for extracting a regional subset of a product
pub struct ExtractCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Grid descriptor for flat binary inputs
    descriptor: Option<String>,
    /// Path to the output file
    output_file: String,
    /// What to extract
    request: ExtractRequest,
    /// Region file, required with `--region`
    regions_file: Option<String>,
    /// Product whose colour scale is used for PNG output
    product: String,
    /// Colour table file replacing the built-in one
    color_scales: Option<String>,
    /// Array format forced on the command line
    array_format: Option<String>,
    /// Library facade
    api: &'a GeoSlice,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `api` - Library facade
    ///
    /// # Returns
    /// A new ExtractCommand instance or an error
    pub fn new(args: &ArgMatches, api: &'a GeoSlice) -> GridResult<Self> {
        let inputs = super::input_files(args)?;
        if inputs.len() > 1 {
            warn!("Extraction uses only the first of {} inputs", inputs.len());
        }
        let input_file = inputs[0].clone();

        let output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| GridError::GenericError("Missing output file path for extraction".to_string()))?
            .clone();

        let variable = args
            .get_one::<String>("variable")
            .ok_or_else(|| GridError::GenericError("Missing --variable for extraction".to_string()))?
            .clone();

        let band = match args.get_one::<String>("band") {
            Some(text) => text
                .parse::<usize>()
                .map_err(|_| GridError::GenericError(format!("Invalid band index: {}", text)))?,
            None => 0,
        };

        let mut request = ExtractRequest::new(&variable)
            .with_band(band)
            .with_fill_mask(!args.get_flag("no-fill-mask"));

        if let Some(bbox_str) = args.get_one::<String>("bbox") {
            request = request.with_bbox(BoundingBox::from_string(bbox_str)?);
        }
        if let Some(quality) = args.get_one::<String>("quality-bit") {
            let (flags, bit) = parse_quality_bit(quality)?;
            request = request.with_quality_bit(&flags, bit);
        }
        if let Some(region) = args.get_one::<String>("region") {
            request = request.with_region(region);
        }

        info!("Extraction request: {:?}", request);

        Ok(ExtractCommand {
            input_file,
            descriptor: args.get_one::<String>("descriptor").cloned(),
            output_file,
            regions_file: args.get_one::<String>("regions").cloned(),
            product: args.get_one::<String>("product").cloned().unwrap_or(variable),
            color_scales: args.get_one::<String>("color-scales").cloned(),
            array_format: args.get_one::<String>("array-format").cloned(),
            request,
            api,
        })
    }

    fn load_regions(&self) -> GridResult<Option<RegionSet>> {
        match &self.regions_file {
            Some(path) => Ok(Some(load_regions(path)?)),
            None => Ok(None),
        }
    }

    fn output_is_png(&self) -> bool {
        self.array_format.is_none() && output_extension(&self.output_file).as_deref() == Some("png")
    }

    /// Render with the product's colour scale
    fn save_image(&self, extraction: &Extraction) -> GridResult<()> {
        let table = match &self.color_scales {
            Some(path) => ProductTable::from_file(path)?,
            None => ProductTable::builtin()?,
        };
        let scale = table.get(&self.product)?;
        info!("Rendering {} with the {} scale of {}", extraction.variable, scale.kind(), self.product);

        let written = save_png(&extraction.render(scale), &self.output_file)?;
        println!("Wrote {}", written);
        Ok(())
    }

    /// Write the values as CSV or JSON
    fn save_values(&self, extraction: &Extraction) -> GridResult<()> {
        let format = match (&self.array_format, output_extension(&self.output_file)) {
            (Some(name), _) => ArrayFormat::from_name(name)?,
            (None, Some(ext)) => ArrayFormat::from_name(&ext)?,
            (None, None) => ArrayFormat::Csv,
        };

        save_array(&extraction.grid, &self.output_file, format)?;
        println!("Wrote {}", self.output_file);
        Ok(())
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> GridResult<()> {
        info!("Extracting {} from {} to {}", self.request.variable, self.input_file, self.output_file);

        let regions = self.load_regions()?;
        let source = self.api.open(&self.input_file, self.descriptor.as_deref())?;
        let extraction = self.api.extract(source.as_ref(), &self.request, regions.as_ref())?;

        match extraction.statistics() {
            Some(s) => println!(
                "{} {}x{}: min {:.4}, max {:.4}, mean {:.4} ({} valid, {} missing)",
                extraction.variable,
                extraction.grid.rows(),
                extraction.grid.cols(),
                s.min,
                s.max,
                s.mean,
                s.valid,
                s.missing
            ),
            None => warn!("Extraction of {} holds no valid cells", extraction.variable),
        }

        if self.output_is_png() {
            self.save_image(&extraction)
        } else {
            self.save_values(&extraction)
        }
    }
}

/// Parse `FLAGS:BIT`, e.g. `Q_FLAGS:3`
pub fn parse_quality_bit(text: &str) -> GridResult<(String, u32)> {
    let Some((flags, bit)) = text.rsplit_once(':') else {
        return Err(GridError::GenericError(format!(
            "Quality bit must be given as FLAGS:BIT, got '{}'",
            text
        )));
    };
    let bit = bit
        .trim()
        .parse::<u32>()
        .map_err(|_| GridError::GenericError(format!("Invalid bit position: {}", bit)))?;
    Ok((flags.trim().to_string(), bit))
}

fn output_extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}
