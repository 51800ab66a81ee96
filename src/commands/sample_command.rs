//! Point sampling command
//!
//! Samples the cell nearest to a point in every input file and prints or
//! writes the resulting series.

use clap::ArgMatches;
use log::info;

use crate::api::GeoSlice;
use crate::commands::command_traits::Command;
use crate::coordinate::Point;
use crate::io::save_series;
use crate::raster::{GridError, GridResult};

/// Decimal places kept in sampled values
const SAMPLE_DECIMALS: u32 = 2;

/// Command for sampling one location across files
pub struct SampleCommand<'a> {
    inputs: Vec<String>,
    descriptor: Option<String>,
    variable: String,
    point: Point,
    output_file: Option<String>,
    api: &'a GeoSlice,
}

impl<'a> SampleCommand<'a> {
    /// Create a new sample command
    pub fn new(args: &ArgMatches, api: &'a GeoSlice) -> GridResult<Self> {
        let point_str = args
            .get_one::<String>("sample")
            .ok_or_else(|| GridError::GenericError("Missing --sample LON,LAT".to_string()))?;

        let variable = args
            .get_one::<String>("variable")
            .ok_or_else(|| GridError::GenericError("Missing --variable for sampling".to_string()))?
            .clone();

        Ok(SampleCommand {
            inputs: super::input_files(args)?,
            descriptor: args.get_one::<String>("descriptor").cloned(),
            variable,
            point: Point::from_string(point_str)?,
            output_file: args.get_one::<String>("output").cloned(),
            api,
        })
    }
}

impl<'a> Command for SampleCommand<'a> {
    fn execute(&self) -> GridResult<()> {
        info!(
            "Sampling {} at ({}, {}) across {} files",
            self.variable,
            self.point.lon,
            self.point.lat,
            self.inputs.len()
        );

        let series = self.api.time_series(
            &self.inputs,
            self.descriptor.as_deref(),
            &self.variable,
            &self.point,
            SAMPLE_DECIMALS,
        )?;

        match &self.output_file {
            Some(path) => {
                save_series(&series, &self.variable, path)?;
                println!("Wrote {} rows to {}", series.len(), path);
            }
            None => {
                println!("date,{}", self.variable);
                for (label, value) in &series {
                    if value.is_nan() {
                        println!("{},", label);
                    } else {
                        println!("{},{}", label, value);
                    }
                }
            }
        }
        Ok(())
    }
}
