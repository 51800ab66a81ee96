//! Product inspection command
//!
//! Prints the variables, coordinate axes, encoding and statistics of each
//! input file.

use std::path::Path;
use clap::ArgMatches;
use log::info;

use crate::api::GeoSlice;
use crate::commands::command_traits::Command;
use crate::raster::GridResult;

/// Command for describing product files
pub struct InspectCommand<'a> {
    /// Files to inspect
    inputs: Vec<String>,
    /// Grid descriptor for flat binary inputs
    descriptor: Option<String>,
    /// Library facade
    api: &'a GeoSlice,
}

impl<'a> InspectCommand<'a> {
    /// Create a new inspect command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `api` - Library facade
    pub fn new(args: &ArgMatches, api: &'a GeoSlice) -> GridResult<Self> {
        Ok(InspectCommand {
            inputs: super::input_files(args)?,
            descriptor: args.get_one::<String>("descriptor").cloned(),
            api,
        })
    }
}

impl<'a> Command for InspectCommand<'a> {
    fn execute(&self) -> GridResult<()> {
        for input in &self.inputs {
            info!("Inspecting {}", input);
            let source = self.api.open(input, self.descriptor.as_deref())?;

            let name = Path::new(input)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| input.clone());
            let report = self.api.inspect(source.as_ref(), &name)?;

            println!("{}", report);
            println!();
        }
        Ok(())
    }
}
