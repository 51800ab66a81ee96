//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod inspect_command;
pub mod extract_command;
pub mod sample_command;

pub use command_traits::{Command, CommandFactory};
pub use inspect_command::InspectCommand;
pub use extract_command::ExtractCommand;
pub use sample_command::SampleCommand;

use clap::ArgMatches;
use crate::api::GeoSlice;
use crate::raster::{GridError, GridResult};

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct GeoSliceCommandFactory;

impl GeoSliceCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        GeoSliceCommandFactory
    }
}

impl Default for GeoSliceCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for GeoSliceCommandFactory {
    fn create_command(&self, args: &ArgMatches, api: &'a GeoSlice) -> GridResult<Box<dyn Command + 'a>> {
        if args.get_flag("extract") {
            Ok(Box::new(ExtractCommand::new(args, api)?))
        } else if args.contains_id("sample") {
            Ok(Box::new(SampleCommand::new(args, api)?))
        } else {
            // Default to inspecting the inputs
            Ok(Box::new(InspectCommand::new(args, api)?))
        }
    }
}

/// Input paths, in the order given
pub(crate) fn input_files(args: &ArgMatches) -> GridResult<Vec<String>> {
    let inputs: Vec<String> = args
        .get_many::<String>("input")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    if inputs.is_empty() {
        return Err(GridError::GenericError("Missing input file".to_string()));
    }
    Ok(inputs)
}
