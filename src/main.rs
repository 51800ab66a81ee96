use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

use geoslice::api::GeoSlice;
use geoslice::commands::{CommandFactory, GeoSliceCommandFactory};
use geoslice::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("GeoSlice")
        .version("1.0")
        .about("Regional extraction and masking of gridded geophysical products")
        .arg(
            Arg::new("input")
                .help("Input product file(s)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("descriptor")
                .long("descriptor")
                .help("Grid descriptor (TOML) for flat binary inputs")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("variable")
                .long("variable")
                .help("Variable to extract or sample")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("band")
                .long("band")
                .help("Band (time step) of the variable")
                .value_name("INDEX")
                .required(false),
        )
        .arg(
            Arg::new("extract")
                .short('e')
                .long("extract")
                .help("Extract a regional subset")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file (.png, .csv or .json)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("bbox")
                .long("bbox")
                .help("Bounding box for extraction (min_lon,min_lat,max_lon,max_lat)")
                .value_name("BBOX")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("regions")
                .long("regions")
                .help("Region file (TOML)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("region")
                .long("region")
                .help("Name of the region to keep")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("quality-bit")
                .long("quality-bit")
                .help("Drop cells whose quality flag bit is set (FLAGS:BIT)")
                .value_name("FLAGS:BIT")
                .required(false),
        )
        .arg(
            Arg::new("no-fill-mask")
                .long("no-fill-mask")
                .help("Allow variables without a fill value")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("product")
                .long("product")
                .help("Product whose colour scale is used (defaults to the variable name)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("color-scales")
                .long("color-scales")
                .help("Colour table (TOML) replacing the built-in one")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("array-format")
                .long("array-format")
                .help("Format for array output (csv, json)")
                .value_name("FORMAT")
                .required(false),
        )
        .arg(
            Arg::new("sample")
                .long("sample")
                .help("Sample the cell nearest to a point in every input")
                .value_name("LON,LAT")
                .allow_hyphen_values(true)
                .required(false),
        )
        .get_matches();

    if let Err(e) = Logger::init_global_logger("geoslice-global.log", matches.get_flag("verbose")) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let api = match GeoSlice::new(Some("geoslice.log")) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let factory = GeoSliceCommandFactory::new();

    match factory.create_command(&matches, &api) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            process::exit(1);
        }
    };
}
