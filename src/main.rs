use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

use tomokit::utils::logger::Logger;
use tomokit::commands::{CommandFactory, TomokitCommandFactory};

fn main() {
    let matches = ClapCommand::new("TomoKit")
        .version("0.1")
        .author("Gavin Rice")
        .about("Extract subvolumes from cryo-ET tomograms and project them to 2D")
        .arg(
            Arg::new("star")
                .long("star")
                .help("STAR file naming already-extracted 3D subvolumes; selects projection-only mode")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("tomograms")
                .long("tomograms")
                .help("Text file listing tomogram base names (extraction mode)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("vol-dir")
                .long("vol-dir")
                .help("Directory containing tomogram volumes (extraction mode)")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("coord-dir")
                .long("coord-dir")
                .help("Directory containing coordinate files (extraction mode)")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("out")
                .short('o')
                .long("out")
                .help("Output directory")
                .value_name("DIR")
                .required(true),
        )
        .arg(
            Arg::new("boxsize")
                .long("boxsize")
                .help("Subvolume box size in voxels, positive and even (extraction mode)")
                .value_name("PX")
                .required(false),
        )
        .arg(
            Arg::new("id")
                .long("id")
                .help("Particle name used in output filenames (extraction mode)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("project2d")
                .long("project2d")
                .help("Also project every extracted subvolume to a 2D image")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("slices")
                .short('n')
                .long("slices")
                .help("Number of central Z sections summed per projection")
                .value_name("N")
                .default_value("1")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Err(e) = Logger::init_global_logger("tomokit.log", matches.get_flag("verbose")) {
        eprintln!("Error initializing logger: {}", e);
        process::exit(1);
    }

    let factory = TomokitCommandFactory::new();

    match factory.create_command(&matches) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
