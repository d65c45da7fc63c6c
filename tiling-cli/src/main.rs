//! Tiling CLI - command-line interface
//!
//! Splits images into square tiles, filters them by mean intensity, and
//! reassembles tile files into a single image.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tiling::config::ConfigFile;
use tiling::logging::init_logging;

use commands::assemble::AssembleArgs;
use commands::config::ConfigCommands;
use commands::filter::FilterArgs;
use commands::grid::GridCommandArgs;
use commands::split::SplitArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "tiling")]
#[command(version = tiling::VERSION)]
#[command(about = "Slice images into square tiles and reassemble them", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cut an image into tile files
    Split(SplitArgs),

    /// Write only tiles whose mean intensity is within thresholds
    Filter(FilterArgs),

    /// Paste tile files back into one image
    Assemble(AssembleArgs),

    /// Print grid shape and tile rectangles for an image size
    Grid(GridCommandArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // config commands must work even when the file is broken
    if let Commands::Config { command } = cli.command {
        return commands::config::run(command);
    }

    let config = ConfigFile::load()?;
    let mut logging = config.logging_config();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    let _guard = init_logging(&logging)?;

    match cli.command {
        Commands::Split(args) => commands::split::run(args, &config),
        Commands::Filter(args) => commands::filter::run(args, &config),
        Commands::Assemble(args) => commands::assemble::run(args, &config),
        Commands::Grid(args) => commands::grid::run(args, &config),
        Commands::Config { .. } => Ok(()),
    }
}
