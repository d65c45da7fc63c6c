//! Configuration file CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use clap::Subcommand;
use tiling::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init { force } => run_init(force),
    }
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path()?.display());
    Ok(())
}

fn run_show() -> Result<(), CliError> {
    let path = config_file_path()?;
    let config = ConfigFile::load_from(&path)?;

    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    println!();
    println!("[grid]");
    println!("  size   = {}", config.grid.size);
    match config.grid.stride {
        Some(stride) => println!("  stride = {}", stride),
        None => println!("  stride = (tile size)"),
    }
    println!();
    println!("[output]");
    println!("  directory = {}", config.output.directory.display());
    println!("  format    = {}", config.output.format);
    println!(
        "  prefix    = {}",
        config.output.prefix.as_deref().unwrap_or("(source name)")
    );
    println!("  rotate    = {}", config.output.rotate);
    println!("  flip      = {}", config.output.flip);
    println!();
    println!("[filter]");
    println!("  lower = {}", config.filter.lower);
    println!("  upper = {}", config.filter.upper);
    println!();
    println!("[assemble]");
    println!("  mode = {}", config.assemble.mode);
    println!();
    println!("[logging]");
    println!("  level = {}", config.logging.level);
    match &config.logging.file {
        Some(file) => println!("  file  = {}", file.display()),
        None => println!("  file  = (stderr only)"),
    }
    Ok(())
}

fn run_init(force: bool) -> Result<(), CliError> {
    let path = config_file_path()?;
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists; use --force to overwrite",
            path.display()
        )));
    }
    ConfigFile::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
