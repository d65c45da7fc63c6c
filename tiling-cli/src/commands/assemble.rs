//! `tiling assemble`: paste tile files back onto a blank canvas.

use std::path::PathBuf;

use clap::Args;
use tiling::config::ConfigFile;
use tiling::{assemble_detailed, Tiling};
use tracing::info;

use super::common::{self, CanvasMode, DimensionArgs, GridArgs};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct AssembleArgs {
    /// Tile files or directories of tiles
    #[arg(required = true)]
    pub tiles: Vec<PathBuf>,

    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub dimensions: DimensionArgs,

    /// Canvas color mode (defaults to the configured mode)
    #[arg(long, value_enum, ignore_case = true)]
    pub mode: Option<CanvasMode>,

    /// Extension of tile files picked up from directories
    #[arg(long)]
    pub format: Option<String>,

    /// Output image file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Run the assemble command.
pub fn run(args: AssembleArgs, config: &ConfigFile) -> Result<(), CliError> {
    let grid_config = args.grid.resolve(config)?;
    let mode = common::resolve_color_mode(args.mode, config);
    let extension = args
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .trim_start_matches('.');
    let paths = common::expand_tile_paths(&args.tiles, extension)?;
    info!(tiles = paths.len(), "Collected tile files");

    let mut tiling = Tiling::new(grid_config);
    tiling.apply(args.dimensions.placeholder()?)?;
    let grid = tiling.bound()?;
    let codec = tiling.codec();

    let assembly = assemble_detailed(grid, codec.as_ref(), paths, mode)?;
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        codec.ensure_dir(parent)?;
    }
    codec.encode(&assembly.canvas, &args.output)?;

    println!(
        "Assembled {} tiles ({} derivatives skipped) into {} ({}, {})",
        assembly.placed,
        assembly.skipped,
        args.output.display(),
        grid.dimensions(),
        mode
    );
    Ok(())
}
