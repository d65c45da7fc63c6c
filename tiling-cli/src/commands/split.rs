//! `tiling split`: cut a source image into tile files.

use std::path::PathBuf;

use clap::Args;
use tiling::config::ConfigFile;
use tiling::export::write_tiles_with_progress;
use tiling::Tiling;

use super::common::{self, GridArgs, OutputArgs};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Source image
    pub source: PathBuf,

    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the split command.
pub fn run(args: SplitArgs, config: &ConfigFile) -> Result<(), CliError> {
    let grid_config = args.grid.resolve(config)?;
    let options = args.output.resolve(config);

    let mut tiling = Tiling::new(grid_config);
    tiling.apply(args.source.as_path())?;
    let grid = tiling.bound()?;

    println!(
        "Splitting {} ({}) into {} tiles of {}px, stride {}",
        args.source.display(),
        grid.dimensions(),
        grid.tile_count(),
        grid_config.tile_size(),
        grid_config.stride()
    );

    let progress = common::tile_progress(grid.tile_count());
    let summary = write_tiles_with_progress(grid, tiling.codec().as_ref(), &options, |n| {
        progress.set_position(n as u64)
    });
    progress.finish_and_clear();
    let summary = summary?;

    println!(
        "Wrote {} tiles and {} derivatives to {}",
        summary.tiles_written,
        summary.derivatives_written,
        options.target_dir.display()
    );
    Ok(())
}
