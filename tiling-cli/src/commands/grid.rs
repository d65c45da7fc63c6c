//! `tiling grid`: print the grid shape and tile rectangles for an image size.

use clap::Args;
use tiling::config::ConfigFile;
use tiling::{tile_rects_for, GridShape};

use super::common::{DimensionArgs, GridArgs};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct GridCommandArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub dimensions: DimensionArgs,
}

/// Run the grid command.
pub fn run(args: GridCommandArgs, config: &ConfigFile) -> Result<(), CliError> {
    let grid_config = args.grid.resolve(config)?;
    let dims = args.dimensions.dimensions()?;
    let shape = GridShape::compute(dims, &grid_config);

    println!("Image:  {}", dims);
    println!(
        "Tile:   {}px, stride {}{}",
        grid_config.tile_size(),
        grid_config.stride(),
        if grid_config.overlaps() { " (overlapping)" } else { "" }
    );
    println!("Shape:  {} rows × {} cols", shape.rows, shape.cols);
    println!("Tiles:  {}", shape.tile_count());
    println!();

    for rect in tile_rects_for(&grid_config, dims) {
        println!("{}", rect);
    }
    Ok(())
}
